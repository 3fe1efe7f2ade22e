//! Bounding boxes of a page drawn as rectangle outlines, for checking what
//! the layout dump actually contains.

use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};
use payslip_core::error::{PayslipError, ResultExt};
use payslip_core::layout::{BBox, Page};

/// Pixels per layout point.
pub const SCALE: f64 = 10.0;

const PAPER: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);
const INK: Rgba<u8> = Rgba([0x00, 0x00, 0x00, 0xff]);

/// Page coordinates to pixels: y grows upwards on the page, downwards in the
/// image. Anything off the page is clamped to its border.
struct Canvas {
    page: BBox,
    image: RgbaImage,
}

impl Canvas {
    fn new(page: BBox) -> Self {
        let width = ((page.right - page.left) * SCALE).ceil().max(1.0) as u32;
        let height = ((page.top - page.bottom) * SCALE).ceil().max(1.0) as u32;
        Canvas {
            page,
            image: RgbaImage::from_pixel(width, height, PAPER),
        }
    }

    fn x(&self, x: f64) -> u32 {
        let max = self.image.width() - 1;
        ((x - self.page.left) * SCALE).round().clamp(0.0, max as f64) as u32
    }

    fn y(&self, y: f64) -> u32 {
        let max = self.image.height() - 1;
        ((self.page.top - y) * SCALE).round().clamp(0.0, max as f64) as u32
    }

    fn stroke(&mut self, b: &BBox) {
        let (x0, x1) = (self.x(b.left), self.x(b.right));
        let (y0, y1) = (self.y(b.top), self.y(b.bottom));
        for x in x0.min(x1)..=x0.max(x1) {
            self.image.put_pixel(x, y0, INK);
            self.image.put_pixel(x, y1, INK);
        }
        for y in y0.min(y1)..=y0.max(y1) {
            self.image.put_pixel(x0, y, INK);
            self.image.put_pixel(x1, y, INK);
        }
    }
}

/// Every box of `page`, in traversal order, outlined on a blank page.
pub fn render(page: &Page) -> RgbaImage {
    let mut canvas = Canvas::new(page.bbox);
    for bbox in page.boxes() {
        canvas.stroke(&bbox);
    }
    canvas.image
}

pub fn save(page: &Page, path: &Path) -> Result<(), PayslipError> {
    let image = render(page);
    tracing::debug!(width = image.width(), height = image.height(), "rendered page");
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(std::io::Error::other)
        .with_context(|| format!("could not write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use payslip_core::layout::Rect;

    fn page() -> Page {
        Page {
            bbox: BBox::new(0.0, 0.0, 4.0, 3.0),
            rects: vec![Rect {
                linewidth: None,
                bbox: BBox::new(1.0, 1.0, 3.0, 2.0),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_image_covers_page_at_scale() {
        let image = render(&page());
        assert_eq!((image.width(), image.height()), (40, 30));
    }

    #[test]
    fn test_boxes_are_outlined() {
        let image = render(&page());
        // Rect edges: left x=10, right x=30, top y=10, bottom y=20 (flipped).
        for (x, y) in [(10, 15), (30, 15), (20, 10), (20, 20), (10, 10), (30, 20)] {
            assert_eq!(*image.get_pixel(x, y), INK, "pixel ({x}, {y})");
        }
        // Page border, clamped into the image.
        for (x, y) in [(0, 15), (39, 15), (20, 0), (20, 29)] {
            assert_eq!(*image.get_pixel(x, y), INK, "pixel ({x}, {y})");
        }
        // Inside the rect and between the rect and the border.
        for (x, y) in [(20, 15), (5, 5), (35, 25)] {
            assert_eq!(*image.get_pixel(x, y), PAPER, "pixel ({x}, {y})");
        }
    }
}
