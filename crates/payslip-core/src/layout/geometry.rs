use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PayslipError;

/// Gap left between a reference box and a box derived to its side, so the
/// derived box never touches the reference.
pub const EPS: f64 = 1e-6;

/// An (x, y) coordinate pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned bounding box in page coordinates (y grows upwards, so
/// `top > bottom` for a non-degenerate box).
///
/// All derivations return a new box; the receiver is never modified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl BBox {
    /// The zero box, used for "no box".
    pub const NULL: BBox = BBox {
        left: 0.0,
        right: 0.0,
        top: 0.0,
        bottom: 0.0,
    };

    /// Builds a box from the `left,bottom,right,top` order used by layout dumps.
    pub fn new(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        BBox {
            left,
            right,
            top,
            bottom,
        }
    }

    pub fn is_null(&self) -> bool {
        *self == BBox::NULL
    }

    pub fn bottom_left(&self) -> Point {
        Point {
            x: self.left,
            y: self.bottom,
        }
    }

    pub fn bottom_right(&self) -> Point {
        Point {
            x: self.right,
            y: self.bottom,
        }
    }

    pub fn top_left(&self) -> Point {
        Point {
            x: self.left,
            y: self.top,
        }
    }

    pub fn top_right(&self) -> Point {
        Point {
            x: self.right,
            y: self.top,
        }
    }

    pub fn corners(&self) -> [Point; 4] {
        [
            self.bottom_left(),
            self.bottom_right(),
            self.top_left(),
            self.top_right(),
        ]
    }

    /// Whether `p` lies within the edges, inclusive.
    ///
    /// Uses sign-of-product tests, so zero-width or zero-height boxes still
    /// contain the points on their single line.
    pub fn contains(&self, p: Point) -> bool {
        (p.x - self.left) * (p.x - self.right) <= 0.0
            && (p.y - self.top) * (p.y - self.bottom) <= 0.0
    }

    /// Whether this box contains any corner of `other`.
    pub fn has_corner_of(&self, other: &BBox) -> bool {
        other.corners().iter().any(|c| self.contains(*c))
    }

    /// Whether the horizontal extent of this box brackets that of `other`.
    pub fn subsumes_width(&self, other: &BBox) -> bool {
        monotonic(self.left, other.left, self.right)
            && monotonic(self.left, other.right, self.right)
    }

    /// Whether the vertical extent of this box brackets that of `other`.
    pub fn subsumes_height(&self, other: &BBox) -> bool {
        monotonic(self.bottom, other.bottom, self.top)
            && monotonic(self.bottom, other.top, self.top)
    }

    pub fn extend_left(self) -> BBox {
        BBox {
            left: f64::NEG_INFINITY,
            ..self
        }
    }

    pub fn extend_right(self) -> BBox {
        BBox {
            right: f64::INFINITY,
            ..self
        }
    }

    pub fn extend_top(self) -> BBox {
        BBox {
            top: f64::INFINITY,
            ..self
        }
    }

    pub fn extend_bottom(self) -> BBox {
        BBox {
            bottom: f64::NEG_INFINITY,
            ..self
        }
    }

    pub fn widen(self, delta: f64) -> BBox {
        BBox {
            left: self.left - delta,
            right: self.right + delta,
            ..self
        }
    }

    pub fn heighten(self, delta: f64) -> BBox {
        BBox {
            top: self.top + delta,
            bottom: self.bottom - delta,
            ..self
        }
    }

    pub fn with_left(self, left: f64) -> BBox {
        BBox { left, ..self }
    }

    pub fn with_right(self, right: f64) -> BBox {
        BBox { right, ..self }
    }

    pub fn with_top(self, top: f64) -> BBox {
        BBox { top, ..self }
    }

    /// Moves the bottom edge to `bottom`.
    pub fn extend_down_to(self, bottom: f64) -> BBox {
        BBox { bottom, ..self }
    }

    /// Everything strictly right of this box, within its vertical extent.
    pub fn right_of(self) -> BBox {
        BBox {
            left: self.right + EPS,
            right: f64::INFINITY,
            ..self
        }
    }

    /// This box with its top pulled just below the bottom of `other`.
    pub fn below(self, other: &BBox) -> BBox {
        BBox {
            top: other.bottom - EPS,
            ..self
        }
    }
}

impl fmt::Display for BBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{bbox left:{}, right:{}, top:{}, bottom:{}}}",
            self.left, self.right, self.top, self.bottom
        )
    }
}

impl FromStr for BBox {
    type Err = PayslipError;

    /// Parses `left,bottom,right,top`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PayslipError::InvalidBBox {
            value: s.to_string(),
        };
        let coords = s
            .split(',')
            .map(|c| c.trim().parse::<f64>().map_err(|_| invalid()))
            .collect::<Result<Vec<f64>, _>>()?;
        match coords.as_slice() {
            [left, bottom, right, top] => Ok(BBox::new(*left, *bottom, *right, *top)),
            _ => Err(invalid()),
        }
    }
}

/// Whether `y` lies between `x` and `z` inclusive, in either order.
pub fn monotonic(x: f64, y: f64, z: f64) -> bool {
    (y - z) * (y - x) <= 0.0
}

/// Whether boxes `a` and `b` overlap.
///
/// Either box holding a corner of the other counts, and so does a cross
/// where one box spans the other's width while the other spans its height.
/// Boxes extended to infinity rarely have corners inside anything, which is
/// what the cross test catches.
pub fn intersects(a: &BBox, b: &BBox) -> bool {
    a.has_corner_of(b)
        || b.has_corner_of(a)
        || (b.subsumes_width(a) && a.subsumes_height(b))
        || (a.subsumes_width(b) && b.subsumes_height(a))
}
