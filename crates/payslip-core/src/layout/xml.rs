use std::collections::HashMap;
use std::io::Read;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::PayslipError;
use crate::layout::{
    BBox, Document, Figure, Image, Page, Rect, TextBox, TextGroup, TextLine, TextRun,
};

/// Decode a layout dump (`<pages>` root) read fully from `reader`.
pub fn decode<R: Read>(mut reader: R) -> Result<Document, PayslipError> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    decode_str(&content)
}

/// Decode a layout dump held in memory.
pub fn decode_str(xml: &str) -> Result<Document, PayslipError> {
    let mut parser = Parser {
        reader: Reader::from_str(xml),
    };
    parser.document()
}

/// Attributes of one element, unescaped.
struct Attrs {
    tag: String,
    attrs: HashMap<String, String>,
}

impl Attrs {
    fn from_event(e: &BytesStart<'_>) -> Result<Self, PayslipError> {
        let mut attrs = HashMap::new();
        for attr in e.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = attr.unescape_value()?.to_string();
            attrs.insert(key, value);
        }
        Ok(Self {
            tag: tag_name(e),
            attrs,
        })
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    fn string(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_string)
    }

    /// A missing bbox is the null box.
    fn bbox(&self) -> Result<BBox, PayslipError> {
        match self.get("bbox") {
            Some(v) => v.parse(),
            None => Ok(BBox::NULL),
        }
    }

    fn f64_opt(&self, key: &str) -> Result<Option<f64>, PayslipError> {
        self.get(key)
            .map(|v| {
                v.trim().parse::<f64>().map_err(|_| {
                    PayslipError::Structure(format!(
                        "attribute {key}={v:?} on <{}> is not a number",
                        self.tag
                    ))
                })
            })
            .transpose()
    }
}

fn tag_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_string()
}

struct Parser<'i> {
    reader: Reader<&'i [u8]>,
}

impl<'i> Parser<'i> {
    fn document(&mut self) -> Result<Document, PayslipError> {
        loop {
            match self.reader.read_event()? {
                Event::Start(e) if e.name().as_ref() == b"pages" => {
                    let mut pages = Vec::new();
                    self.children("pages", |p, e, empty| match e.name().as_ref() {
                        b"page" => {
                            pages.push(p.page(e, empty)?);
                            Ok(())
                        }
                        _ => p.skip(e, empty),
                    })?;
                    return Ok(Document { pages });
                }
                Event::Empty(e) if e.name().as_ref() == b"pages" => {
                    return Ok(Document::default());
                }
                Event::Start(e) | Event::Empty(e) => {
                    return Err(PayslipError::Structure(format!(
                        "expected <pages> root element, found <{}>",
                        tag_name(&e)
                    )));
                }
                Event::Eof => {
                    return Err(PayslipError::Structure(
                        "missing <pages> root element".into(),
                    ));
                }
                _ => {}
            }
        }
    }

    /// Feeds every child element of the current element to `on_child` and
    /// consumes the closing tag. Text between children is ignored.
    fn children<F>(&mut self, parent: &str, mut on_child: F) -> Result<(), PayslipError>
    where
        F: FnMut(&mut Self, &BytesStart<'i>, bool) -> Result<(), PayslipError>,
    {
        loop {
            match self.reader.read_event()? {
                Event::Start(e) => on_child(self, &e, false)?,
                Event::Empty(e) => on_child(self, &e, true)?,
                Event::End(_) => return Ok(()),
                Event::Eof => {
                    return Err(PayslipError::Structure(format!(
                        "unexpected end of input inside <{parent}>"
                    )));
                }
                _ => {}
            }
        }
    }

    fn skip(&mut self, e: &BytesStart<'i>, empty: bool) -> Result<(), PayslipError> {
        if !empty {
            self.reader.read_to_end(e.name())?;
        }
        Ok(())
    }

    fn page(&mut self, e: &BytesStart<'i>, empty: bool) -> Result<Page, PayslipError> {
        let attrs = Attrs::from_event(e)?;
        let mut page = Page {
            id: attrs.string("id"),
            bbox: attrs.bbox()?,
            rotate: attrs.f64_opt("rotate")?.unwrap_or_default(),
            ..Default::default()
        };
        if empty {
            return Ok(page);
        }
        self.children("page", |p, e, empty| {
            match e.name().as_ref() {
                b"textbox" => page.text_boxes.push(p.text_box(e, empty)?),
                b"rect" => {
                    let attrs = Attrs::from_event(e)?;
                    page.rects.push(Rect {
                        linewidth: attrs.f64_opt("linewidth")?,
                        bbox: attrs.bbox()?,
                    });
                    p.skip(e, empty)?;
                }
                b"figure" => page.figures.push(p.figure(e, empty)?),
                b"layout" if !empty => {
                    p.children("layout", |p, e, empty| match e.name().as_ref() {
                        b"textgroup" => {
                            page.layout.push(p.text_group(e, empty)?);
                            Ok(())
                        }
                        _ => p.skip(e, empty),
                    })?;
                }
                _ => p.skip(e, empty)?,
            }
            Ok(())
        })?;
        Ok(page)
    }

    fn text_box(&mut self, e: &BytesStart<'i>, empty: bool) -> Result<TextBox, PayslipError> {
        let attrs = Attrs::from_event(e)?;
        let mut text_box = TextBox {
            id: attrs.string("id"),
            bbox: attrs.bbox()?,
            lines: Vec::new(),
        };
        if empty {
            return Ok(text_box);
        }
        self.children("textbox", |p, e, empty| match e.name().as_ref() {
            b"textline" => {
                text_box.lines.push(p.text_line(e, empty)?);
                Ok(())
            }
            _ => p.skip(e, empty),
        })?;
        Ok(text_box)
    }

    fn text_line(&mut self, e: &BytesStart<'i>, empty: bool) -> Result<TextLine, PayslipError> {
        let attrs = Attrs::from_event(e)?;
        let mut line = TextLine {
            bbox: attrs.bbox()?,
            runs: Vec::new(),
        };
        if empty {
            return Ok(line);
        }
        self.children("textline", |p, e, empty| match e.name().as_ref() {
            b"text" => {
                let attrs = Attrs::from_event(e)?;
                let text = if empty {
                    String::new()
                } else {
                    p.text_content()?
                };
                line.runs.push(TextRun {
                    font: attrs.string("font"),
                    bbox: attrs.bbox()?,
                    size: attrs.f64_opt("size")?,
                    text,
                });
                Ok(())
            }
            _ => p.skip(e, empty),
        })?;
        Ok(line)
    }

    /// Character data up to the closing tag, verbatim. Single spaces and
    /// newlines are meaningful here.
    fn text_content(&mut self) -> Result<String, PayslipError> {
        let mut text = String::new();
        loop {
            match self.reader.read_event()? {
                Event::Text(t) => text.push_str(&t.unescape()?),
                Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c)),
                Event::Start(e) => {
                    self.reader.read_to_end(e.name())?;
                }
                Event::End(_) => return Ok(text),
                Event::Eof => {
                    return Err(PayslipError::Structure(
                        "unexpected end of input inside <text>".into(),
                    ));
                }
                _ => {}
            }
        }
    }

    fn figure(&mut self, e: &BytesStart<'i>, empty: bool) -> Result<Figure, PayslipError> {
        let attrs = Attrs::from_event(e)?;
        let mut figure = Figure {
            name: attrs.string("name"),
            bbox: attrs.bbox()?,
            images: Vec::new(),
        };
        if empty {
            return Ok(figure);
        }
        self.children("figure", |p, e, empty| {
            if e.name().as_ref() == b"image" {
                let attrs = Attrs::from_event(e)?;
                figure.images.push(Image {
                    width: attrs.f64_opt("width")?,
                    height: attrs.f64_opt("height")?,
                });
            }
            p.skip(e, empty)
        })?;
        Ok(figure)
    }

    fn text_group(&mut self, e: &BytesStart<'i>, empty: bool) -> Result<TextGroup, PayslipError> {
        let attrs = Attrs::from_event(e)?;
        let mut group = TextGroup {
            bbox: attrs.bbox()?,
            ..Default::default()
        };
        if empty {
            return Ok(group);
        }
        self.children("textgroup", |p, e, empty| {
            match e.name().as_ref() {
                b"textgroup" => group.groups.push(p.text_group(e, empty)?),
                b"textbox" => group.text_boxes.push(p.text_box(e, empty)?),
                _ => p.skip(e, empty)?,
            }
            Ok(())
        })?;
        Ok(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8" ?>
<pages>
<page id="1" bbox="0.000,0.000,612.000,792.000" rotate="0">
<textbox id="0" bbox="36.000,741.384,94.760,752.384">
<textline bbox="36.000,741.384,94.760,752.384">
<text font="Arial-BoldMT" bbox="36.000,741.384,42.671,752.384" size="11.000">P</text>
<text font="Arial-BoldMT" bbox="42.671,741.384,48.786,752.384" size="11.000">a</text>
<text font="Arial-BoldMT" bbox="48.786,741.384,54.287,752.384" size="11.000">y</text>
<text> </text>
<text font="Arial-BoldMT" bbox="57.343,741.384,65.287,752.384" size="11.000">&amp;</text>
<text>
</text>
</textline>
</textbox>
<rect linewidth="0.500" bbox="30.000,700.000,580.000,760.000" />
<figure name="Im0" bbox="500.000,740.000,580.000,780.000">
<image width="160" height="80" />
</figure>
<curve linewidth="0.5" bbox="1.000,1.000,2.000,2.000" pts="1,1,2,2" />
<layout>
<textgroup bbox="36.000,741.384,94.760,752.384">
<textbox id="0" bbox="36.000,741.384,94.760,752.384" />
</textgroup>
</layout>
</page>
</pages>
"#;

    #[test]
    fn test_decode_page_tree() {
        let doc = decode_str(SAMPLE).unwrap();
        assert_eq!(doc.pages.len(), 1);
        let page = &doc.pages[0];
        assert_eq!(page.id.as_deref(), Some("1"));
        assert_eq!(page.bbox.top, 792.0);
        assert_eq!(page.text_boxes.len(), 1);
        assert_eq!(page.rects.len(), 1);
        assert_eq!(page.rects[0].linewidth, Some(0.5));
        assert_eq!(page.figures[0].images[0].width, Some(160.0));
        assert_eq!(page.layout.len(), 1);
        assert_eq!(page.layout[0].text_boxes.len(), 1);

        let line = &page.text_boxes[0].lines[0];
        assert_eq!(line.text(), "Pay &");
        assert_eq!(line.runs[0].font.as_deref(), Some("Arial-BoldMT"));
        assert_eq!(line.runs[0].size, Some(11.0));
        assert!(line.runs[3].bbox.is_null());
    }

    #[test]
    fn test_decode_boxes_traversal() {
        let doc = decode_str(SAMPLE).unwrap();
        // page, textbox, textline, 4 glyphs, rect, figure, group, group textbox
        assert_eq!(doc.boxes().count(), 11);
        assert_eq!(doc.boxes().next().unwrap().right, 612.0);
    }

    #[test]
    fn test_decode_rejects_wrong_root() {
        let err = decode_str("<page bbox=\"0,0,1,1\"></page>").unwrap_err();
        assert!(matches!(err, PayslipError::Structure(_)));
    }

    #[test]
    fn test_decode_rejects_bad_bbox() {
        let err = decode_str("<pages><page bbox=\"0,0,1\"></page></pages>").unwrap_err();
        assert!(matches!(err, PayslipError::InvalidBBox { .. }));
    }

    #[test]
    fn test_decode_rejects_truncated_input() {
        assert!(decode_str("<pages><page bbox=\"0,0,1,1\">").is_err());
    }

    #[test]
    fn test_decode_from_reader() {
        let doc = decode(SAMPLE.as_bytes()).unwrap();
        assert_eq!(doc.text_lines().count(), 1);
    }
}
