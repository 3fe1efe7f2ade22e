//! Layout tree of a page as dumped by a PDF layout analyser: pages hold text
//! boxes, text boxes hold lines, lines hold positioned character runs.

pub mod geometry;
pub mod xml;

use serde::Serialize;
use std::fmt;

pub use geometry::{intersects, monotonic, BBox, Point, EPS};

/// One positioned fragment of text, usually a single glyph.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextRun {
    pub font: Option<String>,
    pub bbox: BBox,
    pub size: Option<f64>,
    pub text: String,
}

/// Text laid out in a single physical line. The box is the one reported by
/// the layout dump, not recomputed from the runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextLine {
    pub bbox: BBox,
    pub runs: Vec<TextRun>,
}

impl TextLine {
    /// Concatenated run text with surrounding newlines removed.
    pub fn text(&self) -> String {
        let joined: String = self.runs.iter().map(|r| r.text.as_str()).collect();
        joined.trim_matches('\n').to_string()
    }
}

impl fmt::Display for TextLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{:?} {}>", self.text(), self.bbox)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextBox {
    pub id: Option<String>,
    pub bbox: BBox,
    pub lines: Vec<TextLine>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Rect {
    pub linewidth: Option<f64>,
    pub bbox: BBox,
}

/// Image dimensions only; pixel content is never kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Image {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Figure {
    pub name: Option<String>,
    pub bbox: BBox,
    pub images: Vec<Image>,
}

/// A node of the layout analyser's grouping tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextGroup {
    pub bbox: BBox,
    pub groups: Vec<TextGroup>,
    pub text_boxes: Vec<TextBox>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub id: Option<String>,
    pub bbox: BBox,
    pub rotate: f64,
    pub text_boxes: Vec<TextBox>,
    pub rects: Vec<Rect>,
    pub figures: Vec<Figure>,
    pub layout: Vec<TextGroup>,
}

impl Page {
    /// Every non-null bounding box on the page in document order: the page
    /// itself, text boxes (with their lines and runs), rects, figures, then
    /// the grouping tree.
    pub fn boxes(&self) -> Boxes<'_> {
        Boxes {
            stack: vec![Node::Page(self)],
        }
    }

    /// Every text line of the page's text boxes, in document order.
    pub fn text_lines(&self) -> impl Iterator<Item = &TextLine> + '_ {
        self.text_boxes.iter().flat_map(|b| b.lines.iter())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    pub pages: Vec<Page>,
}

impl Document {
    pub fn first_page(&self) -> Option<&Page> {
        self.pages.first()
    }

    pub fn boxes(&self) -> impl Iterator<Item = BBox> + '_ {
        self.pages.iter().flat_map(Page::boxes)
    }

    pub fn text_lines(&self) -> impl Iterator<Item = &TextLine> + '_ {
        self.pages.iter().flat_map(Page::text_lines)
    }
}

#[derive(Clone, Copy)]
enum Node<'a> {
    Page(&'a Page),
    TextBox(&'a TextBox),
    Line(&'a TextLine),
    Run(&'a TextRun),
    Rect(&'a Rect),
    Figure(&'a Figure),
    Group(&'a TextGroup),
}

impl<'a> Node<'a> {
    fn bbox(self) -> BBox {
        match self {
            Node::Page(p) => p.bbox,
            Node::TextBox(t) => t.bbox,
            Node::Line(l) => l.bbox,
            Node::Run(r) => r.bbox,
            Node::Rect(r) => r.bbox,
            Node::Figure(f) => f.bbox,
            Node::Group(g) => g.bbox,
        }
    }

    /// Pushes children so that the first child is popped first.
    fn push_children(self, stack: &mut Vec<Node<'a>>) {
        match self {
            Node::Page(p) => {
                stack.extend(p.layout.iter().rev().map(Node::Group));
                stack.extend(p.figures.iter().rev().map(Node::Figure));
                stack.extend(p.rects.iter().rev().map(Node::Rect));
                stack.extend(p.text_boxes.iter().rev().map(Node::TextBox));
            }
            Node::TextBox(t) => stack.extend(t.lines.iter().rev().map(Node::Line)),
            Node::Line(l) => stack.extend(l.runs.iter().rev().map(Node::Run)),
            Node::Group(g) => {
                stack.extend(g.text_boxes.iter().rev().map(Node::TextBox));
                stack.extend(g.groups.iter().rev().map(Node::Group));
            }
            Node::Run(_) | Node::Rect(_) | Node::Figure(_) => {}
        }
    }
}

/// Pre-order iterator over the bounding boxes of a page, driven by an
/// explicit stack rather than recursion.
pub struct Boxes<'a> {
    stack: Vec<Node<'a>>,
}

impl Iterator for Boxes<'_> {
    type Item = BBox;

    fn next(&mut self) -> Option<BBox> {
        loop {
            let node = self.stack.pop()?;
            node.push_children(&mut self.stack);
            let bbox = node.bbox();
            if !bbox.is_null() {
                return Some(bbox);
            }
        }
    }
}
