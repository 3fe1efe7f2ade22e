//! Finding text lines on a page by content and position.
//!
//! Everything works on a materialized list of line references, so one page
//! can be filtered repeatedly without re-walking the layout tree.

use crate::error::PayslipError;
use crate::layout::{intersects, BBox, Page, TextLine};

/// A test on a single text line.
pub type Predicate<'p> = dyn Fn(&TextLine) -> bool + 'p;

/// All text lines of a page in document order.
pub fn text_lines(page: &Page) -> Vec<&TextLine> {
    page.text_lines().collect()
}

pub fn matching_text(text: &str) -> impl Fn(&TextLine) -> bool + '_ {
    move |l| l.text() == text
}

pub fn matching_prefix(prefix: &str) -> impl Fn(&TextLine) -> bool + '_ {
    move |l| l.text().starts_with(prefix)
}

pub fn matching_suffix(suffix: &str) -> impl Fn(&TextLine) -> bool + '_ {
    move |l| l.text().ends_with(suffix)
}

/// Lines whose box intersects `bbox`.
pub fn intersecting(bbox: BBox) -> impl Fn(&TextLine) -> bool {
    move |l| intersects(&bbox, &l.bbox)
}

/// Keeps the lines accepted by every predicate.
pub fn match_all<'a>(lines: &[&'a TextLine], predicates: &[&Predicate<'_>]) -> Vec<&'a TextLine> {
    lines
        .iter()
        .copied()
        .filter(|l| predicates.iter().all(|p| p(*l)))
        .collect()
}

pub fn filter_by_text<'a>(lines: &[&'a TextLine], text: &str) -> Vec<&'a TextLine> {
    match_all(lines, &[&matching_text(text)])
}

pub fn filter_by_prefix<'a>(lines: &[&'a TextLine], prefix: &str) -> Vec<&'a TextLine> {
    match_all(lines, &[&matching_prefix(prefix)])
}

pub fn filter_by_suffix<'a>(lines: &[&'a TextLine], suffix: &str) -> Vec<&'a TextLine> {
    match_all(lines, &[&matching_suffix(suffix)])
}

/// Lines whose box intersects `bbox`.
pub fn filter_by_box<'a>(lines: &[&'a TextLine], bbox: BBox) -> Vec<&'a TextLine> {
    match_all(lines, &[&intersecting(bbox)])
}

/// The only line in `lines`; any other count means the page does not look
/// the way the caller assumed.
pub fn exactly_one<'a>(lines: Vec<&'a TextLine>) -> Result<&'a TextLine, PayslipError> {
    match lines.as_slice() {
        [one] => Ok(*one),
        _ => Err(PayslipError::NotSingleton {
            count: lines.len(),
            lines: lines.iter().map(|l| l.to_string()).collect(),
        }),
    }
}

/// Stable sort by increasing left edge.
pub fn sort_left(mut lines: Vec<&TextLine>) -> Vec<&TextLine> {
    lines.sort_by(|a, b| a.bbox.left.total_cmp(&b.bbox.left));
    lines
}

/// Stable sort by decreasing top edge, i.e. reading order top to bottom.
pub fn sort_top(mut lines: Vec<&TextLine>) -> Vec<&TextLine> {
    lines.sort_by(|a, b| b.bbox.top.total_cmp(&a.bbox.top));
    lines
}

/// The single line reading exactly `text`.
pub fn find_one<'a>(lines: &[&'a TextLine], text: &str) -> Result<&'a TextLine, PayslipError> {
    exactly_one(filter_by_text(lines, text))
}

/// The single line starting with `prefix`.
pub fn find_one_with_prefix<'a>(
    lines: &[&'a TextLine],
    prefix: &str,
) -> Result<&'a TextLine, PayslipError> {
    exactly_one(filter_by_prefix(lines, prefix))
}

/// The single line reading exactly `text` that intersects `bbox`.
pub fn find_one_in_box<'a>(
    lines: &[&'a TextLine],
    text: &str,
    bbox: BBox,
) -> Result<&'a TextLine, PayslipError> {
    exactly_one(match_all(
        lines,
        &[&matching_text(text), &intersecting(bbox)],
    ))
}

/// The single line ending with `suffix` that intersects `bbox`.
pub fn find_one_in_box_with_suffix<'a>(
    lines: &[&'a TextLine],
    suffix: &str,
    bbox: BBox,
) -> Result<&'a TextLine, PayslipError> {
    exactly_one(match_all(
        lines,
        &[&matching_suffix(suffix), &intersecting(bbox)],
    ))
}

/// The texts of `lines`, in order.
pub fn text_of(lines: &[&TextLine]) -> Vec<String> {
    lines.iter().map(|l| l.text()).collect()
}
