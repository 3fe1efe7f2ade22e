use payslip_core::layout::{BBox, TextLine};

pub fn print_boxes(boxes: impl Iterator<Item = BBox>) {
    for (i, bbox) in boxes.enumerate() {
        println!("{i:>5}  {bbox}");
    }
}

/// One line per text line: the text padded to the widest, then its box.
pub fn print_lines(lines: &[&TextLine]) {
    let texts: Vec<String> = lines.iter().map(|l| format!("{:?}", l.text())).collect();
    let width = texts.iter().map(|t| t.chars().count()).max().unwrap_or(10);
    for (text, line) in texts.iter().zip(lines) {
        println!("  {text:<width$}  {}", line.bbox);
    }
}
