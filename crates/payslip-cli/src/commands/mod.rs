pub mod boxes;
pub mod lines;
pub mod paystub;

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use payslip_core::error::{PayslipError, ResultExt};
use payslip_core::layout::{Document, Page};

/// Opens `path` for reading; `-` is stdin.
fn open_input(path: &Path) -> Result<Box<dyn Read>, PayslipError> {
    if path == Path::new("-") {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path).with_context(|| format!("could not open {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

fn decode_input(path: &Path) -> Result<Document, PayslipError> {
    let reader = open_input(path)?;
    payslip_core::decode(reader).with_context(|| format!("while decoding {}", path.display()))
}

fn first_page(doc: &Document) -> Result<&Page, PayslipError> {
    doc.first_page().ok_or(PayslipError::EmptyDocument)
}
