use std::path::Path;

use payslip_core::error::PayslipError;

use crate::commands::{decode_input, first_page};
use crate::output;

pub fn run(input: &Path, png: Option<&Path>) -> Result<(), PayslipError> {
    let doc = decode_input(input)?;
    let page = first_page(&doc)?;
    match png {
        Some(path) => {
            output::png::save(page, path)?;
            eprintln!("Page boxes drawn to {}", path.display());
        }
        None => output::table::print_boxes(page.boxes()),
    }
    Ok(())
}
