use std::path::Path;

use payslip_core::error::PayslipError;
use payslip_core::query::text_lines;

use crate::commands::{decode_input, first_page};
use crate::output;

pub fn run(input: &Path) -> Result<(), PayslipError> {
    let doc = decode_input(input)?;
    let page = first_page(&doc)?;
    output::table::print_lines(&text_lines(page));
    Ok(())
}
