pub mod config;
pub mod error;
pub mod extraction;
pub mod layout;
pub mod ledger;
pub mod model;
pub mod parsing;
pub mod query;
pub mod table;

use std::io::Read;

use error::{PayslipError, ResultExt};
use layout::Document;
use model::Transaction;

pub use extraction::extract;

/// Decode a pdfminer-style layout XML dump into a document tree.
pub fn decode<R: Read>(reader: R) -> Result<Document, PayslipError> {
    layout::xml::decode(reader)
}

/// Main API entry point: read a paystub layout dump and extract its
/// transaction.
///
/// Only the first page is read. Decoding and extraction failures keep their
/// causal chain, so the caller can show every step that led to the error.
pub fn parse<R: Read>(reader: R) -> Result<Transaction, PayslipError> {
    let doc = decode(reader).context("while decoding input")?;
    extraction::extract(&doc).context("while converting paystub")
}
