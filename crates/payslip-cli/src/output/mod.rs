pub mod json;
pub mod ledger;
pub mod png;
pub mod table;
