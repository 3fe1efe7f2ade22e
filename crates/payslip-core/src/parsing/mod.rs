pub mod columns;
pub mod values;

pub use columns::store_amounts;
pub use values::{parse_amount, parse_us_date};
