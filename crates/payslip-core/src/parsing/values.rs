use crate::error::PayslipError;
use crate::model::Usd;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a currency cell from a paystub into an amount.
///
/// Handles formats like:
/// - "$1,123.44" -> 1123.44
/// - "123.44" -> 123.44
/// - "($10)" -> -10 (accounting-style negative)
/// - "" -> error, an empty cell is never zero
pub fn parse_amount(s: &str) -> Result<Usd, PayslipError> {
    tracing::trace!(raw = s, "parse_amount");
    let s = s.trim();
    if s.is_empty() {
        return Err(PayslipError::Amount {
            raw: s.to_string(),
            reason: "nothing to parse".into(),
        });
    }

    let digits: String = s
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '(' | ')'))
        .collect();
    let value = Decimal::from_str(&digits).map_err(|e| PayslipError::Amount {
        raw: s.to_string(),
        reason: e.to_string(),
    })?;

    if s.starts_with('(') {
        Ok(Usd(-value))
    } else {
        Ok(Usd(value))
    }
}

/// Parse a US `MM/DD/YYYY` date.
pub fn parse_us_date(s: &str) -> Result<NaiveDate, PayslipError> {
    NaiveDate::parse_from_str(s.trim(), "%m/%d/%Y").map_err(|_| PayslipError::Date(s.to_string()))
}
