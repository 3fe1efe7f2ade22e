//! Plain-text ledger entries (beancount syntax).
//!
//! ```text
//! 2022-07-15 ! "GOOGLE LLC Payroll 123456"
//!    Income:Payroll:RegularPay -3000.00 USD
//!    Expenses:Payroll:Medical 45.00 USD
//!    Assets:Checking 2500.00 USD
//! ```
//!
//! The entry is flagged `!` so it gets reviewed before it is trusted.

use chrono::{Datelike, NaiveDate};
use payslip_core::config::{posted_fields, Accounts};
use payslip_core::error::PayslipError;
use payslip_core::model::{Field, Transaction};

pub fn pay_date(t: &Transaction) -> Result<NaiveDate, PayslipError> {
    t.date
        .ok_or_else(|| PayslipError::Structure("transaction has no pay date".into()))
}

pub fn format_entry(t: &Transaction, accounts: &Accounts) -> Result<String, PayslipError> {
    let date = pay_date(t)?;
    let mut out = format!(
        "{} ! \"{} {}\"",
        date.format("%Y-%m-%d"),
        accounts.payee,
        t.doc_num
    );

    for field in posted_fields() {
        let amount = t.amount(field);
        if amount.is_zero() {
            continue;
        }
        // Earnings leave the income accounts.
        let amount = match field {
            Field::Earning(_) => -amount,
            _ => amount,
        };
        out.push_str(&format!(
            "\n   {} {:.2} USD",
            accounts.account(field, date.year()),
            amount.0
        ));
    }
    out.push('\n');
    Ok(out)
}
