//! Posting accounts for the ledger writer.
//!
//! Every posted field has a default account. A JSON file may override the
//! payee and any subset of accounts, keyed by [`Field::key`]:
//!
//! ```json
//! {
//!   "payee": "ACME Corp Payroll",
//!   "accounts": { "earnings.regular_pay": "Income:ACME:Salary" }
//! }
//! ```
//!
//! `{year}` in an account name is replaced with the pay date's year.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PayslipError;
use crate::model::Field;

pub const DEFAULT_PAYEE: &str = "GOOGLE LLC Payroll";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Accounts {
    pub payee: String,
    pub accounts: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AccountsFile {
    #[serde(default)]
    payee: Option<String>,
    #[serde(default)]
    accounts: BTreeMap<String, String>,
}

/// The fields a ledger entry posts, in posting order. Employer-side amounts
/// never reach the employee's books and are left out.
pub fn posted_fields() -> impl Iterator<Item = Field> {
    Field::all()
        .into_iter()
        .filter(|f| !matches!(f, Field::EmployerDeduction(_) | Field::EmployerRefund))
}

fn default_account(field: Field) -> String {
    let key = field.key();
    let leaf = camel_case(key.rsplit('.').next().unwrap_or(&key));
    match field {
        Field::NetPay => "Assets:Checking".to_string(),
        Field::Earning(_) => format!("Income:Payroll:{leaf}"),
        Field::Deduction(_) => format!("Expenses:Payroll:{leaf}"),
        Field::Tax(_) => format!("Expenses:Taxes:Y{{year}}:{leaf}"),
        Field::EmployerDeduction(_) | Field::EmployerRefund => {
            format!("Expenses:Payroll:Employer:{leaf}")
        }
    }
}

/// `vol_life_ee` -> `VolLifeEe`
fn camel_case(snake: &str) -> String {
    snake
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}

impl Default for Accounts {
    fn default() -> Self {
        Accounts {
            payee: DEFAULT_PAYEE.to_string(),
            accounts: posted_fields()
                .map(|f| (f.key(), default_account(f)))
                .collect(),
        }
    }
}

impl Accounts {
    /// The account `field` posts to, with `{year}` filled in.
    pub fn account(&self, field: Field, year: i32) -> String {
        let name = self
            .accounts
            .get(&field.key())
            .cloned()
            .unwrap_or_else(|| default_account(field));
        name.replace("{year}", &year.to_string())
    }
}

/// Load account overrides from a JSON file.
pub fn load_accounts(path: &Path) -> Result<Accounts, PayslipError> {
    let content = std::fs::read_to_string(path).map_err(|e| PayslipError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_accounts(&content, path)
}

/// Parse account overrides, reporting failures against `source`.
pub fn parse_accounts(json: &str, source: &Path) -> Result<Accounts, PayslipError> {
    parse_accounts_str(json).map_err(|e| PayslipError::Config {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Parse account overrides from a JSON string (no file path context).
pub fn parse_accounts_str(json: &str) -> Result<Accounts, PayslipError> {
    let file: AccountsFile = serde_json::from_str(json)?;
    let mut accounts = Accounts::default();
    if let Some(payee) = file.payee {
        accounts.payee = payee;
    }
    for (key, account) in file.accounts {
        if !accounts.accounts.contains_key(&key) {
            return Err(PayslipError::Structure(format!(
                "unknown account field {key:?}"
            )));
        }
        if account.trim().is_empty() {
            return Err(PayslipError::Structure(format!(
                "empty account name for {key:?}"
            )));
        }
        accounts.accounts.insert(key, account);
    }
    tracing::debug!(payee = %accounts.payee, "loaded accounts");
    Ok(accounts)
}
