//! Routing of paystub row labels to transaction fields.
//!
//! The label sets are closed: a label missing from the tables is an error,
//! never a silently dropped amount. When the paystub template grows a new
//! category, add it here.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PayslipError;
use crate::model::{Deduction, Earning, Field, Tax, Transaction, Usd};

/// Which column family a label was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ledger {
    Income,
    Expense,
    EmployerExpense,
}

impl fmt::Display for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ledger::Income => write!(f, "Income"),
            Ledger::Expense => write!(f, "Expense"),
            Ledger::EmployerExpense => write!(f, "EmployerExpense"),
        }
    }
}

const INCOME: &[(&str, Field)] = &[
    ("Annual Bonus", Field::Earning(Earning::AnnualBonus)),
    ("Group Term Life", Field::Earning(Earning::GroupTermLife)),
    ("Peer Bonus", Field::Earning(Earning::PeerBonus)),
    ("Regular Pay", Field::Earning(Earning::RegularPay)),
    ("Goog Stock Unit", Field::Earning(Earning::StockUnit)),
    ("Spot Bonus", Field::Earning(Earning::SpotBonus)),
];

const EXPENSE: &[(&str, Field)] = &[
    ("Bonus 401K Pre", Field::Deduction(Deduction::Bonus401kPre)),
    ("Class C Offset", Field::Deduction(Deduction::ClassCOffset)),
    ("GSU C Refund", Field::Earning(Earning::GsuCRefund)),
    ("Dental", Field::Deduction(Deduction::Dental)),
    ("FSA Health", Field::Deduction(Deduction::FsaHealth)),
    ("Group Term Life", Field::Deduction(Deduction::GroupTermLife)),
    ("Internet Reim", Field::Deduction(Deduction::InternetReim)),
    ("LegalAccess", Field::Deduction(Deduction::LegalAccess)),
    ("LongTerm Dis", Field::Deduction(Deduction::LongTermDis)),
    ("Medical", Field::Deduction(Deduction::Medical)),
    ("Transit PreTax", Field::Deduction(Deduction::TransitPreTax)),
    ("Vision", Field::Deduction(Deduction::Vision)),
    ("Vol Life EE", Field::Deduction(Deduction::VolLifeEe)),
    ("Vol Life Spouse", Field::Deduction(Deduction::VolLifeSpouse)),
    ("Federal Income Tax", Field::Tax(Tax::FederalIncome)),
    ("Employee Medicare", Field::Tax(Tax::EmployeeMedicare)),
    ("Social Security Employee Tax", Field::Tax(Tax::SocialSecurityEmployee)),
    ("CA State Income Tax", Field::Tax(Tax::CaStateIncome)),
    ("CA Private Disability Employee", Field::Tax(Tax::CaPrivateDisabilityEmployee)),
];

const EMPLOYER_EXPENSE: &[(&str, Field)] = &[
    ("Bonus 401K Pre", Field::EmployerDeduction(Deduction::Bonus401kPre)),
    ("Class C Offset", Field::EmployerDeduction(Deduction::ClassCOffset)),
    ("GSU C Refund", Field::EmployerRefund),
    ("Dental", Field::EmployerDeduction(Deduction::Dental)),
    ("FSA Health", Field::EmployerDeduction(Deduction::FsaHealth)),
    ("Group Term Life", Field::EmployerDeduction(Deduction::GroupTermLife)),
    ("Internet Reim", Field::EmployerDeduction(Deduction::InternetReim)),
    ("LegalAccess", Field::EmployerDeduction(Deduction::LegalAccess)),
    ("LongTerm Dis", Field::EmployerDeduction(Deduction::LongTermDis)),
    ("Medical", Field::EmployerDeduction(Deduction::Medical)),
    ("Transit PreTax", Field::EmployerDeduction(Deduction::TransitPreTax)),
    ("Vision", Field::EmployerDeduction(Deduction::Vision)),
    ("Vol Life EE", Field::EmployerDeduction(Deduction::VolLifeEe)),
    ("Vol Life Spouse", Field::EmployerDeduction(Deduction::VolLifeSpouse)),
];

impl Ledger {
    pub const ALL: [Ledger; 3] = [Ledger::Income, Ledger::Expense, Ledger::EmployerExpense];

    pub fn labels(self) -> &'static [(&'static str, Field)] {
        match self {
            Ledger::Income => INCOME,
            Ledger::Expense => EXPENSE,
            Ledger::EmployerExpense => EMPLOYER_EXPENSE,
        }
    }

    /// The field a paystub label books into, if the label is known.
    pub fn field(self, label: &str) -> Option<Field> {
        self.labels()
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, f)| *f)
    }

    /// Checks the label tables: no label listed twice within a ledger, and
    /// every field other than net pay reachable from some label.
    pub fn validate() -> Result<(), PayslipError> {
        let mut reachable = HashSet::new();
        for ledger in Ledger::ALL {
            let mut seen = HashSet::new();
            for (label, field) in ledger.labels() {
                if !seen.insert(*label) {
                    return Err(PayslipError::Structure(format!(
                        "label {label:?} listed twice in the {ledger} ledger"
                    )));
                }
                reachable.insert(*field);
            }
        }
        for field in Field::all() {
            if field != Field::NetPay && !reachable.contains(&field) {
                return Err(PayslipError::Structure(format!(
                    "no paystub label books into {field}"
                )));
            }
        }
        Ok(())
    }
}

impl Transaction {
    /// Adds `amount` to the field `label` maps to in `ledger`. A label can
    /// appear more than once on a paystub, so amounts accumulate.
    ///
    /// Unknown labels are rejected and leave the transaction untouched.
    pub fn book(&mut self, ledger: Ledger, label: &str, amount: Usd) -> Result<(), PayslipError> {
        let field = ledger
            .field(label)
            .ok_or_else(|| PayslipError::UnknownCategory {
                ledger,
                label: label.to_string(),
                amount,
            })?;
        tracing::debug!(%ledger, label, %amount, %field, "booking");
        *self.slot(field) += amount;
        Ok(())
    }

    pub fn income_by_name(&mut self, label: &str, amount: Usd) -> Result<(), PayslipError> {
        self.book(Ledger::Income, label, amount)
    }

    pub fn expense_by_name(&mut self, label: &str, amount: Usd) -> Result<(), PayslipError> {
        self.book(Ledger::Expense, label, amount)
    }

    pub fn employer_expense_by_name(
        &mut self,
        label: &str,
        amount: Usd,
    ) -> Result<(), PayslipError> {
        self.book(Ledger::EmployerExpense, label, amount)
    }
}
