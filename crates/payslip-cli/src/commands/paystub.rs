use std::path::Path;

use payslip_core::config::{load_accounts, Accounts};
use payslip_core::error::{PayslipError, ResultExt};

use crate::commands::open_input;
use crate::output;

pub fn run(
    input: &Path,
    accounts_file: Option<&Path>,
    date_only: bool,
    format: &str,
) -> Result<(), PayslipError> {
    let accounts = match accounts_file {
        Some(path) => load_accounts(path)?,
        None => Accounts::default(),
    };

    let reader = open_input(input)?;
    let t = payslip_core::parse(reader)
        .with_context(|| format!("while reading {}", input.display()))?;
    tracing::info!(doc_num = %t.doc_num, "extracted paystub");

    if date_only {
        let date = output::ledger::pay_date(&t)?;
        println!("{}", date.format("%Y-%m-%d"));
        return Ok(());
    }

    match format {
        "json" => output::json::print(&t),
        "ledger" => {
            print!("{}", output::ledger::format_entry(&t, &accounts)?);
            Ok(())
        }
        other => Err(PayslipError::Structure(format!(
            "unknown output format {other:?} (expected ledger or json)"
        ))),
    }
}
