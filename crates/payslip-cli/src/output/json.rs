use payslip_core::error::PayslipError;
use payslip_core::model::Transaction;

pub fn print(t: &Transaction) -> Result<(), PayslipError> {
    let json = serde_json::to_string_pretty(t)?;
    println!("{json}");
    Ok(())
}
