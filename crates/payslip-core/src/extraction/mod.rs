//! Reads a paystub page by its fixed template: locate known labels, carve
//! the page into sections around them, and pair each section's label column
//! with its amount column.
//!
//! Every lookup insists on exactly one match. A page that does not match the
//! template fails loudly rather than yielding a partial transaction.

use crate::error::{PayslipError, ResultExt};
use crate::layout::{BBox, Document, TextLine, EPS};
use crate::model::Transaction;
use crate::parsing::columns::store_amounts;
use crate::parsing::values::{parse_amount, parse_us_date};
use crate::query::{
    exactly_one, filter_by_box, find_one, find_one_in_box, find_one_in_box_with_suffix,
    find_one_with_prefix, intersecting, match_all, sort_top, text_lines,
};

/// Convert the first page of a decoded paystub into a transaction.
pub fn extract(doc: &Document) -> Result<Transaction, PayslipError> {
    let page = doc.first_page().ok_or(PayslipError::EmptyDocument)?;
    let lines = text_lines(page);
    let sections = Sections::locate(&lines)?;

    let mut t = Transaction::default();
    t.date = Some(pay_date(&lines)?);
    t.doc_num = document_number(&lines)?;
    earnings(&lines, &sections, &mut t)?;
    t.net_pay = net_pay(&lines, &sections)?;
    deductions(&lines, &sections, &mut t)?;
    taxes(&lines, &sections, &mut t)?;
    Ok(t)
}

/// Section headings and the page regions they own.
struct Sections<'a> {
    earnings_label: &'a TextLine,
    earnings: BBox,
    deductions: BBox,
    taxes: BBox,
}

impl<'a> Sections<'a> {
    fn locate(lines: &[&'a TextLine]) -> Result<Self, PayslipError> {
        let earnings = find_one(lines, "Earnings").context("could not find earnings")?;
        let taxes = find_one_in_box(lines, "Taxes", earnings.bbox.extend_bottom())
            .context("could not find taxes below earnings")?;
        let deductions = find_one_in_box(
            lines,
            "Deductions",
            taxes.bbox.extend_top().extend_right(),
        )
        .context("could not find deductions")?;
        let paid_time_off =
            find_one(lines, "Paid Time Off").context("could not find paid time off")?;

        // Earnings and deductions sit side by side above taxes; taxes run
        // down to the paid time off table.
        let above_taxes = taxes.bbox.top + EPS;
        Ok(Sections {
            earnings_label: earnings,
            earnings: earnings
                .bbox
                .extend_right()
                .with_right(deductions.bbox.left)
                .extend_down_to(above_taxes),
            deductions: deductions.bbox.extend_right().extend_down_to(above_taxes),
            taxes: taxes
                .bbox
                .extend_right()
                .extend_down_to(paid_time_off.bbox.top + EPS),
        })
    }
}

/// The single line right of the label `label`.
fn value_right_of<'a>(
    lines: &[&'a TextLine],
    label: &TextLine,
) -> Result<&'a TextLine, PayslipError> {
    exactly_one(filter_by_box(lines, label.bbox.right_of()))
}

/// The column under `header`, from just below it down to `bottom`.
fn column_under(header: &TextLine, bottom: f64) -> BBox {
    header.bbox.extend_down_to(bottom).below(&header.bbox)
}

fn pay_date(lines: &[&TextLine]) -> Result<chrono::NaiveDate, PayslipError> {
    let label = find_one(lines, "Pay Date").context("while finding date")?;
    let value =
        value_right_of(lines, label).context("could not find date right of 'Pay Date'")?;
    parse_us_date(&value.text()).context("while parsing date")
}

fn document_number(lines: &[&TextLine]) -> Result<String, PayslipError> {
    let label = find_one(lines, "Document").context("while looking for document")?;
    let value =
        value_right_of(lines, label).context("no document number right of 'Document'")?;
    Ok(value.text())
}

fn earnings(
    lines: &[&TextLine],
    s: &Sections<'_>,
    t: &mut Transaction,
) -> Result<(), PayslipError> {
    let section = filter_by_box(lines, s.earnings);

    let total_hours = find_one_with_prefix(lines, "Total Hours Worked")
        .context("could not find Total Hours Worked")?;
    let pay_type =
        find_one(&section, "Pay Type").context("could not find pay type in earnings box")?;
    let current =
        find_one(&section, "Current").context("could not find current in earnings box")?;

    // Both columns run from under their header down to the hours total.
    let bottom = total_hours.bbox.top + EPS;
    let pay_types = sort_top(filter_by_box(&section, column_under(pay_type, bottom)));
    let amounts = sort_top(filter_by_box(&section, column_under(current, bottom)));

    store_amounts(&pay_types, &amounts, |name, amount| t.income_by_name(name, amount))
        .context("while setting income")
}

/// Net pay sits right of its label, above and right of the earnings heading.
fn net_pay(lines: &[&TextLine], s: &Sections<'_>) -> Result<crate::model::Usd, PayslipError> {
    let label = find_one_in_box(
        lines,
        "Net Pay",
        s.earnings_label.bbox.extend_top().extend_right(),
    )
    .context("while finding Net Pay in the upper right corner")?;
    let value =
        value_right_of(lines, label).context("could not find amount right of 'Net Pay'")?;
    parse_amount(&value.text()).context("could not set Net Pay")
}

/// Deduction names are listed under "Deduction"; the employee's amounts under
/// the "Current" below "Employee", the employer's under the "Current" below
/// "Employer".
fn deductions(
    lines: &[&TextLine],
    s: &Sections<'_>,
    t: &mut Transaction,
) -> Result<(), PayslipError> {
    let section = filter_by_box(lines, s.deductions);
    let bottom = s.deductions.bottom;

    let heading =
        find_one(&section, "Deduction").context("could not find Deduction in Deductions")?;
    let names = sort_top(filter_by_box(&section, column_under(heading, bottom)));

    let employee =
        find_one(&section, "Employee").context("could not find Employee in Deductions")?;
    let employee_current = find_one_in_box(&section, "Current", column_under(employee, bottom))
        .context("could not find Current below Employee in Deductions")?;
    let employee_amounts = sort_top(filter_by_box(
        &section,
        column_under(employee_current, bottom),
    ));
    store_amounts(&names, &employee_amounts, |name, amount| {
        t.expense_by_name(name, amount)
    })
    .context("while parsing expenses")?;

    let employer =
        find_one(&section, "Employer").context("could not find Employer in Deductions")?;
    let employer_region = column_under(employer, bottom);
    // The employer's "Current" header is sometimes rendered fused with the
    // neighbouring column's "YTD", so only its suffix is reliable.
    let employer_current = find_one_in_box_with_suffix(&section, "Current", employer_region)
        .context("could not find Current below Employer in Deductions")?;
    let employer_amounts = sort_top(match_all(
        &section,
        &[
            &intersecting(column_under(employer_current, bottom)),
            &intersecting(employer_region),
        ],
    ));
    store_amounts(&names, &employer_amounts, |name, amount| {
        t.employer_expense_by_name(name, amount)
    })
    .context("while parsing employer deductions")
}

/// Tax names are listed under "Tax", amounts under "Current".
fn taxes(
    lines: &[&TextLine],
    s: &Sections<'_>,
    t: &mut Transaction,
) -> Result<(), PayslipError> {
    let section = filter_by_box(lines, s.taxes);
    let bottom = s.taxes.bottom;

    let heading = find_one(&section, "Tax").context("could not find Tax in Taxes box")?;
    let current =
        find_one(&section, "Current").context("could not find Current in Taxes box")?;

    let names = sort_top(filter_by_box(&section, column_under(heading, bottom)));
    let amounts = sort_top(filter_by_box(&section, column_under(current, bottom)));
    store_amounts(&names, &amounts, |name, amount| t.expense_by_name(name, amount))
        .context("while setting tax expenses")
}
