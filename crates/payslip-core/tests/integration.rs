//! Integration tests for the parse() end-to-end pipeline.
//!
//! The paystub below is synthetic but laid out like the real template: pay
//! date and document number top left, net pay top right, earnings and
//! deductions side by side, taxes underneath, paid time off at the bottom.

use chrono::NaiveDate;
use payslip_core::error::PayslipError;
use payslip_core::model::{Transaction, Usd};
use payslip_core::parse;
use rust_decimal_macros::dec;

/// One text line as (text, "left,bottom,right,top").
type Line<'a> = (&'a str, &'a str);

const PAYSTUB: &[Line] = &[
    ("Pay Date", "36,700,80,710"),
    ("07/15/2022", "90,700,140,710"),
    ("Document", "36,680,80,690"),
    ("123456", "90,680,130,690"),
    ("Net Pay", "400,740,440,750"),
    ("$2,500.00", "450,740,500,750"),
    // Earnings
    ("Earnings", "36,640,80,650"),
    ("Pay Type", "36,620,80,630"),
    ("Current", "250,620,290,630"),
    ("Regular Pay", "36,600,90,610"),
    ("$3,000.00", "250,600,300,610"),
    ("Group Term", "36,570,90,580"),
    ("$12.34", "250,570,290,580"),
    ("Life", "36,560,60,568"),
    ("Annual Bonus", "36,545,100,555"),
    ("$500.00", "250,545,290,555"),
    ("Total Hours Worked: 80.00", "36,500,150,510"),
    // Deductions
    ("Deductions", "320,640,380,650"),
    ("Deduction", "330,620,380,630"),
    ("Employee", "430,630,480,640"),
    ("Employer", "520,630,570,640"),
    ("Current", "430,615,470,625"),
    ("YTD Current", "480,615,560,625"),
    ("Medical", "330,600,400,610"),
    ("$45.00", "430,600,470,610"),
    ("$512.30", "525,600,560,610"),
    ("Vol Life", "330,585,400,595"),
    ("$3.10", "430,585,470,595"),
    ("$1.00", "525,585,560,595"),
    ("Spouse", "330,572,400,580"),
    ("Dental", "330,555,400,565"),
    ("$8.00", "430,555,470,565"),
    ("$20.00", "525,555,560,565"),
    // Taxes
    ("Taxes", "36,400,70,410"),
    ("Tax", "36,385,60,395"),
    ("Current", "250,385,290,395"),
    ("Federal Income Tax", "36,370,130,380"),
    ("$400.00", "250,370,300,380"),
    ("Employee Medicare", "36,355,130,365"),
    ("$43.50", "250,355,290,365"),
    ("CA Private", "36,340,100,350"),
    ("$12.00", "250,340,290,350"),
    ("Disability Employee", "36,328,130,336"),
    // Paid time off
    ("Paid Time Off", "36,250,100,260"),
];

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;")
}

/// Renders lines the way pdfminer does: one textbox per line, one run per
/// character, spaces and the trailing newline as box-less runs.
fn render(lines: &[Line]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"utf-8\" ?>\n<pages>\n\
         <page id=\"1\" bbox=\"0.000,0.000,612.000,792.000\" rotate=\"0\">\n",
    );
    for (id, (text, bbox)) in lines.iter().enumerate() {
        xml.push_str(&format!("<textbox id=\"{id}\" bbox=\"{bbox}\">\n"));
        xml.push_str(&format!("<textline bbox=\"{bbox}\">\n"));
        for c in text.chars() {
            if c == ' ' {
                xml.push_str("<text> </text>\n");
            } else {
                xml.push_str(&format!(
                    "<text font=\"ArialMT\" bbox=\"{bbox}\" size=\"8.000\">{}</text>\n",
                    escape(&c.to_string())
                ));
            }
        }
        xml.push_str("<text>\n</text>\n</textline>\n</textbox>\n");
    }
    xml.push_str("<rect linewidth=\"0.500\" bbox=\"30.000,240.000,580.000,760.000\" />\n");
    xml.push_str("</page>\n</pages>\n");
    xml
}

fn parse_lines(lines: &[Line]) -> Result<Transaction, PayslipError> {
    parse(render(lines).as_bytes())
}

fn without<'a>(skip: &str) -> Vec<Line<'a>> {
    PAYSTUB.iter().copied().filter(|(t, _)| *t != skip).collect()
}

#[test]
fn header_fields() {
    let t = parse_lines(PAYSTUB).unwrap();
    assert_eq!(t.date, NaiveDate::from_ymd_opt(2022, 7, 15));
    assert_eq!(t.doc_num, "123456");
    assert_eq!(t.net_pay, Usd(dec!(2500.00)));
}

#[test]
fn earnings_with_wrapped_label() {
    let t = parse_lines(PAYSTUB).unwrap();
    assert_eq!(t.earnings.regular_pay, Usd(dec!(3000.00)));
    assert_eq!(t.earnings.group_term_life, Usd(dec!(12.34)));
    assert_eq!(t.earnings.annual_bonus, Usd(dec!(500.00)));
    assert!(t.earnings.peer_bonus.is_zero());
}

#[test]
fn employee_and_employer_deductions() {
    let t = parse_lines(PAYSTUB).unwrap();
    assert_eq!(t.deductions.medical, Usd(dec!(45.00)));
    assert_eq!(t.deductions.vol_life_spouse, Usd(dec!(3.10)));
    assert_eq!(t.deductions.dental, Usd(dec!(8.00)));

    assert_eq!(t.employer.deductions.medical, Usd(dec!(512.30)));
    assert_eq!(t.employer.deductions.vol_life_spouse, Usd(dec!(1.00)));
    assert_eq!(t.employer.deductions.dental, Usd(dec!(20.00)));
}

#[test]
fn taxes_with_trailing_continuation() {
    let t = parse_lines(PAYSTUB).unwrap();
    assert_eq!(t.taxes.federal_income, Usd(dec!(400.00)));
    assert_eq!(t.taxes.employee_medicare, Usd(dec!(43.50)));
    assert_eq!(t.taxes.ca_private_disability_employee, Usd(dec!(12.00)));
    assert!(t.taxes.ca_state_income.is_zero());
}

#[test]
fn extraction_is_repeatable() {
    let xml = render(PAYSTUB);
    let doc = payslip_core::decode(xml.as_bytes()).unwrap();
    let first = payslip_core::extract(&doc).unwrap();
    let second = payslip_core::extract(&doc).unwrap();
    assert_eq!(first, second);
}

#[test]
fn duplicate_pay_date_is_not_singleton() {
    let mut lines = PAYSTUB.to_vec();
    lines.push(("Pay Date", "300,100,340,110"));
    let err = parse_lines(&lines).unwrap_err();

    assert_eq!(err.to_string(), "while converting paystub");
    assert!(matches!(
        err.root_cause(),
        PayslipError::NotSingleton { count: 2, .. }
    ));
    let chain = format!("{err:?}");
    assert!(chain.contains("while finding date"));
}

#[test]
fn missing_section_fails() {
    let err = parse_lines(&without("Paid Time Off")).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        PayslipError::NotSingleton { count: 0, .. }
    ));
}

#[test]
fn unknown_label_fails() {
    let lines: Vec<Line> = PAYSTUB
        .iter()
        .map(|&(t, b)| if t == "Dental" { ("Pet Insurance", b) } else { (t, b) })
        .collect();
    let err = parse_lines(&lines).unwrap_err();
    match err.root_cause() {
        PayslipError::UnknownCategory { label, amount, .. } => {
            assert_eq!(label, "Pet Insurance");
            assert_eq!(*amount, Usd(dec!(8.00)));
        }
        other => panic!("unexpected root cause: {other}"),
    }
}

#[test]
fn bad_amount_fails() {
    let lines: Vec<Line> = PAYSTUB
        .iter()
        .map(|&(t, b)| if t == "$43.50" { ("n/a", b) } else { (t, b) })
        .collect();
    let err = parse_lines(&lines).unwrap_err();
    assert!(matches!(err.root_cause(), PayslipError::Amount { .. }));
}

#[test]
fn not_xml_fails_while_decoding() {
    let err = parse("this is not a layout dump".as_bytes()).unwrap_err();
    assert_eq!(err.to_string(), "while decoding input");
}

#[test]
fn empty_document() {
    let err = parse("<pages></pages>".as_bytes()).unwrap_err();
    assert!(matches!(err.root_cause(), PayslipError::EmptyDocument));
}
