use crate::error::{PayslipError, ResultExt};
use crate::layout::{intersects, TextLine};
use crate::model::Usd;
use crate::parsing::values::parse_amount;

/// Pair a column of row labels with a column of amounts and hand each pair
/// to `setter`.
///
/// Both columns must be in reading order (top to bottom). A label may spill
/// over several lines; a label line with no amount level with it belongs to
/// the row above:
///
/// ```text
/// labels        amounts
/// Some Text     $1,123.44
/// Some other    $2,345.66
/// text
/// ```
///
/// yields `("Some Text", 1123.44)` and `("Some other text", 2345.66)`.
/// The first unparseable amount or rejected label aborts the whole column.
pub fn store_amounts<F>(
    labels: &[&TextLine],
    amounts: &[&TextLine],
    mut setter: F,
) -> Result<(), PayslipError>
where
    F: FnMut(&str, Usd) -> Result<(), PayslipError>,
{
    tracing::trace!(
        labels = labels.len(),
        amounts = amounts.len(),
        "pairing label and amount columns"
    );

    let mut cursor = 0;
    let mut i = 0;
    while i < labels.len() {
        let mut name = labels[i].text();
        let next = cursor + 1;

        for label in &labels[i + 1..] {
            // A line level with the next amount starts a new row. Once the
            // amounts run out, every remaining line continues this one.
            if next < amounts.len()
                && intersects(&label.bbox.extend_right(), &amounts[next].bbox)
            {
                break;
            }
            name.push(' ');
            name.push_str(&label.text());
            i += 1;
        }

        let raw = amounts
            .get(cursor)
            .map(|a| a.text())
            .ok_or_else(|| PayslipError::MissingAmount { row: name.clone() })?;
        let amount = parse_amount(&raw)
            .with_context(|| format!("while parsing {raw:?} for row {name:?}"))?;
        tracing::debug!(row = %name, %amount, "paired row");
        setter(&name, amount)
            .with_context(|| format!("could not set value {amount} for row {name:?}"))?;

        cursor += 1;
        i += 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{BBox, TextRun};
    use rust_decimal_macros::dec;

    fn line(text: &str, left: f64, top: f64) -> TextLine {
        TextLine {
            bbox: BBox::new(left, top - 8.0, left + 60.0, top),
            runs: vec![TextRun {
                text: text.to_string(),
                ..Default::default()
            }],
        }
    }

    fn collect(
        labels: &[TextLine],
        amounts: &[TextLine],
    ) -> Result<Vec<(String, Usd)>, PayslipError> {
        let labels: Vec<&TextLine> = labels.iter().collect();
        let amounts: Vec<&TextLine> = amounts.iter().collect();
        let mut got = Vec::new();
        store_amounts(&labels, &amounts, |name, amount| {
            got.push((name.to_string(), amount));
            Ok(())
        })?;
        Ok(got)
    }

    #[test]
    fn test_trailing_continuation_is_merged() {
        let labels = [
            line("Some Text", 10.0, 100.0),
            line("Some other", 10.0, 90.0),
            line("text", 10.0, 80.0),
        ];
        let amounts = [line("$1,123.44", 200.0, 100.0), line("$2,345.66", 200.0, 90.0)];
        let got = collect(&labels, &amounts).unwrap();
        assert_eq!(
            got,
            vec![
                ("Some Text".to_string(), Usd(dec!(1123.44))),
                ("Some other text".to_string(), Usd(dec!(2345.66))),
            ]
        );
    }

    #[test]
    fn test_continuation_in_the_middle() {
        let labels = [
            line("Vol Life", 10.0, 100.0),
            line("Spouse", 10.0, 90.0),
            line("Medical", 10.0, 80.0),
        ];
        let amounts = [line("$3.10", 200.0, 100.0), line("$40.00", 200.0, 80.0)];
        let got = collect(&labels, &amounts).unwrap();
        assert_eq!(
            got,
            vec![
                ("Vol Life Spouse".to_string(), Usd(dec!(3.10))),
                ("Medical".to_string(), Usd(dec!(40.00))),
            ]
        );
    }

    #[test]
    fn test_several_trailing_lines() {
        let labels = [
            line("CA Private", 10.0, 100.0),
            line("Disability", 10.0, 90.0),
            line("Employee", 10.0, 80.0),
        ];
        let amounts = [line("$12.00", 200.0, 100.0)];
        let got = collect(&labels, &amounts).unwrap();
        assert_eq!(got, vec![("CA Private Disability Employee".to_string(), Usd(dec!(12.00)))]);
    }

    #[test]
    fn test_bad_amount_names_the_row() {
        let labels = [line("Dental", 10.0, 100.0)];
        let amounts = [line("n/a", 200.0, 100.0)];
        let err = collect(&labels, &amounts).unwrap_err();
        assert!(err.to_string().contains("\"Dental\""));
        assert!(matches!(err.root_cause(), PayslipError::Amount { .. }));
    }

    #[test]
    fn test_setter_error_aborts() {
        let labels = [line("Dental", 10.0, 100.0), line("Vision", 10.0, 90.0)];
        let amounts = [line("$1.00", 200.0, 100.0), line("$2.00", 200.0, 90.0)];
        let label_refs: Vec<&TextLine> = labels.iter().collect();
        let amount_refs: Vec<&TextLine> = amounts.iter().collect();
        let mut calls = 0;
        let err = store_amounts(&label_refs, &amount_refs, |_, _| {
            calls += 1;
            Err(PayslipError::Structure("rejected".into()))
        })
        .unwrap_err();
        assert_eq!(calls, 1);
        assert!(err.to_string().contains("could not set value"));
    }

    #[test]
    fn test_no_amounts_is_an_error() {
        let labels = [line("Dental", 10.0, 100.0)];
        let err = collect(&labels, &[]).unwrap_err();
        assert!(matches!(err, PayslipError::MissingAmount { .. }));
    }

    #[test]
    fn test_empty_columns() {
        assert!(collect(&[], &[]).unwrap().is_empty());
    }
}
