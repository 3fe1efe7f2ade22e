use std::fmt;
use std::io::Read;
use std::ops::Range;

use crate::error::PayslipError;

/// Rows of string cells read from a CSV export, with lookups by the content
/// of the first column.
///
/// Rows may have differing lengths. There is no header row; row 0 is the
/// first record in the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PayslipError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_reader(reader);

        let rows = reader
            .records()
            .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
            .collect::<Result<Vec<Vec<String>>, csv::Error>>()?;
        tracing::debug!(rows = rows.len(), "read table");
        Ok(Table { rows })
    }

    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Table { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, i: usize) -> Option<&[String]> {
        self.rows.get(i).map(Vec::as_slice)
    }

    /// The cell at row `r`, column `c`; empty when the table has no such cell.
    pub fn cell(&self, r: usize, c: usize) -> &str {
        self.rows
            .get(r)
            .and_then(|row| row.get(c))
            .map_or("", String::as_str)
    }

    /// The first row whose first cell contains `s`.
    pub fn find_first(&self, s: &str) -> Option<usize> {
        self.find_from(0, s)
    }

    pub fn find_from(&self, from: usize, s: &str) -> Option<usize> {
        self.find_from_to(from, self.rows.len(), s)
    }

    /// The first row in `from..to` whose first cell contains `s`. Bounds past
    /// the end are clamped and reversed bounds are swapped.
    pub fn find_from_to(&self, from: usize, to: usize, s: &str) -> Option<usize> {
        self.span(from, to).find(|&i| {
            self.rows[i]
                .first()
                .is_some_and(|first| first.contains(s))
        })
    }

    /// Calls `f` with each row in `from..to`, normalized like
    /// [`Table::find_from_to`]. The first error stops the walk and is
    /// reported with its row index.
    pub fn for_each<F>(&self, from: usize, to: usize, mut f: F) -> Result<(), PayslipError>
    where
        F: FnMut(&[String]) -> Result<(), PayslipError>,
    {
        for i in self.span(from, to) {
            f(&self.rows[i]).map_err(|e| e.context(format!("row {i}")))?;
        }
        Ok(())
    }

    fn span(&self, from: usize, to: usize) -> Range<usize> {
        let to = to.min(self.rows.len());
        let from = from.min(self.rows.len());
        if from > to {
            to..from
        } else {
            from..to
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, row) in self.rows.iter().enumerate() {
            writeln!(f, "{n:010}: {}", row.join(","))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = "\
Employee,Jane Doe
Pay Date,07/15/2022
Earnings,Current,YTD
Regular Pay,\"$3,000.00\",\"$42,000.00\"
Annual Bonus,$500.00
,
Taxes,Current
Federal Income Tax,$400.00
";

    fn table() -> Table {
        Table::from_reader(INPUT.as_bytes()).unwrap()
    }

    #[test]
    fn test_rows_may_differ_in_length() {
        let t = table();
        assert_eq!(t.len(), 8);
        assert_eq!(t.row(2).unwrap().len(), 3);
        assert_eq!(t.row(4).unwrap().len(), 2);
        assert!(t.row(8).is_none());
    }

    #[test]
    fn test_cell_defaults_to_empty() {
        let t = table();
        assert_eq!(t.cell(3, 1), "$3,000.00");
        assert_eq!(t.cell(4, 2), "");
        assert_eq!(t.cell(100, 0), "");
    }

    #[test]
    fn test_find_matches_first_column_substring() {
        let t = table();
        assert_eq!(t.find_first("Pay"), Some(1));
        assert_eq!(t.find_first("Current"), None);
        assert_eq!(t.find_from(2, "Pay"), Some(3));
        assert_eq!(t.find_first("Tax"), Some(6));
        assert_eq!(t.find_from(7, "Tax"), Some(7));
    }

    #[test]
    fn test_find_bounds_are_normalized() {
        let t = table();
        assert_eq!(t.find_from_to(5, 1, "Earnings"), Some(2));
        assert_eq!(t.find_from_to(3, 1000, "Federal"), Some(7));
        assert_eq!(t.find_from_to(0, 2, "Earnings"), None);
        assert_eq!(t.find_from_to(50, 60, "Earnings"), None);
    }

    #[test]
    fn test_for_each_reports_failing_row() {
        let t = table();
        let mut seen = Vec::new();
        t.for_each(3, 5, |row| {
            seen.push(row[0].clone());
            Ok(())
        })
        .unwrap();
        assert_eq!(seen, vec!["Regular Pay", "Annual Bonus"]);

        let err = t
            .for_each(0, t.len(), |row| {
                if row[0].is_empty() {
                    Err(PayslipError::Structure("blank row".into()))
                } else {
                    Ok(())
                }
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "row 5");
        assert!(matches!(err.root_cause(), PayslipError::Structure(_)));
    }

    #[test]
    fn test_display_numbers_rows() {
        let t = Table::from_rows(vec![vec!["a".into(), "b".into()]]);
        assert_eq!(t.to_string(), "0000000000: a,b\n");
    }
}
