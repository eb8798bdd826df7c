//! Readers for text reference files.

use std::path::Path;

use stackplot_parser::values::parse_decimal;

use super::{PatternKind, ReferencePattern, Sample, parse_numeric_rows};
use crate::error::IngestError;

/// Header naming the peak position column.
const POSITION_COLUMN: &str = "2Theta (°)";

/// Intensity headers, in order of preference.
const INTENSITY_COLUMNS: [&str; 2] = ["I var", "I fix"];

/// Returns the `(x, y)` column indices for a table with the given headers.
///
/// A `2Theta (°)` header selects the position column; intensity then comes
/// from `I var`, `I fix` or the second column. Without the position header
/// the first two columns are used.
pub(super) fn select_columns<S: AsRef<str>>(headers: &[S]) -> (usize, usize) {
    let find = |name: &str| headers.iter().position(|h| h.as_ref().trim() == name);
    match find(POSITION_COLUMN) {
        Some(x) => {
            let y = INTENSITY_COLUMNS
                .iter()
                .find_map(|&name| find(name))
                .unwrap_or(1);
            (x, y)
        }
        None => (0, 1),
    }
}

fn is_table_separator(c: char) -> bool {
    matches!(c, ',' | '\t' | ';' | ' ')
}

fn split_table_row(line: &str) -> Vec<&str> {
    line.split(is_table_separator)
        .filter(|field| !field.is_empty())
        .collect()
}

/// Header cells keep their inner spaces unless spaces are the only separator.
fn split_header_row(line: &str) -> Vec<&str> {
    if line.contains([',', '\t', ';']) {
        line.split([',', '\t', ';'])
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .collect()
    } else {
        line.split_whitespace().collect()
    }
}

/// Reads a reference table split on runs of `,` tab `;` or space.
///
/// `#` starts a comment. A first row that is not entirely numeric is a
/// header. Tables always describe peak lists.
pub(super) fn read_table(path: &Path, text: &str) -> Result<ReferencePattern, IngestError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(n, line)| (n, line.split('#').next().unwrap_or_default().trim()))
        .filter(|(_, line)| !line.is_empty())
        .peekable();

    let header = lines.next_if(|(_, line)| {
        split_table_row(line)
            .iter()
            .any(|field| parse_decimal(field).is_err())
    });
    let (x_col, y_col) = match &header {
        Some((_, line)) => select_columns(&split_header_row(line)),
        None => (0, 1),
    };

    let samples = lines
        .map(|(n, line)| -> Result<Sample, String> {
            let fields = split_table_row(line);
            let cell = |col: usize| -> Result<f64, String> {
                let field = fields.get(col).ok_or_else(|| {
                    format!("line {}: missing column {}", n + 1, col + 1)
                })?;
                parse_decimal(field)
                    .map_err(|err| format!("line {}: {err}", n + 1))
            };
            Ok((cell(x_col)?, cell(y_col)?))
        })
        .collect::<Result<Vec<Sample>, String>>()
        .map_err(|message| IngestError::format(path, message))?;

    if samples.is_empty() {
        return Err(IngestError::format(path, "no data rows"));
    }
    Ok(ReferencePattern::new(PatternKind::PeakList, samples))
}

/// Reads bare whitespace-separated numbers.
///
/// A single row or a single column holds peak positions with unit
/// intensity. Two or more columns on several rows are an `(x, y)` curve.
pub(super) fn read_raw_numeric(path: &Path, text: &str) -> Result<ReferencePattern, IngestError> {
    let rows = parse_numeric_rows(text.lines().enumerate())
        .map_err(|message| IngestError::format(path, message))?;

    match rows.as_slice() {
        [] => Err(IngestError::format(path, "no data rows")),
        [row] => Ok(positions(row.iter().copied())),
        [first, ..] if first.len() == 1 => Ok(positions(rows.iter().map(|row| row[0]))),
        _ => Ok(ReferencePattern::new(
            PatternKind::Continuous,
            super::first_two_columns(&rows),
        )),
    }
}

fn positions(xs: impl Iterator<Item = f64>) -> ReferencePattern {
    ReferencePattern::new(PatternKind::PeakList, xs.map(|x| (x, 1.0)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_columns() {
        assert_eq!(select_columns(&["a", "b", "c"]), (0, 1));
        assert_eq!(select_columns(&["h", "2Theta (°)", "I fix", "I var"]), (1, 3));
        assert_eq!(select_columns(&["2Theta (°)", "d", "I fix"]), (0, 2));
        assert_eq!(select_columns(&["d", "2Theta (°)", "hkl"]), (1, 1));
    }

    #[test]
    fn test_table_mixed_separators() {
        let pattern = read_table(Path::new("q.csv"), "10.5, 100\n20.1\t40\n30;  5\n").unwrap();
        assert_eq!(pattern.kind(), PatternKind::PeakList);
        assert_eq!(
            pattern.samples(),
            &[(10.5, 100.0), (20.1, 40.0), (30.0, 5.0)]
        );
    }

    #[test]
    fn test_table_header_selects_columns() {
        let text = "h;k;l;2Theta (°);I fix;I var\n1;0;0;26.6;80;100\n1;0;1;20.9;15;22\n";
        let pattern = read_table(Path::new("q.csv"), text).unwrap();
        assert_eq!(pattern.samples(), &[(26.6, 100.0), (20.9, 22.0)]);
    }

    #[test]
    fn test_table_generic_header_skipped() {
        let text = "# quartz\nangle intensity\n26.6 100\n";
        let pattern = read_table(Path::new("q.txt"), text).unwrap();
        assert_eq!(pattern.samples(), &[(26.6, 100.0)]);
    }

    #[test]
    fn test_table_errors_name_file() {
        let err = read_table(Path::new("q.dat"), "26.6\n").unwrap_err();
        assert!(err.to_string().contains("q.dat"));
        assert!(read_table(Path::new("q.dat"), "# only comments\n").is_err());
    }

    #[test]
    fn test_raw_numeric_single_column() {
        let pattern = read_raw_numeric(Path::new("q.hkl"), "26.6\n20.9\n").unwrap();
        assert_eq!(pattern.kind(), PatternKind::PeakList);
        assert_eq!(pattern.samples(), &[(26.6, 1.0), (20.9, 1.0)]);
    }

    #[test]
    fn test_raw_numeric_single_row() {
        let pattern = read_raw_numeric(Path::new("q.hkl"), "26.6 20.9 50.1\n").unwrap();
        assert_eq!(pattern.kind(), PatternKind::PeakList);
        assert_eq!(pattern.samples().len(), 3);
    }

    #[test]
    fn test_raw_numeric_curve() {
        let pattern = read_raw_numeric(Path::new("q.chi"), "1 0 7\n2 3 7\n").unwrap();
        assert_eq!(pattern.kind(), PatternKind::Continuous);
        assert_eq!(pattern.samples(), &[(1.0, 0.0), (2.0, 3.0)]);
    }

    #[test]
    fn test_raw_numeric_empty() {
        assert!(read_raw_numeric(Path::new("q.chi"), "\n# nothing\n").is_err());
    }
}
