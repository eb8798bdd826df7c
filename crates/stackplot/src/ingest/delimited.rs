//! Readers for data files.

use std::path::Path;

use log::trace;

use super::{Sample, first_two_columns, parse_number, parse_numeric_rows, split_fields};
use crate::error::IngestError;

/// Delimiters probed in priority order. A space matches runs of whitespace.
const DELIMITERS: [char; 4] = [',', '\t', ';', ' '];

/// Reads a delimited file with unknown delimiter and header length.
///
/// For each header-skip count from `0` to `max_header_lines`, each
/// delimiter is tried in turn. The first combination yielding at least two
/// columns whose first two are numeric on every non-blank row wins.
pub(super) fn read_delimited(
    path: &Path,
    text: &str,
    max_header_lines: usize,
) -> Result<Vec<Sample>, IngestError> {
    for skip in 0..=max_header_lines {
        for delimiter in DELIMITERS {
            if let Some(samples) = try_table(text, skip, delimiter) {
                trace!(skip, delimiter:?; "Delimited layout detected");
                return Ok(samples);
            }
        }
    }
    Err(IngestError::format(
        path,
        format!(
            "no delimiter yields two numeric columns within {max_header_lines} header lines"
        ),
    ))
}

fn try_table(text: &str, skip: usize, delimiter: char) -> Option<Vec<Sample>> {
    let samples = text
        .lines()
        .skip(skip)
        .filter(|line| !line.trim().is_empty())
        .map(|line| match split_fields(line, delimiter).as_slice() {
            [x, y, ..] => Some((parse_number(x)?, parse_number(y)?)),
            _ => None,
        })
        .collect::<Option<Vec<Sample>>>()?;
    (!samples.is_empty()).then_some(samples)
}

/// Reads the data block that follows the first line starting with `#L`.
pub(super) fn read_marker(path: &Path, text: &str) -> Result<Vec<Sample>, IngestError> {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines
        .iter()
        .position(|line| line.trim().starts_with("#L"))
        .ok_or_else(|| IngestError::format(path, "could not find `#L` header"))?;

    let rows = parse_numeric_rows(lines.iter().copied().enumerate().skip(start + 1))
        .map_err(|message| IngestError::format(path, message))?;

    match rows.first() {
        Some(row) if row.len() >= 2 => Ok(first_two_columns(&rows)),
        _ => Err(IngestError::format(
            path,
            "data section does not have two columns",
        )),
    }
}

/// Reads whitespace-separated columns after one header row.
pub(super) fn read_whitespace(path: &Path, text: &str) -> Result<Vec<Sample>, IngestError> {
    let rows = parse_numeric_rows(text.lines().enumerate().skip(1))
        .map_err(|message| IngestError::format(path, message))?;

    match rows.first() {
        Some(row) if row.len() >= 2 => Ok(first_two_columns(&rows)),
        Some(row) => Err(IngestError::format(
            path,
            format!("expected at least two columns, found {}", row.len()),
        )),
        None => Err(IngestError::format(path, "no data rows")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> &'static Path {
        Path::new("sample.csv")
    }

    #[test]
    fn test_delimited_comma_without_header() {
        let samples = read_delimited(path(), "1,2\n3,4\n", 5).unwrap();
        assert_eq!(samples, vec![(1.0, 2.0), (3.0, 4.0)]);
    }

    #[test]
    fn test_delimited_skips_header_lines() {
        let text = "Instrument X\nScan 3\n2theta;counts\n10;100\n10.5;120\n";
        let samples = read_delimited(path(), text, 5).unwrap();
        assert_eq!(samples, vec![(10.0, 100.0), (10.5, 120.0)]);
    }

    #[test]
    fn test_delimited_tab_and_whitespace() {
        let samples = read_delimited(path(), "1\t2\t9\n3\t4\t9\n", 5).unwrap();
        assert_eq!(samples, vec![(1.0, 2.0), (3.0, 4.0)]);

        let samples = read_delimited(path(), "1   2\n3 4\n", 5).unwrap();
        assert_eq!(samples, vec![(1.0, 2.0), (3.0, 4.0)]);
    }

    #[test]
    fn test_delimited_keeps_first_two_columns() {
        let samples = read_delimited(path(), "1,2,3,4\n5,6,7,8\n", 0).unwrap();
        assert_eq!(samples, vec![(1.0, 2.0), (5.0, 6.0)]);
    }

    #[test]
    fn test_delimited_header_budget_exceeded() {
        let text = "a\nb\nc\n1,2\n";
        assert!(read_delimited(path(), text, 2).is_err());
        assert!(read_delimited(path(), text, 3).is_ok());
    }

    #[test]
    fn test_delimited_rejects_single_column() {
        let err = read_delimited(path(), "1\n2\n3\n", 5).unwrap_err();
        assert!(err.to_string().contains("sample.csv"));
    }

    #[test]
    fn test_marker_block() {
        let text = "[PDFgetX3]\nwavelength = 0.7\n#### start data\n#S 1\n#L r($\\AA$)  G($\\AA^{-2}$)\n0.01 0.0\n0.02 0.5\n";
        let samples = read_marker(Path::new("a.gr"), text).unwrap();
        assert_eq!(samples, vec![(0.01, 0.0), (0.02, 0.5)]);
    }

    #[test]
    fn test_marker_missing() {
        let err = read_marker(Path::new("a.gr"), "0.01 0.0\n").unwrap_err();
        assert!(err.to_string().contains("#L"));
    }

    #[test]
    fn test_marker_single_column() {
        assert!(read_marker(Path::new("a.gr"), "#L r\n1\n2\n").is_err());
    }

    #[test]
    fn test_whitespace_skips_one_header_row() {
        let text = "2theta intensity\n# comment\n10 1\n20 2 # note\n";
        let samples = read_whitespace(Path::new("a.xy"), text).unwrap();
        assert_eq!(samples, vec![(10.0, 1.0), (20.0, 2.0)]);
    }

    #[test]
    fn test_whitespace_errors() {
        assert!(read_whitespace(Path::new("a.xy"), "header\n1\n2\n").is_err());
        assert!(read_whitespace(Path::new("a.xy"), "header\n").is_err());
        assert!(read_whitespace(Path::new("a.xy"), "header\n1 x\n").is_err());
    }
}
