//! Excel reference workbooks.

use std::path::Path;

use calamine::{Data, Reader as _, Xlsx, open_workbook};

use stackplot_parser::values::parse_decimal;

use super::{PatternKind, ReferencePattern, Sample, reference::select_columns};
use crate::error::IngestError;

/// Reads the first worksheet; its first row holds the column headers.
pub(super) fn read_workbook(path: &Path) -> Result<ReferencePattern, IngestError> {
    let workbook_error = |source| IngestError::Workbook {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook: Xlsx<_> = open_workbook(path).map_err(workbook_error)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::format(path, "workbook has no worksheets"))?
        .map_err(workbook_error)?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .unwrap_or_default();
    if headers.len() < 2 {
        return Err(IngestError::format(
            path,
            "first worksheet needs at least two columns",
        ));
    }
    let (x_col, y_col) = select_columns(&headers);

    let samples = rows
        .enumerate()
        .filter(|(_, row)| row.iter().any(|cell| !matches!(cell, Data::Empty)))
        .map(|(n, row)| -> Result<Sample, String> {
            // Row numbers as shown by Excel: 1-based, after the header.
            let cell = |col: usize| {
                cell_value(row.get(col).unwrap_or(&Data::Empty))
                    .map_err(|message| format!("row {}: {message}", n + 2))
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

/// Numeric value of a cell. Empty cells read as NaN and are never marked.
fn cell_value(cell: &Data) -> Result<f64, String> {
    match cell {
        Data::Float(value) => Ok(*value),
        Data::Int(value) => Ok(*value as f64),
        Data::String(text) => parse_decimal(text).map_err(|err| err.to_string()),
        Data::Empty => Ok(f64::NAN),
        other => Err(format!("unsupported cell `{other}`")),
    }
}
