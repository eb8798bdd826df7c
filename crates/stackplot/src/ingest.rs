//! Format-dispatch ingestion.
//!
//! A file's extension selects one [`IngestStrategy`] through the pure
//! [`classify`] function; the strategy then reads the file into uniform
//! `(x, y)` samples. Data files become stacked curves, reference files
//! become [`ReferencePattern`]s classified as continuous curves or peak
//! lists.
//!
//! | role | extension | strategy |
//! |------|-----------|----------|
//! | data | `.csv` | [`IngestStrategy::Delimited`] |
//! | data | `.gr` | [`IngestStrategy::Marker`] |
//! | data | other | [`IngestStrategy::Whitespace`] |
//! | reference | `.csv` `.xy` `.txt` `.dat` | [`IngestStrategy::Table`] |
//! | reference | `.xlsx` | [`IngestStrategy::Spreadsheet`] |
//! | reference | other | [`IngestStrategy::RawNumeric`] |

mod delimited;
mod reference;
mod report;
mod spreadsheet;

pub use report::{FileKind, ImportFailure, ImportReport};

use std::{fs, path::Path};

use log::debug;

use crate::{config::IngestConfig, error::IngestError};

/// One `(x, y)` sample.
pub type Sample = (f64, f64);

/// Whether a file holds a measured curve or a reference pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    Data,
    Reference,
}

/// The closed set of readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestStrategy {
    /// Unknown delimiter and header length, probed in priority order
    Delimited,
    /// Data block following the first `#L` line
    Marker,
    /// Whitespace-separated columns with one header row and `#` comments
    Whitespace,
    /// Reference table split on runs of `,` tab `;` or space
    Table,
    /// First worksheet of an Excel workbook
    Spreadsheet,
    /// Bare numbers; one dimension is a peak list, two are a curve
    RawNumeric,
}

/// How reference samples are turned into marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// A sampled profile whose local maxima become marks
    Continuous,
    /// Explicit peak positions with intensities
    PeakList,
}

/// Samples read from one reference file.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferencePattern {
    kind: PatternKind,
    samples: Vec<Sample>,
}

impl ReferencePattern {
    pub fn new(kind: PatternKind, samples: Vec<Sample>) -> Self {
        Self { kind, samples }
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }
}

/// Chooses the reader for `path` from its lower-cased extension.
pub fn classify(role: FileRole, path: &Path) -> IngestStrategy {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match (role, extension.as_str()) {
        (FileRole::Data, "csv") => IngestStrategy::Delimited,
        (FileRole::Data, "gr") => IngestStrategy::Marker,
        (FileRole::Data, _) => IngestStrategy::Whitespace,
        (FileRole::Reference, "csv" | "xy" | "txt" | "dat") => IngestStrategy::Table,
        (FileRole::Reference, "xlsx") => IngestStrategy::Spreadsheet,
        (FileRole::Reference, _) => IngestStrategy::RawNumeric,
    }
}

/// Reads a data file into `(x, y)` samples.
///
/// # Errors
///
/// Returns an [`IngestError`] naming `path` if the file cannot be read or
/// holds no usable two-column block.
pub fn read_series(path: &Path, config: &IngestConfig) -> Result<Vec<Sample>, IngestError> {
    let strategy = classify(FileRole::Data, path);
    let text = read_text(path)?;

    let samples = match strategy {
        IngestStrategy::Delimited => {
            delimited::read_delimited(path, &text, config.max_header_lines())
        }
        IngestStrategy::Marker => delimited::read_marker(path, &text),
        _ => delimited::read_whitespace(path, &text),
    }?;

    debug!(
        file:? = path, strategy:?, samples_count = samples.len();
        "Data file loaded"
    );
    Ok(samples)
}

/// Reads a reference file into a classified pattern.
///
/// # Errors
///
/// Returns an [`IngestError`] naming `path` if the file cannot be read or
/// parsed.
pub fn read_reference(path: &Path) -> Result<ReferencePattern, IngestError> {
    let strategy = classify(FileRole::Reference, path);

    let pattern = match strategy {
        IngestStrategy::Spreadsheet => spreadsheet::read_workbook(path),
        IngestStrategy::Table => reference::read_table(path, &read_text(path)?),
        _ => reference::read_raw_numeric(path, &read_text(path)?),
    }?;

    debug!(
        file:? = path, strategy:?, kind:? = pattern.kind(), samples_count = pattern.samples().len();
        "Reference file loaded"
    );
    Ok(pattern)
}

fn read_text(path: &Path) -> Result<String, IngestError> {
    let bytes = fs::read(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Splits `line` on `delimiter`; a space stands for any run of whitespace.
fn split_fields(line: &str, delimiter: char) -> Vec<&str> {
    if delimiter == ' ' {
        line.split_whitespace().collect()
    } else {
        line.split(delimiter).map(str::trim).collect()
    }
}

fn parse_number(field: &str) -> Option<f64> {
    field.trim().parse().ok()
}

/// Parses whitespace-separated numeric rows with a uniform column count.
///
/// `#` starts a comment and blank lines are skipped. Line numbers in error
/// messages are 1-based and count from the start of `lines`.
fn parse_numeric_rows<'a>(
    lines: impl Iterator<Item = (usize, &'a str)>,
) -> Result<Vec<Vec<f64>>, String> {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (line_no, line) in lines {
        let content = line.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }
        let row = content
            .split_whitespace()
            .map(|field| {
                parse_number(field)
                    .ok_or_else(|| format!("line {}: `{field}` is not a number", line_no + 1))
            })
            .collect::<Result<Vec<f64>, String>>()?;
        if let Some(expected) = rows.first().map(Vec::len).filter(|&n| n != row.len()) {
            return Err(format!(
                "line {}: expected {expected} columns, found {}",
                line_no + 1,
                row.len()
            ));
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Keeps the first two columns of each row.
fn first_two_columns(rows: &[Vec<f64>]) -> Vec<Sample> {
    rows.iter().map(|row| (row[0], row[1])).collect()
}
