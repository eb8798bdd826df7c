//! Error types for Stackplot operations.
//!
//! [`StackplotError`] covers failures that stop a run. [`IngestError`]
//! describes a single file that could not be loaded; those are collected in
//! an [`ImportReport`](crate::ingest::ImportReport) and never abort a run.

use std::{
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// The main error type for Stackplot operations.
#[derive(Debug, Error)]
pub enum StackplotError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("No data or reference files loaded")]
    NoInput,

    #[error("Invalid project file {}: {source}", path.display())]
    Project {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for StackplotError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

/// Failure to load one data or reference file.
///
/// Every variant names the offending file.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("cannot read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("cannot parse {}: {message}", path.display())]
    Format { path: PathBuf, message: String },

    #[error("cannot read workbook {}: {source}", path.display())]
    Workbook {
        path: PathBuf,
        source: calamine::XlsxError,
    },
}

impl IngestError {
    pub(crate) fn format(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            message: message.into(),
        }
    }

    /// The file that failed to load.
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Format { path, .. } | Self::Workbook { path, .. } => path,
        }
    }
}
