//! Per-run accumulation of files that failed to load.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::error::IngestError;

/// Whether a failed file was a data series or a reference pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Data,
    Reference,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data => write!(f, "DATA"),
            Self::Reference => write!(f, "REF"),
        }
    }
}

/// One file that could not be loaded.
#[derive(Debug)]
pub struct ImportFailure {
    kind: FileKind,
    path: PathBuf,
    error: IngestError,
}

impl ImportFailure {
    pub fn kind(&self) -> FileKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn error(&self) -> &IngestError {
        &self.error
    }

    /// File name without directories, as shown in the summary.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

impl fmt::Display for ImportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} — {}", self.kind, self.file_name(), self.error)
    }
}

/// Files skipped during one run, in load order.
///
/// A fresh report is created for every run and handed back with the scene.
#[derive(Debug, Default)]
pub struct ImportReport {
    failures: Vec<ImportFailure>,
}

impl ImportReport {
    pub fn push(&mut self, kind: FileKind, path: impl Into<PathBuf>, error: IngestError) {
        self.failures.push(ImportFailure {
            kind,
            path: path.into(),
            error,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImportFailure> {
        self.failures.iter()
    }

    /// One consolidated message listing every failure, or `None` if all
    /// files loaded.
    pub fn summary(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        let lines: Vec<String> = self.failures.iter().map(ToString::to_string).collect();
        Some(format!(
            "Some files could not be loaded:\n\n{}",
            lines.join("\n")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(path: &str, message: &str) -> IngestError {
        IngestError::format(path, message)
    }

    #[test]
    fn test_empty_report_has_no_summary() {
        let report = ImportReport::default();
        assert!(report.is_empty());
        assert_eq!(report.summary(), None);
    }

    #[test]
    fn test_summary_lists_failures_in_order() {
        let mut report = ImportReport::default();
        report.push(
            FileKind::Data,
            "/scans/a.xy",
            failure("/scans/a.xy", "no data rows"),
        );
        report.push(
            FileKind::Reference,
            "/refs/quartz.csv",
            failure("/refs/quartz.csv", "line 2: missing column 2"),
        );

        assert_eq!(report.len(), 2);
        let summary = report.summary().unwrap();
        let mut lines = summary.lines();
        assert_eq!(lines.next(), Some("Some files could not be loaded:"));
        assert_eq!(lines.next(), Some(""));
        assert!(lines.next().unwrap().starts_with("[DATA] a.xy — "));
        assert!(lines.next().unwrap().starts_with("[REF] quartz.csv — "));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_failure_accessors() {
        let mut report = ImportReport::default();
        report.push(FileKind::Data, "b.gr", failure("b.gr", "could not find `#L` header"));
        let failure = report.iter().next().unwrap();
        assert_eq!(failure.kind(), FileKind::Data);
        assert_eq!(failure.path(), Path::new("b.gr"));
        assert_eq!(failure.file_name(), "b.gr");
        assert!(failure.error().to_string().contains("#L"));
    }
}
