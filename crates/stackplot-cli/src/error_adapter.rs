//! Error adapter for converting Stackplot errors to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Import Failures
//!
//! Files that fail to load do not stop a run. Each entry of an
//! [`ImportReport`] becomes its own [`Reportable`] so that every skipped file
//! is rendered independently.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use stackplot::{
    StackplotError,
    ingest::{FileKind, ImportFailure, ImportReport},
};

/// Adapter for a single file that could not be loaded.
pub struct ImportAdapter<'a>(pub &'a ImportFailure);

impl fmt::Debug for ImportAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportAdapter")
            .field("path", &self.0.path())
            .finish()
    }
}

impl fmt::Display for ImportAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} was skipped", self.0.kind(), self.0.file_name())
    }
}

impl std::error::Error for ImportAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.0.error())
    }
}

impl MietteDiagnostic for ImportAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("stackplot::ingest"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0.kind() {
            FileKind::Data => "Data files need at least two numeric columns",
            FileKind::Reference => {
                "Reference files need position and intensity columns, or a `2Theta (°)` header"
            }
        };
        Some(Box::new(help))
    }
}

/// Adapter for a [`StackplotError`] that stopped the run.
pub struct ErrorAdapter<'a>(pub &'a StackplotError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            StackplotError::Io(_) => "stackplot::io",
            StackplotError::NoInput => "stackplot::no_input",
            StackplotError::Project { .. } => "stackplot::project",
            StackplotError::Export(_) => "stackplot::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            StackplotError::NoInput => Some(Box::new(
                "Pass files with --data and --ref, or a project with --project",
            )),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A file skipped during ingestion.
    Import(ImportAdapter<'a>),
    /// An error that stopped the run.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Import(i) => fmt::Display::fmt(i, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Import(i) => std::error::Error::source(i),
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Import(i) => i.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Import(i) => i.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Import(i) => i.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`StackplotError`] into a list of reportable errors.
pub fn to_reportables(err: &StackplotError) -> Vec<Reportable<'_>> {
    vec![Reportable::Error(ErrorAdapter(err))]
}

/// One [`Reportable`] per file listed in `report`, in load order.
pub fn import_reportables(report: &ImportReport) -> Vec<Reportable<'_>> {
    report
        .iter()
        .map(|failure| Reportable::Import(ImportAdapter(failure)))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use stackplot::{Plot, PlotBuilder, PlotRequest};

    use super::*;

    fn plot_with_missing_files(dir: &Path) -> Plot {
        let request = PlotRequest {
            data_files: vec![dir.join("a.xy")],
            ref_files: vec![dir.join("quartz.csv")],
            ..PlotRequest::default()
        };
        PlotBuilder::default().with_seed(0).build(&request).unwrap()
    }

    #[test]
    fn test_one_reportable_per_failed_file() {
        let dir = tempfile::tempdir().unwrap();
        let plot = plot_with_missing_files(dir.path());

        let reportables = import_reportables(plot.report());
        assert_eq!(reportables.len(), 2);
        assert_eq!(reportables[0].to_string(), "[DATA] a.xy was skipped");
        assert_eq!(reportables[1].to_string(), "[REF] quartz.csv was skipped");

        for reportable in &reportables {
            let code = reportable.code().unwrap().to_string();
            assert_eq!(code, "stackplot::ingest");
            assert!(std::error::Error::source(reportable).is_some());
        }
    }

    #[test]
    fn test_empty_report_has_no_reportables() {
        assert!(import_reportables(&ImportReport::default()).is_empty());
    }

    #[test]
    fn test_no_input_error() {
        let err = StackplotError::NoInput;

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "No data or reference files loaded");
                assert_eq!(e.code().unwrap().to_string(), "stackplot::no_input");
                assert!(e.help().is_some());
            }
            Reportable::Import(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_io_error_code() {
        let err = StackplotError::Io(std::io::Error::other("disk full"));
        let reportables = to_reportables(&err);
        assert_eq!(reportables[0].code().unwrap().to_string(), "stackplot::io");
        assert!(reportables[0].help().is_none());
    }
}
