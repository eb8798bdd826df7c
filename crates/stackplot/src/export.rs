//! Export functionality for Stackplot scenes.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! turning an assembled [`Scene`] into an output format. It is the final
//! stage of the pipeline and the only one that writes anything.
//!
//! # Pipeline Position
//!
//! ```text
//! Directive Text + Files
//!     ↓ resolve / ingest
//! Stacked Series and Reference Marks
//!     ↓ layout / assemble
//! Scene
//!     ↓ export (this module)
//! Output File
//! ```
//!
//! # Available Backends
//!
//! - [`svg`]: vector output via [`svg::SvgBuilder`] and [`svg::Svg`]
//! - [`png`]: raster output via [`png::PngBuilder`] and [`png::Png`], drawn
//!   at the export DPI
//!
//! # Error Handling
//!
//! Export operations return [`Error`], which converts into
//! [`StackplotError::Export`](crate::StackplotError::Export) at the crate
//! boundary.

/// PNG export backend.
pub mod png;
/// SVG export backend.
pub mod svg;

use crate::scene::Scene;

/// Abstraction for scene export backends.
pub trait Exporter {
    /// Exports a scene to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the scene cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_scene(&mut self, scene: &Scene) -> Result<(), Error>;
}

/// Errors that can occur during export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
    /// An output file name whose extension names no backend.
    UnsupportedFormat(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::UnsupportedFormat(file_name) => {
                write!(f, "Unsupported output format for {file_name}, expected .svg or .png")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) | Self::UnsupportedFormat(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
