//! Directive parsing for stackplot.
//!
//! Turns free-form `key = value` directive text into a [`DirectiveSet`] and
//! resolves it into typed [`PlotOptions`].

pub mod directive;
pub mod options;
pub mod values;

mod error;

pub use directive::{DirectiveSet, parse_directives};
pub use error::ValueError;
pub use options::PlotOptions;
