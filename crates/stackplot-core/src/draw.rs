//! Visual definitions shared by curves, reference marks and legend handles.

mod stroke;

pub use stroke::{LineStyle, StrokeDefinition};
