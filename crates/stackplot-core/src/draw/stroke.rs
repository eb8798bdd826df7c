//! Stroke and line-style definitions.
//!
//! # Overview
//!
//! Exported types:
//! - [`StrokeDefinition`]: color, width and pattern of a line
//! - [`LineStyle`]: Enum defining line patterns (solid, dashed, dotted, dash-dot)
//! - [`apply_stroke!`](crate::apply_stroke!): Macro for applying stroke attributes to SVG elements
//!
//! Widths are expressed in points (1/72 inch), the unit line-width directives
//! are written in. Dash patterns scale with the width so a hairline dashed
//! curve keeps its rhythm.
//!
//! # Quick Start
//!
//! ```
//! use stackplot_core::draw::{LineStyle, StrokeDefinition};
//! use stackplot_core::color::Color;
//! use svg::node::element as svg_element;
//!
//! let mut stroke = StrokeDefinition::new(Color::new("blue").unwrap(), 1.5);
//! stroke.set_style("--".parse().unwrap());
//! assert_eq!(*stroke.style(), LineStyle::Dashed);
//!
//! let line = svg_element::Line::new().set("x1", 0).set("x2", 10);
//! let line = stackplot_core::apply_stroke!(line, &stroke);
//! ```

use std::str::FromStr;

use crate::color::Color;

/// Defines the dash pattern of a stroke.
///
/// Accepts both the spelled-out names and the compact plotting codes:
///
/// | Variant | Names |
/// |---------|-------|
/// | `Solid` | `solid`, `-` |
/// | `Dashed` | `dashed`, `--` |
/// | `Dotted` | `dotted`, `:` |
/// | `DashDot` | `dashdot`, `dash-dot`, `-.` |
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// Solid continuous line (default)
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
}

impl FromStr for LineStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solid" | "-" => Ok(Self::Solid),
            "dashed" | "--" => Ok(Self::Dashed),
            "dotted" | ":" => Ok(Self::Dotted),
            "dashdot" | "dash-dot" | "-." => Ok(Self::DashDot),
            _ => Err(format!(
                "invalid line style `{s}`, valid values: solid, dashed, dotted, dashdot"
            )),
        }
    }
}

impl LineStyle {
    /// Dash and gap lengths as multiples of the stroke width
    fn pattern(self) -> &'static [f64] {
        match self {
            Self::Solid => &[],
            Self::Dashed => &[3.7, 1.6],
            Self::Dotted => &[1.0, 1.65],
            Self::DashDot => &[6.4, 1.6, 1.0, 1.6],
        }
    }

    /// Returns the SVG dasharray value for a stroke of `width`, or None for solid lines
    pub fn to_svg_value(self, width: f64) -> Option<String> {
        let pattern = self.pattern();
        if pattern.is_empty() {
            return None;
        }
        // Very thin strokes would collapse the pattern into a solid line.
        let scale = width.max(0.5);
        let values: Vec<String> = pattern
            .iter()
            .map(|step| format!("{:.3}", step * scale))
            .collect();
        Some(values.join(","))
    }
}

/// A stroke definition for curves, marks and legend handles.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f64,
    style: LineStyle,
}

impl StrokeDefinition {
    /// Creates a new solid stroke with the given color and width in points.
    pub fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            style: LineStyle::Solid,
        }
    }

    /// Returns a copy of this stroke with a different width.
    pub fn with_width(&self, width: f64) -> Self {
        Self {
            width,
            ..self.clone()
        }
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns the stroke style.
    pub fn style(&self) -> &LineStyle {
        &self.style
    }

    /// Sets the stroke color.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Sets the stroke width.
    pub fn set_width(&mut self, width: f64) {
        self.width = width;
    }

    /// Sets the stroke style.
    pub fn set_style(&mut self, style: LineStyle) {
        self.style = style;
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::new(Color::default(), 1.0)
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// Applies color, opacity, width and dash pattern (if not solid).
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width());

        if let Some(dasharray) = $stroke.style().to_svg_value($stroke.width()) {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}
