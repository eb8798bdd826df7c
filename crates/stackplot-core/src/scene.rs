//! Renderable scene model.
//!
//! A [`Scene`] is the single artifact handed to a rendering surface: stacked
//! data curves, reference marks, legend entries, axis configuration and the
//! physical figure layout. It is plain data, built once per run and never
//! mutated afterwards.

use crate::{
    color::Color,
    draw::StrokeDefinition,
    geometry::{AxisLimits, DataRange, Size, SubplotRect},
};

/// Placement rule for ticks along one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum TickPolicy {
    /// No ticks at all
    Off,
    /// Ticks chosen by the rendering surface
    #[default]
    Auto,
    /// Evenly spaced ticks at the given interval
    Fixed(f64),
}

/// Major and minor tick policies of one axis.
///
/// Minor ticks never carry labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisTicks {
    pub major: TickPolicy,
    pub minor: TickPolicy,
}

impl Default for AxisTicks {
    fn default() -> Self {
        Self {
            major: TickPolicy::Auto,
            minor: TickPolicy::Off,
        }
    }
}

/// One axis of the plotting area.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Axis {
    pub label: String,
    /// Explicit limits in drawing order; `None` leaves auto-ranging to the surface
    pub limits: Option<AxisLimits>,
    pub ticks: AxisTicks,
}

/// A stacked data series drawn as a polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub stroke: StrokeDefinition,
}

/// A single vertical reference mark from `y0` to `y1` at `x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mark {
    pub x: f64,
    pub y0: f64,
    pub y1: f64,
}

/// All marks drawn for one reference pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkGroup {
    pub label: String,
    pub marks: Vec<Mark>,
    pub stroke: StrokeDefinition,
}

/// A legend handle: a zero-length synthetic line with its own stroke width.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub stroke: StrokeDefinition,
}

/// Where the legend is anchored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegendPlacement {
    /// Outside the right edge of the plotting area, aligned to its top
    OutsideRight,
    /// An on-area anchor keyword such as `best` or `upper left`
    Anchor(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
    pub placement: LegendPlacement,
    /// Vertical gap between entries, in font-size units
    pub label_spacing: f64,
}

/// How the figure size was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizingMode {
    /// Plotting area and margins given in centimeters
    AxesCm,
    /// Total figure size given in centimeters
    FigureCm,
    /// Total figure size given in inches
    FigureInches,
    /// Follows the pixel size of the hosting surface
    AutoFit,
}

/// Absolute figure geometry resolved from sizing directives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalLayout {
    pub mode: SizingMode,
    /// Figure size in inches
    pub figure: Size,
    pub subplot: SubplotRect,
    /// Force a 1:1 aspect ratio on the plotting area
    pub pin_square: bool,
}

/// Fonts, colors and sizes applied to text and frame elements.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneStyle {
    pub font: String,
    pub text_color: Color,
    pub frame_color: Color,
    pub frame_width: f64,
    /// `None` renders a transparent plotting area
    pub data_background: Option<Color>,
    pub default_size: f64,
    pub label_size: f64,
    pub title_size: f64,
    pub tick_size: f64,
    pub legend_size: f64,
}

/// A complete, renderable description of one plot.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub layout: PhysicalLayout,
    pub title: String,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub curves: Vec<Curve>,
    pub marks: Vec<MarkGroup>,
    pub legend: Option<Legend>,
    pub style: SceneStyle,
}

impl Scene {
    /// Smallest x/y ranges covering every curve point and mark end.
    ///
    /// Returns `None` for an axis with no finite data.
    pub fn data_extent(&self) -> (Option<DataRange>, Option<DataRange>) {
        let xs = self
            .curves
            .iter()
            .flat_map(|c| c.points.iter().map(|p| p.0))
            .chain(self.marks.iter().flat_map(|g| g.marks.iter().map(|m| m.x)));
        let ys = self
            .curves
            .iter()
            .flat_map(|c| c.points.iter().map(|p| p.1))
            .chain(
                self.marks
                    .iter()
                    .flat_map(|g| g.marks.iter().flat_map(|m| [m.y0, m.y1])),
            );
        (DataRange::from_values(xs), DataRange::from_values(ys))
    }
}
