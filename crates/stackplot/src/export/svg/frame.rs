//! Mapping from data coordinates to page coordinates.

use stackplot_core::{
    geometry::{AxisLimits, DataRange, Size},
    scene::{Axis, Scene},
};

use crate::scene::AUTO_RANGE_MARGIN;

/// Points per inch; the document is laid out in points.
pub const PT_PER_INCH: f64 = 72.0;

/// The plotting area on the page, in points, with the data ranges it shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotFrame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    x: AxisLimits,
    y: AxisLimits,
}

/// Explicit limits, else the padded data extent, else the unit range.
///
/// Explicit limits keep their order, so `start > end` inverts the axis.
fn axis_limits(axis: &Axis, extent: Option<DataRange>) -> AxisLimits {
    axis.limits
        .filter(|limits| limits.span().is_finite() && limits.span() != 0.0)
        .or_else(|| extent.map(|range| range.with_margin(AUTO_RANGE_MARGIN).into()))
        .unwrap_or(AxisLimits::new(0.0, 1.0))
}

impl PlotFrame {
    /// Places the plotting area of `scene` on a page of `page` points.
    pub fn new(scene: &Scene, page: Size) -> Self {
        let subplot = scene.layout.subplot;
        let mut left = subplot.left() * page.width();
        let mut top = (1.0 - subplot.top()) * page.height();
        let mut width = subplot.width() * page.width();
        let mut height = subplot.height() * page.height();

        // A pinned square area shrinks its longer side around the center.
        if scene.layout.pin_square && width != height {
            let side = width.min(height);
            left += (width - side) / 2.0;
            top += (height - side) / 2.0;
            width = side;
            height = side;
        }

        let (x_extent, y_extent) = scene.data_extent();
        Self {
            left,
            top,
            width,
            height,
            x: axis_limits(&scene.x_axis, x_extent),
            y: axis_limits(&scene.y_axis, y_extent),
        }
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Interval shown along x, lowest value first.
    pub fn x_range(&self) -> DataRange {
        self.x.range()
    }

    /// Interval shown along y, lowest value first.
    pub fn y_range(&self) -> DataRange {
        self.y.range()
    }

    /// Page x of data value `x`; the limit start sits at the left edge.
    pub fn map_x(&self, x: f64) -> f64 {
        self.left + (x - self.x.start()) / self.x.span() * self.width
    }

    /// Page y of data value `y`; the limit start sits at the bottom edge.
    pub fn map_y(&self, y: f64) -> f64 {
        self.bottom() - (y - self.y.start()) / self.y.span() * self.height
    }
}
