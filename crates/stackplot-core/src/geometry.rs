//! Geometric primitives for physical figure layout and data ranges.
//!
//! # Overview
//!
//! - [`Size`] - Width and height, in inches unless stated otherwise
//! - [`Insets`] - Margin values for four sides
//! - [`SubplotRect`] - The plotting area as fractions of the figure
//! - [`DataRange`] - A closed interval of data values along one axis
//!
//! # Units
//!
//! Directives are written in centimeters while rendering surfaces work in
//! inches. Conversion goes through [`cm_to_in`] with [`CM_PER_INCH`].
//!
//! Subplot fractions follow the plotting convention where `0.0` is the left
//! (or bottom) edge of the figure and `1.0` is the right (or top) edge.

/// Number of centimeters in one inch.
pub const CM_PER_INCH: f64 = 2.54;

/// Converts centimeters to inches.
pub fn cm_to_in(cm: f64) -> f64 {
    cm / CM_PER_INCH
}

/// Converts inches to centimeters.
pub fn in_to_cm(inches: f64) -> f64 {
    inches * CM_PER_INCH
}

/// Represents the dimensions of a figure or plotting area
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f64 {
        self.height
    }

    /// Returns a new Size with the margins added to both width and height
    pub fn add_padding(self, insets: Insets) -> Self {
        Self {
            width: self.width + insets.horizontal_sum(),
            height: self.height + insets.vertical_sum(),
        }
    }

    /// Multiplies both dimensions by the given factor
    pub fn scale(self, factor: f64) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    /// Converts a size given in centimeters to inches
    pub fn cm_to_in(self) -> Self {
        self.scale(1.0 / CM_PER_INCH)
    }

    /// Returns true if width and height are equal within `tolerance`
    pub fn is_square(self, tolerance: f64) -> bool {
        (self.width - self.height).abs() <= tolerance
    }
}

/// Represents margins around a plotting area
/// with potentially different values for each side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f64,
    right: f64,
    bottom: f64,
    left: f64,
}

impl Insets {
    /// Creates new insets with specified values for each side
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Returns the top inset value
    pub fn top(self) -> f64 {
        self.top
    }

    /// Returns the right inset value
    pub fn right(self) -> f64 {
        self.right
    }

    /// Returns the bottom inset value
    pub fn bottom(self) -> f64 {
        self.bottom
    }

    /// Returns the left inset value
    pub fn left(self) -> f64 {
        self.left
    }

    /// Returns the sum of left and right insets
    pub fn horizontal_sum(self) -> f64 {
        self.left + self.right
    }

    /// Returns the sum of top and bottom insets
    pub fn vertical_sum(self) -> f64 {
        self.top + self.bottom
    }
}

/// The plotting area expressed as fractions of the enclosing figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubplotRect {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl SubplotRect {
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Derives the fractions that reproduce `margins` exactly on a figure of
    /// `figure` size. Both arguments must use the same unit.
    pub fn from_margins(figure: Size, margins: Insets) -> Self {
        Self {
            left: margins.left() / figure.width(),
            right: 1.0 - margins.right() / figure.width(),
            top: 1.0 - margins.top() / figure.height(),
            bottom: margins.bottom() / figure.height(),
        }
    }

    pub fn left(self) -> f64 {
        self.left
    }

    pub fn right(self) -> f64 {
        self.right
    }

    pub fn top(self) -> f64 {
        self.top
    }

    pub fn bottom(self) -> f64 {
        self.bottom
    }

    /// Fraction of the figure width covered by the plotting area
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    /// Fraction of the figure height covered by the plotting area
    pub fn height(self) -> f64 {
        self.top - self.bottom
    }
}

impl Default for SubplotRect {
    /// The conventional subplot placement used when margins are not pinned.
    fn default() -> Self {
        Self::new(0.125, 0.9, 0.88, 0.11)
    }
}

/// A closed interval `[min, max]` of data values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataRange {
    min: f64,
    max: f64,
}

impl DataRange {
    /// Creates a range, swapping the bounds if given in reverse.
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest range covering every finite value, or `None` if there are none.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<Self>, v| match acc {
                Some(range) => Some(Self {
                    min: range.min.min(v),
                    max: range.max.max(v),
                }),
                None => Some(Self { min: v, max: v }),
            })
    }

    pub fn min(self) -> f64 {
        self.min
    }

    pub fn max(self) -> f64 {
        self.max
    }

    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// Returns the smallest range containing both ranges.
    pub fn merge(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Pads both ends by `fraction` of the span.
    ///
    /// A degenerate range is widened by `fraction` of its magnitude (or by
    /// `fraction` itself around zero) so the result always has a positive span.
    pub fn with_margin(self, fraction: f64) -> Self {
        let span = self.span();
        let pad = if span > 0.0 {
            span * fraction
        } else if self.min != 0.0 {
            self.min.abs() * fraction
        } else {
            fraction
        };
        Self {
            min: self.min - pad,
            max: self.max + pad,
        }
    }

    /// Returns true if `value` lies within the range (inclusive)
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Axis limits in drawing order.
///
/// Unlike [`DataRange`], the bounds are kept as given: a `start` above `end`
/// describes an inverted axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLimits {
    start: f64,
    end: f64,
}

impl AxisLimits {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn start(self) -> f64 {
        self.start
    }

    pub fn end(self) -> f64 {
        self.end
    }

    /// Signed distance from `start` to `end`.
    pub fn span(self) -> f64 {
        self.end - self.start
    }

    pub fn is_inverted(self) -> bool {
        self.start > self.end
    }

    /// The covered interval, regardless of direction.
    pub fn range(self) -> DataRange {
        DataRange::new(self.start, self.end)
    }
}

impl From<DataRange> for AxisLimits {
    fn from(range: DataRange) -> Self {
        Self::new(range.min(), range.max())
    }
}
