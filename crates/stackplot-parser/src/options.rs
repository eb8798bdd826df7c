//! Option resolution.
//!
//! [`PlotOptions::resolve`] turns a [`DirectiveSet`] into a typed, fully
//! defaulted record. Malformed values never fail resolution; they fall back
//! to their defaults. The resulting value is built once per run and shared
//! by reference with every pipeline stage.

use log::{trace, warn};

use stackplot_core::{
    color::Color,
    draw::LineStyle,
    scene::{AxisTicks, TickPolicy},
};

use crate::{
    directive::DirectiveSet,
    values::{
        parse_bool, parse_decimal, parse_float_or, parse_limits, parse_switch, parse_tick_policy,
    },
};

/// Raster export resolution bounds and default.
pub const MIN_EXPORT_DPI: u32 = 72;
pub const MAX_EXPORT_DPI: u32 = 1200;
pub const DEFAULT_EXPORT_DPI: u32 = 300;

/// Vertical stacking of data series.
#[derive(Debug, Clone, PartialEq)]
pub struct StackingOptions {
    /// Rescale every series to `[0, 1]` before stacking
    pub normalize: bool,
    /// Distance between consecutive series
    pub offset: f64,
}

/// Horizontal separation applied to marks of different reference patterns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JitterMode {
    /// A small fraction of the x-axis span
    Auto,
    Fixed(f64),
}

/// Local-maximum routine used on continuous reference patterns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PeakDetection {
    /// Strict maxima plus the middle sample of flat-topped maxima
    #[default]
    Plateau,
    /// Strict 3-point maxima only
    Strict,
}

/// Placement of reference-pattern marks.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceOptions {
    pub normalize: bool,
    /// Baseline of the first pattern
    pub base: f64,
    /// Baseline step between consecutive patterns; its sign sets the mark direction
    pub offset: f64,
    /// Fraction of the step a full-height mark occupies
    pub span_factor: f64,
    pub x_jitter: JitterMode,
    pub peak_detection: PeakDetection,
}

/// Stroke widths in points.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeOptions {
    pub line_width: f64,
    pub reference_line_width: f64,
    pub legend_line_width: f64,
    pub legend_reference_line_width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendOptions {
    pub show: bool,
    /// `outside` or an anchor keyword such as `best`
    pub position: String,
    pub label_spacing: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelOptions {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

/// Fonts, colors and text sizes.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleOptions {
    pub font: String,
    pub text_color: Color,
    pub frame_color: Color,
    pub frame_width: f64,
    /// `None` when the plotting area is transparent
    pub data_background: Option<Color>,
    pub default_size: f64,
    pub label_size: f64,
    pub title_size: f64,
    pub tick_size: f64,
    pub legend_size: f64,
}

/// Raw physical sizing directives, interpreted by the layout engine in
/// priority order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizingDirectives {
    pub axes_size_cm: Option<String>,
    pub margins_cm: Option<String>,
    pub figsize_cm: Option<String>,
    pub figsize: Option<String>,
}

/// Typed, fully-defaulted rendering options for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOptions {
    pub stacking: StackingOptions,
    pub references: ReferenceOptions,
    pub strokes: StrokeOptions,
    /// Named colormap for data series; `None` draws them in the default color
    pub colormap: Option<String>,
    pub legend: LegendOptions,
    pub labels: LabelOptions,
    pub style: StyleOptions,
    pub x_ticks: AxisTicks,
    pub y_ticks: AxisTicks,
    pub x_limits: Option<(f64, f64)>,
    pub y_limits: Option<(f64, f64)>,
    pub sizing: SizingDirectives,
    pub export_dpi: u32,
    directives: DirectiveSet,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self::resolve(&DirectiveSet::default())
    }
}

/// Typed accessors over a directive set with silent defaults.
struct Lookup<'a>(&'a DirectiveSet);

impl Lookup<'_> {
    fn string(&self, key: &str, default: &str) -> String {
        self.0.get(key).unwrap_or(default).to_string()
    }

    fn float(&self, key: &str, default: f64) -> f64 {
        self.0
            .get(key)
            .map_or(default, |v| parse_float_or(v, default))
    }

    /// Like [`Lookup::float`], but zero and negative values fall back too.
    fn positive_float(&self, key: &str, default: f64) -> f64 {
        Some(self.float(key, default))
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(default)
    }

    fn bool(&self, key: &str, default: bool) -> bool {
        self.0.get(key).map_or(default, parse_bool)
    }

    fn switch(&self, key: &str) -> bool {
        self.0.get(key).is_none_or(parse_switch)
    }

    fn tick(&self, key: &str, default: TickPolicy) -> TickPolicy {
        self.0.get(key).map_or(default, parse_tick_policy)
    }

    fn color(&self, key: &str, default: &str) -> Color {
        let fallback = || Color::new(default).unwrap_or_default();
        match self.0.get(key) {
            Some(value) => Color::new(value).unwrap_or_else(|err| {
                warn!(key, err:%; "Invalid color directive, using default");
                fallback()
            }),
            None => fallback(),
        }
    }

    fn limits(&self, key: &str) -> Option<(f64, f64)> {
        self.0.get(key).and_then(|v| parse_limits(v).ok())
    }

    fn raw(&self, key: &str) -> Option<String> {
        self.0.get(key).map(str::to_string)
    }
}

impl PlotOptions {
    /// Resolves every option from `directives`, substituting defaults for
    /// missing or malformed values.
    pub fn resolve(directives: &DirectiveSet) -> Self {
        let get = Lookup(directives);

        let mut ref_offset = get.float("refoffset", 1.0);
        if directives
            .get("stackrefs")
            .is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "off" | "no" | "false"))
        {
            ref_offset = 0.0;
        }

        let x_jitter = match directives.get("refxjitter").map(str::to_ascii_lowercase) {
            None => JitterMode::Auto,
            Some(v) if v.is_empty() || v == "auto" => JitterMode::Auto,
            Some(v) => JitterMode::Fixed(parse_decimal(&v).unwrap_or(0.0)),
        };

        let peak_detection = match directives.get("peakfinder") {
            Some(v) if v.eq_ignore_ascii_case("strict") => PeakDetection::Strict,
            _ => PeakDetection::Plateau,
        };

        let data_background = match directives.get("data_bg") {
            Some(v) if v.eq_ignore_ascii_case("transparent") || v.eq_ignore_ascii_case("none") => {
                None
            }
            _ => Some(get.color("data_bg", "white")),
        };

        let axis_ticks = |flag: &str, major: &str, minor: &str| {
            if get.bool(flag, true) {
                AxisTicks {
                    major: get.tick(major, TickPolicy::Auto),
                    minor: get.tick(minor, TickPolicy::Off),
                }
            } else {
                AxisTicks {
                    major: TickPolicy::Off,
                    minor: TickPolicy::Off,
                }
            }
        };

        let export_dpi = {
            let dpi = get.float("export_dpi", f64::from(DEFAULT_EXPORT_DPI));
            if dpi.is_finite() {
                (dpi.trunc() as i64).clamp(i64::from(MIN_EXPORT_DPI), i64::from(MAX_EXPORT_DPI))
                    as u32
            } else {
                DEFAULT_EXPORT_DPI
            }
        };

        let options = Self {
            stacking: StackingOptions {
                normalize: get.switch("normalize"),
                offset: get.float("offset", 2.0),
            },
            references: ReferenceOptions {
                normalize: get.switch("normalizeref"),
                base: get.float("refbase", -1.0),
                offset: ref_offset,
                span_factor: get.float("refspan", 0.95),
                x_jitter,
                peak_detection,
            },
            strokes: StrokeOptions {
                line_width: get.float("linewidth", 1.5),
                reference_line_width: get.float("reflinewidth", 2.0),
                legend_line_width: get.float("legendlinewidth", 2.0),
                legend_reference_line_width: get.float("legendlinewidthref", 2.0),
            },
            colormap: directives
                .get("colormap")
                .filter(|v| !v.is_empty())
                .map(str::to_string),
            legend: LegendOptions {
                show: get.bool("legend", true),
                position: get.string("legendpos", "best").trim().to_lowercase(),
                label_spacing: get.float("legend_labelspacing", 0.5),
            },
            labels: LabelOptions {
                title: get.string("title", ""),
                x_label: get.string("xlabel", ""),
                y_label: get.string("ylabel", "Intensity (a.u.)"),
            },
            style: StyleOptions {
                font: get.string("font", "serif"),
                text_color: get.color("textcolor", "black"),
                frame_color: get.color("square_color", "black"),
                frame_width: get.positive_float("square_width", 1.0),
                data_background,
                default_size: get.float("default_size", 10.0),
                label_size: get.float("label_size", 12.0),
                title_size: get.float("title_size", 12.0),
                tick_size: get.float("tick_size", 10.0),
                legend_size: get.float("legend_size", 10.0),
            },
            x_ticks: axis_ticks("xticks", "xtick_major", "xtick_minor"),
            y_ticks: axis_ticks("yticks", "ytick_major", "ytick_minor"),
            x_limits: get.limits("xlim"),
            y_limits: get.limits("ylim"),
            sizing: SizingDirectives {
                axes_size_cm: get.raw("axes_size_cm"),
                margins_cm: get.raw("margins_cm"),
                figsize_cm: get.raw("figsize_cm"),
                figsize: get.raw("figsize"),
            },
            export_dpi,
            directives: directives.clone(),
        };

        trace!(options:?; "Options resolved");
        options
    }

    /// Explicit display name of the data series at 0-based `index` (`name{index+1}`).
    pub fn series_name(&self, index: usize) -> Option<&str> {
        self.directives.indexed("name", index + 1)
    }

    /// Explicit color of the data series at 0-based `index` (`color{index+1}`).
    ///
    /// An unparseable color is ignored.
    pub fn series_color(&self, index: usize) -> Option<Color> {
        self.indexed_color("color", index)
    }

    /// Line style of the data series at 0-based `index` (`line{index+1}`), solid by default.
    pub fn series_line_style(&self, index: usize) -> LineStyle {
        self.directives
            .indexed("line", index + 1)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    /// Explicit display name of the reference pattern at 0-based `index` (`refname{index+1}`).
    pub fn reference_name(&self, index: usize) -> Option<&str> {
        self.directives.indexed("refname", index + 1)
    }

    /// Explicit color of the reference pattern at 0-based `index` (`refcolor{index+1}`).
    pub fn reference_color(&self, index: usize) -> Option<Color> {
        self.indexed_color("refcolor", index)
    }

    /// Returns true if the legend is anchored outside the plotting area.
    pub fn legend_outside(&self) -> bool {
        self.legend.position == "outside"
    }

    /// The directives these options were resolved from.
    pub fn directives(&self) -> &DirectiveSet {
        &self.directives
    }

    fn indexed_color(&self, prefix: &str, index: usize) -> Option<Color> {
        let value = self.directives.indexed(prefix, index + 1)?;
        Color::new(value)
            .inspect_err(|err| warn!(prefix, index, err:% = err; "Ignoring invalid color"))
            .ok()
    }
}
