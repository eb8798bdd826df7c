//! Tick placement and label formatting.

use log::warn;

use stackplot_core::{geometry::DataRange, scene::TickPolicy};

/// Ticks beyond this count on one axis are dropped rather than drawn.
const MAX_TICKS: usize = 1000;

/// Relative tolerance used when snapping values onto a tick grid.
const GRID_EPSILON: f64 = 1e-9;

/// A "nice" major interval for a data span, stepping 1-2-5 through the decades.
pub fn nice_interval(span: f64) -> Option<f64> {
    if !(span.is_finite() && span > 0.0) {
        return None;
    }
    let magnitude = 10f64.powf(span.log10().floor());
    let normalized = span / magnitude;
    let step = if normalized <= 1.0 {
        0.2
    } else if normalized <= 2.0 {
        0.5
    } else if normalized <= 5.0 {
        1.0
    } else {
        2.0
    };
    Some(step * magnitude)
}

/// Number of minor divisions between two auto major ticks.
fn minor_divisions(major: f64) -> f64 {
    let mantissa = major / 10f64.powf(major.log10().floor());
    if (mantissa - 2.0).abs() < 1e-6 {
        4.0
    } else {
        5.0
    }
}

/// Multiples of `interval` inside `range`.
fn grid(interval: f64, range: DataRange) -> Vec<f64> {
    let first = (range.min() / interval - GRID_EPSILON).ceil();
    let last = (range.max() / interval + GRID_EPSILON).floor();
    if !(first.is_finite() && last.is_finite()) || last < first {
        return Vec::new();
    }
    let count = (last - first) as usize + 1;
    if count > MAX_TICKS {
        warn!(interval, count; "Tick interval too small for axis range, skipping ticks");
        return Vec::new();
    }
    (first as i64..=last as i64)
        .map(|k| k as f64 * interval)
        .collect()
}

/// Positions and spacing of the major and minor ticks of one axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickSet {
    pub major: Vec<f64>,
    /// Spacing of the major ticks, when there are any
    pub major_interval: Option<f64>,
    pub minor: Vec<f64>,
}

impl TickSet {
    pub fn new(major: TickPolicy, minor: TickPolicy, range: DataRange) -> Self {
        let major_interval = match major {
            TickPolicy::Off => None,
            TickPolicy::Auto => nice_interval(range.span()),
            TickPolicy::Fixed(interval) => Some(interval),
        };
        let major_ticks = major_interval.map_or_else(Vec::new, |i| grid(i, range));

        let minor_interval = match minor {
            TickPolicy::Off => None,
            TickPolicy::Auto => major_interval
                .or_else(|| nice_interval(range.span()))
                .map(|i| i / minor_divisions(i)),
            TickPolicy::Fixed(interval) => Some(interval),
        };
        let minor_ticks = minor_interval.map_or_else(Vec::new, |i| {
            grid(i, range)
                .into_iter()
                .filter(|&v| !major_interval.is_some_and(|m| on_grid(v, m)))
                .collect()
        });

        Self {
            major: major_ticks,
            major_interval,
            minor: minor_ticks,
        }
    }
}

/// Returns true if `value` is a multiple of `interval`.
fn on_grid(value: f64, interval: f64) -> bool {
    let k = value / interval;
    (k - k.round()).abs() < 1e-6
}

/// Decimal places needed to print multiples of `interval` exactly.
pub fn label_decimals(interval: f64) -> usize {
    (0..=6)
        .find(|&d| {
            let scaled = interval * 10f64.powi(d as i32);
            (scaled - scaled.round()).abs() < 1e-6 * scaled.abs().max(1.0)
        })
        .unwrap_or(6)
}

/// Formats one tick label with a typographic minus sign.
pub fn format_label(value: f64, decimals: usize) -> String {
    let text = format!("{value:.decimals$}");
    let is_zero = text.trim_start_matches('-').chars().all(|c| c == '0' || c == '.');
    match text.strip_prefix('-') {
        Some(_) if is_zero => text[1..].to_string(),
        Some(rest) => format!("\u{2212}{rest}"),
        None => text,
    }
}
