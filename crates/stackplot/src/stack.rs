//! Stacking and normalization.
//!
//! Data series are optionally rescaled to `[0, 1]` and shifted upward so
//! the first loaded series sits on top. Reference patterns become vertical
//! marks hanging from per-pattern baselines below the data.

use std::collections::HashSet;

use stackplot_core::{geometry::DataRange, scene::Mark};
use stackplot_parser::options::{JitterMode, ReferenceOptions, StackingOptions};

use crate::{
    ingest::{PatternKind, ReferencePattern, Sample},
    peaks,
};

/// Jitter used when auto-jitter has no axis extent to work from.
const FALLBACK_JITTER: f64 = 0.5;

/// Auto-jitter as a fraction of the x-axis span.
const AUTO_JITTER_FRACTION: f64 = 0.003;

/// Rescales `y` to `[0, 1]`; returns it unchanged when it has no finite spread.
pub fn normalize(y: &[f64]) -> Vec<f64> {
    match DataRange::from_values(y.iter().copied()) {
        Some(range) if range.span() > 0.0 => {
            y.iter().map(|v| (v - range.min()) / range.span()).collect()
        }
        _ => y.to_vec(),
    }
}

/// Vertical shift of the series at load index `rank` among `count` series.
pub fn series_offset(offset: f64, rank: usize, count: usize) -> f64 {
    offset * count.saturating_sub(rank + 1) as f64
}

/// Normalizes (if enabled) and offsets one data series.
pub fn stack_series(
    samples: &[Sample],
    rank: usize,
    count: usize,
    options: &StackingOptions,
) -> Vec<Sample> {
    let ys: Vec<f64> = samples.iter().map(|s| s.1).collect();
    let ys = if options.normalize {
        normalize(&ys)
    } else {
        ys
    };
    let shift = series_offset(options.offset, rank, count);
    samples
        .iter()
        .zip(ys)
        .map(|(&(x, _), y)| (x, y + shift))
        .collect()
}

/// Resolves the horizontal jitter step.
///
/// `axis_extent` is the auto-ranged x extent of the plot, if any.
pub fn resolve_jitter(mode: JitterMode, axis_extent: Option<DataRange>) -> f64 {
    match mode {
        JitterMode::Fixed(value) => value,
        JitterMode::Auto => axis_extent
            .map(|range| AUTO_JITTER_FRACTION * range.span())
            .unwrap_or(FALLBACK_JITTER),
    }
}

/// Where the marks of one reference pattern are drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkPlacement {
    /// Baseline all marks start from
    pub base_y: f64,
    /// `+1` draws marks upward, `-1` downward
    pub direction: f64,
    /// Length of a full-intensity mark
    pub span: f64,
    /// Horizontal shift applied to every mark
    pub x_shift: f64,
}

impl MarkPlacement {
    /// Placement of the pattern at load index `rank` among `count` patterns.
    pub fn new(options: &ReferenceOptions, rank: usize, count: usize, jitter: f64) -> Self {
        let step = options.offset;
        let rank_f = rank as f64;
        Self {
            base_y: options.base - rank_f * step,
            direction: if step >= 0.0 { 1.0 } else { -1.0 },
            span: if step != 0.0 {
                step.abs() * options.span_factor
            } else {
                1.0
            },
            x_shift: (rank_f - (count as f64 - 1.0) / 2.0) * jitter,
        }
    }
}

/// Marks for one reference pattern.
///
/// Peak lists mark every sample; continuous patterns mark the local maxima
/// of the (optionally normalized) curve. Heights are intensities relative
/// to the pattern maximum, scaled by the placement span.
pub fn reference_marks(
    pattern: &ReferencePattern,
    placement: &MarkPlacement,
    options: &ReferenceOptions,
) -> Vec<Mark> {
    match pattern.kind() {
        PatternKind::PeakList => {
            let y_max = peak_maximum(pattern.samples().iter().map(|s| s.1));
            peak_marks(pattern.samples().iter().copied(), y_max, placement)
        }
        PatternKind::Continuous => {
            let xs: Vec<f64> = pattern.samples().iter().map(|s| s.0).collect();
            let ys: Vec<f64> = pattern.samples().iter().map(|s| s.1).collect();
            let ys = if options.normalize {
                normalize(&ys)
            } else {
                ys
            };
            let peaks = peaks::find_peaks(&ys, options.peak_detection);
            let y_max = peak_maximum(ys.iter().copied());
            peak_marks(peaks.into_iter().map(|i| (xs[i], ys[i])), y_max, placement)
        }
    }
}

fn peak_maximum(values: impl IntoIterator<Item = f64>) -> f64 {
    DataRange::from_values(values).map_or(f64::NEG_INFINITY, DataRange::max)
}

/// Emits one mark per peak with positive relative height.
///
/// Positions are deduplicated after rounding to three decimals; the first
/// occurrence wins. Nothing is drawn when `y_max` is not positive.
fn peak_marks(
    peaks: impl Iterator<Item = Sample>,
    y_max: f64,
    placement: &MarkPlacement,
) -> Vec<Mark> {
    if !(y_max.is_finite() && y_max > 0.0) {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut marks = Vec::new();
    for (x, y) in peaks {
        let relative = y / y_max;
        if !x.is_finite() || !(relative > 0.0) {
            continue;
        }
        if !seen.insert((x * 1000.0).round() as i64) {
            continue;
        }
        let height = relative * placement.span;
        marks.push(Mark {
            x: x + placement.x_shift,
            y0: placement.base_y,
            y1: placement.base_y + placement.direction * height,
        });
    }
    marks
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use stackplot_parser::options::PeakDetection;

    use super::*;

    fn reference_options(offset: f64) -> ReferenceOptions {
        ReferenceOptions {
            normalize: true,
            base: -1.0,
            offset,
            span_factor: 0.95,
            x_jitter: JitterMode::Auto,
            peak_detection: PeakDetection::Plateau,
        }
    }

    fn flat_placement() -> MarkPlacement {
        MarkPlacement {
            base_y: 0.0,
            direction: 1.0,
            span: 1.0,
            x_shift: 0.0,
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(&[2.0, 4.0, 6.0]), vec![0.0, 0.5, 1.0]);
        assert_eq!(normalize(&[3.0, 3.0]), vec![3.0, 3.0]);
        assert!(normalize(&[]).is_empty());
    }

    #[test]
    fn test_series_offsets_first_on_top() {
        assert_eq!(series_offset(2.0, 0, 3), 4.0);
        assert_eq!(series_offset(2.0, 1, 3), 2.0);
        assert_eq!(series_offset(2.0, 2, 3), 0.0);
    }

    #[test]
    fn test_stack_series() {
        let samples = [(1.0, 10.0), (2.0, 20.0)];
        let normalized = StackingOptions {
            normalize: true,
            offset: 2.0,
        };
        assert_eq!(
            stack_series(&samples, 0, 2, &normalized),
            vec![(1.0, 2.0), (2.0, 3.0)]
        );

        let raw = StackingOptions {
            normalize: false,
            offset: 1.5,
        };
        assert_eq!(
            stack_series(&samples, 0, 3, &raw),
            vec![(1.0, 13.0), (2.0, 23.0)]
        );
    }

    #[test]
    fn test_placement_stacked_downward() {
        let options = reference_options(1.0);
        let first = MarkPlacement::new(&options, 0, 2, 0.0);
        let second = MarkPlacement::new(&options, 1, 2, 0.0);
        assert_eq!(first.base_y, -1.0);
        assert_eq!(second.base_y, -2.0);
        assert_eq!(first.direction, 1.0);
        assert_approx_eq!(f64, first.span, 0.95);
    }

    #[test]
    fn test_placement_negative_and_zero_offset() {
        let down = MarkPlacement::new(&reference_options(-0.5), 1, 2, 0.0);
        assert_eq!(down.base_y, -0.5);
        assert_eq!(down.direction, -1.0);
        assert_approx_eq!(f64, down.span, 0.475);

        let flat = MarkPlacement::new(&reference_options(0.0), 3, 4, 0.0);
        assert_eq!(flat.base_y, -1.0);
        assert_eq!(flat.direction, 1.0);
        assert_eq!(flat.span, 1.0);
    }

    #[test]
    fn test_placement_jitter_centered() {
        let options = reference_options(1.0);
        let shifts: Vec<f64> = (0..3)
            .map(|rank| MarkPlacement::new(&options, rank, 3, 0.2).x_shift)
            .collect();
        assert_approx_eq!(f64, shifts[0], -0.2);
        assert_approx_eq!(f64, shifts[1], 0.0);
        assert_approx_eq!(f64, shifts[2], 0.2);
    }

    #[test]
    fn test_resolve_jitter() {
        let extent = DataRange::new(10.0, 110.0);
        assert_approx_eq!(f64, resolve_jitter(JitterMode::Auto, Some(extent)), 0.3);
        assert_eq!(resolve_jitter(JitterMode::Auto, None), 0.5);
        assert_eq!(resolve_jitter(JitterMode::Fixed(0.1), Some(extent)), 0.1);
    }

    #[test]
    fn test_peak_list_dedup_three_decimals() {
        let pattern = ReferencePattern::new(
            PatternKind::PeakList,
            vec![(26.6401, 100.0), (26.6404, 50.0), (26.641, 20.0)],
        );
        let marks = reference_marks(&pattern, &flat_placement(), &reference_options(1.0));
        assert_eq!(marks.len(), 2);
        assert_eq!(marks[0].x, 26.6401);
        assert_eq!(marks[0].y1, 1.0);
        assert_eq!(marks[1].x, 26.641);
        assert_approx_eq!(f64, marks[1].y1, 0.2);
    }

    #[test]
    fn test_peak_list_skips_non_positive_heights() {
        let pattern = ReferencePattern::new(
            PatternKind::PeakList,
            vec![(10.0, 0.0), (20.0, -5.0), (30.0, 10.0)],
        );
        let marks = reference_marks(&pattern, &flat_placement(), &reference_options(1.0));
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].x, 30.0);
    }

    #[test]
    fn test_peak_list_without_positive_maximum() {
        let pattern =
            ReferencePattern::new(PatternKind::PeakList, vec![(10.0, 0.0), (20.0, -1.0)]);
        let marks = reference_marks(&pattern, &flat_placement(), &reference_options(1.0));
        assert!(marks.is_empty());
    }

    #[test]
    fn test_marks_follow_placement() {
        let pattern = ReferencePattern::new(PatternKind::PeakList, vec![(10.0, 50.0), (20.0, 100.0)]);
        let placement = MarkPlacement {
            base_y: -2.0,
            direction: -1.0,
            span: 0.5,
            x_shift: 0.1,
        };
        let marks = reference_marks(&pattern, &placement, &reference_options(1.0));
        assert_eq!(marks.len(), 2);
        assert_approx_eq!(f64, marks[0].x, 10.1);
        assert_eq!(marks[0].y0, -2.0);
        assert_approx_eq!(f64, marks[0].y1, -2.25);
        assert_approx_eq!(f64, marks[1].x, 20.1);
        assert_approx_eq!(f64, marks[1].y1, -2.5);
    }

    #[test]
    fn test_continuous_marks_at_local_maxima() {
        let pattern = ReferencePattern::new(
            PatternKind::Continuous,
            vec![(1.0, 0.0), (2.0, 4.0), (3.0, 0.0), (4.0, 2.0), (5.0, 0.0)],
        );
        let marks = reference_marks(&pattern, &flat_placement(), &reference_options(1.0));
        assert_eq!(marks.len(), 2);
        assert_eq!((marks[0].x, marks[0].y1), (2.0, 1.0));
        assert_eq!((marks[1].x, marks[1].y1), (4.0, 0.5));
    }

    #[test]
    fn test_continuous_flat_pattern_has_no_marks() {
        let pattern = ReferencePattern::new(
            PatternKind::Continuous,
            vec![(1.0, 0.0), (2.0, 0.0), (3.0, 0.0)],
        );
        let marks = reference_marks(&pattern, &flat_placement(), &reference_options(1.0));
        assert!(marks.is_empty());
    }

    fn check_normalize_bounds(values: &[f64]) {
        let normalized = normalize(values);
        assert_eq!(normalized.len(), values.len());
        let range = DataRange::from_values(values.iter().copied());
        if range.is_some_and(|r| r.span() > 0.0) {
            for v in &normalized {
                assert!((0.0..=1.0).contains(v), "{v} outside [0, 1]");
            }
            let out = DataRange::from_values(normalized.iter().copied()).unwrap();
            assert_approx_eq!(f64, out.min(), 0.0, epsilon = 1e-12);
            assert_approx_eq!(f64, out.max(), 1.0, epsilon = 1e-12);
        } else {
            assert_eq!(normalized, values);
        }
    }

    fn check_stack_order(offset: f64, count: usize) {
        for rank in 1..count {
            let above = series_offset(offset, rank - 1, count);
            let below = series_offset(offset, rank, count);
            assert_approx_eq!(f64, above - below, offset, epsilon = 1e-9);
        }
        if count > 0 {
            assert_eq!(series_offset(offset, count - 1, count), 0.0);
        }
    }

    proptest! {
        #[test]
        fn prop_normalize_bounds(values in prop::collection::vec(-1e6f64..1e6, 0..50)) {
            check_normalize_bounds(&values);
        }

        #[test]
        fn prop_stack_order(offset in 0.0f64..10.0, count in 0usize..20) {
            check_stack_order(offset, count);
        }
    }
}
