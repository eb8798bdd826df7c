//! Scene assembly.
//!
//! Turns loaded series and reference patterns into stacked curves, reference
//! marks, legend handles and axis settings, and wraps them with the physical
//! layout into a [`Scene`].

use std::path::Path;

use log::debug;
use rand::Rng;

pub use stackplot_core::scene::*;
use stackplot_core::{
    color::Color,
    draw::StrokeDefinition,
    geometry::{AxisLimits, DataRange},
};
use stackplot_parser::PlotOptions;

use crate::{
    colormap,
    ingest::{ReferencePattern, Sample},
    stack::{self, MarkPlacement},
};

/// Fraction of the data span added on both sides when auto-ranging.
pub const AUTO_RANGE_MARGIN: f64 = 0.05;

/// A data file that loaded successfully.
#[derive(Debug, Clone)]
pub struct LoadedSeries {
    /// Load index among all listed data files
    pub rank: usize,
    pub name: String,
    pub samples: Vec<Sample>,
}

/// A reference file that loaded successfully.
#[derive(Debug, Clone)]
pub struct LoadedPattern {
    /// Load index among all listed reference files
    pub rank: usize,
    pub name: String,
    pub pattern: ReferencePattern,
}

/// Picks the display name of a file: the explicit directive, then the
/// custom name stored with the project, then the file stem.
pub fn display_name(explicit: Option<&str>, custom: Option<&str>, path: &Path) -> String {
    explicit
        .or(custom)
        .map(str::to_string)
        .unwrap_or_else(|| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string())
        })
}

/// One random color per reference pattern, each channel drawn from `[0.1, 0.9)`.
///
/// Colors are drawn for every pattern, whether or not it is later overridden,
/// so a given seed always assigns the same color to the same load index.
pub fn random_reference_colors(rng: &mut impl Rng, count: usize) -> Vec<Color> {
    (0..count)
        .map(|_| {
            let r = rng.random_range(0.1..0.9);
            let g = rng.random_range(0.1..0.9);
            let b = rng.random_range(0.1..0.9);
            Color::from_rgb(r, g, b)
        })
        .collect()
}

/// Builds a [`Scene`] from resolved options and loaded inputs.
///
/// `series_count` and `pattern_count` are the numbers of listed files,
/// including files that failed to load, so ranks stay stable when a file
/// is skipped.
#[derive(Debug)]
pub struct SceneAssembler<'a> {
    options: &'a PlotOptions,
    series_count: usize,
    pattern_count: usize,
}

impl<'a> SceneAssembler<'a> {
    pub fn new(options: &'a PlotOptions, series_count: usize, pattern_count: usize) -> Self {
        Self {
            options,
            series_count,
            pattern_count,
        }
    }

    pub fn assemble(
        &self,
        series: &[LoadedSeries],
        patterns: &[LoadedPattern],
        reference_colors: &[Color],
        layout: PhysicalLayout,
    ) -> Scene {
        let curves = self.curves(series);
        let jitter = stack::resolve_jitter(
            self.options.references.x_jitter,
            self.jitter_extent(&curves, patterns),
        );
        let marks = self.mark_groups(patterns, reference_colors, jitter);
        let legend = self.legend(&curves, &marks);

        debug!(
            curves = curves.len(),
            mark_groups = marks.len(),
            jitter;
            "Scene assembled"
        );

        Scene {
            layout,
            title: self.options.labels.title.clone(),
            x_axis: Axis {
                label: self.options.labels.x_label.clone(),
                limits: self.options.x_limits.map(|(a, b)| AxisLimits::new(a, b)),
                ticks: self.options.x_ticks,
            },
            y_axis: Axis {
                label: self.options.labels.y_label.clone(),
                limits: self.options.y_limits.map(|(a, b)| AxisLimits::new(a, b)),
                ticks: self.options.y_ticks,
            },
            curves,
            marks,
            legend,
            style: self.style(),
        }
    }

    fn curves(&self, series: &[LoadedSeries]) -> Vec<Curve> {
        let palette = colormap::series_colors(self.options.colormap.as_deref(), self.series_count);
        series
            .iter()
            .map(|s| {
                let color = self
                    .options
                    .series_color(s.rank)
                    .or_else(|| palette.get(s.rank).copied())
                    .unwrap_or_default();
                let mut stroke = StrokeDefinition::new(color, self.options.strokes.line_width);
                stroke.set_style(self.options.series_line_style(s.rank));
                Curve {
                    label: s.name.clone(),
                    points: stack::stack_series(
                        &s.samples,
                        s.rank,
                        self.series_count,
                        &self.options.stacking,
                    ),
                    stroke,
                }
            })
            .collect()
    }

    /// X extent used to size automatic jitter.
    ///
    /// Explicit limits win; otherwise the padded extent of the data curves,
    /// or of the reference positions when there are no curves.
    fn jitter_extent(&self, curves: &[Curve], patterns: &[LoadedPattern]) -> Option<DataRange> {
        if let Some((a, b)) = self.options.x_limits {
            return Some(DataRange::new(a, b));
        }
        DataRange::from_values(curves.iter().flat_map(|c| c.points.iter().map(|p| p.0)))
            .or_else(|| {
                DataRange::from_values(
                    patterns
                        .iter()
                        .flat_map(|p| p.pattern.samples().iter().map(|s| s.0)),
                )
            })
            .map(|range| range.with_margin(AUTO_RANGE_MARGIN))
    }

    fn mark_groups(
        &self,
        patterns: &[LoadedPattern],
        reference_colors: &[Color],
        jitter: f64,
    ) -> Vec<MarkGroup> {
        let references = &self.options.references;
        patterns
            .iter()
            .map(|p| {
                let color = self
                    .options
                    .reference_color(p.rank)
                    .or_else(|| reference_colors.get(p.rank).copied())
                    .unwrap_or_default();
                let placement = MarkPlacement::new(references, p.rank, self.pattern_count, jitter);
                MarkGroup {
                    label: p.name.clone(),
                    marks: stack::reference_marks(&p.pattern, &placement, references),
                    stroke: StrokeDefinition::new(color, self.options.strokes.reference_line_width),
                }
            })
            .collect()
    }

    /// Legend handles for every curve, then every reference pattern.
    fn legend(&self, curves: &[Curve], marks: &[MarkGroup]) -> Option<Legend> {
        if !self.options.legend.show {
            return None;
        }
        let strokes = &self.options.strokes;
        let entries: Vec<LegendEntry> = curves
            .iter()
            .map(|c| LegendEntry {
                label: c.label.clone(),
                stroke: c.stroke.with_width(strokes.legend_line_width),
            })
            .chain(marks.iter().map(|g| LegendEntry {
                label: g.label.clone(),
                stroke: g.stroke.with_width(strokes.legend_reference_line_width),
            }))
            .collect();
        if entries.is_empty() {
            return None;
        }

        let placement = if self.options.legend_outside() {
            LegendPlacement::OutsideRight
        } else {
            LegendPlacement::Anchor(self.options.legend.position.clone())
        };
        Some(Legend {
            entries,
            placement,
            label_spacing: self.options.legend.label_spacing,
        })
    }

    fn style(&self) -> SceneStyle {
        let style = &self.options.style;
        SceneStyle {
            font: style.font.clone(),
            text_color: style.text_color,
            frame_color: style.frame_color,
            frame_width: style.frame_width,
            data_background: style.data_background,
            default_size: style.default_size,
            label_size: style.label_size,
            title_size: style.title_size,
            tick_size: style.tick_size,
            legend_size: style.legend_size,
        }
    }
}
