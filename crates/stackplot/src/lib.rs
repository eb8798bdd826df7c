//! Stackplot - stacked overlay plots of diffraction and pair-distribution
//! patterns with reference-pattern markers.
//!
//! Ingestion, stacking, physical layout and scene assembly for measurement
//! files controlled by a small `key = value` directive language, with SVG
//! and PNG backends for the finished scene.

pub mod colormap;
pub mod config;
pub mod ingest;
pub mod layout;
pub mod peaks;
pub mod project;
pub mod scene;
pub mod stack;

mod error;
mod export;

pub use stackplot_core::{color, draw, geometry};
pub use stackplot_parser::{DirectiveSet, PlotOptions, parse_directives};

pub use error::{IngestError, StackplotError};

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::{debug, error, info, warn};
use rand::{SeedableRng, rngs::StdRng};

use config::AppConfig;
use export::{Exporter, png::PngBuilder, svg::SvgBuilder};
use ingest::{FileKind, ImportReport};
use scene::{LoadedPattern, LoadedSeries, Scene, SceneAssembler};

/// Inputs of one plotting run.
///
/// Files are listed in load order; the order decides stacking rank.
#[derive(Debug, Clone, Default)]
pub struct PlotRequest {
    pub data_files: Vec<PathBuf>,
    pub ref_files: Vec<PathBuf>,
    /// Raw directive text
    pub directives: String,
    /// Display names for data files, keyed by path
    pub custom_names: IndexMap<PathBuf, String>,
    /// Display names for reference files, keyed by path
    pub custom_ref_names: IndexMap<PathBuf, String>,
}

/// The result of one run: the scene to draw and the files that were skipped.
#[derive(Debug)]
pub struct Plot {
    scene: Scene,
    options: PlotOptions,
    report: ImportReport,
}

impl Plot {
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Options resolved from the request's directives.
    pub fn options(&self) -> &PlotOptions {
        &self.options
    }

    /// Files that could not be loaded during this run.
    pub fn report(&self) -> &ImportReport {
        &self.report
    }
}

/// Builder for running the plotting pipeline and rendering its scene.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::PathBuf;
///
/// use stackplot::{PlotBuilder, PlotRequest, config::AppConfig};
///
/// let request = PlotRequest {
///     data_files: vec![PathBuf::from("scan.xy")],
///     directives: "offset = 1.5\nlegendpos = outside".to_string(),
///     ..PlotRequest::default()
/// };
///
/// let builder = PlotBuilder::new(AppConfig::default()).with_seed(7);
/// let plot = builder.build(&request).expect("Failed to build plot");
///
/// if let Some(summary) = plot.report().summary() {
///     eprintln!("{summary}");
/// }
///
/// let svg = builder.render_svg(plot.scene()).expect("Failed to render");
/// println!("{svg}");
/// ```
#[derive(Debug, Default)]
pub struct PlotBuilder {
    config: AppConfig,
    seed: Option<u64>,
}

impl PlotBuilder {
    /// Create a new plot builder with the given configuration.
    ///
    /// Reference colors are seeded from the configuration's palette seed
    /// when set, otherwise from system entropy.
    pub fn new(config: AppConfig) -> Self {
        let seed = config.palette().seed();
        Self { config, seed }
    }

    /// Fixes the seed of the reference color generator.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Runs ingestion, stacking, layout and assembly for one request.
    ///
    /// Files that fail to load are skipped and listed in the returned
    /// [`Plot::report`].
    ///
    /// # Errors
    ///
    /// Returns [`StackplotError::NoInput`] when the request lists neither data
    /// nor reference files.
    pub fn build(&self, request: &PlotRequest) -> Result<Plot, StackplotError> {
        if request.data_files.is_empty() && request.ref_files.is_empty() {
            error!("No data or reference files to plot");
            return Err(StackplotError::NoInput);
        }
        info!(
            data_files = request.data_files.len(),
            ref_files = request.ref_files.len();
            "Building plot"
        );

        let options = PlotOptions::resolve(&parse_directives(&request.directives));
        let mut report = ImportReport::default();

        let series = self.load_series(request, &options, &mut report);
        let patterns = self.load_patterns(request, &options, &mut report);

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let reference_colors = scene::random_reference_colors(&mut rng, request.ref_files.len());

        let layout = layout::resolve(&options.sizing, self.config.surface());
        let scene = SceneAssembler::new(&options, request.data_files.len(), request.ref_files.len())
            .assemble(&series, &patterns, &reference_colors, layout);

        if report.is_empty() {
            info!(curves = scene.curves.len(), mark_groups = scene.marks.len(); "Plot built");
        } else {
            warn!(failed = report.len(); "Plot built with skipped files");
        }

        Ok(Plot {
            scene,
            options,
            report,
        })
    }

    fn load_series(
        &self,
        request: &PlotRequest,
        options: &PlotOptions,
        report: &mut ImportReport,
    ) -> Vec<LoadedSeries> {
        let mut series = Vec::with_capacity(request.data_files.len());
        for (rank, path) in request.data_files.iter().enumerate() {
            match ingest::read_series(path, self.config.ingest()) {
                Ok(samples) => {
                    debug!(file:? = path, samples = samples.len(); "Loaded data file");
                    let name = scene::display_name(
                        options.series_name(rank),
                        custom_name(&request.custom_names, path),
                        path,
                    );
                    series.push(LoadedSeries {
                        rank,
                        name,
                        samples,
                    });
                }
                Err(err) => {
                    warn!(file:? = path, err:%; "Skipping data file");
                    report.push(FileKind::Data, path, err);
                }
            }
        }
        series
    }

    fn load_patterns(
        &self,
        request: &PlotRequest,
        options: &PlotOptions,
        report: &mut ImportReport,
    ) -> Vec<LoadedPattern> {
        let mut patterns = Vec::with_capacity(request.ref_files.len());
        for (rank, path) in request.ref_files.iter().enumerate() {
            match ingest::read_reference(path) {
                Ok(pattern) => {
                    debug!(
                        file:? = path,
                        kind:? = pattern.kind(),
                        samples = pattern.samples().len();
                        "Loaded reference file"
                    );
                    let name = scene::display_name(
                        options.reference_name(rank),
                        custom_name(&request.custom_ref_names, path),
                        path,
                    );
                    patterns.push(LoadedPattern {
                        rank,
                        name,
                        pattern,
                    });
                }
                Err(err) => {
                    warn!(file:? = path, err:%; "Skipping reference file");
                    report.push(FileKind::Reference, path, err);
                }
            }
        }
        patterns
    }

    /// Render a scene to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns `StackplotError::Export` if the configured page style is
    /// invalid.
    pub fn render_svg(&self, scene: &Scene) -> Result<String, StackplotError> {
        let svg = SvgBuilder::default()
            .with_style(self.config.style())
            .build()?;
        let document = svg.render_scene(scene);
        info!("SVG rendered successfully");
        Ok(document.to_string())
    }

    /// Render a scene and write it to `path` as SVG.
    ///
    /// # Errors
    ///
    /// Returns `StackplotError::Export` if the page style is invalid or the
    /// file cannot be written.
    pub fn write_svg(&self, scene: &Scene, path: &Path) -> Result<(), StackplotError> {
        let mut exporter = SvgBuilder::new(&path.to_string_lossy())
            .with_style(self.config.style())
            .build()?;
        exporter.export_scene(scene)?;
        Ok(())
    }

    /// Render a scene and write it to `path` as a PNG image at `dpi`.
    ///
    /// # Errors
    ///
    /// Returns `StackplotError::Export` if the page style is invalid, the
    /// image cannot be rasterised, or the file cannot be written.
    pub fn write_png(&self, scene: &Scene, dpi: u32, path: &Path) -> Result<(), StackplotError> {
        let mut exporter = PngBuilder::new(&path.to_string_lossy())
            .with_style(self.config.style())
            .with_dpi(dpi)
            .build()?;
        exporter.export_scene(scene)?;
        Ok(())
    }

    /// Write a finished plot to `path`, choosing the format from its extension.
    ///
    /// `.svg` files are vector output. `.png` files are rasterised at the
    /// plot's export DPI.
    ///
    /// # Errors
    ///
    /// Returns `StackplotError::Export` for any other extension, and
    /// otherwise the errors of [`Self::write_svg`] and [`Self::write_png`].
    pub fn write(&self, plot: &Plot, path: &Path) -> Result<(), StackplotError> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase());
        match extension.as_deref() {
            Some("svg") => self.write_svg(plot.scene(), path),
            Some("png") => self.write_png(plot.scene(), plot.options().export_dpi, path),
            _ => {
                error!(path:? = path; "No exporter for output file");
                Err(export::Error::UnsupportedFormat(path.display().to_string()).into())
            }
        }
    }
}

fn custom_name<'a>(names: &'a IndexMap<PathBuf, String>, path: &Path) -> Option<&'a str> {
    names.get(path).map(String::as_str)
}
