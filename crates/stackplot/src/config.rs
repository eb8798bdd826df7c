//! Configuration types for Stackplot rendering.
//!
//! This module provides configuration structures that control ingestion,
//! the host surface used for auto-fit sizing, reference palette seeding and
//! page styling. All types implement [`serde::Deserialize`] for loading from
//! TOML.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration.
//! - [`IngestConfig`] - Header-skip budget of the delimited reader.
//! - [`SurfaceConfig`] - Pixel size and DPI of the host surface.
//! - [`PaletteConfig`] - Optional seed for reference colors.
//! - [`StyleConfig`] - Page background color, white unless configured.
//!
//! # Example
//!
//! ```
//! # use stackplot::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.ingest().max_header_lines(), 5);
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use stackplot_core::color::Color;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    ingest: IngestConfig,

    #[serde(default)]
    surface: SurfaceConfig,

    #[serde(default)]
    palette: PaletteConfig,

    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        ingest: IngestConfig,
        surface: SurfaceConfig,
        palette: PaletteConfig,
        style: StyleConfig,
    ) -> Self {
        Self {
            ingest,
            surface,
            palette,
            style,
        }
    }

    pub fn ingest(&self) -> &IngestConfig {
        &self.ingest
    }

    pub fn surface(&self) -> &SurfaceConfig {
        &self.surface
    }

    pub fn palette(&self) -> &PaletteConfig {
        &self.palette
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Ingestion settings.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestConfig {
    /// Largest number of leading lines the delimited reader may skip.
    #[serde(default = "default_max_header_lines")]
    max_header_lines: usize,
}

fn default_max_header_lines() -> usize {
    5
}

impl IngestConfig {
    pub fn new(max_header_lines: usize) -> Self {
        Self { max_header_lines }
    }

    pub fn max_header_lines(&self) -> usize {
        self.max_header_lines
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self::new(default_max_header_lines())
    }
}

/// The surface a figure is fitted to when no physical size is given.
#[derive(Debug, Clone, Deserialize)]
pub struct SurfaceConfig {
    #[serde(default = "default_width_px")]
    width_px: u32,

    #[serde(default = "default_height_px")]
    height_px: u32,

    #[serde(default = "default_dpi")]
    dpi: f64,
}

fn default_width_px() -> u32 {
    800
}

fn default_height_px() -> u32 {
    600
}

fn default_dpi() -> f64 {
    100.0
}

impl SurfaceConfig {
    pub fn new(width_px: u32, height_px: u32, dpi: f64) -> Self {
        Self {
            width_px,
            height_px,
            dpi,
        }
    }

    pub fn width_px(&self) -> u32 {
        self.width_px
    }

    pub fn height_px(&self) -> u32 {
        self.height_px
    }

    /// Dots per inch; non-positive values fall back to the default.
    pub fn dpi(&self) -> f64 {
        if self.dpi.is_finite() && self.dpi > 0.0 {
            self.dpi
        } else {
            default_dpi()
        }
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self::new(default_width_px(), default_height_px(), default_dpi())
    }
}

/// Reference color generation.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PaletteConfig {
    /// Fixed seed for reproducible reference colors; random when unset.
    #[serde(default)]
    seed: Option<u64>,
}

impl PaletteConfig {
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

/// Visual styling of the exported page.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleConfig {
    /// Page background [`Color`], as a color string. `none` or
    /// `transparent` leave the page unpainted.
    #[serde(default = "default_background_color")]
    background_color: Option<String>,
}

fn default_background_color() -> Option<String> {
    Some("white".to_string())
}

impl StyleConfig {
    pub fn new(background_color: Option<String>) -> Self {
        Self { background_color }
    }

    /// Returns the parsed background [`Color`], or `None` for a transparent page.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        match self.background_color.as_deref().map(str::trim) {
            None => Ok(None),
            Some(value)
                if value.eq_ignore_ascii_case("none")
                    || value.eq_ignore_ascii_case("transparent") =>
            {
                Ok(None)
            }
            Some(value) => Color::new(value)
                .map(Some)
                .map_err(|err| format!("Invalid background color in config: {err}")),
        }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self::new(default_background_color())
    }
}
