//! PNG backend.
//!
//! Scenes are drawn through the SVG backend and rasterised with `resvg`. The
//! pixel size is the physical figure size times the export DPI.

use std::{fs::File, io::Write};

use log::{debug, error, info};
use tiny_skia::{Pixmap, Transform};

use crate::{
    config::StyleConfig,
    export::{
        self,
        svg::{Svg, SvgBuilder},
    },
    scene::Scene,
};

/// Builder for [`Png`] exporters.
#[derive(Debug)]
pub struct PngBuilder {
    file_name: String,
    style: StyleConfig,
    dpi: u32,
}

impl PngBuilder {
    pub fn new(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            style: StyleConfig::default(),
            dpi: stackplot_parser::options::DEFAULT_EXPORT_DPI,
        }
    }

    /// Applies page styling from the configuration.
    pub fn with_style(mut self, style: &StyleConfig) -> Self {
        self.style = style.clone();
        self
    }

    /// Sets the raster resolution in dots per inch.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// # Errors
    ///
    /// Returns [`export::Error::Render`] if the page background is not a
    /// valid color or the resolution is zero.
    pub fn build(self) -> Result<Png, export::Error> {
        if self.dpi == 0 {
            return Err(export::Error::Render(
                "export DPI must be greater than zero".to_string(),
            ));
        }
        let svg = SvgBuilder::default().with_style(&self.style).build()?;
        Ok(Png {
            file_name: self.file_name,
            svg,
            dpi: self.dpi,
        })
    }
}

/// PNG exporter writing one scene per file.
#[derive(Debug)]
pub struct Png {
    file_name: String,
    svg: Svg,
    dpi: u32,
}

impl Png {
    /// Rasterises a scene into encoded PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] if the figure has no drawable pixel
    /// area or the image cannot be encoded.
    pub fn render_scene(&self, scene: &Scene) -> Result<Vec<u8>, export::Error> {
        let figure = scene.layout.figure;
        let width = pixel_length(figure.width(), self.dpi)?;
        let height = pixel_length(figure.height(), self.dpi)?;

        let document = self.svg.render_scene(scene).to_string();

        let mut options = resvg::usvg::Options::default();
        options.fontdb_mut().load_system_fonts();
        let tree = resvg::usvg::Tree::from_str(&document, &options)
            .map_err(|err| export::Error::Render(format!("invalid SVG for PNG export: {err}")))?;

        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            export::Error::Render(format!("failed to allocate a {width}x{height} image"))
        })?;

        // usvg resolves the inch-sized document at its own pixel density
        let size = tree.size();
        let transform = Transform::from_scale(
            width as f32 / size.width(),
            height as f32 / size.height(),
        );
        resvg::render(&tree, transform, &mut pixmap.as_mut());
        debug!(width, height, dpi = self.dpi; "Scene rasterised");

        pixmap
            .encode_png()
            .map_err(|err| export::Error::Render(format!("failed to encode PNG: {err}")))
    }

    /// Writes encoded PNG bytes to the configured file
    pub fn write_image(&self, bytes: &[u8]) -> Result<(), export::Error> {
        info!(file_name = self.file_name; "Creating PNG file");
        let mut f = match File::create(&self.file_name) {
            Ok(file) => file,
            Err(err) => {
                error!(file_name = self.file_name, err:err; "Failed to create PNG file");
                return Err(export::Error::Io(err));
            }
        };

        if let Err(err) = f.write_all(bytes) {
            error!(file_name = self.file_name, err:err; "Failed to write PNG content");
            return Err(export::Error::Io(err));
        }

        Ok(())
    }
}

impl export::Exporter for Png {
    fn export_scene(&mut self, scene: &Scene) -> Result<(), export::Error> {
        let bytes = self.render_scene(scene)?;
        self.write_image(&bytes)
    }
}

/// Number of pixels covering `inches` at `dpi`.
fn pixel_length(inches: f64, dpi: u32) -> Result<u32, export::Error> {
    let pixels = (inches * f64::from(dpi)).round();
    if !pixels.is_finite() || pixels < 1.0 || pixels > f64::from(u32::MAX) {
        return Err(export::Error::Render(format!(
            "figure of {inches} in at {dpi} dpi has no drawable pixel size"
        )));
    }
    Ok(pixels as u32)
}
