//! SVG backend.
//!
//! Documents are laid out in points and carry their physical size in inches,
//! so centimeter margins survive export exactly. Vector output ignores the
//! export DPI.

use std::{fs::File, io::Write};

use log::{debug, error, info};
use svg::{Document, node::element as svg_element};

use stackplot_core::{color::Color, geometry::Size};

use crate::{config::StyleConfig, export, scene::Scene};

mod axes;
mod frame;
mod legend;
mod plot;
mod ticks;

use frame::{PT_PER_INCH, PlotFrame};

/// Id of the clip path covering the plotting area.
const PLOT_CLIP_ID: &str = "plot-area";

/// Rough advance width of a glyph, as a fraction of the font size.
const GLYPH_WIDTH_FACTOR: f64 = 0.55;

/// Approximate rendered width of `text` at `font_size`.
fn estimate_text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * GLYPH_WIDTH_FACTOR
}

/// Builder for [`Svg`] exporters.
#[derive(Debug, Default)]
pub struct SvgBuilder {
    file_name: String,
    style: StyleConfig,
}

impl SvgBuilder {
    pub fn new(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            style: StyleConfig::default(),
        }
    }

    /// Applies page styling from the configuration.
    pub fn with_style(mut self, style: &StyleConfig) -> Self {
        self.style = style.clone();
        self
    }

    /// # Errors
    ///
    /// Returns [`export::Error::Render`] if the configured page background
    /// is not a valid color.
    pub fn build(self) -> Result<Svg, export::Error> {
        let page_background = self.style.background_color().map_err(export::Error::Render)?;
        Ok(Svg {
            file_name: self.file_name,
            page_background,
        })
    }
}

/// SVG exporter writing one scene per file.
#[derive(Debug, Default)]
pub struct Svg {
    file_name: String,
    /// `None` leaves the page transparent
    page_background: Option<Color>,
}

impl Svg {
    /// Renders a scene into an in-memory document.
    pub fn render_scene(&self, scene: &Scene) -> Document {
        let page = scene.layout.figure.scale(PT_PER_INCH);
        let frame = PlotFrame::new(scene, page);
        debug!(
            width_pt = page.width(),
            height_pt = page.height(),
            area_width_pt = frame.width(),
            area_height_pt = frame.height();
            "Rendering scene"
        );

        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {} {}", page.width(), page.height()))
            .set("width", format!("{}in", scene.layout.figure.width()))
            .set("height", format!("{}in", scene.layout.figure.height()));

        if let Some(background) = self.render_page_background(page) {
            doc = doc.add(background);
        }
        doc = doc.add(self.create_clip_path(&frame));

        if let Some(background) = self.render_data_background(&frame, &scene.style) {
            doc = doc.add(background);
        }
        doc = doc
            .add(self.render_curves(&frame, &scene.curves))
            .add(self.render_marks(&frame, &scene.marks))
            .add(self.render_frame(&frame, &scene.style))
            .add(self.render_axes(&frame, scene));

        if let Some(legend) = &scene.legend {
            doc = doc.add(self.render_legend(&frame, legend, &scene.style));
        }
        doc
    }

    fn render_page_background(&self, page: Size) -> Option<svg_element::Rectangle> {
        let color = self.page_background?;
        Some(
            svg_element::Rectangle::new()
                .set("width", page.width())
                .set("height", page.height())
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha()),
        )
    }

    fn create_clip_path(&self, frame: &PlotFrame) -> svg_element::Definitions {
        let clip_rect = svg_element::Rectangle::new()
            .set("x", frame.left())
            .set("y", frame.top())
            .set("width", frame.width())
            .set("height", frame.height());
        let clip_path = svg_element::ClipPath::new()
            .set("id", PLOT_CLIP_ID)
            .add(clip_rect);
        svg_element::Definitions::new().add(clip_path)
    }

    /// Writes an SVG document to the configured file
    pub fn write_document(&self, doc: Document) -> Result<(), export::Error> {
        info!(file_name = self.file_name; "Creating SVG file");
        let f = match File::create(&self.file_name) {
            Ok(file) => file,
            Err(err) => {
                error!(file_name = self.file_name, err:err; "Failed to create SVG file");
                return Err(export::Error::Io(err));
            }
        };

        if let Err(err) = write!(&f, "{doc}") {
            error!(file_name = self.file_name, err:err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }

        Ok(())
    }
}

impl export::Exporter for Svg {
    fn export_scene(&mut self, scene: &Scene) -> Result<(), export::Error> {
        let doc = self.render_scene(scene);
        debug!("SVG document rendered");

        self.write_document(doc)
    }
}

/// A small two-curve scene shared by the backend tests.
#[cfg(test)]
pub(super) fn test_scene() -> Scene {
    use stackplot_core::{
        draw::StrokeDefinition,
        geometry::SubplotRect,
        scene::{Axis, Curve, Mark, MarkGroup, PhysicalLayout, SceneStyle, SizingMode},
    };

    Scene {
        layout: PhysicalLayout {
            mode: SizingMode::FigureInches,
            figure: Size::new(4.0, 3.0),
            subplot: SubplotRect::default(),
            pin_square: false,
        },
        title: String::new(),
        x_axis: Axis::default(),
        y_axis: Axis::default(),
        curves: vec![
            Curve {
                label: "upper".to_string(),
                points: vec![(0.0, 2.0), (10.0, 3.0), (20.0, 2.5)],
                stroke: StrokeDefinition::new(Color::new("red").unwrap(), 1.5),
            },
            Curve {
                label: "lower".to_string(),
                points: vec![(0.0, 0.0), (10.0, 1.0), (20.0, 0.5)],
                stroke: StrokeDefinition::new(Color::new("blue").unwrap(), 1.5),
            },
        ],
        marks: vec![MarkGroup {
            label: "reference".to_string(),
            marks: vec![Mark {
                x: 10.0,
                y0: -1.0,
                y1: -0.05,
            }],
            stroke: StrokeDefinition::new(Color::new("green").unwrap(), 2.0),
        }],
        legend: None,
        style: SceneStyle {
            font: "serif".to_string(),
            text_color: Color::default(),
            frame_color: Color::default(),
            frame_width: 1.0,
            data_background: Some(Color::new("white").unwrap()),
            default_size: 10.0,
            label_size: 12.0,
            title_size: 12.0,
            tick_size: 10.0,
            legend_size: 10.0,
        },
    }
}
