//! SVG rendering for the legend.
//!
//! Spacing follows the usual plotting defaults, expressed in multiples of the
//! legend font size: each handle is a short line two units long, followed by
//! its label.

use log::debug;
use svg::node::element as svg_element;

use stackplot_core::{
    apply_stroke,
    scene::{Legend, LegendPlacement, SceneStyle},
};

use super::{Svg, estimate_text_width, frame::PlotFrame};

const HANDLE_LENGTH: f64 = 2.0;
const HANDLE_TEXT_PAD: f64 = 0.8;
const BORDER_PAD: f64 = 0.4;
/// Gap between an on-area legend and the frame
const BORDER_AXES_PAD: f64 = 0.5;
/// Gap between an outside legend and the right edge, as a fraction of the area width
const OUTSIDE_GAP: f64 = 0.05;

/// Horizontal and vertical alignment of an on-area legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Start,
    Center,
    End,
}

/// Maps an anchor keyword onto (horizontal, vertical) alignment.
///
/// `best` and unknown keywords use the upper right corner.
fn anchor_alignment(keyword: &str) -> (Align, Align) {
    match keyword {
        "upper left" => (Align::Start, Align::Start),
        "upper center" => (Align::Center, Align::Start),
        "lower left" => (Align::Start, Align::End),
        "lower center" => (Align::Center, Align::End),
        "lower right" => (Align::End, Align::End),
        "right" | "center right" => (Align::End, Align::Center),
        "center left" => (Align::Start, Align::Center),
        "center" => (Align::Center, Align::Center),
        "upper right" | "best" => (Align::End, Align::Start),
        other => {
            debug!(keyword = other; "Unknown legend position, using upper right");
            (Align::End, Align::Start)
        }
    }
}

fn align(start: f64, available: f64, size: f64, pad: f64, alignment: Align) -> f64 {
    match alignment {
        Align::Start => start + pad,
        Align::Center => start + (available - size) / 2.0,
        Align::End => start + available - size - pad,
    }
}

impl Svg {
    pub(super) fn render_legend(
        &self,
        frame: &PlotFrame,
        legend: &Legend,
        style: &SceneStyle,
    ) -> svg_element::Group {
        let size = style.legend_size;
        let rows = legend.entries.len() as f64;
        let widest = legend
            .entries
            .iter()
            .map(|e| estimate_text_width(&e.label, size))
            .fold(0.0, f64::max);
        let width = (2.0 * BORDER_PAD + HANDLE_LENGTH + HANDLE_TEXT_PAD) * size + widest;
        let height = 2.0 * BORDER_PAD * size
            + rows * size
            + (rows - 1.0).max(0.0) * legend.label_spacing * size;

        let (left, top) = match &legend.placement {
            LegendPlacement::OutsideRight => {
                (frame.right() + OUTSIDE_GAP * frame.width(), frame.top())
            }
            LegendPlacement::Anchor(keyword) => {
                let (horizontal, vertical) = anchor_alignment(keyword);
                let pad = BORDER_AXES_PAD * size;
                (
                    align(frame.left(), frame.width(), width, pad, horizontal),
                    align(frame.top(), frame.height(), height, pad, vertical),
                )
            }
        };

        // Legends are drawn without a frame or backing patch.
        let mut group = svg_element::Group::new().set("class", "legend");

        let handle_x = left + BORDER_PAD * size;
        let text_x = handle_x + (HANDLE_LENGTH + HANDLE_TEXT_PAD) * size;
        for (i, entry) in legend.entries.iter().enumerate() {
            let y = top
                + BORDER_PAD * size
                + i as f64 * (1.0 + legend.label_spacing) * size
                + size / 2.0;
            let handle = svg_element::Line::new()
                .set("x1", handle_x)
                .set("y1", y)
                .set("x2", handle_x + HANDLE_LENGTH * size)
                .set("y2", y);
            group = group.add(apply_stroke!(handle, &entry.stroke));
            group = group.add(
                svg_element::Text::new(entry.label.as_str())
                    .set("x", text_x)
                    .set("y", y)
                    .set("dominant-baseline", "central")
                    .set("font-family", style.font.as_str())
                    .set("font-size", size)
                    .set("fill", style.text_color.to_string())
                    .set("fill-opacity", style.text_color.alpha()),
            );
        }
        group
    }
}

#[cfg(test)]
mod tests {
    use stackplot_core::{
        color::Color,
        draw::StrokeDefinition,
        scene::{LegendEntry, Scene},
    };

    use super::*;
    use crate::export::svg::{frame::PT_PER_INCH, test_scene};

    fn legend(placement: LegendPlacement) -> Legend {
        Legend {
            entries: vec![
                LegendEntry {
                    label: "sample".to_string(),
                    stroke: StrokeDefinition::new(Color::new("red").unwrap(), 2.5),
                },
                LegendEntry {
                    label: "quartz".to_string(),
                    stroke: StrokeDefinition::new(Color::new("blue").unwrap(), 2.0),
                },
            ],
            placement,
            label_spacing: 0.5,
        }
    }

    fn frame(scene: &Scene) -> PlotFrame {
        PlotFrame::new(scene, scene.layout.figure.scale(PT_PER_INCH))
    }

    #[test]
    fn test_anchor_alignment() {
        assert_eq!(anchor_alignment("best"), (Align::End, Align::Start));
        assert_eq!(anchor_alignment("lower left"), (Align::Start, Align::End));
        assert_eq!(anchor_alignment("center"), (Align::Center, Align::Center));
        assert_eq!(anchor_alignment("somewhere"), (Align::End, Align::Start));
    }

    #[test]
    fn test_outside_legend_has_no_frame() {
        let scene = test_scene();
        let frame = frame(&scene);
        let rendered = Svg::default()
            .render_legend(&frame, &legend(LegendPlacement::OutsideRight), &scene.style)
            .to_string();
        assert!(!rendered.contains("<rect"));
        assert!(rendered.contains("sample"));
        assert!(rendered.contains("quartz"));
        assert!(rendered.contains("stroke-width=\"2.5\""));
    }

    #[test]
    fn test_anchored_legend_has_no_frame() {
        let scene = test_scene();
        let frame = frame(&scene);
        let rendered = Svg::default()
            .render_legend(
                &frame,
                &legend(LegendPlacement::Anchor("best".to_string())),
                &scene.style,
            )
            .to_string();
        assert!(!rendered.contains("<rect"));
        assert!(rendered.contains("<line"));
    }
}
