//! SVG rendering for data curves and reference marks.

use std::fmt::Write;

use svg::node::element as svg_element;

use stackplot_core::{
    apply_stroke,
    scene::{Curve, MarkGroup},
};

use super::{PLOT_CLIP_ID, Svg, frame::PlotFrame};

/// Path data for a polyline, starting a new subpath after every
/// non-finite point. Returns `None` when nothing is drawable.
fn polyline_data(frame: &PlotFrame, points: &[(f64, f64)]) -> Option<String> {
    let mut data = String::new();
    let mut pen_down = false;
    for &(x, y) in points {
        if !(x.is_finite() && y.is_finite()) {
            pen_down = false;
            continue;
        }
        let command = if pen_down { 'L' } else { 'M' };
        let _ = write!(data, "{command}{:.3},{:.3} ", frame.map_x(x), frame.map_y(y));
        pen_down = true;
    }
    let data = data.trim_end();
    (!data.is_empty()).then(|| data.to_string())
}

impl Svg {
    /// Renders every data curve, clipped to the plotting area.
    pub(super) fn render_curves(&self, frame: &PlotFrame, curves: &[Curve]) -> svg_element::Group {
        let mut group = svg_element::Group::new()
            .set("class", "curves")
            .set("clip-path", format!("url(#{PLOT_CLIP_ID})"));

        for curve in curves {
            let Some(data) = polyline_data(frame, &curve.points) else {
                continue;
            };
            let path = svg_element::Path::new()
                .set("d", data)
                .set("fill", "none")
                .set("stroke-linejoin", "round")
                .set("stroke-linecap", "butt");
            let path = apply_stroke!(path, &curve.stroke);
            group = group.add(path);
        }
        group
    }

    /// Renders reference marks, one path per pattern.
    pub(super) fn render_marks(&self, frame: &PlotFrame, groups: &[MarkGroup]) -> svg_element::Group {
        let mut layer = svg_element::Group::new()
            .set("class", "reference-marks")
            .set("clip-path", format!("url(#{PLOT_CLIP_ID})"));

        for group in groups {
            let mut data = String::new();
            for mark in &group.marks {
                let x = frame.map_x(mark.x);
                let _ = write!(
                    data,
                    "M{x:.3},{:.3} V{:.3} ",
                    frame.map_y(mark.y0),
                    frame.map_y(mark.y1)
                );
            }
            if data.is_empty() {
                continue;
            }
            let path = svg_element::Path::new()
                .set("d", data.trim_end())
                .set("fill", "none")
                .set("stroke-linecap", "butt");
            let path = apply_stroke!(path, &group.stroke);
            layer = layer.add(path);
        }
        layer
    }
}

#[cfg(test)]
mod tests {
    use stackplot_core::geometry::{AxisLimits, Size, SubplotRect};

    use super::*;
    use crate::export::svg::test_scene;

    fn frame() -> PlotFrame {
        let mut scene = test_scene();
        scene.layout.subplot = SubplotRect::new(0.0, 1.0, 1.0, 0.0);
        scene.x_axis.limits = Some(AxisLimits::new(0.0, 10.0));
        scene.y_axis.limits = Some(AxisLimits::new(0.0, 10.0));
        PlotFrame::new(&scene, Size::new(100.0, 100.0))
    }

    #[test]
    fn test_polyline_data() {
        let data = polyline_data(&frame(), &[(0.0, 0.0), (5.0, 5.0), (10.0, 10.0)]).unwrap();
        assert_eq!(data, "M0.000,100.000 L50.000,50.000 L100.000,0.000");
    }

    #[test]
    fn test_polyline_breaks_on_gaps() {
        let data = polyline_data(&frame(), &[(0.0, 0.0), (1.0, f64::NAN), (2.0, 0.0)]).unwrap();
        assert_eq!(data, "M0.000,100.000 M20.000,100.000");
        assert_eq!(polyline_data(&frame(), &[(f64::NAN, 1.0)]), None);
    }

    #[test]
    fn test_marks_render_as_vertical_segments() {
        let scene = test_scene();
        let frame = frame();
        let rendered = Svg::default().render_marks(&frame, &scene.marks).to_string();
        assert!(rendered.contains("M100.000,110.000 V100.500"));
        assert!(rendered.contains("stroke-width=\"2\""));
    }
}
