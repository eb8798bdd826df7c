//! SVG rendering for the plotting-area frame, ticks, axis labels and title.

use svg::node::element as svg_element;

use stackplot_core::scene::{Axis, Scene, SceneStyle};

use super::{
    Svg, estimate_text_width,
    frame::PlotFrame,
    ticks::{self, TickSet},
};

const MAJOR_TICK_LENGTH: f64 = 6.0;
const MINOR_TICK_LENGTH: f64 = 3.0;
/// Gap between a tick and its label
const TICK_LABEL_PAD: f64 = 3.5;
/// Gap between tick labels and the axis label
const AXIS_LABEL_PAD: f64 = 4.0;
/// Gap between the top of the plotting area and the title
const TITLE_PAD: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Bottom,
    Left,
}

/// Tick strokes derived from the frame width.
struct TickStyle {
    major_width: f64,
    minor_width: f64,
}

impl TickStyle {
    fn new(style: &SceneStyle) -> Self {
        Self {
            major_width: style.frame_width,
            minor_width: (0.8 * style.frame_width).max(0.8),
        }
    }
}

fn text(content: &str, x: f64, y: f64, size: f64, style: &SceneStyle) -> svg_element::Text {
    svg_element::Text::new(content)
        .set("x", x)
        .set("y", y)
        .set("font-family", style.font.as_str())
        .set("font-size", size)
        .set("fill", style.text_color.to_string())
        .set("fill-opacity", style.text_color.alpha())
}

impl Svg {
    /// Fills the plotting area, unless the data background is transparent.
    pub(super) fn render_data_background(
        &self,
        frame: &PlotFrame,
        style: &SceneStyle,
    ) -> Option<svg_element::Rectangle> {
        let color = style.data_background?;
        Some(
            svg_element::Rectangle::new()
                .set("x", frame.left())
                .set("y", frame.top())
                .set("width", frame.width())
                .set("height", frame.height())
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha()),
        )
    }

    /// The four spines around the plotting area.
    pub(super) fn render_frame(&self, frame: &PlotFrame, style: &SceneStyle) -> svg_element::Rectangle {
        svg_element::Rectangle::new()
            .set("x", frame.left())
            .set("y", frame.top())
            .set("width", frame.width())
            .set("height", frame.height())
            .set("fill", "none")
            .set("stroke", style.frame_color.to_string())
            .set("stroke-opacity", style.frame_color.alpha())
            .set("stroke-width", style.frame_width)
    }

    /// Ticks, tick labels and axis labels of both axes plus the title.
    pub(super) fn render_axes(&self, frame: &PlotFrame, scene: &Scene) -> svg_element::Group {
        let (x_group, x_depth) = self.render_axis(frame, &scene.x_axis, Side::Bottom, &scene.style);
        let (y_group, y_depth) = self.render_axis(frame, &scene.y_axis, Side::Left, &scene.style);
        let style = &scene.style;

        let mut group = svg_element::Group::new()
            .set("class", "axes")
            .add(x_group)
            .add(y_group);

        if !scene.x_axis.label.is_empty() {
            let y = frame.bottom() + x_depth + AXIS_LABEL_PAD;
            let label = text(
                &scene.x_axis.label,
                frame.left() + frame.width() / 2.0,
                y,
                style.label_size,
                style,
            )
            .set("text-anchor", "middle")
            .set("dominant-baseline", "hanging");
            group = group.add(label);
        }

        if !scene.y_axis.label.is_empty() {
            let x = frame.left() - y_depth - AXIS_LABEL_PAD;
            let y = frame.top() + frame.height() / 2.0;
            let label = text(&scene.y_axis.label, x, y, style.label_size, style)
                .set("text-anchor", "middle")
                .set("transform", format!("rotate(-90 {x} {y})"));
            group = group.add(label);
        }

        if !scene.title.is_empty() {
            let title = text(
                &scene.title,
                frame.left() + frame.width() / 2.0,
                frame.top() - TITLE_PAD,
                style.title_size,
                style,
            )
            .set("text-anchor", "middle");
            group = group.add(title);
        }

        group
    }

    /// Renders one axis and returns it with the distance its ticks and
    /// labels extend outward from the frame.
    fn render_axis(
        &self,
        frame: &PlotFrame,
        axis: &Axis,
        side: Side,
        style: &SceneStyle,
    ) -> (svg_element::Group, f64) {
        let range = match side {
            Side::Bottom => frame.x_range(),
            Side::Left => frame.y_range(),
        };
        let tick_set = TickSet::new(axis.ticks.major, axis.ticks.minor, range);
        let tick_style = TickStyle::new(style);
        let class = match side {
            Side::Bottom => "x-axis",
            Side::Left => "y-axis",
        };
        let mut group = svg_element::Group::new().set("class", class);

        let tick_line = |value: f64, length: f64, width: f64| {
            let (x1, y1, x2, y2) = match side {
                Side::Bottom => {
                    let x = frame.map_x(value);
                    (x, frame.bottom(), x, frame.bottom() + length)
                }
                Side::Left => {
                    let y = frame.map_y(value);
                    (frame.left(), y, frame.left() - length, y)
                }
            };
            svg_element::Line::new()
                .set("x1", x1)
                .set("y1", y1)
                .set("x2", x2)
                .set("y2", y2)
                .set("stroke", style.frame_color.to_string())
                .set("stroke-opacity", style.frame_color.alpha())
                .set("stroke-width", width)
        };

        for &value in &tick_set.minor {
            group = group.add(tick_line(value, MINOR_TICK_LENGTH, tick_style.minor_width));
        }

        let mut depth: f64 = if tick_set.minor.is_empty() {
            0.0
        } else {
            MINOR_TICK_LENGTH
        };
        if tick_set.major.is_empty() {
            return (group, depth);
        }

        let decimals = tick_set.major_interval.map_or(0, ticks::label_decimals);
        let mut widest: f64 = 0.0;
        for &value in &tick_set.major {
            group = group.add(tick_line(value, MAJOR_TICK_LENGTH, tick_style.major_width));

            let content = ticks::format_label(value, decimals);
            widest = widest.max(estimate_text_width(&content, style.tick_size));
            let offset = MAJOR_TICK_LENGTH + TICK_LABEL_PAD;
            let label = match side {
                Side::Bottom => text(
                    &content,
                    frame.map_x(value),
                    frame.bottom() + offset,
                    style.tick_size,
                    style,
                )
                .set("text-anchor", "middle")
                .set("dominant-baseline", "hanging"),
                Side::Left => text(
                    &content,
                    frame.left() - offset,
                    frame.map_y(value),
                    style.tick_size,
                    style,
                )
                .set("text-anchor", "end")
                .set("dominant-baseline", "central"),
            };
            group = group.add(label);
        }

        let label_extent = match side {
            Side::Bottom => style.tick_size,
            Side::Left => widest,
        };
        depth = depth.max(MAJOR_TICK_LENGTH + TICK_LABEL_PAD + label_extent);
        (group, depth)
    }
}
