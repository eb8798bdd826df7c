//! Physical layout engine.
//!
//! Resolves centimeter and inch sizing directives into an absolute figure
//! size and the normalized plotting-area rectangle. Modes are tried in
//! priority order and the first one that parses wins:
//!
//! 1. `axes_size_cm` with `margins_cm`: the plotting area and margins are
//!    reproduced exactly.
//! 2. `figsize_cm`: total figure size in centimeters.
//! 3. `figsize`: total figure size in inches (`auto` skips it).
//! 4. Auto-fit to the host surface.
//!
//! A malformed directive is logged and its mode skipped.

use log::{debug, warn};

use stackplot_core::{
    geometry::{Insets, Size, SubplotRect},
    scene::{PhysicalLayout, SizingMode},
};
use stackplot_parser::{
    ValueError,
    options::SizingDirectives,
    values::{parse_figsize_inches, parse_margins_cm, parse_pair_cm},
};

use crate::config::SurfaceConfig;

/// Margins used with `axes_size_cm` when `margins_cm` is absent or unusable.
pub fn default_margins_cm() -> Insets {
    Insets::new(1.0, 1.0, 1.2, 1.5)
}

/// Largest width/height difference, in centimeters, that still pins a
/// square plotting area.
const SQUARE_TOLERANCE_CM: f64 = 0.01;

/// Resolves the physical layout for one run.
pub fn resolve(sizing: &SizingDirectives, surface: &SurfaceConfig) -> PhysicalLayout {
    let layout = axes_size_mode(sizing)
        .or_else(|| figure_cm_mode(sizing))
        .or_else(|| figure_inches_mode(sizing))
        .unwrap_or_else(|| auto_fit(surface));

    debug!(
        mode:? = layout.mode,
        width_in = layout.figure.width(),
        height_in = layout.figure.height(),
        pin_square = layout.pin_square;
        "Physical layout resolved"
    );
    layout
}

/// Parses an optional directive, treating an empty value as absent.
fn parse_directive<T>(
    key: &str,
    raw: Option<&str>,
    parse: impl Fn(&str) -> Result<T, ValueError>,
) -> Option<T> {
    match parse(raw?) {
        Ok(value) => Some(value),
        Err(ValueError::Empty) => None,
        Err(err) => {
            warn!(key, err:%; "Ignoring malformed sizing directive");
            None
        }
    }
}

/// Accepts only finite, strictly positive sizes.
fn positive_size(key: &str, (width, height): (f64, f64)) -> Option<Size> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Some(Size::new(width, height))
    } else {
        warn!(key, width, height; "Ignoring non-positive size");
        None
    }
}

fn axes_size_mode(sizing: &SizingDirectives) -> Option<PhysicalLayout> {
    let key = "axes_size_cm";
    let area = parse_directive(key, sizing.axes_size_cm.as_deref(), parse_pair_cm)
        .and_then(|pair| positive_size(key, pair))?;
    let margins = parse_directive(
        "margins_cm",
        sizing.margins_cm.as_deref(),
        parse_margins_cm,
    )
    .unwrap_or_else(default_margins_cm);

    let figure_cm = area.add_padding(margins);
    Some(PhysicalLayout {
        mode: SizingMode::AxesCm,
        figure: figure_cm.cm_to_in(),
        subplot: SubplotRect::from_margins(figure_cm, margins),
        pin_square: area.is_square(SQUARE_TOLERANCE_CM),
    })
}

fn figure_cm_mode(sizing: &SizingDirectives) -> Option<PhysicalLayout> {
    let key = "figsize_cm";
    let figure = parse_directive(key, sizing.figsize_cm.as_deref(), parse_pair_cm)
        .and_then(|pair| positive_size(key, pair))?;
    Some(PhysicalLayout {
        mode: SizingMode::FigureCm,
        figure: figure.cm_to_in(),
        subplot: SubplotRect::default(),
        pin_square: false,
    })
}

fn figure_inches_mode(sizing: &SizingDirectives) -> Option<PhysicalLayout> {
    let key = "figsize";
    let figure = parse_directive(key, sizing.figsize.as_deref(), parse_figsize_inches)
        .and_then(|pair| positive_size(key, pair))?;
    Some(PhysicalLayout {
        mode: SizingMode::FigureInches,
        figure,
        subplot: SubplotRect::default(),
        pin_square: false,
    })
}

fn auto_fit(surface: &SurfaceConfig) -> PhysicalLayout {
    let dpi = surface.dpi();
    PhysicalLayout {
        mode: SizingMode::AutoFit,
        figure: Size::new(
            f64::from(surface.width_px().max(1)) / dpi,
            f64::from(surface.height_px().max(1)) / dpi,
        ),
        subplot: SubplotRect::default(),
        pin_square: false,
    }
}
