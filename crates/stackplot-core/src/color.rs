//! Color handling for Stackplot scenes
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Colors can be written as CSS color strings or as the
//! single-letter shorthands used in plotting directives (`k`, `r`, `b`, ...).

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::DynamicColor;

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string.
    ///
    /// Parses CSS color strings such as `"#ff0000"`, `"rgb(255, 0, 0)"` or
    /// `"red"`, and the single-letter plotting shorthands.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackplot_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let black = Color::new("k").unwrap();
    /// assert_eq!(black, Color::default());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        let trimmed = color_str.trim();
        let css = shorthand_to_css(trimmed).unwrap_or(trimmed);
        match DynamicColor::from_str(css) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Create an opaque color from sRGB components in `0.0..=1.0`.
    ///
    /// Components outside the range are clamped.
    pub fn from_rgb(r: f64, g: f64, b: f64) -> Self {
        let to_byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        let hex = format!("#{:02x}{:02x}{:02x}", to_byte(r), to_byte(g), to_byte(b));
        Self::new(&hex).expect("a hex triplet is a valid CSS color")
    }

    /// Creates a new color with the specified alpha (transparency) value.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha (transparency) component of this color.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

/// Maps the single-letter plotting color codes onto CSS names.
fn shorthand_to_css(s: &str) -> Option<&'static str> {
    let css = match s {
        "b" => "blue",
        "g" => "green",
        "r" => "red",
        "c" => "cyan",
        "m" => "magenta",
        "y" => "yellow",
        "k" => "black",
        "w" => "white",
        _ => return None,
    };
    Some(css)
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}
