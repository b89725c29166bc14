//! Color handling for sysdiagram graphs
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Colors are accepted in any CSS notation and always
//! written out in the `#rrggbb` form Graphviz understands.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{DynamicColor, Srgb};
use thiserror::Error;

/// Error returned when a color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color `{input}`: {reason}")]
pub struct ColorError {
    input: String,
    reason: String,
}

impl ColorError {
    /// The string that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

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
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "lightblue", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use sysdiagram_core::color::Color;
    ///
    /// let accent = Color::new("#4A90E2").unwrap();
    /// let fill = Color::new("lightblue").unwrap();
    /// assert_eq!(accent.to_string(), "#4a90e2");
    /// assert_eq!(fill.to_string(), "#add8e6");
    /// ```
    pub fn new(color_str: &str) -> Result<Self, ColorError> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(ColorError {
                input: color_str.to_string(),
                reason: err.to_string(),
            }),
        }
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Formats as opaque `#rrggbb`.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        write!(f, "#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
    }
}
