//! Sprite colours
//!
//! Every sprite gets a random hue on a fixed saturation/lightness band,
//! emitted as a CSS `hsl()` value.

use std::fmt;

use rand::Rng;
use serde::Serialize;

/// Saturation shared by all sprite colours, in percent.
pub const SATURATION: u8 = 80;
/// Lightness shared by all sprite colours, in percent.
pub const LIGHTNESS: u8 = 50;

/// A whole-degree hue angle in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Hue(u16);

impl Hue {
    /// Create a hue, wrapping angles of 360 and above.
    pub fn new(degrees: u16) -> Self {
        Self(degrees % 360)
    }

    /// Draw a hue uniformly from `[0, 360)`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        // Truncate, not round: 359.9 must stay 359
        Self((rng.gen::<f64>() * 360.0) as u16)
    }

    pub fn degrees(self) -> u16 {
        self.0
    }

    /// CSS colour value, e.g. `hsl(120,80%,50%)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use emojirain::color::Hue;
    ///
    /// assert_eq!(Hue::new(120).css(), "hsl(120,80%,50%)");
    /// ```
    pub fn css(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Hue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({},{}%,{}%)", self.0, SATURATION, LIGHTNESS)
    }
}
