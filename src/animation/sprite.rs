//! A single falling emoji and the random draws that place it.

use rand::Rng;
use serde::Serialize;

use super::surface::RenderableSprite;
use super::{FONT_SIZE_PX, SPAWN_Y, SPAWN_Y_JITTER, WRAP_THRESHOLD_Y};
use crate::color::Hue;

/// Horizontal band a sprite spawns in: `x = base + r * span`, `r` in `[0, 1)`.
///
/// `span` may be negative, in which case the band extends left of `base`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpawnRange {
    pub base: f64,
    pub span: f64,
}

impl SpawnRange {
    pub const fn new(base: f64, span: f64) -> Self {
        Self { base, span }
    }

    pub fn sample_x<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.base + rng.gen::<f64>() * self.span
    }

    /// Whether `x` lies inside the band, either edge included.
    pub fn contains(&self, x: f64) -> bool {
        let end = self.base + self.span;
        x >= self.base.min(end) && x <= self.base.max(end)
    }
}

/// Draw a starting height just below the top of the screen.
pub(crate) fn sample_y<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    SPAWN_Y + rng.gen::<f64>() * SPAWN_Y_JITTER
}

/// Pixels per frame. Fixed for the sprite's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

impl Velocity {
    /// Slight sideways drift in `[-0.15, 0.15)`, fall speed in `[1, 2)`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let x = -0.15 + rng.gen::<f64>() * 0.3;
        let y = 1.0 + rng.gen::<f64>();
        Self { x, y }
    }
}

/// Plain-data view of a sprite, for logs and JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpriteSnapshot {
    pub glyph: &'static str,
    pub x: f64,
    pub y: f64,
    pub velocity: Velocity,
    pub hue: Hue,
    pub range: SpawnRange,
    pub resets: u32,
}

/// A live sprite bound to its rendered element.
#[derive(Debug)]
pub struct Sprite<E> {
    x: f64,
    y: f64,
    velocity: Velocity,
    glyph: &'static str,
    hue: Hue,
    range: SpawnRange,
    resets: u32,
    element: E,
}

impl<E: RenderableSprite> Sprite<E> {
    /// Place a new sprite in `range` and style its element.
    ///
    /// The element starts fully transparent; it is revealed and positioned by
    /// the first [`Sprite::update`], so it never shows at an unset position.
    pub(crate) fn spawn<R: Rng + ?Sized>(
        glyph: &'static str,
        range: SpawnRange,
        mut element: E,
        rng: &mut R,
    ) -> Self {
        let x = range.sample_x(rng);
        let y = sample_y(rng);
        let velocity = Velocity::random(rng);
        let hue = Hue::random(rng);

        element.set_opacity(0.0);
        element.set_font_size(FONT_SIZE_PX);
        element.set_color(hue);

        Self { x, y, velocity, glyph, hue, range, resets: 0, element }
    }

    /// Advance one frame, wrapping back to the spawn band once past the
    /// threshold.
    pub(crate) fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.y > WRAP_THRESHOLD_Y {
            self.y = sample_y(rng);
            self.x = self.range.sample_x(rng);
            self.resets += 1;
        }
        self.x += self.velocity.x;
        self.y += self.velocity.y;

        self.element.set_opacity(1.0);
        self.element.set_position(self.x, self.y);
    }
}

impl<E> Sprite<E> {
    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn glyph(&self) -> &'static str {
        self.glyph
    }

    pub fn hue(&self) -> Hue {
        self.hue
    }

    pub fn range(&self) -> SpawnRange {
        self.range
    }

    /// How many times the sprite has wrapped back to the top.
    pub fn resets(&self) -> u32 {
        self.resets
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn snapshot(&self) -> SpriteSnapshot {
        SpriteSnapshot {
            glyph: self.glyph,
            x: self.x,
            y: self.y,
            velocity: self.velocity,
            hue: self.hue,
            range: self.range,
            resets: self.resets,
        }
    }
}
