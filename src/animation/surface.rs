//! Rendering capability the animation draws through.
//!
//! The update logic only ever talks to these traits, so the same
//! [`Animation`](super::Animation) runs against the DOM in the browser and
//! against [`HeadlessSurface`] in tests and the CLI.

use crate::color::Hue;

/// One drawable sprite element.
pub trait RenderableSprite {
    /// Move the element to `(x, y)` pixels from the container origin.
    fn set_position(&mut self, x: f64, y: f64);
    /// `0.0` is invisible, `1.0` fully opaque.
    fn set_opacity(&mut self, opacity: f64);
    fn set_color(&mut self, hue: Hue);
    fn set_font_size(&mut self, px: u32);
}

/// Where sprite elements are created.
pub trait SpriteSurface {
    type Sprite: RenderableSprite;

    /// Create an element showing `glyph`.
    ///
    /// Must not fail: a surface with nowhere to draw returns a detached
    /// element instead.
    fn create_sprite(&mut self, glyph: &str) -> Self::Sprite;

    /// Whether created sprites end up somewhere visible.
    fn is_attached(&self) -> bool {
        true
    }
}

/// CSS transform placing an element at `(x, y)`.
///
/// # Examples
///
/// ```
/// use emojirain::animation::translate3d;
///
/// assert_eq!(translate3d(1.5, -2.0), "translate3d(1.5px, -2px, 0px)");
/// ```
pub fn translate3d(x: f64, y: f64) -> String {
    format!("translate3d({}px, {}px, 0px)", x, y)
}

/// In-memory sprite element that records the last state applied to it.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessSprite {
    glyph: String,
    position: Option<(f64, f64)>,
    opacity: f64,
    hue: Option<Hue>,
    font_size_px: Option<u32>,
    moves: u64,
}

impl HeadlessSprite {
    pub fn new(glyph: &str) -> Self {
        Self {
            glyph: glyph.to_string(),
            position: None,
            opacity: 1.0,
            hue: None,
            font_size_px: None,
            moves: 0,
        }
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    /// Last position set, `None` before the first move.
    pub fn position(&self) -> Option<(f64, f64)> {
        self.position
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    pub fn hue(&self) -> Option<Hue> {
        self.hue
    }

    pub fn font_size_px(&self) -> Option<u32> {
        self.font_size_px
    }

    /// Number of `set_position` calls received.
    pub fn moves(&self) -> u64 {
        self.moves
    }

    /// The CSS transform a DOM element would carry.
    pub fn transform(&self) -> Option<String> {
        self.position.map(|(x, y)| translate3d(x, y))
    }
}

impl RenderableSprite for HeadlessSprite {
    fn set_position(&mut self, x: f64, y: f64) {
        self.position = Some((x, y));
        self.moves += 1;
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
    }

    fn set_color(&mut self, hue: Hue) {
        self.hue = Some(hue);
    }

    fn set_font_size(&mut self, px: u32) {
        self.font_size_px = Some(px);
    }
}

/// Surface with no display, optionally pretending its container is missing.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    attached: bool,
    created: usize,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self { attached: true, created: 0 }
    }

    /// A surface whose container could not be found.
    pub fn detached() -> Self {
        Self { attached: false, created: 0 }
    }

    /// Number of sprite elements created so far.
    pub fn created(&self) -> usize {
        self.created
    }
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl SpriteSurface for HeadlessSurface {
    type Sprite = HeadlessSprite;

    fn create_sprite(&mut self, glyph: &str) -> HeadlessSprite {
        self.created += 1;
        HeadlessSprite::new(glyph)
    }

    fn is_attached(&self) -> bool {
        self.attached
    }
}
