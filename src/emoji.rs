//! Emoji palette for falling sprites
//!
//! A fixed set of 30 glyphs. Some entries are multi-codepoint sequences
//! (`❤️‍🔥` is heart + variation selector + ZWJ + fire), so glyphs are kept as
//! `&str` rather than `char`.

use rand::Rng;

/// Glyphs a sprite can be drawn with.
pub const PALETTE: [&str; 30] = [
    "🌽", "🍇", "🍌", "🍒", "🍕", "🍷", "🍭", "💖", "💩", "🐷", "🐸", "🐳", "🎃", "🎾", "🌈",
    "🍦", "💁", "🔥", "😁", "😱", "🌴", "👏", "💃", "🤘", "❤️‍🔥", "🥳", "🎉", "🎡", "😇", "🤯",
];

/// Pick a glyph uniformly from [`PALETTE`].
///
/// # Examples
///
/// ```
/// use emojirain::emoji::{random_glyph, PALETTE};
///
/// let glyph = random_glyph(&mut rand::thread_rng());
/// assert!(PALETTE.contains(&glyph));
/// ```
pub fn random_glyph<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    PALETTE[rng.gen_range(0..PALETTE.len())]
}
