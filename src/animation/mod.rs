//! Falling-emoji page decoration.
//!
//! 112 emoji sprites are released in 14 waves of 8, one wave every 150 ms.
//! Each falls at a fixed velocity and, once it drops below 800 px, jumps
//! back to the top of its spawn band. Nothing is ever removed, so the effect
//! reads as continuous rain rather than a one-off burst.
//!
//! # Architecture
//!
//! 1. [`Animation::start`] builds the schedule of pending sprites
//! 2. The host calls [`Animation::advance`] once per display frame with the
//!    milliseconds elapsed since start
//! 3. Each call moves every live sprite, then creates the pending sprites
//!    whose delay has passed
//! 4. [`Animation::stop`] ends the loop; elements stay where they are
//!
//! Drawing goes through [`SpriteSurface`] / [`RenderableSprite`], so the
//! same code runs in the browser (`wasm` feature) and headless.
//!
//! # Example
//!
//! ```
//! use emojirain::animation::{Animation, HeadlessSurface, SPRITE_COUNT};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut animation = Animation::start(HeadlessSurface::new(), StdRng::seed_from_u64(1));
//! assert_eq!(animation.pending_count(), SPRITE_COUNT);
//!
//! for frame in 0..240 {
//!     animation.advance(frame as f64 * 1000.0 / 60.0);
//! }
//! assert_eq!(animation.active_count(), SPRITE_COUNT);
//! ```

mod sprite;
mod surface;

use std::collections::VecDeque;

use rand::rngs::ThreadRng;
use rand::Rng;

use crate::emoji;

pub use sprite::{SpawnRange, Sprite, SpriteSnapshot, Velocity};
pub use surface::{translate3d, HeadlessSprite, HeadlessSurface, RenderableSprite, SpriteSurface};

/// Id of the page element sprites are appended to.
pub const CONTAINER_ID: &str = "animate";

/// Spawn bands, one sprite per band per wave.
pub const SPAWN_RANGES: [SpawnRange; 8] = [
    SpawnRange::new(10.0, 300.0),
    SpawnRange::new(10.0, -300.0),
    SpawnRange::new(-190.0, -300.0),
    SpawnRange::new(210.0, 300.0),
    SpawnRange::new(-390.0, -300.0),
    SpawnRange::new(410.0, 300.0),
    SpawnRange::new(-590.0, -300.0),
    SpawnRange::new(610.0, 300.0),
];

pub const WAVES: usize = 14;
pub const WAVE_INTERVAL_MS: f64 = 150.0;
pub const SPRITE_COUNT: usize = WAVES * SPAWN_RANGES.len();

pub const SPAWN_Y: f64 = 80.0;
pub const SPAWN_Y_JITTER: f64 = 4.0;
pub const FONT_SIZE_PX: u32 = 26;

/// Sprites below this height wrap back to the top. Fixed, not tied to the
/// viewport height.
pub const WRAP_THRESHOLD_Y: f64 = 800.0;

/// A sprite waiting for its creation time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingSprite {
    /// Milliseconds after start at which the sprite is created
    pub delay_ms: f64,
    pub range: SpawnRange,
    pub glyph: &'static str,
}

/// Build the creation schedule, ordered by delay.
///
/// Glyphs are chosen here; position, velocity and colour are drawn when the
/// sprite is created.
fn schedule<R: Rng + ?Sized>(rng: &mut R) -> VecDeque<PendingSprite> {
    let mut pending = VecDeque::with_capacity(SPRITE_COUNT);
    for wave in 0..WAVES {
        let delay_ms = wave as f64 * WAVE_INTERVAL_MS;
        for range in SPAWN_RANGES {
            pending.push_back(PendingSprite { delay_ms, range, glyph: emoji::random_glyph(rng) });
        }
    }
    pending
}

/// A running emoji rain.
pub struct Animation<S: SpriteSurface, R: Rng = ThreadRng> {
    surface: S,
    rng: R,
    pending: VecDeque<PendingSprite>,
    sprites: Vec<Sprite<S::Sprite>>,
    scheduled: usize,
    frames: u64,
    stopped: bool,
}

impl<S: SpriteSurface> Animation<S, ThreadRng> {
    /// Start with the thread-local random generator.
    pub fn start_with_thread_rng(surface: S) -> Self {
        Self::start(surface, rand::thread_rng())
    }
}

impl<S: SpriteSurface, R: Rng> Animation<S, R> {
    /// Schedule all sprites. Nothing is drawn until the first
    /// [`advance`](Self::advance).
    pub fn start(surface: S, mut rng: R) -> Self {
        if !surface.is_attached() {
            log::debug!("no #{} container, sprites will not be visible", CONTAINER_ID);
        }

        let pending = schedule(&mut rng);
        let scheduled = pending.len();
        log::debug!(
            "scheduled {} sprites over {} ms",
            scheduled,
            (WAVES - 1) as f64 * WAVE_INTERVAL_MS
        );

        Self {
            surface,
            rng,
            pending,
            sprites: Vec::with_capacity(scheduled),
            scheduled,
            frames: 0,
            stopped: false,
        }
    }

    /// Run one frame at `elapsed_ms` since start.
    ///
    /// Live sprites move first; sprites created in this frame stay hidden
    /// until the next one. Does nothing once stopped.
    pub fn advance(&mut self, elapsed_ms: f64) {
        if self.stopped {
            return;
        }

        for sprite in &mut self.sprites {
            sprite.update(&mut self.rng);
        }

        while let Some(next) = self.pending.front().copied() {
            if next.delay_ms > elapsed_ms {
                break;
            }
            self.pending.pop_front();

            let element = self.surface.create_sprite(next.glyph);
            let sprite = Sprite::spawn(next.glyph, next.range, element, &mut self.rng);
            log::debug!(
                "created {} at ({:.1}, {:.1}), {} of {}",
                sprite.glyph(),
                sprite.x(),
                sprite.y(),
                self.sprites.len() + 1,
                self.scheduled
            );
            self.sprites.push(sprite);
        }

        self.frames += 1;
        log::trace!("frame {}: {} active, {} pending", self.frames, self.sprites.len(), self.pending.len());
    }

    /// Stop the animation. Later [`advance`](Self::advance) calls are no-ops.
    pub fn stop(&mut self) {
        if !self.stopped {
            log::info!(
                "animation stopped after {} frames with {} sprites",
                self.frames,
                self.sprites.len()
            );
            self.stopped = true;
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn sprites(&self) -> &[Sprite<S::Sprite>] {
        &self.sprites
    }

    /// Sprites not yet created, in creation order.
    pub fn pending(&self) -> impl Iterator<Item = &PendingSprite> {
        self.pending.iter()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn active_count(&self) -> usize {
        self.sprites.len()
    }

    /// Creation events scheduled by [`start`](Self::start).
    pub fn scheduled_total(&self) -> usize {
        self.scheduled
    }

    /// Frames run so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn snapshot(&self) -> Vec<SpriteSnapshot> {
        self.sprites.iter().map(Sprite::snapshot).collect()
    }
}
