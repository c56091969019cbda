//! emojirain - URL-safe state tokens and a falling-emoji page decoration
//!
//! This library provides:
//! - [`codec`]: encode any JSON-serializable value into a compact token that
//!   can sit in a URL without percent-encoding, and decode it back. Tokens
//!   are interchangeable with the JavaScript `lz-string` package
//! - [`animation`]: 112 emoji sprites raining down a page, drawn through a
//!   pluggable surface so it runs headless as well as in the browser
//! - `wasm` (feature `wasm`): browser bindings for all of the above

pub mod animation;
pub mod cli;
pub mod codec;
pub mod color;
pub mod config;
pub mod emoji;

#[cfg(feature = "wasm")]
pub mod wasm;
