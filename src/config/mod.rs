//! Configuration for the emojirain CLI
//!
//! Provides types and parsing for the optional `emojirain.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
