//! Shared primitives: error taxonomy and 8-bit RGBA color.

/// RGBA color with the project's canonical hex notation.
pub mod color;
/// Error taxonomy and result alias used across the crate.
pub mod error;
