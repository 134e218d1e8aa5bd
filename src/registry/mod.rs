//! Resource registries for opaque byte assets.

/// Font resource registry (built-in families plus user uploads).
pub mod fonts;
