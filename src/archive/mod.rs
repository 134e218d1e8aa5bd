//! Portable project archives.

/// Zip export/import of a whole project.
pub mod codec;
