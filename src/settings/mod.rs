//! The engine-facing settings document: wire types and the pure builder.

/// Builder: `ProjectState -> SettingsDocument`.
pub mod build;
/// Wire types (serde field names are the engine contract).
pub mod document;
