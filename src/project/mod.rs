//! Project state: the character/text/image data model, the character store
//! policy object, and the inline `[Name]` tag helpers.

/// Project data model (characters, layout enums, aggregate state).
pub mod model;
/// Character list policy: ids, patches, events, scoped resources.
pub mod store;
/// Inline `[Name]` tag helpers.
pub mod tags;
