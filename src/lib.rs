//! caplet is the project core of a multi-character captioned-image composer.
//!
//! A project is a background image, free text carrying inline `[Name]` tags, and
//! an ordered list of styled characters those tags refer to. caplet owns the
//! project state model, its projection into the settings document an external
//! rendering engine consumes, and a portable zip archive of the whole project.
//!
//! # Pipeline overview
//!
//! 1. **Edit**: mutate [`ProjectState`] through [`CharacterStore`] / [`FontRegistry`]
//! 2. **Build**: `ProjectState -> SettingsDocument` (pure, deterministic)
//! 3. **Render**: [`RenderInvoker`] exchanges files with an injected [`RenderEngine`]
//! 4. **Archive** (orthogonal): [`export_archive`] / [`import_archive`] snapshot and
//!    restore the same state losslessly
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: building a settings document is a pure function
//!   of the project state.
//! - **Engine as capability**: compositing, text layout, and rasterization live in
//!   the external engine, injected as a [`RenderEngine`] trait object.
//! - **Commit-or-nothing**: no operation partially mutates project state on failure.
#![forbid(unsafe_code)]

pub mod archive;
pub mod foundation;
pub mod project;
pub mod registry;
pub mod render;
pub mod session;
pub mod settings;

pub use archive::codec::{ArchiveContents, export_archive, import_archive};
pub use foundation::color::Rgba8;
pub use foundation::error::{CapletError, CapletResult};
pub use project::model::{
    Character, CharacterDraft, CharacterId, CharacterPatch, CreditsPosition, ProjectImage,
    ProjectState, TextAlignment, TextPosition,
};
pub use project::store::{CharacterStore, ScopedResource, StoreEvent};
pub use project::tags::{referenced_names, tag, unresolved_tags};
pub use registry::fonts::{FontOrigin, FontRegistry, FontResource};
pub use render::engine::{EngineRequest, RenderEngine, RenderOutcome, ScriptedEngine};
pub use render::invoke::{DEFAULT_SUCCESS_MARKER, RenderInvoker};
pub use render::process::ProcessEngine;
pub use session::project_session::ProjectSession;
pub use settings::build::build as build_settings;
pub use settings::document::{
    CharacterSection, ImageSection, OutputSection, SettingsDocument, TextSection,
};
