use serde::{Deserialize, Serialize};

use crate::foundation::color::Rgba8;
use crate::foundation::error::{CapletError, CapletResult};

/// Stable character identifier.
///
/// Assigned exactly once, at creation, by the [`CharacterStore`](crate::CharacterStore)
/// allocator; never reused or renumbered. List position is presentation order
/// only and carries no identity. Serialized as a bare integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(u64);

impl CharacterId {
    /// Construct a [`CharacterId`] from a raw 64-bit value.
    pub fn from_u64(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw 64-bit value of this id.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A named speaking entity with its own font/color/stroke styling, referenced
/// in text via a `[Name]` tag.
///
/// Serde spelling is camelCase: this is the shape stored in the archive's
/// `settings.json` metadata entry (ids included, so re-import keeps identity).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    /// Stable identity, independent of list position.
    pub id: CharacterId,
    /// Display name; non-empty, free of `[` and `]` so it stays referenceable.
    pub name: String,
    /// Key into the [`FontRegistry`](crate::FontRegistry).
    pub font_path: String,
    /// Relative font scale (not pixels); strictly positive.
    pub font_height: f64,
    /// Stroke width; non-negative.
    pub stroke_width: f64,
    /// Fill color.
    pub font_color: Rgba8,
    /// Stroke color.
    pub stroke_color: Rgba8,
}

/// Tolerant-reader form of [`Character`] for externally supplied lists
/// (archive import): the id is optional and styling fields fall back to the
/// editor defaults. Fed through
/// [`CharacterStore::ensure_ids`](crate::CharacterStore::ensure_ids) to become
/// [`Character`]s.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDraft {
    /// Identity carried by the source, if any.
    #[serde(default)]
    pub id: Option<CharacterId>,
    /// Display name, restored verbatim.
    #[serde(default)]
    pub name: String,
    /// Font registry key, restored verbatim (repaired later by `reconcile`).
    #[serde(default)]
    pub font_path: String,
    /// Relative font scale.
    #[serde(default = "default_font_height")]
    pub font_height: f64,
    /// Stroke width.
    #[serde(default)]
    pub stroke_width: f64,
    /// Fill color.
    #[serde(default = "default_font_color")]
    pub font_color: Rgba8,
    /// Stroke color.
    #[serde(default = "default_stroke_color")]
    pub stroke_color: Rgba8,
}

impl From<Character> for CharacterDraft {
    fn from(c: Character) -> Self {
        Self {
            id: Some(c.id),
            name: c.name,
            font_path: c.font_path,
            font_height: c.font_height,
            stroke_width: c.stroke_width,
            font_color: c.font_color,
            stroke_color: c.stroke_color,
        }
    }
}

/// Default relative font height for new characters.
pub(crate) fn default_font_height() -> f64 {
    1.0
}

/// Default fill color for new characters.
pub(crate) fn default_font_color() -> Rgba8 {
    Rgba8::BLACK
}

/// Default stroke color for new characters.
pub(crate) fn default_stroke_color() -> Rgba8 {
    Rgba8::WHITE
}

/// Partial field update applied by
/// [`CharacterStore::update`](crate::CharacterStore::update). `None` fields are
/// left untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CharacterPatch {
    /// New display name.
    pub name: Option<String>,
    /// New font registry key.
    pub font_path: Option<String>,
    /// New relative font scale.
    pub font_height: Option<f64>,
    /// New stroke width.
    pub stroke_width: Option<f64>,
    /// New fill color.
    pub font_color: Option<Rgba8>,
    /// New stroke color.
    pub stroke_color: Option<Rgba8>,
}

/// Vertical placement of the caption text box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextPosition {
    /// Text box above the image.
    #[default]
    Top,
    /// Text box below the image.
    Bottom,
}

/// Horizontal alignment of caption text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlignment {
    /// Left-aligned.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Right-aligned.
    Right,
}

/// Vertical placement of the credits lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditsPosition {
    /// Credits above the image.
    Top,
    /// Credits below the image.
    #[default]
    Bottom,
}

/// Background image: the original filename plus its raw bytes. The bytes are
/// opaque to caplet (no decoding happens here).
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectImage {
    /// Original filename (used for scratch exchange and the archive entry).
    pub name: String,
    /// Raw image bytes.
    pub bytes: Vec<u8>,
}

/// Aggregate root for one project.
///
/// Every `[Name]` tag in `text_content` SHOULD reference an existing character
/// name, but unresolved tags are tolerated here; resolution is the rendering
/// engine's responsibility (see [`crate::project::tags`]).
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectState {
    /// Project name; drives output naming, must be non-empty to build/export.
    pub project_name: String,
    /// Ordered character list (order is presentation order, not identity).
    pub characters: Vec<Character>,
    /// Free text with inline `[Name]` tags.
    pub text_content: String,
    /// Caption text box placement.
    pub text_position: TextPosition,
    /// Caption text alignment.
    pub text_alignment: TextAlignment,
    /// Credits lines.
    pub credits: Vec<String>,
    /// Credits placement.
    pub credits_position: CreditsPosition,
    /// Caption background color.
    pub background_color: Rgba8,
    /// Background image, if one has been supplied.
    pub image: Option<ProjectImage>,
}

impl Default for ProjectState {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            characters: Vec::new(),
            text_content: String::new(),
            text_position: TextPosition::default(),
            text_alignment: TextAlignment::default(),
            credits: Vec::new(),
            credits_position: CreditsPosition::default(),
            background_color: Rgba8::WHITE,
            image: None,
        }
    }
}

impl ProjectState {
    /// Construct an empty project with the given name.
    pub fn named(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            ..Self::default()
        }
    }
}

/// Validate a character name: non-empty after trimming, free of the reserved
/// tag delimiters `[` and `]`.
pub fn validate_name(name: &str) -> CapletResult<()> {
    if name.trim().is_empty() {
        return Err(CapletError::validation("character name must not be empty"));
    }
    if name.contains(['[', ']']) {
        return Err(CapletError::validation(
            "character name must not contain '[' or ']'",
        ));
    }
    Ok(())
}

/// Validate a relative font height (strictly positive, finite).
pub fn validate_font_height(height: f64) -> CapletResult<()> {
    if !height.is_finite() || height <= 0.0 {
        return Err(CapletError::validation(
            "font height must be a positive number",
        ));
    }
    Ok(())
}

/// Validate a stroke width (non-negative, finite).
pub fn validate_stroke_width(width: f64) -> CapletResult<()> {
    if !width.is_finite() || width < 0.0 {
        return Err(CapletError::validation(
            "stroke width must be a non-negative number",
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/project/model.rs"]
mod tests;
