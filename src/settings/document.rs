//! Engine wire types.
//!
//! Serde field names here are the wire contract with the external rendering
//! engine; renaming one breaks the engine's spec parser. The document carries
//! values only, never identifiers, and is regenerated fresh for every render.

use serde::{Deserialize, Serialize};

use crate::project::model::{CreditsPosition, TextAlignment, TextPosition};

/// Image section of a render request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageSection {
    /// Background image filename inside the scratch exchange directory.
    pub art: String,
    /// Caption background color, always 6-digit `#rrggbb`.
    pub bg_color: String,
}

/// Text section of a render request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextSection {
    /// Name of the text file inside the scratch exchange directory.
    pub text: String,
    /// Caption box placement.
    pub text_box_pos: TextPosition,
    /// Caption alignment.
    pub alignment: TextAlignment,
    /// Credits placement.
    pub credits_pos: CreditsPosition,
    /// Credits lines.
    pub credits: Vec<String>,
}

/// Output section of a render request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutputSection {
    /// Output file stem, derived from the project name.
    pub base_filename: String,
    /// Directory (relative to the scratch namespace) the engine writes into.
    pub output_directory: String,
    /// Requested output kinds.
    pub outputs: Vec<String>,
}

/// One character, projected to plain values: resolved font path, float
/// numerics, hex color strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CharacterSection {
    /// Display name the engine matches `[Name]` tags against.
    pub name: String,
    /// Fill color (`#rrggbb`, or `#rrggbbaa` when not opaque).
    pub color: String,
    /// Resolved font path.
    pub font: String,
    /// Relative font scale.
    pub relative_height: f64,
    /// Stroke width.
    pub stroke_width: f64,
    /// Stroke color (`#rrggbb`, or `#rrggbbaa` when not opaque).
    pub stroke_color: String,
}

/// The value-only description of one render request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SettingsDocument {
    /// Image section.
    pub image: ImageSection,
    /// Text section.
    pub text: TextSection,
    /// Output section.
    pub output: OutputSection,
    /// Character sections in presentation order.
    pub characters: Vec<CharacterSection>,
}
