use crate::foundation::error::{CapletError, CapletResult};
use crate::project::model::ProjectState;
use crate::settings::document::{
    CharacterSection, ImageSection, OutputSection, SettingsDocument, TextSection,
};

/// Fixed name of the text file exchanged with the engine.
pub const TEXT_INPUT_FILE: &str = "input.txt";
/// Directory (relative to the scratch namespace) the engine writes outputs into.
pub const OUTPUT_DIRECTORY: &str = "output";
/// The single output kind caplet requests.
pub const CAPTION_OUTPUT: &str = "caption";

/// Project the current state into the engine-facing settings document.
///
/// Pure and deterministic: the state is not mutated and equal states yield
/// structurally equal documents. Text content passes through unchanged; tag
/// resolution is the engine's job. Fails with [`CapletError::Validation`] when
/// the project name is empty (output naming derives from it) or no background
/// image has been supplied.
pub fn build(state: &ProjectState) -> CapletResult<SettingsDocument> {
    let base_filename = state.project_name.trim();
    if base_filename.is_empty() {
        return Err(CapletError::validation("project name must not be empty"));
    }
    let Some(image) = state.image.as_ref() else {
        return Err(CapletError::validation(
            "a background image is required before rendering",
        ));
    };

    let characters = state
        .characters
        .iter()
        .map(|c| CharacterSection {
            name: c.name.clone(),
            color: c.font_color.to_hex(),
            font: c.font_path.clone(),
            relative_height: c.font_height,
            stroke_width: c.stroke_width,
            stroke_color: c.stroke_color.to_hex(),
        })
        .collect();

    Ok(SettingsDocument {
        image: ImageSection {
            art: image.name.clone(),
            bg_color: state.background_color.to_hex_rgb(),
        },
        text: TextSection {
            text: TEXT_INPUT_FILE.to_owned(),
            text_box_pos: state.text_position,
            alignment: state.text_alignment,
            credits_pos: state.credits_position,
            credits: state.credits.clone(),
        },
        output: OutputSection {
            base_filename: base_filename.to_owned(),
            output_directory: OUTPUT_DIRECTORY.to_owned(),
            outputs: vec![CAPTION_OUTPUT.to_owned()],
        },
        characters,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/settings/build.rs"]
mod tests;
