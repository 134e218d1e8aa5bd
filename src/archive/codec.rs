//! Zip codec for the portable project archive.
//!
//! Entries of one archive: `image/<original filename>` (raw image bytes),
//! `text.txt` (raw text content), `settings.json` (project-level metadata,
//! camelCase, character list with ids), and `fonts/<filename>` per custom
//! font. This metadata shape is project-level; it is distinct from the
//! engine-facing [`SettingsDocument`](crate::SettingsDocument).
//!
//! Round-trip contract: `import(export(S, R))` reproduces every `ProjectState`
//! field of `S` (character order and ids included) and the custom resource set
//! `R` by path, name, origin, and bytes.

use std::io::{Cursor, Read, Write};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::foundation::color::Rgba8;
use crate::foundation::error::{CapletError, CapletResult};
use crate::project::model::{
    Character, CharacterDraft, CreditsPosition, ProjectImage, ProjectState, TextAlignment,
    TextPosition,
};
use crate::registry::fonts::{CUSTOM_PREFIX, FontRegistry};

/// Prefix of the image entry (the filename part varies per project).
pub const IMAGE_DIR: &str = "image/";
/// Name of the raw text entry.
pub const TEXT_ENTRY: &str = "text.txt";
/// Name of the project metadata entry.
pub const SETTINGS_ENTRY: &str = "settings.json";
/// Prefix of the custom font entries.
pub const FONTS_DIR: &str = "fonts/";

/// Everything recovered from one archive, fully constructed but uncommitted.
///
/// The caller commits these parts to live state in one step (or not at all),
/// which keeps import atomic: drafts go through
/// [`CharacterStore::ensure_ids`](crate::CharacterStore::ensure_ids), fonts
/// back through [`FontRegistry::register`](crate::FontRegistry::register).
#[derive(Clone, Debug, PartialEq)]
pub struct ArchiveContents {
    /// Project name from the metadata entry.
    pub project_name: String,
    /// Background image (filename from the `image/` entry, bytes verbatim).
    pub image: ProjectImage,
    /// Caption background color.
    pub background_color: Rgba8,
    /// Raw text content (empty when the archive has no `text.txt`).
    pub text_content: String,
    /// Caption box placement.
    pub text_position: TextPosition,
    /// Caption alignment.
    pub text_alignment: TextAlignment,
    /// Credits lines, restored verbatim.
    pub credits: Vec<String>,
    /// Credits placement.
    pub credits_position: CreditsPosition,
    /// Character list as archived (ids kept where present).
    pub characters: Vec<CharacterDraft>,
    /// Custom fonts as `(filename, bytes)` in archive order.
    pub fonts: Vec<(String, Vec<u8>)>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MetaOut<'a> {
    project_name: &'a str,
    image: ImageMetaOut<'a>,
    text: TextMeta,
    characters: &'a [Character],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageMetaOut<'a> {
    name: &'a str,
    background_color: Rgba8,
}

#[derive(Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct TextMeta {
    position: TextPosition,
    alignment: TextAlignment,
    credits_position: CreditsPosition,
    credits: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetaIn {
    project_name: String,
    #[serde(default)]
    image: ImageMetaIn,
    #[serde(default)]
    text: TextMeta,
    #[serde(default)]
    characters: Vec<CharacterDraft>,
}

// The written `name` key is ignored on read; the filename of record is the
// `image/` entry path.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ImageMetaIn {
    background_color: Rgba8,
}

impl Default for ImageMetaIn {
    fn default() -> Self {
        Self {
            background_color: Rgba8::WHITE,
        }
    }
}

/// Serialize a full project into archive bytes.
///
/// Fails with [`CapletError::ExportPrecondition`] when no image or no project
/// name is present. Every registered custom font is packed (a superset of
/// "referenced by a character"), so the round-trip is lossless for the whole
/// resource set. Read-only with respect to the inputs.
#[tracing::instrument(skip_all, fields(project = %state.project_name))]
pub fn export_archive(state: &ProjectState, registry: &FontRegistry) -> CapletResult<Vec<u8>> {
    if state.project_name.trim().is_empty() {
        return Err(CapletError::export_precondition(
            "project name must not be empty",
        ));
    }
    let Some(image) = state.image.as_ref() else {
        return Err(CapletError::export_precondition(
            "a background image is required before exporting",
        ));
    };

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    writer
        .start_file(format!("{IMAGE_DIR}{}", image.name), options)
        .context("failed to start archive image entry")?;
    writer
        .write_all(&image.bytes)
        .context("failed to write archive image entry")?;

    writer
        .start_file(TEXT_ENTRY, options)
        .context("failed to start archive text entry")?;
    writer
        .write_all(state.text_content.as_bytes())
        .context("failed to write archive text entry")?;

    let meta = MetaOut {
        project_name: state.project_name.trim(),
        image: ImageMetaOut {
            name: &image.name,
            background_color: state.background_color,
        },
        text: TextMeta {
            position: state.text_position,
            alignment: state.text_alignment,
            credits_position: state.credits_position,
            credits: state.credits.clone(),
        },
        characters: &state.characters,
    };
    let meta_json =
        serde_json::to_vec_pretty(&meta).context("failed to encode project metadata")?;
    writer
        .start_file(SETTINGS_ENTRY, options)
        .context("failed to start archive metadata entry")?;
    writer
        .write_all(&meta_json)
        .context("failed to write archive metadata entry")?;

    for (resource, bytes) in registry.custom_fonts() {
        let filename = resource
            .path
            .strip_prefix(CUSTOM_PREFIX)
            .unwrap_or(&resource.path);
        writer
            .start_file(format!("{FONTS_DIR}{filename}"), options)
            .with_context(|| format!("failed to start archive font entry '{filename}'"))?;
        writer
            .write_all(bytes)
            .with_context(|| format!("failed to write archive font entry '{filename}'"))?;
    }

    let cursor = writer.finish().context("failed to finish archive")?;
    Ok(cursor.into_inner())
}

/// Deserialize archive bytes back into uncommitted project parts.
///
/// Fails with [`CapletError::ArchiveFormat`] when the container or its
/// `settings.json` entry is absent or unparsable, and with
/// [`CapletError::MissingAsset`] when no `image/` entry exists. The image
/// entry is located by prefix, never by exact name, since the filename varies.
/// A missing `text.txt` is tolerated as empty text.
#[tracing::instrument(skip_all)]
pub fn import_archive(bytes: &[u8]) -> CapletResult<ArchiveContents> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| CapletError::archive_format(format!("not a readable project archive: {e}")))?;

    let meta: MetaIn = {
        let mut entry = archive.by_name(SETTINGS_ENTRY).map_err(|_| {
            CapletError::archive_format(format!("archive has no {SETTINGS_ENTRY} entry"))
        })?;
        let mut json = String::new();
        entry.read_to_string(&mut json).map_err(|e| {
            CapletError::archive_format(format!("failed to read {SETTINGS_ENTRY}: {e}"))
        })?;
        serde_json::from_str(&json).map_err(|e| {
            CapletError::archive_format(format!("failed to parse {SETTINGS_ENTRY}: {e}"))
        })?
    };

    let entry_names: Vec<String> = archive.file_names().map(str::to_owned).collect();

    let image_entry = entry_names
        .iter()
        .find(|name| {
            name.strip_prefix(IMAGE_DIR)
                .is_some_and(|rest| !rest.is_empty() && !rest.ends_with('/'))
        })
        .ok_or_else(|| CapletError::missing_asset("archive has no image entry"))?
        .clone();
    let image_name = image_entry[IMAGE_DIR.len()..].to_owned();
    let image_bytes = read_entry(&mut archive, &image_entry)?;

    let text_content = match archive.by_name(TEXT_ENTRY) {
        Ok(mut entry) => {
            let mut text = String::new();
            entry.read_to_string(&mut text).map_err(|e| {
                CapletError::archive_format(format!("failed to read {TEXT_ENTRY}: {e}"))
            })?;
            text
        }
        Err(_) => String::new(),
    };

    let mut fonts = Vec::new();
    for name in &entry_names {
        let Some(filename) = name.strip_prefix(FONTS_DIR) else {
            continue;
        };
        if filename.is_empty() || filename.ends_with('/') {
            continue;
        }
        fonts.push((filename.to_owned(), read_entry(&mut archive, name)?));
    }

    Ok(ArchiveContents {
        project_name: meta.project_name,
        image: ProjectImage {
            name: image_name,
            bytes: image_bytes,
        },
        background_color: meta.image.background_color,
        text_content,
        text_position: meta.text.position,
        text_alignment: meta.text.alignment,
        credits: meta.text.credits,
        credits_position: meta.text.credits_position,
        characters: meta.characters,
        fonts,
    })
}

fn read_entry(archive: &mut ZipArchive<Cursor<&[u8]>>, name: &str) -> CapletResult<Vec<u8>> {
    let mut entry = archive
        .by_name(name)
        .map_err(|e| CapletError::archive_format(format!("failed to open entry '{name}': {e}")))?;
    let mut bytes = Vec::new();
    entry
        .read_to_end(&mut bytes)
        .map_err(|e| CapletError::archive_format(format!("failed to read entry '{name}': {e}")))?;
    Ok(bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/archive/codec.rs"]
mod tests;
