use crate::foundation::error::{CapletError, CapletResult};
use crate::project::model::Character;

/// Namespace prefix for uploaded font paths.
pub const CUSTOM_PREFIX: &str = "custom/";

/// Built-in families shipped with the editor: one face per family, fixed
/// declaration order.
const BUILT_IN_FONTS: &[(&str, &str)] = &[
    ("Noto Sans", "builtin/NotoSans-Regular.ttf"),
    ("Noto Serif", "builtin/NotoSerif-Regular.ttf"),
    ("Noto Emoji", "builtin/NotoEmoji-Regular.ttf"),
];

/// Where a font resource came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontOrigin {
    /// Shipped with the editor.
    BuiltIn,
    /// Uploaded by the user this session (or restored from an archive).
    Uploaded,
}

/// A catalog entry for one font asset. Bytes are opaque; nothing in caplet
/// rasterizes them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontResource {
    /// Display name derived from the filename (or the built-in family name).
    pub name: String,
    /// Unique key across the registry.
    pub path: String,
    /// Built-in or uploaded.
    pub origin: FontOrigin,
}

/// Catalog of available font assets: a fixed built-in table plus uploads
/// stored under `custom/<filename>`.
///
/// Path is the unique key. An upload whose filename collides with a prior
/// upload overwrites that entry in place (last-write-wins, original
/// registration slot kept) rather than erroring.
#[derive(Debug, Default)]
pub struct FontRegistry {
    custom: Vec<(FontResource, Vec<u8>)>,
}

impl FontRegistry {
    /// Construct a registry holding only the built-in table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an uploaded font file.
    ///
    /// Fails with [`CapletError::InvalidResource`] unless the filename is a
    /// plain `.ttf` name (case-insensitive, no path separators). The display
    /// name is the filename minus its extension, with a space inserted before
    /// each internal capital that follows a lowercase letter or digit
    /// (`MyFont-Bold.ttf` becomes `My Font-Bold`).
    pub fn register(&mut self, bytes: Vec<u8>, filename: &str) -> CapletResult<FontResource> {
        let stem = font_file_stem(filename)?;
        let resource = FontResource {
            name: display_name(stem),
            path: format!("{CUSTOM_PREFIX}{filename}"),
            origin: FontOrigin::Uploaded,
        };
        match self.custom.iter_mut().find(|(r, _)| r.path == resource.path) {
            Some(slot) => *slot = (resource.clone(), bytes),
            None => self.custom.push((resource.clone(), bytes)),
        }
        Ok(resource)
    }

    /// Enumerate all resources in stable order: built-ins first, in
    /// declaration order, then uploads in registration order.
    pub fn scan(&self) -> Vec<FontResource> {
        let mut all: Vec<FontResource> = BUILT_IN_FONTS
            .iter()
            .map(|&(name, path)| FontResource {
                name: name.to_owned(),
                path: path.to_owned(),
                origin: FontOrigin::BuiltIn,
            })
            .collect();
        all.extend(self.custom.iter().map(|(r, _)| r.clone()));
        all
    }

    /// Look up a resource by path.
    pub fn get(&self, path: &str) -> Option<FontResource> {
        self.scan().into_iter().find(|r| r.path == path)
    }

    /// Whether a resource exists at `path`.
    pub fn contains(&self, path: &str) -> bool {
        BUILT_IN_FONTS.iter().any(|&(_, p)| p == path)
            || self.custom.iter().any(|(r, _)| r.path == path)
    }

    /// Path of the first resource in scan order (the default for new
    /// characters). `None` only for an empty registry, which cannot happen
    /// while the built-in table is non-empty.
    pub fn first_path(&self) -> Option<String> {
        BUILT_IN_FONTS
            .first()
            .map(|&(_, path)| path.to_owned())
            .or_else(|| self.custom.first().map(|(r, _)| r.path.clone()))
    }

    /// Uploaded resources with their bytes, in registration order.
    pub fn custom_fonts(&self) -> impl Iterator<Item = (&FontResource, &[u8])> {
        self.custom.iter().map(|(r, b)| (r, b.as_slice()))
    }

    /// Bytes of an uploaded font. Built-in faces live outside this registry,
    /// so they resolve to `None`.
    pub fn font_bytes(&self, path: &str) -> Option<&[u8]> {
        self.custom
            .iter()
            .find(|(r, _)| r.path == path)
            .map(|(_, b)| b.as_slice())
    }

    /// Drop all uploaded fonts (archive import builds a fresh set).
    pub fn clear_custom(&mut self) {
        self.custom.clear();
    }

    /// Total resource count (built-ins plus uploads).
    pub fn len(&self) -> usize {
        BUILT_IN_FONTS.len() + self.custom.len()
    }

    /// Whether the registry holds no resources at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Repair pass: every character whose `font_path` no longer resolves is
    /// reassigned the first available resource. Returns the number of
    /// characters repaired. Never leaves a dangling path while at least one
    /// resource exists.
    pub fn reconcile(&self, characters: &mut [Character]) -> usize {
        let Some(fallback) = self.first_path() else {
            return 0;
        };
        let mut repaired = 0;
        for character in characters {
            if !self.contains(&character.font_path) {
                character.font_path = fallback.clone();
                repaired += 1;
            }
        }
        repaired
    }
}

/// Validate an upload filename and return its stem (name minus `.ttf`).
fn font_file_stem(filename: &str) -> CapletResult<&str> {
    if filename.contains(['/', '\\']) {
        return Err(CapletError::invalid_resource(format!(
            "font filename '{filename}' must not contain path separators"
        )));
    }
    if !filename.to_ascii_lowercase().ends_with(".ttf") {
        return Err(CapletError::invalid_resource(format!(
            "font file '{filename}' must have a .ttf extension"
        )));
    }
    let stem = &filename[..filename.len() - 4];
    if stem.is_empty() {
        return Err(CapletError::invalid_resource(
            "font filename must not be empty",
        ));
    }
    Ok(stem)
}

/// `MyFont-Bold` -> `My Font-Bold`: a space before each internal capital that
/// follows a lowercase letter or digit.
fn display_name(stem: &str) -> String {
    let mut out = String::with_capacity(stem.len() + 4);
    let mut prev: Option<char> = None;
    for ch in stem.chars() {
        if ch.is_ascii_uppercase()
            && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit())
        {
            out.push(' ');
        }
        out.push(ch);
        prev = Some(ch);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/registry/fonts.rs"]
mod tests;
