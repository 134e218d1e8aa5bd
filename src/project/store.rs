use crate::foundation::error::CapletResult;
use crate::project::model::{
    Character, CharacterDraft, CharacterId, CharacterPatch, default_font_color,
    default_stroke_color, validate_font_height, validate_name, validate_stroke_width,
};
use crate::registry::fonts::FontRegistry;

/// A transient UI resource scoped to a character's lifetime (color-picker
/// widgets, confirmation modals, previews).
///
/// The store guarantees `release` is called exactly once: on `remove(id)`, on
/// wholesale list replacement (`ensure_ids`), or on store drop (editor
/// teardown), whichever comes first.
pub trait ScopedResource {
    /// Tear the resource down. Called exactly once.
    fn release(&mut self);
}

/// Change notification emitted by store mutations.
///
/// Consumers drain the queue synchronously once via
/// [`CharacterStore::take_events`]; there is no debounce or deferred delivery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreEvent {
    /// A character was appended.
    Added(CharacterId),
    /// A character's fields changed.
    Updated(CharacterId),
    /// A character was deleted.
    Removed(CharacterId),
    /// The whole list was replaced (e.g. archive import).
    Reloaded,
}

/// Policy object over a character list it does not own (the list lives in
/// [`ProjectState`](crate::ProjectState)).
///
/// Owns the id allocator, the change-notification queue, and the
/// scoped-resource ledger. Ids come from a monotonic counter, so uniqueness
/// holds under rapid successive `add` calls and ids are never reused after
/// deletions.
pub struct CharacterStore {
    next_id: u64,
    events: Vec<StoreEvent>,
    scoped: Vec<(CharacterId, Box<dyn ScopedResource>)>,
}

impl Default for CharacterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterStore {
    /// Construct a store with a fresh id allocator.
    pub fn new() -> Self {
        Self {
            next_id: 1,
            events: Vec::new(),
            scoped: Vec::new(),
        }
    }

    fn alloc_id(&mut self) -> CharacterId {
        let id = CharacterId::from_u64(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a new character with editor defaults: name `Character{N}` where
    /// N = current count + 1, font = first available registry resource,
    /// height 1.0, stroke 0.0, black fill, white stroke.
    pub fn add(&mut self, characters: &mut Vec<Character>, registry: &FontRegistry) -> CharacterId {
        let id = self.alloc_id();
        let character = Character {
            id,
            name: format!("Character{}", characters.len() + 1),
            font_path: registry.first_path().unwrap_or_default(),
            font_height: 1.0,
            stroke_width: 0.0,
            font_color: default_font_color(),
            stroke_color: default_stroke_color(),
        };
        characters.push(character);
        self.events.push(StoreEvent::Added(id));
        id
    }

    /// Apply a partial field update to the character with the given id.
    ///
    /// Returns `Ok(false)` (a no-op) when the id is unknown, so a deleted
    /// character can never be resurrected by a late edit. Patch values are
    /// validated before anything is written; an invalid patch leaves the
    /// character untouched.
    pub fn update(
        &mut self,
        characters: &mut [Character],
        id: CharacterId,
        patch: CharacterPatch,
    ) -> CapletResult<bool> {
        let Some(character) = characters.iter_mut().find(|c| c.id == id) else {
            return Ok(false);
        };

        if let Some(name) = &patch.name {
            validate_name(name)?;
        }
        if let Some(height) = patch.font_height {
            validate_font_height(height)?;
        }
        if let Some(width) = patch.stroke_width {
            validate_stroke_width(width)?;
        }

        if let Some(name) = patch.name {
            character.name = name;
        }
        if let Some(font_path) = patch.font_path {
            character.font_path = font_path;
        }
        if let Some(height) = patch.font_height {
            character.font_height = height;
        }
        if let Some(width) = patch.stroke_width {
            character.stroke_width = width;
        }
        if let Some(color) = patch.font_color {
            character.font_color = color;
        }
        if let Some(color) = patch.stroke_color {
            character.stroke_color = color;
        }

        self.events.push(StoreEvent::Updated(id));
        Ok(true)
    }

    /// Delete the character with the given id, releasing every scoped resource
    /// bound to it. Returns `false` when the id is unknown. Removing the last
    /// remaining character is allowed; callers needing a non-empty list
    /// enforce that separately.
    pub fn remove(&mut self, characters: &mut Vec<Character>, id: CharacterId) -> bool {
        let Some(index) = characters.iter().position(|c| c.id == id) else {
            return false;
        };
        characters.remove(index);
        self.release_for(Some(id));
        self.events.push(StoreEvent::Removed(id));
        true
    }

    /// Turn an externally supplied draft list into characters, backfilling
    /// missing ids with fresh unique ones.
    ///
    /// Existing ids are kept verbatim and the allocator advances past the
    /// maximum id seen, so imported ids can never collide with later [`add`]
    /// calls. Idempotent on drafts that already carry ids. This is a wholesale
    /// list replacement: all scoped resources are released and a
    /// [`StoreEvent::Reloaded`] is queued.
    ///
    /// [`add`]: CharacterStore::add
    pub fn ensure_ids(&mut self, drafts: Vec<CharacterDraft>) -> Vec<Character> {
        let max_seen = drafts
            .iter()
            .filter_map(|d| d.id)
            .map(CharacterId::as_u64)
            .max()
            .unwrap_or(0);
        self.next_id = self.next_id.max(max_seen + 1);

        let characters = drafts
            .into_iter()
            .map(|draft| Character {
                id: draft.id.unwrap_or_else(|| self.alloc_id()),
                name: draft.name,
                font_path: draft.font_path,
                font_height: draft.font_height,
                stroke_width: draft.stroke_width,
                font_color: draft.font_color,
                stroke_color: draft.stroke_color,
            })
            .collect();

        self.release_for(None);
        self.events.push(StoreEvent::Reloaded);
        characters
    }

    /// Bind a scoped UI resource to a character's lifetime.
    pub fn attach(&mut self, id: CharacterId, resource: Box<dyn ScopedResource>) {
        self.scoped.push((id, resource));
    }

    /// Drain the pending change notifications. Each mutation is reported once;
    /// a second call with no intervening mutation returns an empty vec.
    pub fn take_events(&mut self) -> Vec<StoreEvent> {
        std::mem::take(&mut self.events)
    }

    /// Release scoped resources bound to `id`, or all of them when `None`.
    fn release_for(&mut self, id: Option<CharacterId>) {
        let mut kept = Vec::with_capacity(self.scoped.len());
        for (owner, mut resource) in self.scoped.drain(..) {
            if id.is_none() || id == Some(owner) {
                resource.release();
            } else {
                kept.push((owner, resource));
            }
        }
        self.scoped = kept;
    }
}

impl Drop for CharacterStore {
    fn drop(&mut self) {
        // Editor teardown: anything still attached is released here.
        self.release_for(None);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/project/store.rs"]
mod tests;
