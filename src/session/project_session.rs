use crate::archive::codec::{export_archive, import_archive};
use crate::foundation::color::Rgba8;
use crate::foundation::error::CapletResult;
use crate::project::model::{
    CharacterId, CharacterPatch, CreditsPosition, ProjectImage, ProjectState, TextAlignment,
    TextPosition,
};
use crate::project::store::{CharacterStore, ScopedResource, StoreEvent};
use crate::registry::fonts::{FontRegistry, FontResource};
use crate::render::engine::{RenderEngine, RenderOutcome};
use crate::render::invoke::RenderInvoker;
use crate::settings::build::build;
use crate::settings::document::SettingsDocument;

/// One editing session over one project.
///
/// Aggregates the project state, the character store, and the font registry,
/// and hosts the operation boundary: each boundary operation (build, export,
/// import, render, font upload) records a single user-facing outcome message
/// retrievable via [`last_outcome`](ProjectSession::last_outcome). No
/// operation partially mutates state on failure; import follows
/// construct-then-commit.
///
/// Exclusive `&mut self` receivers provide the cooperative single-flow
/// scheduling the scratch exchange requires.
pub struct ProjectSession {
    state: ProjectState,
    store: CharacterStore,
    registry: FontRegistry,
    last_outcome: Option<String>,
}

impl ProjectSession {
    /// Start a session with one default character, like a freshly opened
    /// editor.
    pub fn new(project_name: impl Into<String>) -> Self {
        let registry = FontRegistry::new();
        let mut store = CharacterStore::new();
        let mut state = ProjectState::named(project_name);
        store.add(&mut state.characters, &registry);
        Self {
            state,
            store,
            registry,
            last_outcome: None,
        }
    }

    /// Current project state.
    pub fn state(&self) -> &ProjectState {
        &self.state
    }

    /// Current font registry.
    pub fn registry(&self) -> &FontRegistry {
        &self.registry
    }

    /// Outcome message of the most recent boundary operation.
    pub fn last_outcome(&self) -> Option<&str> {
        self.last_outcome.as_deref()
    }

    fn record_err<T>(&mut self, result: CapletResult<T>) -> CapletResult<T> {
        if let Err(e) = &result {
            self.last_outcome = Some(e.to_string());
        }
        result
    }

    // --- edits -----------------------------------------------------------

    /// Rename the project.
    pub fn set_project_name(&mut self, name: impl Into<String>) {
        self.state.project_name = name.into();
    }

    /// Replace the text content.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.state.text_content = text.into();
    }

    /// Set the background image.
    pub fn set_image(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.state.image = Some(ProjectImage {
            name: name.into(),
            bytes,
        });
    }

    /// Set the caption background color.
    pub fn set_background_color(&mut self, color: Rgba8) {
        self.state.background_color = color;
    }

    /// Set text box placement.
    pub fn set_text_position(&mut self, position: TextPosition) {
        self.state.text_position = position;
    }

    /// Set text alignment.
    pub fn set_text_alignment(&mut self, alignment: TextAlignment) {
        self.state.text_alignment = alignment;
    }

    /// Replace the credits lines.
    pub fn set_credits(&mut self, credits: Vec<String>) {
        self.state.credits = credits;
    }

    /// Set credits placement.
    pub fn set_credits_position(&mut self, position: CreditsPosition) {
        self.state.credits_position = position;
    }

    /// Append a new character with editor defaults.
    pub fn add_character(&mut self) -> CharacterId {
        self.store.add(&mut self.state.characters, &self.registry)
    }

    /// Apply a partial update; `Ok(false)` when the id is unknown.
    pub fn update_character(
        &mut self,
        id: CharacterId,
        patch: CharacterPatch,
    ) -> CapletResult<bool> {
        self.store.update(&mut self.state.characters, id, patch)
    }

    /// Delete a character (and release its scoped UI resources).
    pub fn remove_character(&mut self, id: CharacterId) -> bool {
        self.store.remove(&mut self.state.characters, id)
    }

    /// Bind a scoped UI resource to a character's lifetime.
    pub fn attach_scoped(&mut self, id: CharacterId, resource: Box<dyn ScopedResource>) {
        self.store.attach(id, resource);
    }

    /// Drain pending change notifications.
    pub fn take_events(&mut self) -> Vec<StoreEvent> {
        self.store.take_events()
    }

    /// Register an uploaded font and repair any character whose font path no
    /// longer resolves.
    pub fn upload_font(&mut self, bytes: Vec<u8>, filename: &str) -> CapletResult<FontResource> {
        let result = self.registry.register(bytes, filename);
        let result = self.record_err(result)?;
        self.registry.reconcile(&mut self.state.characters);
        self.last_outcome = Some(format!("registered font '{}'", result.name));
        Ok(result)
    }

    // --- boundary operations ---------------------------------------------

    /// Build the engine-facing settings document from the current state.
    pub fn build_settings(&mut self) -> CapletResult<SettingsDocument> {
        let result = build(&self.state);
        let result = self.record_err(result)?;
        self.last_outcome = Some("settings document built".to_owned());
        Ok(result)
    }

    /// Export the whole project as archive bytes.
    pub fn export(&mut self) -> CapletResult<Vec<u8>> {
        let result = export_archive(&self.state, &self.registry);
        let bytes = self.record_err(result)?;
        self.last_outcome = Some(format!("exported archive ({} bytes)", bytes.len()));
        Ok(bytes)
    }

    /// Replace the session's project with the contents of an archive.
    ///
    /// Construct-then-commit: the new registry is populated and the character
    /// list rebuilt before any live state is touched; on any error the prior
    /// project is left unchanged.
    pub fn import(&mut self, bytes: &[u8]) -> CapletResult<()> {
        let contents = self.record_err(import_archive(bytes))?;

        let mut registry = FontRegistry::new();
        for (filename, font_bytes) in &contents.fonts {
            let registered = registry.register(font_bytes.clone(), filename);
            self.record_err(registered)?;
        }

        // Everything fallible is done; commit.
        let mut characters = self.store.ensure_ids(contents.characters);
        registry.reconcile(&mut characters);
        self.state = ProjectState {
            project_name: contents.project_name,
            characters,
            text_content: contents.text_content,
            text_position: contents.text_position,
            text_alignment: contents.text_alignment,
            credits: contents.credits,
            credits_position: contents.credits_position,
            background_color: contents.background_color,
            image: Some(contents.image),
        };
        self.registry = registry;
        self.last_outcome = Some(format!("imported project '{}'", self.state.project_name));
        Ok(())
    }

    /// Render the current project through the given invoker and engine.
    ///
    /// An engine-reported failure is an `Ok(RenderOutcome::Failed)` and its
    /// diagnostic becomes the recorded outcome; only transport faults are
    /// errors.
    pub fn render(
        &mut self,
        invoker: &mut RenderInvoker,
        engine: &mut dyn RenderEngine,
    ) -> CapletResult<RenderOutcome> {
        let result = invoker.render(&self.state, engine);
        let outcome = self.record_err(result)?;
        self.last_outcome = Some(match &outcome {
            RenderOutcome::Rendered { bytes } => format!("rendered {} bytes", bytes.len()),
            RenderOutcome::Failed { message } => message.clone(),
        });
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/project_session.rs"]
mod tests;
