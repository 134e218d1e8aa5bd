use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{CapletError, CapletResult};
use crate::project::model::ProjectState;
use crate::render::engine::{EngineRequest, RenderEngine, RenderOutcome};
use crate::settings::build::{TEXT_INPUT_FILE, build};

/// Default substring the engine's reply must contain to count as success.
///
/// The reference engine prints `Program finished in N seconds` when a caption
/// was produced.
pub const DEFAULT_SUCCESS_MARKER: &str = "Program finished";

/// Submits render requests to an injected [`RenderEngine`] over a shared
/// scratch directory and interprets the reply.
///
/// The exchange protocol: the image bytes land at `<scratch>/<image name>`,
/// the text at `<scratch>/input.txt`, and on a success-marker hit the output
/// is read back from `<scratch>/<output_directory>/<base_filename>.png` (the
/// path derivation is caplet's; the reply text is the engine's). A marker miss
/// is [`RenderOutcome::Failed`], never an error.
///
/// `render` takes `&mut self`, so overlapping renders over the shared scratch
/// namespace are unrepresentable in safe code; a render runs to completion or
/// to engine-reported failure, with no mid-flight cancellation.
#[derive(Debug)]
pub struct RenderInvoker {
    scratch_dir: PathBuf,
    success_marker: String,
}

impl RenderInvoker {
    /// Construct an invoker over the given scratch directory with the
    /// [`DEFAULT_SUCCESS_MARKER`].
    pub fn new(scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            scratch_dir: scratch_dir.into(),
            success_marker: DEFAULT_SUCCESS_MARKER.to_owned(),
        }
    }

    /// Override the success marker.
    pub fn with_success_marker(mut self, marker: impl Into<String>) -> Self {
        self.success_marker = marker.into();
        self
    }

    /// The scratch directory used for file exchange.
    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    /// Build the settings document, exchange files with the engine, and
    /// interpret its reply.
    #[tracing::instrument(skip_all, fields(project = %state.project_name))]
    pub fn render(
        &mut self,
        state: &ProjectState,
        engine: &mut dyn RenderEngine,
    ) -> CapletResult<RenderOutcome> {
        let settings = build(state)?;
        // build() guarantees an image is present.
        let Some(image) = state.image.as_ref() else {
            return Err(CapletError::validation(
                "a background image is required before rendering",
            ));
        };
        let image_filename = Path::new(&image.name)
            .file_name()
            .ok_or_else(|| CapletError::validation("image name must be a plain filename"))?;

        std::fs::create_dir_all(&self.scratch_dir).with_context(|| {
            format!(
                "failed to create scratch directory '{}'",
                self.scratch_dir.display()
            )
        })?;
        let image_path = self.scratch_dir.join(image_filename);
        std::fs::write(&image_path, &image.bytes)
            .with_context(|| format!("failed to write scratch image '{}'", image_path.display()))?;
        let text_path = self.scratch_dir.join(TEXT_INPUT_FILE);
        std::fs::write(&text_path, state.text_content.as_bytes())
            .with_context(|| format!("failed to write scratch text '{}'", text_path.display()))?;

        let output_path = self
            .scratch_dir
            .join(&settings.output.output_directory)
            .join(format!("{}.png", settings.output.base_filename));

        let request = EngineRequest {
            image_path,
            text_path,
            settings,
        };
        let reply = engine.render(&request)?;

        if !reply.contains(&self.success_marker) {
            return Ok(RenderOutcome::Failed { message: reply });
        }
        match std::fs::read(&output_path) {
            Ok(bytes) => Ok(RenderOutcome::Rendered { bytes }),
            Err(e) => Err(CapletError::missing_asset(format!(
                "engine reported success but output '{}' could not be read: {e}",
                output_path.display()
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/invoke.rs"]
mod tests;
