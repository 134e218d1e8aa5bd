use std::collections::VecDeque;
use std::path::PathBuf;

use crate::foundation::error::{CapletError, CapletResult};
use crate::settings::document::SettingsDocument;

/// One render request as the engine contract defines it: paths to the
/// exchanged input files plus the value-only settings document.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineRequest {
    /// Path to the background image inside the scratch namespace.
    pub image_path: PathBuf,
    /// Path to the text file inside the scratch namespace.
    pub text_path: PathBuf,
    /// The settings document for this request.
    pub settings: SettingsDocument,
}

/// The external rendering engine as an injected capability.
///
/// The reply is an opaque string; callers decide success by substring
/// pattern-matching, never by parsing it as structured data. An `Err` from
/// this trait means the engine could not be reached at all
/// ([`CapletError::EngineUnavailable`]); an engine-reported render failure is
/// an `Ok` reply whose text lacks the success marker.
///
/// `&mut self` keeps renders serialized: both sides of the exchange write into
/// one shared scratch namespace, so a second in-flight call would clobber it.
pub trait RenderEngine {
    /// Run one render request to completion and return the engine's reply.
    fn render(&mut self, request: &EngineRequest) -> CapletResult<String>;
}

/// Result of one interpreted render.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderOutcome {
    /// The engine reported success and produced output bytes.
    Rendered {
        /// Rendered image bytes.
        bytes: Vec<u8>,
    },
    /// The engine ran but reported failure; `message` is its diagnostic.
    Failed {
        /// Engine-reported diagnostic, verbatim.
        message: String,
    },
}

/// Scripted in-memory engine for tests and debugging.
///
/// Replies are consumed in FIFO order; every request is recorded. An
/// exhausted script is a transport fault.
#[derive(Debug, Default)]
pub struct ScriptedEngine {
    replies: VecDeque<Result<String, String>>,
    /// Requests received so far, in order.
    pub requests: Vec<EngineRequest>,
}

impl ScriptedEngine {
    /// Construct an engine with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply string for the next request.
    pub fn reply(mut self, text: impl Into<String>) -> Self {
        self.replies.push_back(Ok(text.into()));
        self
    }

    /// Queue a transport fault for the next request.
    pub fn unavailable(mut self, message: impl Into<String>) -> Self {
        self.replies.push_back(Err(message.into()));
        self
    }
}

impl RenderEngine for ScriptedEngine {
    fn render(&mut self, request: &EngineRequest) -> CapletResult<String> {
        self.requests.push(request.clone());
        match self.replies.pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(CapletError::engine_unavailable(message)),
            None => Err(CapletError::engine_unavailable(
                "scripted engine has no reply queued",
            )),
        }
    }
}
