use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::Context as _;

use crate::foundation::error::{CapletError, CapletResult};
use crate::render::engine::{EngineRequest, RenderEngine};

/// Name of the spec file written next to the exchanged inputs.
pub const SPEC_FILE: &str = "spec.toml";

/// Engine bridge that runs a configured program as a subprocess.
///
/// The settings document is written as `spec.toml` next to the image input
/// (the reference engine consumes a TOML spec file), then the program is run
/// with any configured arguments plus the spec path appended. Captured stdout
/// (plus trimmed stderr) is the reply; the invoker pattern-matches it. Spawn
/// and IO faults are [`CapletError::EngineUnavailable`]; a non-zero exit that
/// still produced output is treated as an engine-reported failure and the
/// reply is returned verbatim.
#[derive(Clone, Debug)]
pub struct ProcessEngine {
    program: PathBuf,
    args: Vec<String>,
}

impl ProcessEngine {
    /// Construct a bridge for the given engine program.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Add a fixed argument passed before the spec path.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Probe whether the engine program can be spawned at all
    /// (`<program> --version`).
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    }
}

impl RenderEngine for ProcessEngine {
    fn render(&mut self, request: &EngineRequest) -> CapletResult<String> {
        let spec_dir = request
            .image_path
            .parent()
            .unwrap_or_else(|| Path::new("."));
        let spec_path = spec_dir.join(SPEC_FILE);
        let spec =
            toml::to_string_pretty(&request.settings).context("failed to encode engine spec")?;
        std::fs::write(&spec_path, spec).map_err(|e| {
            CapletError::engine_unavailable(format!(
                "failed to write engine spec '{}': {e}",
                spec_path.display()
            ))
        })?;

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(&spec_path)
            .output()
            .map_err(|e| {
                CapletError::engine_unavailable(format!(
                    "failed to run engine '{}': {e}",
                    self.program.display()
                ))
            })?;

        let mut reply = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        if !stderr.is_empty() {
            if !reply.is_empty() {
                reply.push('\n');
            }
            reply.push_str(stderr);
        }

        if !output.status.success() && reply.trim().is_empty() {
            return Err(CapletError::engine_unavailable(format!(
                "engine '{}' exited with {} and produced no output",
                self.program.display(),
                output.status
            )));
        }
        Ok(reply)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/process.rs"]
mod tests;
