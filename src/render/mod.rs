//! Rendering invocation: the injected engine capability and the file-exchange
//! invoker around it.

/// Engine contract: request, trait, outcome, scripted test engine.
pub mod engine;
/// File-exchange invoker and success-marker interpretation.
pub mod invoke;
/// Subprocess-backed engine bridge.
pub mod process;
