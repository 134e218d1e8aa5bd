/// Convenience result type used across caplet.
pub type CapletResult<T> = Result<T, CapletError>;

/// Top-level error taxonomy used by the project-core APIs.
///
/// Engine-reported render failures are deliberately NOT part of this enum:
/// they are an ordinary result variant (see `RenderOutcome::Failed`). Only
/// transport-level engine faults surface as [`CapletError::EngineUnavailable`].
#[derive(thiserror::Error, Debug)]
pub enum CapletError {
    /// Missing or invalid project fields before building a settings document.
    #[error("validation error: {0}")]
    Validation(String),

    /// Archive export attempted without a background image or project name.
    #[error("export precondition error: {0}")]
    ExportPrecondition(String),

    /// Rejected font upload (wrong extension or unusable filename).
    #[error("invalid resource error: {0}")]
    InvalidResource(String),

    /// An expected asset could not be located (archive image entry, engine
    /// output file).
    #[error("missing asset error: {0}")]
    MissingAsset(String),

    /// The project archive container or its metadata entry is absent or
    /// unparsable.
    #[error("archive format error: {0}")]
    ArchiveFormat(String),

    /// The external rendering engine could not be reached at all.
    #[error("engine unavailable: {0}")]
    EngineUnavailable(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CapletError {
    /// Build a [`CapletError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CapletError::ExportPrecondition`] value.
    pub fn export_precondition(msg: impl Into<String>) -> Self {
        Self::ExportPrecondition(msg.into())
    }

    /// Build a [`CapletError::InvalidResource`] value.
    pub fn invalid_resource(msg: impl Into<String>) -> Self {
        Self::InvalidResource(msg.into())
    }

    /// Build a [`CapletError::MissingAsset`] value.
    pub fn missing_asset(msg: impl Into<String>) -> Self {
        Self::MissingAsset(msg.into())
    }

    /// Build a [`CapletError::ArchiveFormat`] value.
    pub fn archive_format(msg: impl Into<String>) -> Self {
        Self::ArchiveFormat(msg.into())
    }

    /// Build a [`CapletError::EngineUnavailable`] value.
    pub fn engine_unavailable(msg: impl Into<String>) -> Self {
        Self::EngineUnavailable(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
