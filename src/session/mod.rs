//! Single-project session facade.

/// Session object hosting the operation boundary.
pub mod project_session;
