//! Error types for the query compiler.

use thiserror::Error;

/// Errors raised while parsing query settings.
///
/// Compilation itself is total and never fails.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Unrecognized KQL mode name.
    #[error("unknown kql mode '{0}', expected 'filter' or 'search'")]
    UnknownKqlMode(String),
}
