//! Error types for the window manager.

use thiserror::Error;

/// Result type for window configuration.
pub type WindowResult<T> = Result<T, WindowError>;

/// Errors in window configuration or settings parsing.
///
/// Runtime page and page-size requests never fail; they are clamped.
#[derive(Debug, Error)]
pub enum WindowError {
    /// No page sizes configured.
    #[error("items-per-page options must not be empty")]
    EmptyPageSizeOptions,

    /// A configured page size of zero.
    #[error("page size must be greater than zero")]
    ZeroPageSize,

    /// Unparseable sort string.
    #[error("invalid sort '{0}', expected <column>:asc|desc")]
    InvalidSort(String),

    /// TOML parse error.
    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// IO error reading a config file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
