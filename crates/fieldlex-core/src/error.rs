//! Error types for fieldlex
//!
//! All fallible operations return `Result<T, Error>`.
//! An unrecognized input format is *not* an error: lenient parsing passes the
//! value through unchanged. Errors here are reserved for external collaborator
//! failures and malformed configuration.

/// fieldlex error types
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The external formatting engine failed to render a value
    #[error("format error for type {type_name}: {message}")]
    Format { type_name: String, message: String },

    /// Malformed format-pattern configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// External store/preference collaborator failure, wrapped with context
    #[error("store error: {0}")]
    Store(String),
}

/// Result type alias for fieldlex operations
pub type Result<T> = std::result::Result<T, Error>;
