//! [`TypioError`] — every way a typing request can be rejected or fail.

use std::io;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TypioError>;

/// Errors raised by the typing engine.
///
/// The validation variants are all raised before any output is produced,
/// except [`InvalidDelay`](Self::InvalidDelay) and
/// [`InvalidJitter`](Self::InvalidJitter) coming from a per-call override
/// inside a custom mode, which are raised at the moment of use.
#[derive(Debug, thiserror::Error)]
pub enum TypioError {
    #[error("`text` must be str or bytes.")]
    InvalidText,

    #[error("bytes text must be UTF-8 decodable.")]
    InvalidBytes(#[source] std::str::Utf8Error),

    #[error("`delay` must be a non-negative number.")]
    InvalidDelay,

    #[error("`jitter` must be a non-negative number.")]
    InvalidJitter,

    #[error("`mode` must be a TypeMode enum value or a callable custom mode.")]
    InvalidMode,

    #[error("`end` must be a str.")]
    InvalidTerminator,

    #[error("`file` must be a file-like object.")]
    InvalidSink(#[source] io::Error),

    /// Writing to or flushing the sink failed mid-emission.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Raised by a caller-supplied custom mode. Passed through untouched.
    #[error(transparent)]
    Custom(Box<dyn std::error::Error + Send + Sync>),
}

impl TypioError {
    /// Wrap an arbitrary error raised inside a custom mode.
    pub fn custom(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Custom(err.into())
    }
}

/// Message used when a numeric command-line value cannot be accepted.
pub fn invalid_non_negative_number(value: &str) -> String {
    format!("invalid non-negative number: '{value}'")
}
