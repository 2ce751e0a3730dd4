//! Error types for the emotion jar.
//!
//! This module defines the centralized error type [`JarError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate, plus the
//! [`RewriteError`] taxonomy used inside the transformation gateway. All errors
//! are implemented using the `thiserror` crate.
//!
//! `RewriteError` never crosses the gateway boundary: every variant is logged
//! and masked by a fallback result before the state machine sees it.

use thiserror::Error;

/// The main error type for emotion jar operations.
///
/// # Examples
///
/// ```
/// use emotion_jar::JarError;
///
/// fn read_notes() -> Result<(), JarError> {
///     Err(JarError::Storage("failed to write notes".to_string()))
/// }
/// assert!(read_notes().is_err());
/// ```
#[derive(Debug, Error)]
pub enum JarError {
    /// Reading from or writing to the note slot failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is unreadable or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme file could not be loaded.
    #[error("Theme error: {0}")]
    Theme(String),

    /// A scheduled step did not run to completion.
    ///
    /// Raised when a timer or transformation task panics or is aborted by the
    /// runtime before it could report back to the session.
    #[error("Task error: {0}")]
    Task(String),
}

/// Failure taxonomy of a single rewrite attempt.
///
/// Groups into missing credentials, upstream failures (`Transport`,
/// `Status`), and unusable replies (`Malformed`, `Incomplete`). The gateway
/// treats all of them the same way.
#[derive(Debug, Error)]
pub enum RewriteError {
    /// No API credential is configured.
    #[error("no API credential configured")]
    MissingCredential,

    /// The request could not be sent or the body could not be read.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status code.
    #[error("upstream returned HTTP {0}")]
    Status(u16),

    /// The reply was empty or not the expected JSON shape.
    #[error("malformed reply: {0}")]
    Malformed(String),

    /// The reply parsed but one of the required fields is missing or blank.
    #[error("reply is missing transformedText or quote")]
    Incomplete,
}

/// A specialized `Result` type for emotion jar operations.
pub type Result<T> = std::result::Result<T, JarError>;
