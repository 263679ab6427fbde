//! Error types for `CatSound`
//!
//! Archive-level failures live in [`Error`] and abort a load. Per-entry
//! decode failures are [`DecodeError`](crate::wav::DecodeError) and never
//! escape the loader.

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `CatSound` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== CAT Archive Errors ====================
    /// The archive file is missing or unreadable.
    #[error("failed to open CAT archive {path}: {source}")]
    ArchiveOpen {
        /// Path of the archive that could not be opened.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The index table references data outside the file, is itself
    /// malformed, or an entry past the end of the table was requested.
    #[error("corrupt CAT archive: {message}")]
    ArchiveCorrupt {
        /// Description of what is inconsistent.
        message: String,
    },

    /// An entry name cannot be stored in the CAT name prefix.
    #[error("invalid entry name '{name}': {reason}")]
    InvalidEntryName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// The archive would not fit the 32-bit offset table.
    #[error("CAT archive too large: {size} bytes")]
    ArchiveTooLarge {
        /// The size that overflowed.
        size: u64,
    },

    // ==================== Configuration Errors ====================
    /// Loader configuration is invalid.
    #[error("invalid loader config: {message}")]
    Config {
        /// The validation error message.
        message: String,
    },

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for an [`Error::ArchiveCorrupt`] with a formatted message.
    pub(crate) fn corrupt(message: impl Into<String>) -> Self {
        Error::ArchiveCorrupt {
            message: message.into(),
        }
    }
}

/// A specialized Result type for `CatSound` operations.
pub type Result<T> = std::result::Result<T, Error>;
