//! Error types for the authorstat crate.
//!
//! This module defines all error types used throughout the application,
//! covering failures of the log producer as well as malformed log text.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for authorstat operations.
#[derive(Error, Debug)]
pub enum AuthorstatError {
    /// Error executing a Git command.
    #[error("Git command failed: {message}")]
    Git {
        /// Description of what went wrong.
        message: String,
        /// The underlying IO error, if any.
        #[source]
        source: Option<std::io::Error>,
    },

    /// Error reading a saved log file.
    #[error("Failed to read file '{path}': {source}")]
    Io {
        /// The path to the file that couldn't be read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Error decoding UTF-8 content.
    #[error("Invalid UTF-8 in '{context}': {source}")]
    Utf8 {
        /// Context describing where the UTF-8 error occurred.
        context: String,
        /// The underlying UTF-8 error.
        #[source]
        source: std::str::Utf8Error,
    },

    /// Not a Git repository.
    #[error("Not a Git repository (or any parent up to mount point)")]
    NotAGitRepository,

    /// A commit header did not consist of exactly a hash and a date.
    #[error("Malformed commit header: '{header}'")]
    MalformedHeader {
        /// The offending header line.
        header: String,
    },

    /// A stat line had no filename field or an unreadable count.
    #[error("Malformed file stat line: '{line}'")]
    MalformedFileLine {
        /// The offending stat line.
        line: String,
    },

    /// The log text broke a structural assumption under the strict policy.
    #[error("Unexpected log layout: {0}")]
    Format(#[from] FormatViolation),

    /// The commit delimiter was configured as an empty string.
    #[error("Commit delimiter must not be empty")]
    EmptyDelimiter,
}

/// A structural deviation from the expected log layout.
///
/// Under [`SeparatorPolicy::Warn`](crate::parser::SeparatorPolicy) these are
/// logged; under `Strict` they become [`AuthorstatError::Format`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatViolation {
    /// Text appeared before the first commit delimiter.
    #[error("unexpected text before the first commit: '{text}'")]
    LeadingText {
        /// The text found before the first delimiter.
        text: String,
    },

    /// The line after a commit header was not blank.
    #[error("commit {hash}: expected a blank line after the header, found '{line}'")]
    MissingSeparator {
        /// Hash of the commit whose block is affected.
        hash: String,
        /// The non-blank line found in place of the separator.
        line: String,
    },
}

/// A specialized Result type for authorstat operations.
pub type Result<T> = std::result::Result<T, AuthorstatError>;

impl AuthorstatError {
    /// Creates a new Git error with a message.
    pub fn git(message: impl Into<String>) -> Self {
        Self::Git {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new Git error with a message and source error.
    pub fn git_with_source(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Git {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Creates a new IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a new UTF-8 error.
    pub fn utf8(context: impl Into<String>, source: std::str::Utf8Error) -> Self {
        Self::Utf8 {
            context: context.into(),
            source,
        }
    }

    /// Creates a malformed header error.
    pub fn malformed_header(header: impl Into<String>) -> Self {
        Self::MalformedHeader {
            header: header.into(),
        }
    }

    /// Creates a malformed stat line error.
    pub fn malformed_file_line(line: impl Into<String>) -> Self {
        Self::MalformedFileLine { line: line.into() }
    }

    /// Returns `true` if the error came from the log producer rather than
    /// from parsing its output.
    pub fn is_producer_error(&self) -> bool {
        matches!(
            self,
            Self::Git { .. } | Self::Io { .. } | Self::Utf8 { .. } | Self::NotAGitRepository
        )
    }
}
