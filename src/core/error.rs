//! Error handling for assetrev
//!
//! This module provides the typed error enum used by every stage of a revision
//! run and the user-friendly reporting layer used by the CLI. The error system
//! follows two principles:
//! 1. **Strongly-typed errors** so callers and tests can match on the failure
//! 2. **User-friendly messages** with details and suggestions for CLI users
//!
//! # Architecture
//!
//! - [`RevError`] - Enumerated error types for all failure cases
//! - [`ErrorContext`] - Wrapper that adds details and suggestions for display
//!
//! Every error is fatal for the run: a later file's output depends on every
//! earlier dependency having been processed, so there is no skip-and-continue
//! mode. Each variant carries the offending path (or, for cycles, the chain of
//! files forming the cycle).
//!
//! # Examples
//!
//! ```rust,no_run
//! use assetrev::core::{RevError, user_friendly_error};
//!
//! let error = RevError::CyclicDependency {
//!     chain: "a.js -> b.js -> a.js".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with a suggestion
//! ```

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for assetrev operations.
///
/// # Error Categories
///
/// ## File System
/// - [`IoReadFailure`] - A source file could not be read
/// - [`IoWriteFailure`] - A revisioned file could not be written
/// - [`ManifestWriteFailure`] - The manifest could not be persisted
/// - [`InputNotFound`] - The input root does not exist
///
/// ## Graph
/// - [`CyclicDependency`] - Files reference each other in a loop
/// - [`UnresolvedDependency`] - A dependency was not revisioned before its dependent
/// - [`DuplicateRevision`] - A file was revisioned twice in one run
///
/// ## Configuration
/// - [`InvalidPattern`] - A skip pattern is not valid glob syntax
/// - [`ConfigError`] - Invalid configuration values or file
///
/// [`IoReadFailure`]: RevError::IoReadFailure
/// [`IoWriteFailure`]: RevError::IoWriteFailure
/// [`ManifestWriteFailure`]: RevError::ManifestWriteFailure
/// [`InputNotFound`]: RevError::InputNotFound
/// [`CyclicDependency`]: RevError::CyclicDependency
/// [`UnresolvedDependency`]: RevError::UnresolvedDependency
/// [`DuplicateRevision`]: RevError::DuplicateRevision
/// [`InvalidPattern`]: RevError::InvalidPattern
/// [`ConfigError`]: RevError::ConfigError
#[derive(Error, Debug)]
pub enum RevError {
    /// A source file under the input root could not be read
    #[error("Failed to read '{path}'")]
    IoReadFailure {
        /// Relative path of the unreadable file
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A revisioned file could not be written under the output root
    #[error("Failed to write '{path}'")]
    IoWriteFailure {
        /// Relative path of the destination file
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Files reference each other in a loop, so no processing order exists
    ///
    /// Example: `a.js` mentions `b.js` and `b.js` mentions `a.js`
    #[error("Cyclic dependency detected: {chain}")]
    CyclicDependency {
        /// The files forming the cycle, joined with ` -> `
        chain: String,
    },

    /// The manifest could not be persisted
    #[error("Failed to write manifest '{}'", path.display())]
    ManifestWriteFailure {
        /// Absolute path of the manifest file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The input root does not exist or is not a directory
    #[error("Input directory not found: {}", path.display())]
    InputNotFound {
        /// Path given as the input root
        path: PathBuf,
    },

    /// A glob pattern in a skip list could not be compiled
    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern as written in the configuration
        pattern: String,
        /// Why the pattern was rejected
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem
        message: String,
    },

    /// A dependency had no revisioned name when its dependent was processed
    #[error("'{file}' depends on '{dependency}', which has not been revisioned yet")]
    UnresolvedDependency {
        /// The file being processed
        file: String,
        /// The dependency lacking a refs entry
        dependency: String,
    },

    /// A file was revisioned more than once in a single run
    #[error("'{path}' was already revisioned in this run")]
    DuplicateRevision {
        /// The file processed twice
        path: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RevError {
    /// Build a read failure for `path`.
    pub fn read(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::IoReadFailure {
            path: path.into(),
            source,
        }
    }

    /// Build a write failure for `path`.
    pub fn write(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::IoWriteFailure {
            path: path.into(),
            source,
        }
    }
}

fn clone_io(e: &std::io::Error) -> std::io::Error {
    std::io::Error::new(e.kind(), e.to_string())
}

impl Clone for RevError {
    fn clone(&self) -> Self {
        match self {
            Self::IoReadFailure {
                path,
                source,
            } => Self::IoReadFailure {
                path: path.clone(),
                source: clone_io(source),
            },
            Self::IoWriteFailure {
                path,
                source,
            } => Self::IoWriteFailure {
                path: path.clone(),
                source: clone_io(source),
            },
            Self::CyclicDependency {
                chain,
            } => Self::CyclicDependency {
                chain: chain.clone(),
            },
            Self::ManifestWriteFailure {
                path,
                source,
            } => Self::ManifestWriteFailure {
                path: path.clone(),
                source: clone_io(source),
            },
            Self::InputNotFound {
                path,
            } => Self::InputNotFound {
                path: path.clone(),
            },
            Self::InvalidPattern {
                pattern,
                reason,
            } => Self::InvalidPattern {
                pattern: pattern.clone(),
                reason: reason.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            Self::UnresolvedDependency {
                file,
                dependency,
            } => Self::UnresolvedDependency {
                file: file.clone(),
                dependency: dependency.clone(),
            },
            Self::DuplicateRevision {
                path,
            } => Self::DuplicateRevision {
                path: path.clone(),
            },
            Self::Io(e) => Self::Io(clone_io(e)),
        }
    }
}

/// Error context wrapper that provides user-friendly error information.
///
/// Displayed by the CLI as a red error line, a yellow details line and a green
/// suggestion line.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: RevError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no details or suggestion.
    #[must_use]
    pub const fn new(error: RevError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error context to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`].
///
/// Recognizes [`RevError`] anywhere in the error chain (so `anyhow` context
/// layers added by the CLI do not hide it), bare [`std::io::Error`]s and TOML
/// parse errors. Anything else is reported with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(rev_error) = error.chain().find_map(|cause| cause.downcast_ref::<RevError>()) {
        return create_error_context(rev_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(RevError::Io(clone_io(io_error)))
                    .with_suggestion("Check file ownership and permissions of the input and output directories")
                    .with_details("assetrev needs read access to the input tree and write access to the output tree");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(RevError::Io(clone_io(io_error)))
                    .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(RevError::ConfigError {
            message: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax of your assetrev.toml");
    }

    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(RevError::ConfigError {
        message,
    })
}

fn create_error_context(error: RevError) -> ErrorContext {
    match &error {
        RevError::IoReadFailure {
            source,
            ..
        } => {
            let details = format!("The operating system reported: {source}");
            ErrorContext::new(error)
                .with_details(details)
                .with_suggestion("Check that the file still exists and is readable; no output manifest was written")
        }
        RevError::IoWriteFailure {
            source,
            ..
        } => {
            let details = format!("The operating system reported: {source}");
            ErrorContext::new(error)
                .with_details(details)
                .with_suggestion("Check that the output directory is writable and the disk is not full")
        }
        RevError::ManifestWriteFailure {
            source,
            ..
        } => {
            let details = format!("The operating system reported: {source}");
            ErrorContext::new(error)
                .with_details(details)
                .with_suggestion("Check that the output directory is writable; revisioned files were written but are not recorded")
        }
        RevError::CyclicDependency {
            ..
        } => ErrorContext::new(error)
            .with_details("Each file in the chain mentions the next one by name, so none of them can be hashed first")
            .with_suggestion("Break the cycle, or add one of the files to skip_rename so references to it are left untouched"),
        RevError::InputNotFound {
            ..
        } => ErrorContext::new(error).with_suggestion("Pass an existing directory as the input root"),
        RevError::InvalidPattern {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Patterns use glob syntax: '*' within a name, '**' across directories, '[abc]' for character sets"),
        RevError::ConfigError {
            ..
        } => ErrorContext::new(error).with_suggestion("Check assetrev.toml and the command-line flags"),
        RevError::UnresolvedDependency {
            ..
        }
        | RevError::DuplicateRevision {
            ..
        } => ErrorContext::new(error)
            .with_details("The processing order did not place every dependency before its dependents")
            .with_suggestion("Re-run with --verbose and report the dependency plan printed by 'assetrev plan'"),
        RevError::Io(_) => ErrorContext::new(error),
    }
}
