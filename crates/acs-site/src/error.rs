//! Error types for the acs-site build pipeline.
//!
//! The content tree is curated by hand, so most failures here are fatal by
//! design: a missing slug mapping or a malformed task document means the
//! repository needs fixing, not that the build should limp along.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for acs-site operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Identifier Errors ===
    /// A section number outside the recognized 1-8 range.
    #[error("section number {0} is out of range (expected 1-8)")]
    InvalidSectionNumber(u8),

    /// A character that is not a task letter.
    #[error("'{0}' is not a task letter (expected A-E)")]
    InvalidTaskLetter(char),

    /// An item-list key that does not follow the `<number>[letter]` form.
    #[error("'{0}' is not a valid item key (expected e.g. \"3\" or \"3a\")")]
    InvalidItemId(String),

    // === Scanner Errors ===
    /// A content directory could not be enumerated.
    #[error("failed to read content directory {path}: {source}")]
    DirectoryRead {
        /// The directory that could not be read.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Two directories resolved to the same section number.
    #[error("duplicate directory for section {0}")]
    DuplicateSection(u8),

    /// Two entries resolved to the same (section, letter) pair.
    #[error("duplicate task {letter} in section {section}")]
    DuplicateTask {
        /// Section number of the colliding tasks.
        section: u8,
        /// The task letter both entries claim.
        letter: char,
    },

    // === Slug Errors ===
    /// A section number with no registered URI slug.
    #[error("no registered slug for section {0}")]
    MissingSectionSlug(u8),

    /// A (section, letter) pair with no registered URI slug.
    #[error("no registered slug for task {letter} of section {section}")]
    MissingTaskSlug {
        /// Section number of the unmapped task.
        section: u8,
        /// Letter of the unmapped task.
        letter: char,
    },

    // === Lookup Errors ===
    /// A section identifier that matches nothing in the scanned tree.
    #[error("no section found matching \"{0}\"")]
    UnknownSection(String),

    /// A (section, letter) pair that matches nothing in the scanned tree.
    #[error("invalid task identifiers (section: {section}, letter: \"{letter}\")")]
    UnknownTask {
        /// Requested section number.
        section: u8,
        /// Requested task letter.
        letter: char,
    },

    /// A task name that matches nothing within the named section.
    #[error("no task found matching \"{name}\" in section {section}")]
    UnknownTaskName {
        /// Section number the name was looked up in.
        section: u8,
        /// The requested task name.
        name: String,
    },

    // === Content Errors ===
    /// A task document failed to parse. Content is curated, so this aborts
    /// the build rather than producing a partial record.
    #[error("failed to parse task file {path}: {source}")]
    TaskParse {
        /// Path to the malformed document.
        path: PathBuf,
        /// The underlying TOML error.
        #[source]
        source: Box<toml::de::Error>,
    },

    /// A parsed task document contradicts the file's location in the tree.
    #[error("task file {path} contradicts its location: {message}")]
    ContentMismatch {
        /// Path to the offending document.
        path: PathBuf,
        /// Description of the mismatch.
        message: String,
    },

    /// An image file's header could not be read.
    #[error("failed to read image header of {path}: {message}")]
    ImageProbe {
        /// Path to the offending image.
        path: PathBuf,
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for acs-site operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Create a content mismatch error for the given file.
    #[must_use]
    pub fn content_mismatch(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ContentMismatch {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an image probe error for the given file.
    #[must_use]
    pub fn image_probe(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ImageProbe {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a task parse error for the given file.
    #[must_use]
    pub fn task_parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::TaskParse {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Check if this error means a requested section or task does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UnknownSection(_) | Self::UnknownTask { .. } | Self::UnknownTaskName { .. }
        )
    }

    /// Check if this error indicates a broken content repository that a
    /// human must fix (naming, slug tables, duplicates).
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingSectionSlug(_)
                | Self::MissingTaskSlug { .. }
                | Self::DuplicateSection(_)
                | Self::DuplicateTask { .. }
                | Self::ConfigLoad(_)
                | Self::ConfigValidation { .. }
        )
    }
}
