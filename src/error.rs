// src/error.rs

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a category name was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidNameReason {
    Empty,
    Duplicate,
    /// The offending characters, in the order they appear in the name.
    ReservedCharacters(Vec<char>),
}

impl fmt::Display for InvalidNameReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidNameReason::Empty => f.write_str("name is empty"),
            InvalidNameReason::Duplicate => f.write_str("category already exists"),
            InvalidNameReason::ReservedCharacters(chars) => {
                let listed: Vec<String> = chars.iter().map(char::to_string).collect();
                write!(f, "category name cannot contain: {}", listed.join(" "))
            }
        }
    }
}

/// A single entry that could not be moved back out of a category.
#[derive(Debug)]
pub struct FailedEntry {
    pub name: String,
    pub cause: io::Error,
}

impl fmt::Display for FailedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.cause)
    }
}

/// Errors reported by a folder session. All of them are recoverable; the
/// session is left consistent with the disk whenever one is returned.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("folder not found or unreadable: {}", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid category name '{name}': {reason}")]
    InvalidName {
        name: String,
        reason: InvalidNameReason,
    },

    #[error("no such category: {0}")]
    UnknownCategory(String),

    #[error("could not {operation} '{target}': {source}")]
    IoFailure {
        operation: &'static str,
        target: String,
        #[source]
        source: io::Error,
    },

    #[error(
        "could not move {} file(s) out of '{category}', category was not removed:\n{}",
        .failed.len(),
        .failed.iter().map(FailedEntry::to_string).collect::<Vec<_>>().join("\n")
    )]
    PartialFailure {
        category: String,
        failed: Vec<FailedEntry>,
    },
}
