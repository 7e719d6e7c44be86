//! Typed failure taxonomy for parsing and item building.
//!
//! Nothing here is allowed to terminate a crawl: callers map these to
//! skip-and-continue (with a log line) and move on to the next candidate.

use std::path::PathBuf;
use thiserror::Error;

/// Why a metadata document could not be read or parsed.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The file exists but is not well-formed markup.
    #[error("malformed document {path}: {reason}")]
    MalformedDocument { path: PathBuf, reason: String },

    /// The file could not be opened or read.
    #[error("cannot read {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },
}

impl ParseError {
    pub(crate) fn malformed(path: &std::path::Path, reason: impl std::fmt::Display) -> Self {
        ParseError::MalformedDocument {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn unreadable(path: &std::path::Path, reason: impl std::fmt::Display) -> Self {
        ParseError::Unreadable {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// Why a descriptor could not be turned into a catalog item.
///
/// Callers can distinguish "skip, try next" (`Ineligible`) from
/// "malformed input, log and skip" (`Parse`, `MissingField`) without a
/// catch-all.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The descriptor was empty or carried no path.
    #[error("descriptor is empty or has no path")]
    EmptyDescriptor,

    /// The metadata file behind the descriptor could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The document belongs to a different sensor family.
    #[error("{path} is not a {family} product")]
    Ineligible { path: PathBuf, family: String },

    /// A subtree the item cannot be assembled without is absent.
    #[error("{path}: no {what} in metadata")]
    MissingField { path: PathBuf, what: &'static str },
}
