//! Commit object names

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const SHORT_LEN: usize = 7;

/// Rejected commit hash text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid commit hash '{0}': expected non-empty hexadecimal")]
pub struct InvalidCommitHash(pub String);

/// Git object name of a commit (full or abbreviated hex)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitHash(String);

impl CommitHash {
    /// Build from text that is already known to be valid hex.
    ///
    /// Use [`str::parse`] for untrusted input.
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form used in logs and CLI output
    pub fn short(&self) -> &str {
        let end = self.0.len().min(SHORT_LEN);
        &self.0[..end]
    }
}

impl FromStr for CommitHash {
    type Err = InvalidCommitHash;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(InvalidCommitHash(s.to_string()));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }
}

impl fmt::Display for CommitHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CommitHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
