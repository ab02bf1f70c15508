/// Git log reading errors
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitReaderError {
    #[error("Not a git repository: {0}")]
    NotARepository(String),

    #[error("Git command failed: {0}")]
    CommandFailed(String),

    #[error("Parse error in line '{line}': {reason}")]
    Parse { line: String, reason: String },

    #[error("Protocol violation: {0}")]
    Protocol(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse failure class, used by callers to pick a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Subprocess could not be spawned, died, or the stream broke
    Transport,
    /// A log line did not match the expected format
    Parse,
    /// The reader or its collaborator broke an invariant (programming error)
    Protocol,
}

impl GitReaderError {
    pub fn parse(line: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            line: line.into(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotARepository(_) | Self::CommandFailed(_) | Self::Io(_) => {
                ErrorCategory::Transport
            }
            Self::Parse { .. } => ErrorCategory::Parse,
            Self::Protocol(_) => ErrorCategory::Protocol,
        }
    }
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "transport",
            ErrorCategory::Parse => "parse",
            ErrorCategory::Protocol => "protocol",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub type Result<T> = std::result::Result<T, GitReaderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let io = GitReaderError::from(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "eof"));
        assert_eq!(io.category(), ErrorCategory::Transport);
        assert_eq!(
            GitReaderError::CommandFailed("fatal".into()).category(),
            ErrorCategory::Transport
        );
        assert_eq!(GitReaderError::parse("x", "bad").category(), ErrorCategory::Parse);
        assert_eq!(
            GitReaderError::Protocol("two lines".into()).category(),
            ErrorCategory::Protocol
        );
    }

    #[test]
    fn test_parse_error_display() {
        let err = GitReaderError::parse("garbage", "missing separator");
        let msg = err.to_string();
        assert!(msg.contains("garbage"));
        assert!(msg.contains("missing separator"));
        assert_eq!(ErrorCategory::Parse.to_string(), "parse");
    }
}
