use std::fmt;
use std::io;
use std::path::PathBuf;

/// Why a state-file line was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseReason {
    /// No `:` separator on the line
    MissingColon,
    /// Nothing after the first `:`
    EmptyPath,
    /// The field before the first `:` is not a decimal `i64`
    InvalidMtime,
}

impl ParseReason {
    /// Short human-readable description
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingColon => "missing colon separator",
            Self::EmptyPath => "missing path",
            Self::InvalidMtime => "invalid timestamp",
        }
    }
}

/// Errors surfaced by the state tracker
#[derive(Debug)]
pub enum StateError {
    /// An underlying filesystem operation failed
    Io {
        /// What was being attempted (`open`, `read`, `write`, `stat`, ...)
        action: &'static str,
        /// Path the operation was applied to
        path: PathBuf,
        /// The OS error
        source: io::Error,
    },
    /// The state file contained a malformed line
    Parse {
        /// 1-based line number within the state file
        line: usize,
        /// Which rule the line broke
        reason: ParseReason,
        /// The offending line, lossily decoded for display
        content: String,
    },
}

impl StateError {
    /// I/O failure while performing `action` on `path`
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Malformed line, keeping a lossy copy of its bytes
    pub(crate) fn parse(line: usize, reason: ParseReason, content: &[u8]) -> Self {
        Self::Parse {
            line,
            reason,
            content: String::from_utf8_lossy(content).into_owned(),
        }
    }

    /// Get a short description of the error kind
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Io { .. } => "io",
            Self::Parse { .. } => "parse",
        }
    }

    /// Whether this error came from a malformed state file
    #[must_use]
    pub const fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io {
                action,
                path,
                source,
            } => write!(f, "{action} failed for {}: {source}", path.display()),
            Self::Parse {
                line,
                reason,
                content,
            } => write!(f, "line {line}: {}: '{content}'", reason.as_str()),
        }
    }
}

impl std::error::Error for StateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { .. } => None,
        }
    }
}
