//! Error type for rawkey

use std::fmt;
use std::io;
use std::path::PathBuf;

/// The system call (or stream operation) that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Querying terminal attributes
    Capture,
    /// Applying terminal attributes (entering or restoring raw mode)
    Apply,
    /// Reading a byte from the terminal
    Read,
    /// Writing an echo line to stdout
    Write,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Capture => "tcgetattr",
            Self::Apply => "tcsetattr",
            Self::Read => "read",
            Self::Write => "write",
        })
    }
}

/// Errors that end the program.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{op}: {source}")]
    Io { op: Op, source: io::Error },

    #[error("read timeout of 0 with VMIN 0 would never block")]
    NonBlockingRead,

    #[error("failed to open log file {path}: {source}")]
    LogFile { path: PathBuf, source: io::Error },
}

impl Error {
    /// Wrap an I/O error with the operation that produced it
    pub fn io(op: Op, source: io::Error) -> Self {
        Self::Io { op, source }
    }

    /// The failing operation, for I/O errors
    pub fn op(&self) -> Option<Op> {
        match self {
            Self::Io { op, .. } => Some(*op),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
