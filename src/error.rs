use std::path::PathBuf;

/// Result type alias for the scan/build pipeline
pub type Result<T> = std::result::Result<T, Error>;

/// Error types raised by the scan/build pipeline.
///
/// Only a missing root directory is fatal. Every per-candidate irregularity
/// (missing controller directory, missing entry-point file, unreadable source,
/// unmatched patterns) degrades to "this candidate contributes nothing".
#[derive(Debug)]
pub enum Error {
    /// A required root directory (components root or plugins root) is absent.
    PathNotFound(PathBuf),
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::PathNotFound(path) => write!(f, "path not found: {}", path.display()),
            Error::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
