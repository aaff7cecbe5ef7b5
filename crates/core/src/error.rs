use std::fmt;
use std::io;

/// Result alias using `ViewerError`.
pub type Result<T> = std::result::Result<T, ViewerError>;

/// Primary error type for the viewer core.
#[derive(Debug)]
pub enum ViewerError {
    /// File was not found on disk.
    FileNotFound,
    /// Operation failed due to insufficient permissions.
    PermissionDenied,
    /// Catch-all for other I/O errors.
    Io(io::Error),
    /// Encoding label not known or not usable for single-byte decoding.
    UnknownEncoding(String),
    /// A byte could not be decoded under the session encoding.
    Decode { byte: u8, encoding: &'static str },
    /// Drawing outside the fixed screen area.
    OutOfBounds { row: u16, col: u16 },
    /// The window at `position` is still empty after stepping back.
    EmptyWindow { position: u64 },
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::FileNotFound => write!(f, "file not found"),
            ViewerError::PermissionDenied => write!(f, "permission denied"),
            ViewerError::Io(err) => write!(f, "io error: {err}"),
            ViewerError::UnknownEncoding(name) => write!(f, "unknown encoding: {name}"),
            ViewerError::Decode { byte, encoding } => {
                write!(f, "cannot decode byte 0x{byte:02x} as {encoding}")
            }
            ViewerError::OutOfBounds { row, col } => {
                write!(f, "cannot draw outside the screen at row {row}, column {col}")
            }
            ViewerError::EmptyWindow { position } => write!(
                f,
                "no data at offset 0x{position:x}, the file was truncated or emptied"
            ),
        }
    }
}

impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ViewerError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ViewerError {
    fn from(err: io::Error) -> Self {
        use io::ErrorKind::*;
        match err.kind() {
            NotFound => ViewerError::FileNotFound,
            PermissionDenied => ViewerError::PermissionDenied,
            _ => ViewerError::Io(err),
        }
    }
}
