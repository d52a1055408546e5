//! Error types and path context for editor operations

use std::fmt;
use std::path::{Path, PathBuf};

/// Placeholder path used when an error is raised before its file is known
const UNKNOWN_PATH: &str = "<unknown>";

/// Main error type for all editor operations
#[derive(Debug)]
pub enum EditorError {
    /// Image bytes could not be read or decoded into a bitmap
    Decode {
        /// Path the bytes came from (`<unknown>` for in-memory input)
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Map size outside the accepted range
    InvalidSize {
        /// Requested side length
        size: usize,
        /// Largest accepted side length
        max: usize,
    },

    /// Cell index addressing outside the current grid
    OutOfBounds {
        /// Offending row-major cell index
        index: usize,
        /// Number of cells in the grid
        cells: usize,
    },

    /// Tile identifier not present in the current palette
    InvalidTile {
        /// Requested tile identifier
        id: usize,
        /// Number of tiles in the palette
        palette_len: usize,
    },

    /// Exported map text could not be parsed back into a grid
    MalformedMap {
        /// Zero-based token position where parsing failed
        token: usize,
        /// Explanation of the failure
        reason: String,
    },

    /// Edit script line could not be parsed
    InvalidCommand {
        /// One-based script line number
        line: usize,
        /// Explanation of the failure
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Decoded pixel data does not have the expected layout
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Failed to save a rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Global logger was already installed
    Logger {
        /// Underlying logger error
        source: log::SetLoggerError,
    },
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode { path, source } => {
                write!(f, "Failed to decode image '{}': {source}", path.display())
            }
            Self::InvalidSize { size, max } => {
                write!(f, "Invalid map size {size}: must be between 1 and {max}")
            }
            Self::OutOfBounds { index, cells } => {
                write!(f, "Cell index {index} is out of bounds (grid has {cells} cells)")
            }
            Self::InvalidTile { id, palette_len } => {
                write!(f, "Tile {id} is not in the palette ({palette_len} tiles)")
            }
            Self::MalformedMap { token, reason } => {
                write!(f, "Malformed map at token {token}: {reason}")
            }
            Self::InvalidCommand { line, reason } => {
                write!(f, "Invalid command on line {line}: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Logger { source } => write!(f, "Failed to initialize logging: {source}"),
        }
    }
}

impl std::error::Error for EditorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::Logger { source } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for editor results
pub type Result<T> = std::result::Result<T, EditorError>;

/// Attaches a filesystem path to errors raised without one
pub trait WithPath<T> {
    /// Replace an unknown path in the error with `path`
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T, E> WithPath<T> for std::result::Result<T, E>
where
    E: Into<EditorError>,
{
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only errors that carry a path benefit from it
            match &mut error {
                EditorError::Decode { path: slot, .. }
                | EditorError::ImageExport { path: slot, .. }
                | EditorError::FileSystem { path: slot, .. }
                    if slot.as_os_str() == UNKNOWN_PATH =>
                {
                    *slot = path.to_path_buf();
                }
                _ => {}
            }
            error
        })
    }
}

impl From<image::ImageError> for EditorError {
    fn from(err: image::ImageError) -> Self {
        Self::Decode {
            path: PathBuf::from(UNKNOWN_PATH),
            source: err,
        }
    }
}

impl From<std::io::Error> for EditorError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from(UNKNOWN_PATH),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<log::SetLoggerError> for EditorError {
    fn from(err: log::SetLoggerError) -> Self {
        Self::Logger { source: err }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> EditorError {
    EditorError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a file system error for a known path and operation
pub fn file_system_error(
    path: &Path,
    operation: &'static str,
    source: std::io::Error,
) -> EditorError {
    EditorError::FileSystem {
        path: path.to_path_buf(),
        operation,
        source,
    }
}
