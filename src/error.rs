//! Error taxonomy shared by every operation.
//!
//! Nothing is retried or swallowed: each variant ends the current operation
//! and surfaces to the caller.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HeartError {
    #[error("File not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Malformed input: {0}")]
    MalformedInput(#[from] serde_json::Error),

    #[error("Malformed drawing node: {0}")]
    MalformedNode(String),

    #[error("Layout has {coords} coordinates but {flags} flags were given")]
    IndexExhaustion { flags: usize, coords: usize },

    #[error("Flag {0:?} has no colors")]
    EmptyColors(String),

    #[error("Flag {0:?} appears more than once in the catalog")]
    DuplicateFlag(String),

    #[error("No flag named {0:?} in the catalog")]
    UnknownFlag(String),

    #[error("Raster export failed: {0}")]
    Raster(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl HeartError {
    /// Classify an I/O failure on `path`, keeping absence distinct.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            HeartError::MissingFile(path.to_path_buf())
        } else {
            HeartError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_missing_file() {
        let err = HeartError::from_io(
            Path::new("nowhere.json"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, HeartError::MissingFile(ref p) if p == Path::new("nowhere.json")));
    }

    #[test]
    fn test_other_io_kept_as_io() {
        let err = HeartError::from_io(
            Path::new("locked.json"),
            io::Error::new(io::ErrorKind::PermissionDenied, "nope"),
        );
        assert!(matches!(err, HeartError::Io { .. }));
        assert!(err.to_string().contains("locked.json"));
    }
}
