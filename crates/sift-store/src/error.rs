use sift_core::{CoreError, TrackId};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid track at index {index}: {source}")]
    InvalidTrack {
        index: usize,
        #[source]
        source: CoreError,
    },
    #[error("duplicate track id: {0}")]
    DuplicateTrack(TrackId),
    #[error("catalog not found: {0}")]
    MissingCatalog(PathBuf),
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid data path: {0}")]
    InvalidDataPath(PathBuf),
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    Read,
    Parse,
    InvalidTrack,
    DuplicateTrack,
    MissingCatalog,
    MissingHomeDir,
    InvalidDataPath,
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::Read { .. } => StoreErrorKind::Read,
            StoreError::Parse { .. } => StoreErrorKind::Parse,
            StoreError::InvalidTrack { .. } => StoreErrorKind::InvalidTrack,
            StoreError::DuplicateTrack(_) => StoreErrorKind::DuplicateTrack,
            StoreError::MissingCatalog(_) => StoreErrorKind::MissingCatalog,
            StoreError::MissingHomeDir => StoreErrorKind::MissingHomeDir,
            StoreError::InvalidDataPath(_) => StoreErrorKind::InvalidDataPath,
        }
    }
}
