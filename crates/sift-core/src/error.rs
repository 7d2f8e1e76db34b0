use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("track title is required")]
    EmptyTitle,
    #[error("invalid tag name")]
    InvalidTagName,
    #[error("invalid year: {0}")]
    InvalidYear(i32),
    #[error("invalid group depth: {0}")]
    InvalidGroupDepth(i64),
}
