//! Packaging error types.

use thiserror::Error;

pub type PackagerResult<T> = Result<T, PackagerError>;

#[derive(Debug, Error)]
pub enum PackagerError {
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Duplicate archive entry: {0}")]
    DuplicateEntry(String),
}
