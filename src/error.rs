use thiserror::Error;

/// Errors raised while walking the PE headers and extracting a section.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("invalid DOS header (missing MZ signature)")]
    InvalidDosHeader,

    #[error("invalid PE signature")]
    InvalidPeHeader,

    #[error("section {0:?} not found")]
    SectionNotFound(String),

    #[error("read of {len} bytes at offset {offset:#x} is outside the image")]
    OutOfBounds { offset: usize, len: usize },
}
