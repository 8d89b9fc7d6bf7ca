use crate::{ChunkError, ParseError, TableError};
use thiserror::Error;

#[doc = r#"
A set of errors that can occur while reading data into the bank representation
"#]
#[derive(Debug, Error)]
#[error("Reading at Position {position}, {kind}")]
pub struct ReaderError {
    position: usize,
    pub(crate) kind: ReaderErrorKind,
}

/// A kind of error that a reader can produce
#[derive(Debug, Error)]
pub enum ReaderErrorKind {
    /// Parsing errors
    #[error("Parsing {0}")]
    ParseError(#[from] ParseError),
    /// Fewer bytes were available than the format declared.
    #[error("Short read!")]
    ShortRead,
    /// The underlying file could not be read.
    #[cfg(feature = "std")]
    #[error("Io: {0}")]
    Io(#[from] std::io::Error),
}

impl ReaderErrorKind {
    pub(crate) const fn chunk(chunk_err: ChunkError) -> Self {
        Self::ParseError(ParseError::Chunk(chunk_err))
    }
    pub(crate) const fn table(table_err: TableError) -> Self {
        Self::ParseError(ParseError::Table(table_err))
    }
}

impl ReaderError {
    /// Create a reader error from a position and kind
    pub const fn new(position: usize, kind: ReaderErrorKind) -> Self {
        Self { position, kind }
    }
    /// True if the stream ended before the declared data did
    pub const fn is_short_read(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::ShortRead)
    }
    /// Returns the error kind of the reader.
    pub fn error_kind(&self) -> &ReaderErrorKind {
        &self.kind
    }
    /// Returns the position where the read error occurred.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Create a new invalid data error
    pub const fn parse_error(position: usize, error: ParseError) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::ParseError(error),
        }
    }

    /// Create a new short read error
    pub const fn short(position: usize) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::ShortRead,
        }
    }
}

/// The Read Result type (see [`ReaderError`])
pub type ReadResult<T> = Result<T, ReaderError>;
