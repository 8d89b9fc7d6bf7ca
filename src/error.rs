use crate::file::{FourCC, ListKind};
use alloc::collections::TryReserveError;
use thiserror::Error;

#[doc = r#"
A set of errors that can occur while interpreting bank bytes.

These are the structural failures: a byte sequence was present, but it
does not describe what the format says it should. Running out of bytes
is reported separately as
[`ReaderErrorKind::ShortRead`](crate::reader::ReaderErrorKind::ShortRead).
"#]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A chunk header did not match what the decoder required.
    #[error("Chunk: {0}")]
    Chunk(#[from] ChunkError),
    /// A fixed-record table was inconsistent with its declared length.
    #[error("Table: {0}")]
    Table(#[from] TableError),
    /// The bank as a whole could not be assembled.
    #[error("Bank: {0}")]
    Bank(#[from] BankError),
    /// A decode buffer could not be allocated.
    #[error("Failed to allocate a decode buffer")]
    Allocation(#[from] TryReserveError),
}

/// An error from reading a chunk header.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ChunkError {
    /// A required chunk carried a different tag than the one requested.
    #[error("expected `{expected}`, found `{found}`")]
    UnexpectedChunk {
        /// The tag the decoder required at this position.
        expected: FourCC,
        /// The tag actually present in the stream.
        found: FourCC,
    },
    /// A `LIST` chunk was required, but a different tag was found.
    #[error("expected a LIST chunk, found `{found}`")]
    ExpectedList {
        /// The tag actually present in the stream.
        found: FourCC,
    },
    /// A `LIST` chunk declared fewer than the 4 bytes of its type tag.
    #[error("LIST length {len} cannot hold a type tag")]
    TruncatedList {
        /// The declared chunk length.
        len: u32,
    },
    /// The same top-level block appeared twice.
    #[error("duplicate {0:?} block")]
    DuplicateBlock(ListKind),
}

/// An error from decoding a fixed-record table of the `pdta` block.
///
/// These are hard failures: a misdeclared table length means every
/// byte after it would be misinterpreted.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// A table's declared length is not a positive multiple of its
    /// record width.
    #[error("`{tag}` length {len} is not a positive multiple of record width {width}")]
    Misaligned {
        /// The table sub-chunk's tag.
        tag: FourCC,
        /// The declared sub-chunk length.
        len: u32,
        /// The fixed record width for this table.
        width: u32,
    },
}

/// An error from assembling a whole [`SoundFont`](crate::file::SoundFont).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BankError {
    /// The file ended without an `INFO` block.
    #[error("no INFO block found")]
    NoInfo,
    /// The file ended without an `sdta` block.
    #[error("no sample data block found")]
    NoSampleData,
    /// The file ended without a `pdta` block.
    #[error("no preset data block found")]
    NoPresetTables,
}
