#![doc = r#"
Contains types for bank file chunks

# Overview

Bank files are organized into chunks, each identified by a 4-character
ASCII tag followed by a 32-bit little-endian length field and then the
chunk data. One tag is special: a `LIST` chunk nests further chunks,
and its first 4 payload bytes are a type tag naming what the list
holds. Everything else is a leaf chunk.

## [`Chunk`]

The generic walker. [`Chunk::read`] recognizes the next chunk in the
stream: for a `LIST` it reports the inner type tag and the payload
length (declared length minus the 4 type-tag bytes); for a leaf it
skips the payload entirely. A short read while fetching the tag yields
a sentinel end-of-data chunk ([`Chunk::is_eof`]), which is how callers
enumerate a container of unknown layout to its end.

## [`ListHeader`]

The format-specific dispatcher used for the three top-level blocks of
a bank. [`ListHeader::fetch`] demands a `LIST` tag and classifies the
inner type tag as one of [`ListKind::Info`], [`ListKind::SampleData`]
or [`ListKind::PresetData`]; anything else is reported as
[`ListKind::Unknown`] with its tag preserved so the caller can skip
the payload.

# Example Structure

A typical bank file looks like:
```text
"RIFF" <size> "sfbk"
[LIST "INFO": metadata leaf chunks]
[LIST "sdta": "smpl" sample bytes]
[LIST "pdta": eight fixed-record tables]
```
"#]

use crate::{
    ChunkError,
    reader::{ReadResult, Reader, ReaderError, ReaderErrorKind},
};
use core::fmt::{self, Write};
use num_enum::TryFromPrimitive;

/// A 4-character ASCII code identifying a chunk's type.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FourCC([u8; 4]);

impl FourCC {
    /// The top-level container tag.
    pub const RIFF: Self = Self(*b"RIFF");
    /// The nesting-chunk tag.
    pub const LIST: Self = Self(*b"LIST");
    /// The bank form tag that follows the `RIFF` header.
    pub const SFBK: Self = Self(*b"sfbk");

    /// The metadata list type.
    pub const INFO: Self = Self(*b"INFO");
    /// The sample-data list type.
    pub const SDTA: Self = Self(*b"sdta");
    /// The preset-data list type.
    pub const PDTA: Self = Self(*b"pdta");

    /// The raw sample leaf inside `sdta`.
    pub const SMPL: Self = Self(*b"smpl");

    /// Create a tag from its 4 raw bytes.
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// The raw bytes of the tag.
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// The tag packed as the little-endian `u32` it occupies on disk.
    pub(crate) const fn as_u32(&self) -> u32 {
        u32::from_le_bytes(self.0)
    }
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in &self.0 {
            if byte.is_ascii_graphic() || byte == b' ' {
                f.write_char(byte as char)?;
            } else {
                write!(f, "\\x{byte:02x}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FourCC(\"{self}\")")
    }
}

/// One tag + length unit within the container.
///
/// Transient: produced by [`Chunk::read`] and consumed immediately by
/// the caller, never persisted in decoded structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    tag: FourCC,
    len: u32,
}

impl Chunk {
    const EOF: Self = Self {
        tag: FourCC::new([0; 4]),
        len: 0,
    };

    /// Recognize the next chunk in the stream.
    ///
    /// A short read while fetching the tag returns the sentinel
    /// end-of-data chunk. A `LIST` tag is replaced by its inner type
    /// tag and the reported length excludes those 4 bytes; a leaf
    /// chunk's payload is skipped, leaving the stream at the next
    /// chunk boundary.
    pub fn read<R: AsRef<[u8]>>(reader: &mut Reader<R>) -> ReadResult<Self> {
        let tag = match reader.read_fourcc() {
            Ok(tag) => tag,
            Err(e) if e.is_short_read() => return Ok(Self::EOF),
            Err(e) => return Err(e),
        };
        let len = reader.read_size()?;

        if tag == FourCC::LIST {
            let Some(payload_len) = len.checked_sub(4) else {
                return Err(ReaderError::new(
                    reader.buffer_position(),
                    ReaderErrorKind::chunk(ChunkError::TruncatedList { len }),
                ));
            };
            let kind = reader.read_fourcc()?;
            Ok(Self {
                tag: kind,
                len: payload_len,
            })
        } else {
            reader.skip(len)?;
            Ok(Self { tag, len })
        }
    }

    /// The chunk's tag. For a `LIST` chunk this is the inner type tag.
    pub const fn tag(&self) -> FourCC {
        self.tag
    }

    /// The chunk's payload length in bytes.
    pub const fn len(&self) -> u32 {
        self.len
    }

    /// True if the chunk has no payload.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if this is the sentinel chunk signalling end of data.
    pub const fn is_eof(&self) -> bool {
        self.len == 0 && matches!(self.tag.0, [0, 0, 0, 0])
    }
}

/// The three list types a bank is built from.
#[derive(TryFromPrimitive)]
#[repr(u32)]
enum KnownList {
    Info = 0x4F46_4E49,       // "INFO"
    SampleData = 0x6174_6473, // "sdta"
    PresetData = 0x6174_6470, // "pdta"
}

/// Classification of a top-level list chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListKind {
    /// The `INFO` metadata block.
    Info,
    /// The `sdta` raw-sample block.
    SampleData,
    /// The `pdta` preset/instrument table block.
    PresetData,
    /// A list type this crate does not decode.
    Unknown(FourCC),
}

impl From<FourCC> for ListKind {
    fn from(tag: FourCC) -> Self {
        match KnownList::try_from(tag.as_u32()) {
            Ok(KnownList::Info) => Self::Info,
            Ok(KnownList::SampleData) => Self::SampleData,
            Ok(KnownList::PresetData) => Self::PresetData,
            Err(_) => Self::Unknown(tag),
        }
    }
}

/// A classified top-level list chunk header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListHeader {
    kind: ListKind,
    payload_len: u32,
}

impl ListHeader {
    /// Fetch the next top-level list header.
    ///
    /// Fails with [`ChunkError::ExpectedList`] if the next tag is not
    /// `LIST`, and with [`ChunkError::TruncatedList`] if the declared
    /// length cannot hold the 4-byte type tag. On success the stream
    /// is positioned at the first byte of the list's payload, and
    /// [`ListHeader::payload_len`] is the declared length minus those
    /// 4 type-tag bytes.
    pub fn fetch<R: AsRef<[u8]>>(reader: &mut Reader<R>) -> ReadResult<Self> {
        let tag = reader.read_fourcc()?;
        if tag != FourCC::LIST {
            return Err(ReaderError::new(
                reader.buffer_position(),
                ReaderErrorKind::chunk(ChunkError::ExpectedList { found: tag }),
            ));
        }
        let len = reader.read_size()?;
        let Some(payload_len) = len.checked_sub(4) else {
            return Err(ReaderError::new(
                reader.buffer_position(),
                ReaderErrorKind::chunk(ChunkError::TruncatedList { len }),
            ));
        };
        let kind = ListKind::from(reader.read_fourcc()?);
        Ok(Self { kind, payload_len })
    }

    /// Which block this list holds.
    pub const fn kind(&self) -> ListKind {
        self.kind
    }

    /// The list's payload length, excluding the inner type tag.
    pub const fn payload_len(&self) -> u32 {
        self.payload_len
    }
}
