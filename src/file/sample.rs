#![doc = r#"
The `sdta` block: raw sample audio.

The block's payload is a single `smpl` leaf chunk holding the bank's
sample bytes verbatim. The decoder copies them into an owned buffer
and does not interpret them; sample-region boundaries live in the
`pdta` tables.
"#]

use crate::{
    ChunkError, ParseError,
    file::FourCC,
    reader::{ReadResult, Reader, ReaderError, ReaderErrorKind},
};
use alloc::vec::Vec;
use core::fmt;

/// The owned sample bytes of a bank's `sdta` block.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleData {
    bytes: Vec<u8>,
}

impl SampleData {
    /// Decode the `smpl` leaf chunk of an `sdta` block.
    ///
    /// The stream must be positioned at the first byte of the block's
    /// payload. Fails with [`ChunkError::UnexpectedChunk`] if the leaf
    /// is not `smpl`, and with a short read if the stream holds fewer
    /// bytes than the chunk declares.
    pub fn decode<R: AsRef<[u8]>>(reader: &mut Reader<R>) -> ReadResult<Self> {
        let tag = reader.read_fourcc()?;
        if tag != FourCC::SMPL {
            return Err(ReaderError::new(
                reader.buffer_position(),
                ReaderErrorKind::chunk(ChunkError::UnexpectedChunk {
                    expected: FourCC::SMPL,
                    found: tag,
                }),
            ));
        }
        let len = reader.read_size()?;

        let position = reader.buffer_position();
        let payload = reader.read_exact(len as usize)?;
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(payload.len())
            .map_err(|e| ReaderError::parse_error(position, ParseError::Allocation(e)))?;
        bytes.extend_from_slice(payload);

        Ok(Self { bytes })
    }

    /// The raw sample bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The sample buffer length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if the bank carried no sample bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for SampleData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SampleData")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}
