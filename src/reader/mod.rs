#![doc = r#"
A forward-only cursor over the bytes of a bank file.

[`Reader`] is the sole I/O primitive of the crate: every decoder takes
`&mut Reader` and advances the same position, so a decode session owns
the stream exclusively for its duration. The two primitives every
higher layer is built from are [`Reader::read_fourcc`] (a 4-byte tag)
and [`Reader::read_size`] (a little-endian `u32` length).
"#]

mod error;
pub use error::*;

use crate::file::FourCC;
use alloc::borrow::Cow;

#[doc = r#"
Reads bank data from an in-memory byte source.

The reader tracks a single current position. Reads either return the
requested bytes and advance the position, or fail with
[`ReaderErrorKind::ShortRead`] and leave the position where it was.
"#]
#[derive(Debug, Clone)]
pub struct Reader<R> {
    source: R,
    position: usize,
}

impl<'a> Reader<Cow<'a, [u8]>> {
    /// Create a reader over owned or borrowed bytes.
    pub fn from_bytes<B>(bytes: B) -> Self
    where
        B: Into<Cow<'a, [u8]>>,
    {
        Self {
            source: bytes.into(),
            position: 0,
        }
    }
}

impl<'a> Reader<&'a [u8]> {
    /// Create a reader borrowing a byte slice.
    pub const fn from_byte_slice(bytes: &'a [u8]) -> Self {
        Self {
            source: bytes,
            position: 0,
        }
    }
}

impl<R: AsRef<[u8]>> Reader<R> {
    /// Returns the current position into the underlying bytes.
    pub fn buffer_position(&self) -> usize {
        self.position
    }

    /// Read exactly `n` bytes, advancing the position.
    pub(crate) fn read_exact(&mut self, n: usize) -> ReadResult<&[u8]> {
        let data = self.source.as_ref();
        let bytes = self
            .position
            .checked_add(n)
            .and_then(|end| data.get(self.position..end))
            .ok_or(ReaderError::short(self.position))?;
        self.position += n;
        Ok(bytes)
    }

    /// Read a fixed-size array, advancing the position.
    pub(crate) fn read_array<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let bytes = self.read_exact(N)?;
        let mut array = [0; N];
        array.copy_from_slice(bytes);
        Ok(array)
    }

    /// Read a 4-character chunk tag.
    pub fn read_fourcc(&mut self) -> ReadResult<FourCC> {
        self.read_array().map(FourCC::new)
    }

    /// Read a little-endian `u32` chunk length.
    pub fn read_size(&mut self) -> ReadResult<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    /// Advance past `n` payload bytes without decoding them.
    pub(crate) fn skip(&mut self, n: u32) -> ReadResult<()> {
        self.read_exact(n as usize).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_advance_the_position() {
        let mut reader = Reader::from_byte_slice(&[b'R', b'I', b'F', b'F', 0x10, 0, 0, 0]);
        assert_eq!(reader.read_fourcc().unwrap(), FourCC::RIFF);
        assert_eq!(reader.buffer_position(), 4);
        assert_eq!(reader.read_size().unwrap(), 16);
        assert_eq!(reader.buffer_position(), 8);
    }

    #[test]
    fn short_read_leaves_position_untouched() {
        let mut reader = Reader::from_byte_slice(&[1, 2]);
        let err = reader.read_size().unwrap_err();
        assert!(err.is_short_read());
        assert_eq!(reader.buffer_position(), 0);
    }
}
