#![doc = r#"
Rusty representation of a [`SoundFont`] bank
"#]

/// Contains the [`SoundFontBuilder`](crate::file::builder::SoundFontBuilder)
/// that assembles a bank from its decoded blocks.
pub mod builder;

mod chunk;
pub use chunk::*;

mod info;
pub use info::*;

mod sample;
pub use sample::*;

mod pdta;
pub use pdta::*;

use crate::{
    ChunkError, ParseError,
    file::builder::SoundFontBuilder,
    reader::{ReadResult, Reader, ReaderError, ReaderErrorKind},
};

#[doc = r#"
A fully decoded instrument bank.

Owns all three decoded blocks. Dropping the bank releases every
buffer; nothing is shared with the source bytes.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundFont {
    info: InfoBlock,
    sample_data: SampleData,
    preset_tables: PresetTables,
}

impl SoundFont {
    /// Parse a set of bytes into a bank struct.
    pub fn parse(bytes: &[u8]) -> ReadResult<Self> {
        let mut reader = Reader::from_byte_slice(bytes);
        Self::decode(&mut reader)
    }

    /// Read and parse a bank file from disk.
    #[cfg(feature = "std")]
    pub fn open(path: impl AsRef<std::path::Path>) -> ReadResult<Self> {
        let bytes =
            std::fs::read(path).map_err(|e| ReaderError::new(0, ReaderErrorKind::Io(e)))?;
        let mut reader = Reader::from_bytes(bytes);
        Self::decode(&mut reader)
    }

    /// Decode a bank from a reader positioned at the `RIFF` tag.
    ///
    /// Validates the `RIFF`/`sfbk` framing, then fetches top-level
    /// lists until the stream ends, routing each known block to its
    /// decoder and skipping unknown list types. Each block's payload
    /// is consumed exactly, so a conforming file leaves the reader at
    /// the end of the container.
    pub fn decode<R: AsRef<[u8]>>(reader: &mut Reader<R>) -> ReadResult<Self> {
        expect_tag(reader, FourCC::RIFF)?;
        let _declared_total = reader.read_size()?;
        expect_tag(reader, FourCC::SFBK)?;

        let mut builder = SoundFontBuilder::default();

        loop {
            let start = reader.buffer_position();
            let header = match ListHeader::fetch(reader) {
                Ok(header) => header,
                // a clean end of data, before any header byte
                Err(e) if e.is_short_read() && reader.buffer_position() == start => break,
                Err(e) => return Err(e),
            };

            let payload_len = header.payload_len();
            let payload_start = reader.buffer_position();

            match header.kind() {
                ListKind::Info => {
                    let block = InfoBlock::decode(reader, payload_len)?;
                    skip_remainder(reader, payload_start, payload_len)?;
                    builder.handle_info(block).map_err(|e| chunk_error(reader, e))?;
                }
                ListKind::SampleData => {
                    let samples = SampleData::decode(reader)?;
                    // tolerate trailing sdta chunks, e.g. a 24-bit
                    // sample supplement
                    skip_remainder(reader, payload_start, payload_len)?;
                    builder
                        .handle_sample_data(samples)
                        .map_err(|e| chunk_error(reader, e))?;
                }
                ListKind::PresetData => {
                    let tables = PresetTables::decode(reader, payload_len)?;
                    skip_remainder(reader, payload_start, payload_len)?;
                    builder
                        .handle_preset_tables(tables)
                        .map_err(|e| chunk_error(reader, e))?;
                }
                ListKind::Unknown(_) => reader.skip(payload_len)?,
            }
        }

        builder.build().map_err(|k| {
            ReaderError::new(
                reader.buffer_position(),
                ReaderErrorKind::ParseError(ParseError::Bank(k)),
            )
        })
    }

    /// Returns the bank's metadata block.
    pub fn info(&self) -> &InfoBlock {
        &self.info
    }

    /// Returns the bank's raw sample data.
    pub fn sample_data(&self) -> &SampleData {
        &self.sample_data
    }

    /// Returns the bank's preset and instrument tables.
    pub fn preset_tables(&self) -> &PresetTables {
        &self.preset_tables
    }

    /// Consumes the bank, returning its three blocks.
    pub fn into_parts(self) -> (InfoBlock, SampleData, PresetTables) {
        (self.info, self.sample_data, self.preset_tables)
    }
}

fn expect_tag<R: AsRef<[u8]>>(reader: &mut Reader<R>, expected: FourCC) -> ReadResult<()> {
    let found = reader.read_fourcc()?;
    if found != expected {
        return Err(chunk_error(
            reader,
            ChunkError::UnexpectedChunk { expected, found },
        ));
    }
    Ok(())
}

fn chunk_error<R: AsRef<[u8]>>(reader: &Reader<R>, error: ChunkError) -> ReaderError {
    ReaderError::new(reader.buffer_position(), ReaderErrorKind::chunk(error))
}

/// Skip whatever a block decoder left unconsumed of its list payload.
fn skip_remainder<R: AsRef<[u8]>>(
    reader: &mut Reader<R>,
    payload_start: usize,
    payload_len: u32,
) -> ReadResult<()> {
    let consumed = (reader.buffer_position() - payload_start) as u32;
    if let Some(rest) = payload_len.checked_sub(consumed) {
        reader.skip(rest)?;
    }
    Ok(())
}
