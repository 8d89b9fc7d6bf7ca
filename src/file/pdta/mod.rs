#![doc = r#"
The `pdta` block: preset and instrument definition tables.

A `pdta` list holds exactly eight leaf sub-chunks in a mandatory
order — `phdr`, `pbag`, `pmod`, `pgen`, `inst`, `ibag`, `imod`,
`igen` — each an array of fixed-width records. The headers name
presets and instruments; the bags pair each of them to a contiguous
slice of generator and modulator records.

Decoding validates that every sub-chunk's declared length is a
positive multiple of its record width. A violation is a hard
[`TableError::Misaligned`] failure, because a misdeclared table length
means every byte after it would be read out of frame. A sub-chunk
whose tag is out of order is tolerated: its payload is skipped and the
corresponding table is left empty.
"#]

mod record;
pub use record::*;

use crate::{
    ParseError, TableError,
    file::FourCC,
    reader::{ReadResult, Reader, ReaderError, ReaderErrorKind},
};
use alloc::vec::Vec;

impl FourCC {
    const PHDR: Self = Self::new(*b"phdr");
    const PBAG: Self = Self::new(*b"pbag");
    const PMOD: Self = Self::new(*b"pmod");
    const PGEN: Self = Self::new(*b"pgen");
    const INST: Self = Self::new(*b"inst");
    const IBAG: Self = Self::new(*b"ibag");
    const IMOD: Self = Self::new(*b"imod");
    const IGEN: Self = Self::new(*b"igen");
}

#[doc = r#"
The eight decoded record tables of a `pdta` block.

Record indices cross-reference between tables: a [`PresetHeader`]'s
`bag_index` points into `preset_bags`, whose entries point into
`preset_generators` and `preset_modulators`, and likewise on the
instrument side. The crate decodes the indices without resolving them.
"#]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PresetTables {
    /// `phdr`: the preset headers.
    pub preset_headers: Vec<PresetHeader>,
    /// `pbag`: preset index ranges.
    pub preset_bags: Vec<BagEntry>,
    /// `pmod`: preset modulators.
    pub preset_modulators: Vec<Modulator>,
    /// `pgen`: preset generators.
    pub preset_generators: Vec<Generator>,
    /// `inst`: the instrument headers.
    pub instrument_headers: Vec<InstrumentHeader>,
    /// `ibag`: instrument index ranges.
    pub instrument_bags: Vec<BagEntry>,
    /// `imod`: instrument modulators.
    pub instrument_modulators: Vec<Modulator>,
    /// `igen`: instrument generators.
    pub instrument_generators: Vec<Generator>,
}

impl PresetTables {
    /// Decode a `pdta` block from its payload.
    ///
    /// `payload_len` is the list's payload length as reported by
    /// [`ListHeader::fetch`](crate::file::ListHeader::fetch), already
    /// excluding the inner type tag.
    pub fn decode<R: AsRef<[u8]>>(reader: &mut Reader<R>, payload_len: u32) -> ReadResult<Self> {
        let mut tables = Self::default();
        tables.decode_into(reader, payload_len)?;
        Ok(tables)
    }

    /// Decode a `pdta` block into caller-owned tables.
    ///
    /// On failure, tables decoded before the failing sub-chunk keep
    /// their records and remain accessible; the failing table and
    /// everything after it are untouched.
    pub fn decode_into<R: AsRef<[u8]>>(
        &mut self,
        reader: &mut Reader<R>,
        payload_len: u32,
    ) -> ReadResult<()> {
        let mut budget = payload_len;

        self.preset_headers = decode_table(reader, FourCC::PHDR, &mut budget)?;
        self.preset_bags = decode_table(reader, FourCC::PBAG, &mut budget)?;
        self.preset_modulators = decode_table(reader, FourCC::PMOD, &mut budget)?;
        self.preset_generators = decode_table(reader, FourCC::PGEN, &mut budget)?;
        self.instrument_headers = decode_table(reader, FourCC::INST, &mut budget)?;
        self.instrument_bags = decode_table(reader, FourCC::IBAG, &mut budget)?;
        self.instrument_modulators = decode_table(reader, FourCC::IMOD, &mut budget)?;
        self.instrument_generators = decode_table(reader, FourCC::IGEN, &mut budget)?;

        Ok(())
    }
}

/// Decode one fixed-record sub-chunk.
///
/// `budget` is the remaining byte count of the parent `pdta` payload;
/// the sub-chunk's 8 header bytes and its declared length are deducted
/// from it. A sub-chunk declaring more bytes than the budget holds is
/// reported as a short read rather than decoded past the region
/// boundary. A tag other than `expected` skips the sub-chunk and
/// yields an empty table.
fn decode_table<T: FixedRecord, R: AsRef<[u8]>>(
    reader: &mut Reader<R>,
    expected: FourCC,
    budget: &mut u32,
) -> ReadResult<Vec<T>> {
    let Some(rest) = budget.checked_sub(8) else {
        return Err(ReaderError::short(reader.buffer_position()));
    };
    let tag = reader.read_fourcc()?;
    let len = reader.read_size()?;
    *budget = rest;

    if len > *budget {
        return Err(ReaderError::short(reader.buffer_position()));
    }
    *budget -= len;

    if tag != expected {
        // out-of-order sub-chunk: leave this table empty, stay aligned
        reader.skip(len)?;
        return Ok(Vec::new());
    }

    if len == 0 || !len.is_multiple_of(T::WIDTH) {
        return Err(ReaderError::new(
            reader.buffer_position(),
            ReaderErrorKind::table(TableError::Misaligned {
                tag,
                len,
                width: T::WIDTH,
            }),
        ));
    }

    let count = (len / T::WIDTH) as usize;
    let mut records = Vec::new();
    records
        .try_reserve_exact(count)
        .map_err(|e| ReaderError::parse_error(reader.buffer_position(), ParseError::Allocation(e)))?;

    for _ in 0..count {
        let bytes = reader.read_exact(T::WIDTH as usize)?;
        records.push(T::decode(bytes));
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use pretty_assertions::assert_eq;

    fn leaf(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(tag);
        bytes.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        bytes.extend_from_slice(payload);
        bytes
    }

    /// A well-formed pdta payload with one record per table.
    fn minimal_pdta() -> Vec<u8> {
        let mut bytes = Vec::new();
        for (tag, width) in [
            (b"phdr", 38usize),
            (b"pbag", 4),
            (b"pmod", 10),
            (b"pgen", 4),
            (b"inst", 22),
            (b"ibag", 4),
            (b"imod", 10),
            (b"igen", 4),
        ] {
            bytes.extend_from_slice(&leaf(tag, &alloc::vec![0u8; width]));
        }
        bytes
    }

    #[test]
    fn decodes_all_eight_tables() {
        let bytes = minimal_pdta();
        let mut reader = Reader::from_byte_slice(&bytes);

        let tables = PresetTables::decode(&mut reader, bytes.len() as u32).unwrap();
        assert_eq!(tables.preset_headers.len(), 1);
        assert_eq!(tables.preset_bags.len(), 1);
        assert_eq!(tables.preset_modulators.len(), 1);
        assert_eq!(tables.preset_generators.len(), 1);
        assert_eq!(tables.instrument_headers.len(), 1);
        assert_eq!(tables.instrument_bags.len(), 1);
        assert_eq!(tables.instrument_modulators.len(), 1);
        assert_eq!(tables.instrument_generators.len(), 1);
        // the whole payload budget must be consumed
        assert_eq!(reader.buffer_position(), bytes.len());
    }

    #[test]
    fn record_count_follows_declared_length() {
        let mut bytes = leaf(b"phdr", &alloc::vec![0u8; 76]);
        for (tag, width) in [
            (b"pbag", 4usize),
            (b"pmod", 10),
            (b"pgen", 4),
            (b"inst", 22),
            (b"ibag", 4),
            (b"imod", 10),
            (b"igen", 4),
        ] {
            bytes.extend_from_slice(&leaf(tag, &alloc::vec![0u8; width]));
        }
        let mut reader = Reader::from_byte_slice(&bytes);

        let tables = PresetTables::decode(&mut reader, bytes.len() as u32).unwrap();
        // 76 / 38
        assert_eq!(tables.preset_headers.len(), 2);
    }

    #[test]
    fn misaligned_length_fails_and_keeps_earlier_tables() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&leaf(b"phdr", &alloc::vec![0u8; 38]));
        bytes.extend_from_slice(&leaf(b"pbag", &[1, 0, 2, 0]));
        bytes.extend_from_slice(&leaf(b"pmod", &alloc::vec![0u8; 10]));
        // 6 is not a multiple of the 4-byte generator width
        bytes.extend_from_slice(&leaf(b"pgen", &[0; 6]));
        let mut reader = Reader::from_byte_slice(&bytes);

        let mut tables = PresetTables::default();
        let err = tables
            .decode_into(&mut reader, bytes.len() as u32)
            .unwrap_err();

        assert!(matches!(
            err.error_kind(),
            ReaderErrorKind::ParseError(ParseError::Table(TableError::Misaligned {
                len: 6,
                width: 4,
                ..
            }))
        ));
        assert_eq!(tables.preset_headers.len(), 1);
        assert_eq!(
            tables.preset_bags,
            alloc::vec![BagEntry {
                generator_index: 1,
                modulator_index: 2,
            }]
        );
        assert_eq!(tables.preset_modulators.len(), 1);
        assert_eq!(tables.preset_generators.len(), 0);
    }

    #[test]
    fn out_of_order_tag_leaves_table_empty() {
        let mut bytes = minimal_pdta();
        // overwrite the pbag tag at offset 46 (phdr header + payload)
        bytes[46..50].copy_from_slice(b"oops");
        let mut reader = Reader::from_byte_slice(&bytes);

        let tables = PresetTables::decode(&mut reader, bytes.len() as u32).unwrap();
        assert_eq!(tables.preset_bags.len(), 0);
        // the walk stays aligned for every later table
        assert_eq!(tables.instrument_generators.len(), 1);
        assert_eq!(reader.buffer_position(), bytes.len());
    }

    #[test]
    fn sub_chunk_cannot_overrun_the_block() {
        // phdr declares 38 bytes but the block budget ends first
        let bytes = leaf(b"phdr", &alloc::vec![0u8; 38]);
        let mut reader = Reader::from_byte_slice(&bytes);

        let err = PresetTables::decode(&mut reader, 20).unwrap_err();
        assert!(err.is_short_read());
    }

    #[test]
    fn zero_length_table_is_misaligned() {
        let mut bytes = leaf(b"phdr", &[]);
        bytes.extend_from_slice(&leaf(b"pbag", &[0; 4]));
        let mut reader = Reader::from_byte_slice(&bytes);

        let err = PresetTables::decode(&mut reader, bytes.len() as u32).unwrap_err();
        assert!(matches!(
            err.error_kind(),
            ReaderErrorKind::ParseError(ParseError::Table(TableError::Misaligned {
                len: 0,
                ..
            }))
        ));
    }
}
