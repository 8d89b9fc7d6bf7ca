#![doc = r#"
The `INFO` block: bank-wide metadata.

An `INFO` list is a run of small leaf chunks, each holding either a
4-byte version pair (`ifil`, `iver`) or free text (`isng`, `INAM`,
`irom`, `ICRD`, `IENG`, `IPRD`, `ICOP`, `ICMT`, `ISFT`). Text payloads
are NUL-terminated by convention, but the authoritative length is the
chunk's declared length; [`InfoText`] keeps the raw bytes and trims at
the first NUL only when asked for text.

Tags outside the recognized set are skipped payload and all, so the
block's byte budget stays consistent no matter what a writer put in it.
"#]

use crate::{
    ParseError,
    reader::{ReadResult, Reader, ReaderError},
};
use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use num_enum::TryFromPrimitive;

/// A major/minor version pair from an `ifil` or `iver` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Version {
    /// Major version number.
    pub major: u16,
    /// Minor version number.
    pub minor: u16,
}

impl Version {
    /// Decode a version chunk of declared length `len`.
    ///
    /// The version occupies exactly 4 bytes; any declared excess is
    /// skipped so the cursor still matches the declaration. A chunk
    /// too short to hold a version yields `None`.
    fn decode<R: AsRef<[u8]>>(reader: &mut Reader<R>, len: u32) -> ReadResult<Option<Self>> {
        let Some(excess) = len.checked_sub(4) else {
            reader.skip(len)?;
            return Ok(None);
        };
        let [b0, b1, b2, b3] = reader.read_array()?;
        reader.skip(excess)?;
        Ok(Some(Self {
            major: u16::from_le_bytes([b0, b1]),
            minor: u16::from_le_bytes([b2, b3]),
        }))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// The raw text payload of an `INFO` leaf chunk.
///
/// Owns exactly the declared chunk length, trailing NUL included when
/// the file provides one. [`InfoText::to_text`] is the lossy,
/// NUL-trimmed view most callers want.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfoText(Vec<u8>);

impl InfoText {
    fn decode<R: AsRef<[u8]>>(reader: &mut Reader<R>, len: u32) -> ReadResult<Self> {
        let position = reader.buffer_position();
        let payload = reader.read_exact(len as usize)?;
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(payload.len())
            .map_err(|e| ReaderError::parse_error(position, ParseError::Allocation(e)))?;
        bytes.extend_from_slice(payload);
        Ok(Self(bytes))
    }

    /// The raw payload bytes, exactly as declared in the file.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The payload as text: trimmed at the first NUL, lossy-decoded.
    pub fn to_text(&self) -> Cow<'_, str> {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(self.0.len());
        String::from_utf8_lossy(&self.0[..end])
    }

    /// The raw payload length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the chunk declared a zero-length payload.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for InfoText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_text().fmt(f)
    }
}

impl fmt::Debug for InfoText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InfoText").field(&self.to_text()).finish()
    }
}

/// The recognized `INFO` leaf tags.
#[derive(TryFromPrimitive)]
#[repr(u32)]
enum InfoTag {
    FileVersion = 0x6C69_6669, // "ifil"
    Engine = 0x676E_7369,      // "isng"
    Name = 0x4D41_4E49,        // "INAM"
    RomName = 0x6D6F_7269,     // "irom"
    RomVersion = 0x7265_7669,  // "iver"
    CreateDate = 0x4452_4349,  // "ICRD"
    Author = 0x474E_4549,      // "IENG"
    Product = 0x4452_5049,     // "IPRD"
    Copyright = 0x504F_4349,   // "ICOP"
    Comments = 0x544D_4349,    // "ICMT"
    Tools = 0x5446_5349,       // "ISFT"
}

#[doc = r#"
The decoded `INFO` metadata block.

Every field is absent until its tag is encountered; a tag appearing
twice keeps the later value, matching how bank writers treat the block.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfoBlock {
    /// The block's declared payload size in bytes.
    pub declared_size: u32,
    /// Bank format version (`ifil`).
    pub version: Option<Version>,
    /// ROM version (`iver`).
    pub rom_version: Option<Version>,
    /// Target sound engine (`isng`).
    pub engine: Option<InfoText>,
    /// Bank name (`INAM`).
    pub name: Option<InfoText>,
    /// Wavetable ROM name (`irom`).
    pub rom_name: Option<InfoText>,
    /// Creation date (`ICRD`).
    pub create_date: Option<InfoText>,
    /// Author (`IENG`).
    pub author: Option<InfoText>,
    /// Intended product (`IPRD`).
    pub product: Option<InfoText>,
    /// Copyright message (`ICOP`).
    pub copyright: Option<InfoText>,
    /// Comments (`ICMT`).
    pub comments: Option<InfoText>,
    /// Tools used to create the bank (`ISFT`).
    pub tools: Option<InfoText>,
}

impl InfoBlock {
    const fn empty(declared_size: u32) -> Self {
        Self {
            declared_size,
            version: None,
            rom_version: None,
            engine: None,
            name: None,
            rom_name: None,
            create_date: None,
            author: None,
            product: None,
            copyright: None,
            comments: None,
            tools: None,
        }
    }

    /// Decode an `INFO` block from its payload.
    ///
    /// `payload_len` is the list's payload length as reported by
    /// [`ListHeader::fetch`](crate::file::ListHeader::fetch), already
    /// excluding the inner type tag. Decoding walks leaf sub-chunks
    /// until the byte budget is exhausted; a short read or a sub-chunk
    /// declaring more bytes than remain stops the walk early and
    /// returns the fields decoded so far.
    pub fn decode<R: AsRef<[u8]>>(reader: &mut Reader<R>, payload_len: u32) -> ReadResult<Self> {
        let mut block = Self::empty(payload_len);
        let mut budget = payload_len;

        while budget >= 8 {
            match Self::decode_field(reader, &mut block, &mut budget) {
                Ok(()) => {}
                Err(e) if e.is_short_read() => break,
                Err(e) => return Err(e),
            }
        }

        Ok(block)
    }

    fn decode_field<R: AsRef<[u8]>>(
        reader: &mut Reader<R>,
        block: &mut Self,
        budget: &mut u32,
    ) -> ReadResult<()> {
        let tag = reader.read_fourcc()?;
        let len = reader.read_size()?;
        *budget -= 8;

        if len > *budget {
            // the declaration overruns the block; stop before it
            *budget = 0;
            return Ok(());
        }

        match InfoTag::try_from(tag.as_u32()) {
            Ok(InfoTag::FileVersion) => {
                if let Some(version) = Version::decode(reader, len)? {
                    block.version = Some(version);
                }
            }
            Ok(InfoTag::RomVersion) => {
                if let Some(version) = Version::decode(reader, len)? {
                    block.rom_version = Some(version);
                }
            }
            Ok(InfoTag::Engine) => block.engine = Some(InfoText::decode(reader, len)?),
            Ok(InfoTag::Name) => block.name = Some(InfoText::decode(reader, len)?),
            Ok(InfoTag::RomName) => block.rom_name = Some(InfoText::decode(reader, len)?),
            Ok(InfoTag::CreateDate) => block.create_date = Some(InfoText::decode(reader, len)?),
            Ok(InfoTag::Author) => block.author = Some(InfoText::decode(reader, len)?),
            Ok(InfoTag::Product) => block.product = Some(InfoText::decode(reader, len)?),
            Ok(InfoTag::Copyright) => block.copyright = Some(InfoText::decode(reader, len)?),
            Ok(InfoTag::Comments) => block.comments = Some(InfoText::decode(reader, len)?),
            Ok(InfoTag::Tools) => block.tools = Some(InfoText::decode(reader, len)?),
            // unrecognized tag: consume its payload so the budget
            // and the cursor stay in step
            Err(_) => reader.skip(len)?,
        }

        *budget -= len;
        Ok(())
    }
}

impl fmt::Display for InfoBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(version) = &self.version {
            writeln!(f, "version : {version}")?;
        }
        if let Some(rom_version) = &self.rom_version {
            writeln!(f, "rom version : {rom_version}")?;
        }
        let texts = [
            ("engine", &self.engine),
            ("name", &self.name),
            ("rom name", &self.rom_name),
            ("create date", &self.create_date),
            ("author", &self.author),
            ("product", &self.product),
            ("copyright", &self.copyright),
            ("comments", &self.comments),
            ("tools", &self.tools),
        ];
        for (label, text) in texts {
            if let Some(text) = text {
                writeln!(f, "{label} : {text}")?;
            }
        }
        Ok(())
    }
}
