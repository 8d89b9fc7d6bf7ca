#![doc = r#"
SoundFont bank structures designed for humans.

`fontix` decodes the RIFF-style chunked container used by SoundFont 2
instrument banks into plain owned Rust values: the `INFO` metadata block,
the raw sample buffer, and the eight preset/instrument tables of the
`pdta` block.

# Overview

A bank file is a tree of chunks. Every chunk starts with a 4-character
tag and a little-endian `u32` length; the special `LIST` tag nests
further chunks under a 4-byte sub-type tag. `fontix` walks that tree
with a single forward cursor ([`Reader`](crate::reader::Reader)) and
never reads past a declared region boundary.

# Example

```rust
use fontix::prelude::*;

# fn main() -> Result<(), Box<dyn std::error::Error>> {
# let bytes = fontix_test_bank();
let bank = SoundFont::parse(&bytes)?;

println!("{}", bank.info());
println!("{} sample bytes", bank.sample_data().len());
println!("{} presets", bank.preset_tables().preset_headers.len());
# Ok(())
# }
# fn fontix_test_bank() -> Vec<u8> {
#     let mut v = Vec::new();
#     v.extend_from_slice(b"RIFF");
#     let mut body = Vec::new();
#     body.extend_from_slice(b"sfbk");
#     for (kind, inner) in [
#         (*b"INFO", {
#             let mut i = Vec::new();
#             i.extend_from_slice(b"ifil");
#             i.extend_from_slice(&4u32.to_le_bytes());
#             i.extend_from_slice(&[2, 0, 1, 0]);
#             i
#         }),
#         (*b"sdta", {
#             let mut s = Vec::new();
#             s.extend_from_slice(b"smpl");
#             s.extend_from_slice(&2u32.to_le_bytes());
#             s.extend_from_slice(&[0, 0]);
#             s
#         }),
#         (*b"pdta", {
#             let mut p = Vec::new();
#             for (tag, width) in [
#                 (*b"phdr", 38u32),
#                 (*b"pbag", 4),
#                 (*b"pmod", 10),
#                 (*b"pgen", 4),
#                 (*b"inst", 22),
#                 (*b"ibag", 4),
#                 (*b"imod", 10),
#                 (*b"igen", 4),
#             ] {
#                 p.extend_from_slice(&tag);
#                 p.extend_from_slice(&width.to_le_bytes());
#                 p.extend_from_slice(&vec![0u8; width as usize]);
#             }
#             p
#         }),
#     ] {
#         body.extend_from_slice(b"LIST");
#         body.extend_from_slice(&(inner.len() as u32 + 4).to_le_bytes());
#         body.extend_from_slice(&kind);
#         body.extend_from_slice(&inner);
#     }
#     v.extend_from_slice(&(body.len() as u32).to_le_bytes());
#     v.extend_from_slice(&body);
#     v
# }
```

Individual blocks can also be decoded directly from a [`Reader`] via
[`InfoBlock::decode`], [`SampleData::decode`] and
[`PresetTables::decode`] when the caller drives the chunk walk itself.

[`Reader`]: crate::reader::Reader
[`InfoBlock::decode`]: crate::file::InfoBlock::decode
[`SampleData::decode`]: crate::file::SampleData::decode
[`PresetTables::decode`]: crate::file::PresetTables::decode
"#]
#![no_std]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod reader;

pub mod file;

mod error;
pub use error::*;

/// Commonly used types, glob-importable.
pub mod prelude {
    pub use crate::error::*;
    pub use crate::file::*;
    pub use crate::reader::{ReadResult, Reader, ReaderError, ReaderErrorKind};
}
