use fontix::prelude::*;
use pretty_assertions::assert_eq;

fn leaf(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(tag);
    bytes.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    bytes.extend_from_slice(payload);
    bytes
}

fn list(kind: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"LIST");
    bytes.extend_from_slice(&(payload.len() as u32 + 4).to_le_bytes());
    bytes.extend_from_slice(kind);
    bytes.extend_from_slice(payload);
    bytes
}

fn riff(body: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(body.len() as u32 + 4).to_le_bytes());
    bytes.extend_from_slice(b"sfbk");
    bytes.extend_from_slice(body);
    bytes
}

fn info_payload() -> Vec<u8> {
    let mut payload = leaf(b"ifil", &[2, 0, 1, 0]);
    payload.extend_from_slice(&leaf(b"INAM", b"Test Bank\0"));
    payload.extend_from_slice(&leaf(b"ISFT", b"fontix\0"));
    payload
}

fn sdta_payload(samples: &[u8]) -> Vec<u8> {
    leaf(b"smpl", samples)
}

fn pdta_payload() -> Vec<u8> {
    let mut phdr = [0u8; 76];
    phdr[..6].copy_from_slice(b"Grand\0");
    phdr[38..42].copy_from_slice(b"EOP\0");
    phdr[62..64].copy_from_slice(&1u16.to_le_bytes());

    let mut payload = leaf(b"phdr", &phdr);
    payload.extend_from_slice(&leaf(b"pbag", &[0, 0, 0, 0, 1, 0, 0, 0]));
    payload.extend_from_slice(&leaf(b"pmod", &[0; 10]));
    payload.extend_from_slice(&leaf(b"pgen", &[41, 0, 0, 0]));
    payload.extend_from_slice(&leaf(b"inst", &{
        let mut inst = [0u8; 22];
        inst[..6].copy_from_slice(b"Piano\0");
        inst
    }));
    payload.extend_from_slice(&leaf(b"ibag", &[0; 4]));
    payload.extend_from_slice(&leaf(b"imod", &[0; 10]));
    payload.extend_from_slice(&leaf(b"igen", &[53, 0, 0, 0]));
    payload
}

fn test_bank() -> Vec<u8> {
    let mut body = list(b"INFO", &info_payload());
    body.extend_from_slice(&list(b"sdta", &sdta_payload(&[1, 2, 3, 4, 5, 6, 7, 8])));
    body.extend_from_slice(&list(b"pdta", &pdta_payload()));
    riff(&body)
}

#[test]
fn parses_a_whole_bank() {
    let bank = SoundFont::parse(&test_bank()).unwrap();

    let info = bank.info();
    assert_eq!(info.version, Some(Version { major: 2, minor: 1 }));
    assert_eq!(info.name.as_ref().unwrap().to_text(), "Test Bank");
    assert_eq!(info.tools.as_ref().unwrap().to_text(), "fontix");
    assert_eq!(info.rom_name, None);

    assert_eq!(bank.sample_data().bytes(), &[1, 2, 3, 4, 5, 6, 7, 8]);

    let tables = bank.preset_tables();
    assert_eq!(tables.preset_headers.len(), 2);
    assert_eq!(tables.preset_headers[0].name.to_text(), "Grand");
    assert_eq!(tables.preset_headers[1].name.to_text(), "EOP");
    assert_eq!(tables.preset_headers[1].bag_index, 1);
    assert_eq!(tables.preset_bags.len(), 2);
    assert_eq!(tables.preset_generators, vec![Generator { operator: 41, amount: 0 }]);
    assert_eq!(tables.instrument_headers[0].name.to_text(), "Piano");
    assert_eq!(tables.instrument_generators, vec![Generator { operator: 53, amount: 0 }]);
}

#[test]
fn decoding_is_idempotent() {
    let bytes = test_bank();
    let first = SoundFont::parse(&bytes).unwrap();
    let second = SoundFont::parse(&bytes).unwrap();
    assert_eq!(first, second);
}

#[test]
fn rejects_a_non_riff_header() {
    let mut bytes = test_bank();
    bytes[..4].copy_from_slice(b"RIFX");

    let err = SoundFont::parse(&bytes).unwrap_err();
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::ParseError(ParseError::Chunk(ChunkError::UnexpectedChunk {
            expected,
            ..
        })) if *expected == FourCC::RIFF
    ));
}

#[test]
fn missing_preset_block_is_reported() {
    let mut body = list(b"INFO", &info_payload());
    body.extend_from_slice(&list(b"sdta", &sdta_payload(&[0, 0])));
    let bytes = riff(&body);

    let err = SoundFont::parse(&bytes).unwrap_err();
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::ParseError(ParseError::Bank(BankError::NoPresetTables))
    ));
}

#[test]
fn duplicate_blocks_are_rejected() {
    let mut body = list(b"INFO", &info_payload());
    body.extend_from_slice(&list(b"INFO", &info_payload()));
    body.extend_from_slice(&list(b"sdta", &sdta_payload(&[0, 0])));
    body.extend_from_slice(&list(b"pdta", &pdta_payload()));
    let bytes = riff(&body);

    let err = SoundFont::parse(&bytes).unwrap_err();
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::ParseError(ParseError::Chunk(ChunkError::DuplicateBlock(
            ListKind::Info
        )))
    ));
}

#[test]
fn unknown_list_types_are_skipped() {
    let mut body = list(b"INFO", &info_payload());
    body.extend_from_slice(&list(b"xtra", &[0xEE; 25]));
    body.extend_from_slice(&list(b"sdta", &sdta_payload(&[0, 0])));
    body.extend_from_slice(&list(b"pdta", &pdta_payload()));
    let bytes = riff(&body);

    let bank = SoundFont::parse(&bytes).unwrap();
    assert_eq!(bank.sample_data().len(), 2);
}

#[test]
fn trailing_sdta_chunks_do_not_desync_the_stream() {
    let mut sdta = sdta_payload(&[1, 2, 3, 4]);
    // a 24-bit sample supplement after smpl
    sdta.extend_from_slice(&leaf(b"sm24", &[9, 9]));

    let mut body = list(b"INFO", &info_payload());
    body.extend_from_slice(&list(b"sdta", &sdta));
    body.extend_from_slice(&list(b"pdta", &pdta_payload()));
    let bytes = riff(&body);

    let bank = SoundFont::parse(&bytes).unwrap();
    assert_eq!(bank.sample_data().bytes(), &[1, 2, 3, 4]);
    assert_eq!(bank.preset_tables().preset_headers.len(), 2);
}

#[test]
fn truncated_file_is_a_short_read() {
    let bytes = test_bank();
    let err = SoundFont::parse(&bytes[..bytes.len() - 30]).unwrap_err();
    assert!(err.is_short_read());
}
