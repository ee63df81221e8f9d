use super::*;
use std::io::Cursor;

fn makers() -> MakerCodes {
    MakerCodes::from_pairs([("01", "Nintendo"), ("78", "THQ")])
}

/// Build a synthetic 64 KB DS ROM with a valid header and no banner.
fn make_nds_rom() -> Vec<u8> {
    let mut rom = vec![0u8; 0x10000];

    // Title at 0x000: "TESTGAME" (12 bytes, null-padded)
    rom[0x000..0x00C].copy_from_slice(b"TESTGAME\0\0\0\0");

    // Game code at 0x00C: "ADAE" (E=USA)
    rom[0x00C..0x010].copy_from_slice(b"ADAE");

    // Maker code at 0x010: "01"
    rom[0x010..0x012].copy_from_slice(b"01");

    // Unit code at 0x012: NDS only
    rom[0x012] = 0x00;

    // Revision at 0x01C
    rom[0x01C] = 0x02;

    // Nintendo logo at 0xC0 and its checksum at 0x15C
    rom[0xC0..0xC0 + 156].copy_from_slice(&NINTENDO_LOGO);
    rom[0x15C..0x15E].copy_from_slice(&EXPECTED_LOGO_CHECKSUM.to_le_bytes());

    rom
}

/// Write a banner at `offset` whose title block holds `title`.
fn add_banner(rom: &mut Vec<u8>, offset: u32, title: &str) {
    rom[0x068..0x06C].copy_from_slice(&offset.to_le_bytes());
    let start = offset as usize + 0x240;
    if rom.len() < start + 128 {
        rom.resize(start + 128, 0);
    }
    let mut encoded = Vec::new();
    for unit in title.encode_utf16() {
        encoded.extend_from_slice(&unit.to_le_bytes());
    }
    encoded.truncate(128);
    rom[start..start + 128].fill(0);
    rom[start..start + encoded.len()].copy_from_slice(&encoded);
}

fn parse(parser: DsParser, rom: Vec<u8>) -> HeaderMetadata {
    parser.parse(&mut Cursor::new(rom), &makers()).unwrap()
}

#[test]
fn test_detect_valid() {
    let rom = make_nds_rom();
    assert!(DsParser::nds().detect(&rom[..0x200]));
    assert!(!DsParser::dsi().detect(&rom[..0x200]));
}

#[test]
fn test_detect_dsi_unit_code() {
    let mut rom = make_nds_rom();
    rom[0x012] = 0x03;
    assert!(DsParser::dsi().detect(&rom));
    assert!(!DsParser::nds().detect(&rom));
}

#[test]
fn test_detect_bad_logo() {
    let mut rom = make_nds_rom();
    rom[0xC0] = 0x00;
    assert!(!DsParser::nds().detect(&rom));
}

#[test]
fn test_detect_too_small() {
    assert!(!DsParser::nds().detect(&[0u8; 0x100]));
}

#[test]
fn test_parse_plain_header() {
    let meta = parse(DsParser::nds(), make_nds_rom());
    assert_eq!(meta.title, "TESTGAME");
    assert_eq!(meta.serial, "ADAE");
    assert_eq!(meta.author, "Nintendo");
    assert_eq!(meta.version, "1.2");
    assert_eq!(meta.region, Region::NtscU);
}

#[test]
fn test_banner_title_overrides_header_title() {
    let mut rom = make_nds_rom();
    add_banner(&mut rom, 0x8000, "Example Game\nSubtitle\nPublisher");
    let meta = parse(DsParser::nds(), rom);
    assert_eq!(meta.title, "Example Game Subtitle Publisher");
}

#[test]
fn test_blank_banner_keeps_header_title() {
    let mut rom = make_nds_rom();
    add_banner(&mut rom, 0x8000, "\n\u{1}");
    let meta = parse(DsParser::nds(), rom);
    assert_eq!(meta.title, "TESTGAME");
}

#[test]
fn test_banner_beyond_end_of_file_is_ignored() {
    let mut rom = make_nds_rom();
    rom[0x068..0x06C].copy_from_slice(&0x00F0_0000u32.to_le_bytes());
    let meta = parse(DsParser::nds(), rom);
    assert_eq!(meta.title, "TESTGAME");
}

#[test]
fn test_unknown_maker_code() {
    let mut rom = make_nds_rom();
    rom[0x010..0x012].copy_from_slice(b"QQ");
    let meta = parse(DsParser::nds(), rom);
    assert_eq!(meta.author, "Code QQ");
}

#[test]
fn test_latin1_title_and_newlines() {
    let mut rom = make_nds_rom();
    rom[0x000..0x00C].copy_from_slice(b"CAF\xC9\r\nGAME\0\0");
    let meta = parse(DsParser::nds(), rom);
    assert_eq!(meta.title, "CAFÉ GAME");
}

#[test]
fn test_lowercase_game_code_is_normalized() {
    let mut rom = make_nds_rom();
    rom[0x00C..0x010].copy_from_slice(b"adaj");
    let meta = parse(DsParser::nds(), rom);
    assert_eq!(meta.serial, "ADAJ");
    assert_eq!(meta.region, Region::NtscJ);
}

#[test]
fn test_truncated_header_uses_defaults() {
    let rom = make_nds_rom()[..0x0E].to_vec();
    let meta = parse(DsParser::nds(), rom);
    assert_eq!(meta.title, "TESTGAME");
    assert_eq!(meta.serial, "AD");
    assert_eq!(meta.region, Region::Any);
    assert_eq!(meta.author, "Unknown");
    assert_eq!(meta.version, "1.0");
}

#[test]
fn test_blank_header_title_is_unknown() {
    let mut rom = make_nds_rom();
    rom[0x000..0x00C].fill(0);
    let meta = parse(DsParser::nds(), rom);
    assert_eq!(meta.title, "Unknown");
}

#[test]
fn test_empty_file_is_an_error() {
    let result = DsParser::nds().parse(&mut Cursor::new(Vec::new()), &makers());
    assert!(matches!(result, Err(HeaderError::TooSmall { .. })));
}

#[test]
fn test_dsi_parser_reports_dsi_platform() {
    assert_eq!(DsParser::dsi().platform(), Platform::Dsi);
    assert_eq!(DsParser::nds().platform(), Platform::Nds);
}
