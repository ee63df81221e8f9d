use super::*;
use std::io::Cursor;

/// Build a synthetic 256 KB GBA ROM with a valid header.
fn make_gba_rom() -> Vec<u8> {
    let mut rom = vec![0u8; 256 * 1024];

    // Entry point (ARM branch instruction placeholder)
    rom[0x03] = 0xEA;

    // Nintendo logo at 0x04
    rom[0x04..0x04 + 156].copy_from_slice(&NINTENDO_LOGO);

    // Title at 0xA0: "TESTGAME" (12 bytes, null-padded)
    rom[0xA0..0xAC].copy_from_slice(b"TESTGAME\0\0\0\0");

    // Game code at 0xAC: "ATEP" (P=Europe)
    rom[0xAC..0xB0].copy_from_slice(b"ATEP");

    // Maker code at 0xB0: "78"
    rom[0xB0..0xB2].copy_from_slice(b"78");

    // Fixed value at 0xB2
    rom[0xB2] = FIXED_VALUE;

    // Software version at 0xBC
    rom[0xBC] = 0x01;

    rom
}

fn parse(rom: Vec<u8>) -> HeaderMetadata {
    let makers = MakerCodes::from_pairs([("78", "THQ")]);
    GbaParser::new()
        .parse(&mut Cursor::new(rom), &makers)
        .unwrap()
}

#[test]
fn test_detect_valid() {
    assert!(GbaParser::new().detect(&make_gba_rom()[..0x200]));
}

#[test]
fn test_detect_too_small() {
    assert!(!GbaParser::new().detect(&[0u8; 0x80]));
}

#[test]
fn test_detect_bad_fixed_value() {
    let mut rom = make_gba_rom();
    rom[0xB2] = 0x00;
    assert!(!GbaParser::new().detect(&rom));
}

#[test]
fn test_parse_header_fields() {
    let meta = parse(make_gba_rom());
    assert_eq!(meta.title, "TESTGAME");
    assert_eq!(meta.serial, "ATEP");
    assert_eq!(meta.author, "THQ");
    assert_eq!(meta.version, "1.1");
    assert_eq!(meta.region, Region::Pal);
}

#[test]
fn test_header_only_file() {
    let rom = make_gba_rom()[..0xB0].to_vec();
    let meta = parse(rom);
    assert_eq!(meta.serial, "ATEP");
    assert_eq!(meta.author, "Unknown");
    assert_eq!(meta.version, "1.0");
}

#[test]
fn test_unknown_region_char() {
    let mut rom = make_gba_rom();
    rom[0xAC..0xB0].copy_from_slice(b"ATEZ");
    assert_eq!(parse(rom).region, Region::Any);
}
