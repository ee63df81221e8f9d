use super::*;
use crate::test_support::{gba_rom, nds_rom};

#[test]
fn test_registry_has_all_platforms() {
    let registry = ParserRegistry::nintendo();
    for platform in Platform::all() {
        let parser = registry.get(*platform).unwrap();
        assert_eq!(parser.platform(), *platform);
    }
}

#[test]
fn test_register_replaces_same_platform() {
    let mut registry = ParserRegistry::nintendo();
    registry.register(GbaParser::new());
    assert_eq!(registry.platforms().filter(|p| *p == Platform::Gba).count(), 1);
}

#[test]
fn test_parse_bytes_nds() {
    let registry = ParserRegistry::nintendo();
    let meta = registry.parse_bytes(Platform::Nds, &nds_rom("EXAMPLE", "ADAE", "01"), &builtin_maker_codes());
    assert_eq!(meta.title, "EXAMPLE");
    assert_eq!(meta.serial, "ADAE");
    assert_eq!(meta.author, "Nintendo");
    assert_eq!(meta.version, "1.1");
}

#[test]
fn test_parse_empty_input_defaults() {
    let registry = ParserRegistry::nintendo();
    let meta = registry.parse_bytes(Platform::Nds, &[], &MakerCodes::new());
    assert_eq!(meta, HeaderMetadata::default());
}

#[test]
fn test_parse_unregistered_platform_defaults() {
    let registry = ParserRegistry::new();
    let meta = registry.parse_bytes(Platform::Gba, &gba_rom("POCKET", "BPEE", "01"), &MakerCodes::new());
    assert_eq!(meta, HeaderMetadata::default());
}

#[test]
fn test_detect() {
    let registry = ParserRegistry::nintendo();
    assert_eq!(registry.detect(&nds_rom("A", "ADAE", "01")), Some(Platform::Nds));
    assert_eq!(registry.detect(&gba_rom("B", "BPEE", "01")), Some(Platform::Gba));

    let mut dsi = nds_rom("C", "KQ9E", "01");
    dsi[0x12] = 0x03;
    assert_eq!(registry.detect(&dsi), Some(Platform::Dsi));

    assert_eq!(registry.detect(&[0u8; 0x200]), None);
}

#[test]
fn test_context_with_reference() {
    let mut reference = ReferenceCatalog::new();
    reference.insert(Platform::Nds, "ADAE", "Example Game");
    let ctx = CatalogContext::with_reference(reference);
    assert!(ctx.reference.contains(Platform::Nds, "ADAE"));
    assert_eq!(ctx.makers.resolve("01"), "Nintendo");
}
