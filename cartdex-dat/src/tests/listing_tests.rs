use super::*;

const SAMPLE_LISTING: &str = r#"<?xml version="1.0"?>
<!DOCTYPE datafile SYSTEM "http://www.logiqx.com/Dats/datafile.dtd">
<datafile>
    <header>
        <name>Nintendo - Nintendo DS</name>
        <version>20240101-000000</version>
    </header>
    <game name="Example Game (USA)">
        <rom name="Example Game (USA).nds" size="67108864" serial="NTR-ADAE-USA"/>
    </game>
    <game name="Tom &amp; Jerry (Europe)">
        <rom name="Tom &amp; Jerry (Europe).nds" size="33554432" serial="NTR-ATJP-EUR"/>
    </game>
</datafile>"#;

#[test]
fn test_parse_listing() {
    let listing = parse_listing(SAMPLE_LISTING.as_bytes()).unwrap();
    assert_eq!(listing.name, "Nintendo - Nintendo DS");
    assert_eq!(listing.entries.len(), 2);
    assert_eq!(listing.entries[0].name, "Example Game (USA)");
    assert_eq!(listing.entries[0].serials, vec!["NTR-ADAE-USA"]);
}

#[test]
fn test_parse_listing_unescapes_names() {
    let listing = parse_listing(SAMPLE_LISTING.as_bytes()).unwrap();
    assert_eq!(listing.entries[1].name, "Tom & Jerry (Europe)");
}

#[test]
fn test_parse_empty_listing() {
    let xml = r#"<?xml version="1.0"?><datafile></datafile>"#;
    let listing = parse_listing(xml.as_bytes()).unwrap();
    assert!(listing.entries.is_empty());
}

#[test]
fn test_rom_without_serial_is_skipped() {
    let xml = r#"<datafile>
    <game name="No Serial"><rom name="a.nds" size="1"/></game>
    <game name="Blank Serial"><rom name="b.nds" serial="  "/></game>
</datafile>"#;
    let listing = parse_listing(xml.as_bytes()).unwrap();
    assert_eq!(listing.entries.len(), 2);
    assert!(listing.entries.iter().all(|e| e.serials.is_empty()));
}

#[test]
fn test_rom_with_children() {
    let xml = r#"<datafile>
    <game name="Nested"><rom name="a.gba" serial="AGB-BPEE-USA"></rom></game>
</datafile>"#;
    let listing = parse_listing(xml.as_bytes()).unwrap();
    assert_eq!(listing.entries[0].serials, vec!["AGB-BPEE-USA"]);
}

#[test]
fn test_truncated_listing_is_error() {
    let xml = r#"<datafile><game name="Cut"><rom serial="ABCD"/>"#;
    assert!(parse_listing(xml.as_bytes()).is_err());
}

#[test]
fn test_mismatched_tags_is_error() {
    let xml = r#"<datafile><game name="Bad"></datafile></game>"#;
    assert!(parse_listing(xml.as_bytes()).is_err());
}

#[test]
fn test_parse_listing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nds.dat");
    std::fs::write(&path, SAMPLE_LISTING).unwrap();
    let listing = parse_listing_file(&path).unwrap();
    assert_eq!(listing.entries.len(), 2);
}

#[test]
fn test_parse_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = parse_listing_file(&dir.path().join("missing.dat"));
    assert!(matches!(result, Err(ListingError::Io(_))));
}
