use super::*;

fn write_listing(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("<datafile>{body}</datafile>")).unwrap();
    path
}

#[test]
fn test_listing_serials_prefixed() {
    assert_eq!(listing_serials("NTR-ADAE-USA"), vec!["ADAE"]);
    assert_eq!(listing_serials("TWL-KQ9E"), vec!["KQ9E"]);
    assert_eq!(listing_serials("agb-bpee-eur"), vec!["BPEE"]);
}

#[test]
fn test_listing_serials_plain() {
    assert_eq!(listing_serials("adae"), vec!["ADAE"]);
    assert_eq!(listing_serials("AB-CD"), vec!["ABCD"]);
}

#[test]
fn test_listing_serials_comma_separated() {
    assert_eq!(
        listing_serials("NTR-ADAE-USA, NTR-ADAP-EUR,,"),
        vec!["ADAE", "ADAP"]
    );
}

#[test]
fn test_load_dir() {
    let dir = tempfile::tempdir().unwrap();
    write_listing(
        dir.path(),
        "nds.dat",
        r#"<game name="Example Game"><rom serial="NTR-ADAE-USA"/></game>"#,
    );
    write_listing(
        dir.path(),
        "gba.dat",
        r#"<game name="Pocket Game"><rom serial="AGB-BPEE-USA"/></game>"#,
    );

    let catalog = ReferenceCatalog::load_dir(dir.path());
    assert_eq!(catalog.lookup(Platform::Nds, "ADAE"), Some("Example Game"));
    assert_eq!(catalog.lookup(Platform::Gba, "bpee"), Some("Pocket Game"));
    assert_eq!(catalog.len(Platform::Dsi), 0);
}

#[test]
fn test_platforms_are_separate() {
    let mut catalog = ReferenceCatalog::new();
    catalog.insert(Platform::Nds, "ADAE", "Example Game");
    assert!(catalog.contains(Platform::Nds, "ADAE"));
    assert!(!catalog.contains(Platform::Gba, "ADAE"));
    assert!(!catalog.contains(Platform::Dsi, "ADAE"));
}

#[test]
fn test_malformed_listing_degrades_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let nds = dir.path().join("nds.dat");
    std::fs::write(&nds, r#"<datafile><game name="A"><rom serial="ADAE"/>"#).unwrap();
    let gba = write_listing(
        dir.path(),
        "gba.dat",
        r#"<game name="Pocket Game"><rom serial="BPEE"/></game>"#,
    );

    let catalog = ReferenceCatalog::load(&[(Platform::Nds, nds), (Platform::Gba, gba)]);
    assert_eq!(catalog.len(Platform::Nds), 0);
    assert_eq!(catalog.len(Platform::Gba), 1);
}

#[test]
fn test_missing_listings_yield_empty_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = ReferenceCatalog::load_dir(dir.path());
    assert!(catalog.is_empty());
}

#[test]
fn test_later_entry_wins() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_listing(
        dir.path(),
        "nds.dat",
        r#"<game name="First"><rom serial="ADAE"/></game>
           <game name="Second"><rom serial="NTR-ADAE-USA"/></game>"#,
    );
    let catalog = ReferenceCatalog::load(&[(Platform::Nds, path)]);
    assert_eq!(catalog.lookup(Platform::Nds, "ADAE"), Some("Second"));
    assert_eq!(catalog.len(Platform::Nds), 1);
}

#[test]
fn test_nameless_game_registers_empty_title() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_listing(dir.path(), "nds.dat", r#"<game><rom serial="ADAE"/></game>"#);
    let catalog = ReferenceCatalog::load(&[(Platform::Nds, path)]);
    assert_eq!(catalog.lookup(Platform::Nds, "ADAE"), Some(""));
    assert!(catalog.contains(Platform::Nds, "ADAE"));
}

#[test]
fn test_lookup_normalizes_serial() {
    let mut catalog = ReferenceCatalog::new();
    catalog.insert(Platform::Nds, " ad-ae ", "Example Game");
    assert_eq!(catalog.lookup(Platform::Nds, "ADAE"), Some("Example Game"));
    assert_eq!(catalog.lookup(Platform::Nds, "a-dae"), Some("Example Game"));
}

#[test]
fn test_empty_serial_not_inserted() {
    let mut catalog = ReferenceCatalog::new();
    catalog.insert(Platform::Nds, " - ", "Nothing");
    assert!(catalog.is_empty());
    assert!(!catalog.contains(Platform::Nds, ""));
}
