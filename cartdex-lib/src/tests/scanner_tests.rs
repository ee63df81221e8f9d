use super::*;

fn touch(path: &Path) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, b"").unwrap();
}

#[test]
fn test_platform_for_folder() {
    assert_eq!(platform_for_folder("nds"), Some(Platform::Nds));
    assert_eq!(platform_for_folder("NDS"), Some(Platform::Nds));
    assert_eq!(platform_for_folder("GBA"), Some(Platform::Gba));
    assert_eq!(platform_for_folder("DSiWare"), Some(Platform::Dsi));
    assert_eq!(platform_for_folder("snes"), None);
}

#[test]
fn test_scan_library() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(&root.join("nds/b.nds"));
    touch(&root.join("nds/a.NDS"));
    touch(&root.join("nds/readme.txt"));
    touch(&root.join("nds/sub/nested.nds"));
    touch(&root.join("gba/pocket.gba"));
    touch(&root.join("dsi/ware.dsi"));
    touch(&root.join("dsi/ware2.nds"));
    touch(&root.join("snes/other.sfc"));
    touch(&root.join("stray.nds"));

    let tasks = scan_library(root, None).unwrap();
    let found: Vec<(String, Platform)> = tasks
        .iter()
        .map(|t| (t.path.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"), t.platform))
        .collect();

    assert_eq!(
        found,
        vec![
            ("dsi/ware.dsi".to_string(), Platform::Dsi),
            ("dsi/ware2.nds".to_string(), Platform::Dsi),
            ("gba/pocket.gba".to_string(), Platform::Gba),
            ("nds/a.NDS".to_string(), Platform::Nds),
            ("nds/b.nds".to_string(), Platform::Nds),
        ]
    );
}

#[test]
fn test_scan_library_filter() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("nds/a.nds"));
    touch(&dir.path().join("gba/b.gba"));

    let tasks = scan_library(dir.path(), Some(&[Platform::Gba])).unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].platform, Platform::Gba);
}

#[test]
fn test_scan_missing_root() {
    let dir = tempfile::tempdir().unwrap();
    assert!(scan_library(&dir.path().join("missing"), None).is_err());
}
