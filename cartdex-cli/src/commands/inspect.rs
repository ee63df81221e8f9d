use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cartdex_lib::classify::{canonical_title, classify};
use cartdex_lib::library::platform_for_import;
use cartdex_lib::{Classification, HeaderMetadata, ParserRegistry, Platform, ReferenceCatalog};

use crate::commands::load_library;
use crate::error::CliError;

/// Bytes read for header auto-detection.
const DETECT_LEN: u64 = 0x200;

fn detect_platform(registry: &ParserRegistry, path: &Path) -> std::io::Result<Platform> {
    let mut header = Vec::new();
    File::open(path)?.take(DETECT_LEN).read_to_end(&mut header)?;
    Ok(registry
        .detect(&header)
        .unwrap_or_else(|| platform_for_import(path, false)))
}

/// Machine-readable report for one file.
fn json_report(
    path: &Path,
    platform: Platform,
    classification: Classification,
    title: &str,
    meta: &HeaderMetadata,
) -> serde_json::Result<String> {
    let value = serde_json::json!({
        "file": path,
        "platform": platform,
        "classification": classification,
        "title": title,
        "header": meta,
    });
    serde_json::to_string_pretty(&value)
}

pub(crate) fn run_inspect(
    files: Vec<PathBuf>,
    platform: Option<Platform>,
    json: bool,
    root: Option<PathBuf>,
) -> Result<(), CliError> {
    let (settings, paths) = load_library(root)?;
    let makers = settings.maker_codes();
    let registry = ParserRegistry::nintendo();
    let reference = ReferenceCatalog::load_dir(&paths.listings);

    for path in &files {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let platform = match platform {
            Some(p) => p,
            None => match detect_platform(&registry, path) {
                Ok(p) => p,
                Err(e) => {
                    log::warn!("Error opening {}: {}", path.display(), e);
                    continue;
                }
            },
        };

        let meta = match File::open(path) {
            Ok(mut file) => registry.parse(platform, &mut file, &makers),
            Err(e) => {
                log::warn!("Error opening {}: {}", path.display(), e);
                continue;
            }
        };
        let classification = classify(&meta.serial, platform, &reference);
        let title = canonical_title(
            classification,
            &meta.serial,
            platform,
            &meta.title,
            &file_name,
            &reference,
        );

        if json {
            match json_report(path, platform, classification, &title, &meta) {
                Ok(s) => println!("{s}"),
                Err(e) => log::warn!("Cannot serialize {}: {}", path.display(), e),
            }
            continue;
        }

        println!("{}", file_name.if_supports_color(Stdout, |t| t.bold()));
        println!(
            "  Platform:       {}",
            platform.display_name().if_supports_color(Stdout, |t| t.cyan())
        );
        println!("  Header title:   {}", meta.title);
        println!("  Catalog title:  {}", title);
        println!("  Serial:         {}", meta.serial);
        println!("  Region:         {}", meta.region);
        println!("  Maker:          {}", meta.author);
        println!("  Version:        {}", meta.version);
        println!(
            "  Classification: {}",
            if classification == Classification::Official {
                classification.if_supports_color(Stdout, |t| t.green()).to_string()
            } else {
                classification.if_supports_color(Stdout, |t| t.yellow()).to_string()
            }
        );
        println!();
    }
    Ok(())
}
