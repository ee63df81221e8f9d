use std::sync::Arc;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use cartdex_lib::{
    BatchEvent, BatchMode, BatchOptions, BatchPipeline, BoxartResolver, CatalogContext,
    CatalogRecord, HttpArtFetcher, ParserRegistry, Platform, ReferenceCatalog, scanner, write_catalog,
};

use crate::cli_types::BuildArgs;
use crate::commands::load_library;
use crate::error::CliError;
use crate::spinner::{batch_bar, spinner};

pub(crate) fn run_build(
    args: BuildArgs,
    root: Option<std::path::PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let (settings, paths) = load_library(root)?;
    let output = args.output.unwrap_or_else(|| paths.output.clone());

    let tasks = scanner::scan_library(&paths.roms, args.consoles.as_deref())
        .map_err(|e| CliError::scan(&paths.roms, e))?;
    if tasks.is_empty() {
        log::warn!("No ROMs found under {}", paths.roms.display());
    }

    let pb = spinner(quiet, "Loading reference listings...");
    let reference = ReferenceCatalog::load_dir(&paths.listings);
    pb.finish_and_clear();
    for platform in Platform::all() {
        log::debug!(
            "{} reference serials for {}",
            reference.len(*platform),
            platform.short_name()
        );
    }

    let ctx = CatalogContext::new(ParserRegistry::nintendo(), settings.maker_codes(), reference);
    let resolver = BoxartResolver::new(
        settings.boxart.config(&paths.boxarts),
        Arc::new(HttpArtFetcher::new()?),
    );
    let pipeline = BatchPipeline::new(Arc::new(ctx), Arc::new(resolver));

    let options = BatchOptions {
        mode: if args.fast {
            BatchMode::Fast
        } else {
            BatchMode::Full
        },
        rename: !args.no_rename,
    };

    log::info!(
        "Cataloging {} ROMs ({} mode)",
        tasks.len(),
        if args.fast { "fast" } else { "full" }
    );

    let mut handle = pipeline.start(tasks, options)?;
    let pb = batch_bar(quiet);
    let mut records: Vec<CatalogRecord> = Vec::new();
    let mut cancelled = false;

    for event in handle.events().iter() {
        match event {
            BatchEvent::Progress { percent, message } => {
                pb.set_position(u64::from(percent));
                pb.set_message(message);
            }
            BatchEvent::RecordReady(record) => records.push(record),
            BatchEvent::Log(line) => pb.suspend(|| log::info!("  {}", line)),
            BatchEvent::Finished {
                cancelled: was_cancelled,
                ..
            } => cancelled = was_cancelled,
        }
    }
    pb.finish_and_clear();
    handle.wait();

    write_catalog(&output, &records, &settings.export.options())?;
    print_summary(&records, cancelled);
    log::info!(
        "Catalog written to {}",
        output.display().if_supports_color(Stderr, |t| t.cyan())
    );
    Ok(())
}

fn print_summary(records: &[CatalogRecord], cancelled: bool) {
    let homebrew = records.iter().filter(|r| r.is_homebrew()).count();
    let official = records.len() - homebrew;
    let with_art = records.iter().filter(|r| r.boxart.is_some()).count();

    log::info!("");
    log::info!("{}", "Summary:".if_supports_color(Stderr, |t| t.bold()));
    log::info!(
        "  {} official, {} homebrew",
        official.if_supports_color(Stderr, |t| t.green()),
        homebrew.if_supports_color(Stderr, |t| t.yellow()),
    );
    log::info!(
        "  {} of {} official titles have boxart",
        with_art.if_supports_color(Stderr, |t| t.green()),
        official,
    );
    if cancelled {
        log::warn!("Batch was cancelled; the catalog is partial");
    }
}
