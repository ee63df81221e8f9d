//! Background batch: parse, classify, rename and resolve artwork for each
//! ROM in turn, reporting through a channel.

use std::collections::HashSet;
use std::fs::{self, File};
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, LazyLock, Mutex};
use std::thread::JoinHandle;

use cartdex_core::{HeaderMetadata, Platform, Region};
use serde::Serialize;

use crate::boxart::{BoxartResolver, BoxartSource};
use crate::classify::{Classification, canonical_title, classify};
use crate::context::CatalogContext;
use crate::error::PipelineError;
use crate::rename::rename_for_catalog;

/// One ROM file to catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomTask {
    pub path: PathBuf,
    pub platform: Platform,
}

impl RomTask {
    pub fn new(path: impl Into<PathBuf>, platform: Platform) -> Self {
        Self {
            path: path.into(),
            platform,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchMode {
    /// Cached artwork only, no network access
    Fast,
    /// Download missing artwork for official titles
    #[default]
    Full,
}

#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    pub mode: BatchMode,
    /// Rename official ROMs to their catalog name
    pub rename: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            mode: BatchMode::Full,
            rename: true,
        }
    }
}

/// A finished catalog entry for one ROM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogRecord {
    pub title: String,
    pub platform: Platform,
    pub region: Region,
    pub version: String,
    /// Publisher resolved from the header's maker code
    pub author: String,
    pub serial: String,
    /// File size in bytes
    pub size: u64,
    pub filename: String,
    pub path: PathBuf,
    pub boxart: Option<PathBuf>,
    pub classification: Classification,
}

impl CatalogRecord {
    pub fn is_homebrew(&self) -> bool {
        self.classification == Classification::Homebrew
    }
}

/// Events posted by the batch worker.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    Progress { percent: u8, message: String },
    RecordReady(CatalogRecord),
    Log(String),
    Finished { processed: usize, cancelled: bool },
}

/// Boxart roots with a batch in flight.
static ACTIVE_RUNS: LazyLock<Mutex<HashSet<PathBuf>>> =
    LazyLock::new(|| Mutex::new(HashSet::new()));

/// Key a boxart root by its canonical path, creating it first so the key
/// stays stable once the batch starts writing. A root that cannot be created
/// is keyed by its lexically normalized absolute path.
fn run_key(root: &Path) -> PathBuf {
    if fs::create_dir_all(root).is_ok() {
        if let Ok(canonical) = root.canonicalize() {
            return canonical;
        }
    }
    lexical_absolute(root)
}

fn lexical_absolute(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Holds a boxart root in `ACTIVE_RUNS` until dropped.
struct RunGuard(PathBuf);

impl RunGuard {
    fn acquire(root: &Path) -> Result<Self, PipelineError> {
        let key = run_key(root);
        let mut active = ACTIVE_RUNS.lock().unwrap_or_else(|e| e.into_inner());
        if !active.insert(key.clone()) {
            return Err(PipelineError::Busy(root.to_path_buf()));
        }
        Ok(Self(key))
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        let mut active = ACTIVE_RUNS.lock().unwrap_or_else(|e| e.into_inner());
        active.remove(&self.0);
    }
}

/// Handle to a running batch.
pub struct BatchHandle {
    events: mpsc::Receiver<BatchEvent>,
    cancel: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl BatchHandle {
    pub fn events(&self) -> &mpsc::Receiver<BatchEvent> {
        &self.events
    }

    /// Stop before the next file. The current file finishes.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Block until the worker exits. Undelivered events stay queued.
    pub fn wait(&mut self) {
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("Batch worker panicked");
            }
        }
    }

    /// Drain every event until the worker finishes.
    pub fn collect(mut self) -> Vec<BatchEvent> {
        let events: Vec<BatchEvent> = self.events.iter().collect();
        self.wait();
        events
    }
}

/// Orchestrates the per-file stages over shared read-only tables.
#[derive(Clone)]
pub struct BatchPipeline {
    context: Arc<CatalogContext>,
    boxart: Arc<BoxartResolver>,
}

impl BatchPipeline {
    pub fn new(context: Arc<CatalogContext>, boxart: Arc<BoxartResolver>) -> Self {
        Self { context, boxart }
    }

    /// Start a batch on a background thread.
    ///
    /// Fails with [`PipelineError::Busy`] while another batch uses the same
    /// boxart directory.
    pub fn start(
        &self,
        tasks: Vec<RomTask>,
        options: BatchOptions,
    ) -> Result<BatchHandle, PipelineError> {
        let guard = RunGuard::acquire(self.boxart.root())?;
        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));
        let worker_cancel = cancel.clone();
        let pipeline = self.clone();

        let worker = std::thread::Builder::new()
            .name("cartdex-batch".to_string())
            .spawn(move || {
                let _guard = guard;
                pipeline.run(tasks, options, &worker_cancel, &tx);
            })?;

        Ok(BatchHandle {
            events: rx,
            cancel,
            worker: Some(worker),
        })
    }

    fn run(
        &self,
        tasks: Vec<RomTask>,
        options: BatchOptions,
        cancel: &AtomicBool,
        tx: &mpsc::Sender<BatchEvent>,
    ) {
        let total = tasks.len();
        let mut processed = 0;
        let mut cancelled = false;

        for (i, task) in tasks.iter().enumerate() {
            if cancel.load(Ordering::Relaxed) {
                cancelled = true;
                break;
            }

            let mut logs = Vec::new();
            let record = self.process(task, options, &mut logs);
            let percent = ((i + 1) * 100 / total) as u8;

            let _ = tx.send(BatchEvent::Progress {
                percent,
                message: format!("[{}/{}] {}", i + 1, total, record.filename),
            });
            let _ = tx.send(BatchEvent::RecordReady(record));
            for line in logs {
                let _ = tx.send(BatchEvent::Log(line));
            }
            processed += 1;
        }

        let _ = tx.send(BatchEvent::Progress {
            percent: 100,
            message: "Done".to_string(),
        });
        let _ = tx.send(BatchEvent::Finished {
            processed,
            cancelled,
        });
    }

    /// Catalog one file. Never fails: each failing stage degrades the
    /// record and leaves a line in `logs`.
    pub fn process(&self, task: &RomTask, options: BatchOptions, logs: &mut Vec<String>) -> CatalogRecord {
        let ctx = &self.context;
        let platform = task.platform;
        let original_name = file_name_of(&task.path);

        let size = match fs::metadata(&task.path) {
            Ok(m) => m.len(),
            Err(e) => {
                logs.push(format!("{original_name}: cannot read size: {e}"));
                0
            }
        };

        let meta = match File::open(&task.path) {
            Ok(mut file) => ctx.registry.parse(platform, &mut file, &ctx.makers),
            Err(e) => {
                logs.push(format!("{original_name}: cannot open: {e}"));
                HeaderMetadata::default()
            }
        };

        let classification = classify(&meta.serial, platform, &ctx.reference);
        let title = canonical_title(
            classification,
            &meta.serial,
            platform,
            &meta.title,
            &original_name,
            &ctx.reference,
        );

        let mut path = task.path.clone();
        if options.rename && classification == Classification::Official {
            match rename_for_catalog(&path, &title) {
                Ok(renamed) => {
                    if renamed != path {
                        logs.push(format!(
                            "Renamed {} -> {}",
                            original_name,
                            file_name_of(&renamed)
                        ));
                    }
                    path = renamed;
                }
                Err(e) => {
                    log::warn!("Failed to rename {}: {}", task.path.display(), e);
                    logs.push(format!("{original_name}: rename failed: {e}"));
                }
            }
        }

        let boxart = match classification {
            Classification::Homebrew => None,
            Classification::Official => self.find_boxart(platform, &meta.serial, &title, options.mode, logs),
        };

        CatalogRecord {
            title,
            platform,
            region: meta.region,
            version: meta.version,
            author: meta.author,
            serial: meta.serial,
            size,
            filename: file_name_of(&path),
            path,
            boxart,
            classification,
        }
    }

    fn find_boxart(
        &self,
        platform: Platform,
        serial: &str,
        title: &str,
        mode: BatchMode,
        logs: &mut Vec<String>,
    ) -> Option<PathBuf> {
        match mode {
            BatchMode::Fast => self.boxart.cached(platform, serial),
            BatchMode::Full => match self.boxart.resolve_with_source(platform, serial, title) {
                Some((path, BoxartSource::Cache)) => Some(path),
                Some((path, source)) => {
                    logs.push(format!("{serial}: boxart downloaded from {source}"));
                    Some(path)
                }
                None => {
                    logs.push(format!("{serial}: no boxart found"));
                    None
                }
            },
        }
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "tests/pipeline_tests.rs"]
mod tests;
