//! Terminal logging through env_logger, with an optional ANSI-free copy of
//! every line in a log file.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use env_logger::{Builder, Target, WriteStyle};
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use crate::error::CliError;

/// Module prefix shared by every workspace crate. Other targets (reqwest,
/// hyper, ...) only get through at warn and above.
const WORKSPACE_TARGET: &str = "cartdex";

/// Environment variable holding extra env_logger directives.
const LOG_ENV: &str = "CARTDEX_LOG";

/// Formatted records go to stderr; the log file gets them without color.
struct LogSink {
    file: Option<File>,
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        if let Some(file) = &mut self.file {
            file.write_all(&strip_ansi_escapes::strip(buf))?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        if let Some(file) = &mut self.file {
            file.flush()?;
        }
        Ok(())
    }
}

/// Install the global logger.
///
/// `quiet` keeps warnings and errors only; `verbose` adds debug output and
/// timestamps.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> Result<(), CliError> {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let file = match logfile {
        Some(path) => Some(File::create(path)?),
        None => None,
    };

    let mut builder = Builder::new();
    builder
        .filter_level(LevelFilter::Warn)
        .filter_module(WORKSPACE_TARGET, level)
        .parse_env(LOG_ENV)
        // Color is decided per tag by owo-colors; env_logger must not strip it.
        .write_style(WriteStyle::Always)
        .target(Target::Pipe(Box::new(LogSink { file })))
        .format(move |buf, record| {
            if verbose {
                write!(buf, "{} ", chrono::Local::now().format("%H:%M:%S%.3f"))?;
            }
            let msg = record.args();
            match record.level() {
                Level::Error => writeln!(buf, "{} {}", "error:".if_supports_color(Stderr, |t| t.red()), msg),
                Level::Warn => writeln!(
                    buf,
                    "{} {}",
                    "warning:".if_supports_color(Stderr, |t| t.yellow()),
                    msg
                ),
                Level::Info => writeln!(buf, "{msg}"),
                Level::Debug | Level::Trace => writeln!(
                    buf,
                    "{} {}",
                    "debug:".if_supports_color(Stderr, |t| t.dimmed()),
                    msg
                ),
            }
        });

    builder
        .try_init()
        .map_err(|e| CliError::logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logfile_mirror_is_ansi_free() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cartdex.log");
        let mut sink = LogSink {
            file: Some(File::create(&path).unwrap()),
        };

        sink.write_all(b"\x1b[33mwarning:\x1b[0m listing missing\n").unwrap();
        sink.write_all(b"Renamed dump.nds -> example_game.nds\n").unwrap();
        sink.flush().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "warning: listing missing\nRenamed dump.nds -> example_game.nds\n"
        );
    }
}
