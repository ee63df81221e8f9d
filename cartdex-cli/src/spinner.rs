//! Progress display for the batch worker.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// A percent bar for a batch run. Hidden when `quiet` is set.
pub(crate) fn batch_bar(quiet: bool) -> ProgressBar {
    let pb = ProgressBar::new(100);
    if quiet {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }
    if let Ok(style) =
        ProgressStyle::with_template("  {spinner:.cyan} [{bar:30.cyan/blue}] {pos:>3}% {msg}")
    {
        pb.set_style(style.progress_chars("=> ").tick_chars("/-\\|"));
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// A spinner for short blocking steps (loading listings).
pub(crate) fn spinner(quiet: bool, msg: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if quiet {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }
    if let Ok(style) = ProgressStyle::with_template("  {spinner:.cyan} {msg}") {
        pb.set_style(style.tick_chars("/-\\|"));
    }
    pb.set_message(msg.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
