//! Progress reporting for a migration run
//!
//! Provides a progress bar wrapper using indicatif, and a silent reporter
//! for pipes and `--json` output.

use indicatif::{ProgressBar, ProgressStyle};

/// Receives progress updates from the migration engine.
pub trait ProgressReporter {
    /// Begin a run of `total` units.
    fn start(&mut self, total: u64, message: &str);

    /// Advance by one unit, optionally replacing the message.
    fn increment(&mut self, message: Option<&str>);

    /// End the run. Called on success and on abort.
    fn finish(&mut self);
}

/// Terminal progress bar, cleared when the run ends.
#[derive(Default)]
pub struct BarProgress {
    bar: Option<ProgressBar>,
}

impl BarProgress {
    pub fn new() -> Self {
        Self::default()
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template("[{bar:20}] {msg}")
            .map(|style| style.progress_chars("= "))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }
}

impl ProgressReporter for BarProgress {
    fn start(&mut self, total: u64, message: &str) {
        let bar = ProgressBar::new(total);
        bar.set_style(Self::style());
        bar.set_message(message.to_string());
        self.bar = Some(bar);
    }

    fn increment(&mut self, message: Option<&str>) {
        if let Some(bar) = &self.bar {
            if let Some(message) = message {
                bar.set_message(message.to_string());
            }
            bar.inc(1);
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

/// Reporter that discards every update.
#[derive(Debug, Default)]
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn start(&mut self, _total: u64, _message: &str) {}

    fn increment(&mut self, _message: Option<&str>) {}

    fn finish(&mut self) {}
}
