//! Progress display for registry and hosting lookups
//!
//! Visual feedback while dependencies are checked, using indicatif.
//! Disabled entirely in quiet mode.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter for the update workflow
pub struct Progress {
    enabled: bool,
    bar: Option<ProgressBar>,
}

impl Progress {
    /// Create a progress reporter; pass false to disable all output
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }

    /// Start a bar over a known number of dependencies
    pub fn start(&mut self, total: u64, message: &str) {
        if !self.enabled {
            return;
        }

        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} {msg} [{bar:24}] {pos}/{len}")
                .expect("invalid progress template")
                .progress_chars("=> "),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        self.bar = Some(bar);
    }

    /// Advance by one, updating the displayed message
    pub fn tick(&self, message: &str) {
        if let Some(ref bar) = self.bar {
            bar.set_message(message.to_string());
            bar.inc(1);
        }
    }

    /// Finish and remove the bar from the terminal
    pub fn finish(&mut self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
        self.bar = None;
    }
}
