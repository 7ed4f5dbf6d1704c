// src/commands/progress.rs
//! Terminal progress for index fetches and package syncs
//!
//! Displays an overall progress bar per stage with a status line below
//! showing the package currently being handled.

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use pack::{ProgressEvent, ProgressSink, Stage};
use std::time::Duration;

/// indicatif-backed progress sink
pub struct BarProgress {
    // Keeps the draw target alive for both bars
    _multi: MultiProgress,
    overall: ProgressBar,
    status: ProgressBar,
}

impl BarProgress {
    pub fn new() -> Self {
        let multi = MultiProgress::new();

        let overall = ProgressBar::new(0);
        overall.set_style(
            ProgressStyle::default_bar()
                .template("{msg} ({pos}/{len}) [{bar:40.green/dim}] {percent}%")
                .expect("Invalid progress bar template")
                .progress_chars("##-"),
        );

        let status = ProgressBar::new_spinner();
        status.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner:.cyan} {msg}")
                .expect("Invalid spinner template"),
        );

        let overall = multi.add(overall);
        let status = multi.add(status);

        Self {
            _multi: multi,
            overall,
            status,
        }
    }

    fn stage_message(stage: Stage) -> &'static str {
        match stage {
            Stage::Index => "Fetching index",
            Stage::Download => "Syncing packages",
        }
    }
}

impl ProgressSink for BarProgress {
    fn emit(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::Started { stage, total } => {
                self.overall.reset();
                self.overall.set_length(total as u64);
                self.overall.set_message(Self::stage_message(stage));
                self.status.enable_steady_tick(Duration::from_millis(100));
            }
            ProgressEvent::Progress {
                stage,
                name,
                current,
                ..
            } => {
                self.overall.set_position(current as u64);
                let verb = match stage {
                    Stage::Index => "Fetching metadata for",
                    Stage::Download => "Syncing",
                };
                self.status.set_message(format!("{} {}...", verb, name));
            }
            ProgressEvent::Skipped { name, reason } => {
                self.status.println(format!("  [SKIP] {} ({})", name, reason));
            }
            ProgressEvent::Done { stage } => {
                self.overall
                    .finish_with_message(format!("{} [done]", Self::stage_message(stage)));
                self.status.finish_and_clear();
            }
        }
    }
}
