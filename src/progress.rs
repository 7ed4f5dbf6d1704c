// src/progress.rs

//! Progress reporting for index fetches and package syncs
//!
//! The orchestrator never prints. It emits structured [`ProgressEvent`]s
//! into a [`ProgressSink`] chosen by the caller:
//! - `SilentProgress`: drops every event (library default)
//! - `LogProgress`: renders events through tracing
//! - `CallbackProgress`: forwards events to a closure
//!
//! The CLI supplies its own indicatif-backed sink.
//!
//! # Example
//!
//! ```ignore
//! use pack::progress::{CallbackProgress, ProgressEvent};
//!
//! let sink = CallbackProgress::new(|event| {
//!     if let ProgressEvent::Skipped { name, .. } = event {
//!         eprintln!("{name} is gone upstream");
//!     }
//! });
//! ```

use std::fmt;
use tracing::{info, warn};

/// Which phase of the pipeline an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Fetching per-package metadata from the index
    Index,
    /// Fetching, extracting or reading package files
    Download,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index => write!(f, "index"),
            Self::Download => write!(f, "download"),
        }
    }
}

/// Why a package produced no files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The archive host answered 404 for the latest version
    MissingOnHost,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingOnHost => write!(f, "missing on archive host"),
        }
    }
}

/// Events emitted while loading or syncing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// A stage begins with `total` packages to process
    Started { stage: Stage, total: usize },
    /// `current` of `total` packages handled; `name` is the package just reached
    Progress {
        stage: Stage,
        name: String,
        current: usize,
        total: usize,
    },
    /// A package was skipped without failing the stage
    Skipped { name: String, reason: SkipReason },
    /// The stage completed successfully
    Done { stage: Stage },
}

/// Receiver for progress events
///
/// Implementations must be thread-safe (Send + Sync) so a sink can be
/// shared between a `Pack` handle and the caller.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ProgressEvent);
}

/// Drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl ProgressSink for SilentProgress {
    fn emit(&self, _event: ProgressEvent) {}
}

/// Logs events to tracing at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn emit(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::Started { stage, total } => {
                info!("{}: starting ({} packages)", stage, total);
            }
            ProgressEvent::Progress {
                stage,
                name,
                current,
                total,
            } => {
                info!("{}: {} ({}/{})", stage, name, current, total);
            }
            ProgressEvent::Skipped { name, reason } => {
                warn!("Skipping {}: {}", name, reason);
            }
            ProgressEvent::Done { stage } => {
                info!("{}: done", stage);
            }
        }
    }
}

/// Forwards events to a user-provided function
pub struct CallbackProgress<F>
where
    F: Fn(ProgressEvent) + Send + Sync,
{
    callback: F,
}

impl<F> CallbackProgress<F>
where
    F: Fn(ProgressEvent) + Send + Sync,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressSink for CallbackProgress<F>
where
    F: Fn(ProgressEvent) + Send + Sync,
{
    fn emit(&self, event: ProgressEvent) {
        (self.callback)(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_callback_progress() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();

        let progress = CallbackProgress::new(move |event| {
            events_clone.lock().unwrap().push(event);
        });

        progress.emit(ProgressEvent::Started {
            stage: Stage::Download,
            total: 2,
        });
        progress.emit(ProgressEvent::Skipped {
            name: "gone".to_string(),
            reason: SkipReason::MissingOnHost,
        });
        progress.emit(ProgressEvent::Done {
            stage: Stage::Download,
        });

        let captured = events.lock().unwrap();
        assert_eq!(captured.len(), 3);
        assert!(matches!(&captured[1], ProgressEvent::Skipped { name, .. } if name == "gone"));
        assert!(matches!(&captured[2], ProgressEvent::Done { stage: Stage::Download }));
    }

    #[test]
    fn test_log_and_silent_accept_events() {
        let event = ProgressEvent::Progress {
            stage: Stage::Index,
            name: "lustre".to_string(),
            current: 1,
            total: 1,
        };
        LogProgress.emit(event.clone());
        SilentProgress.emit(event);
    }

    #[test]
    fn test_display() {
        assert_eq!(Stage::Index.to_string(), "index");
        assert_eq!(SkipReason::MissingOnHost.to_string(), "missing on archive host");
    }
}
