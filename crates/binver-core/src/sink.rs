//! Where detection events go.
//!
//! The resolver never talks to a global logger directly; callers hand it a
//! [`DetectionSink`]. [`TracingSink`] forwards to `tracing`, and
//! [`RecordingSink`] keeps events in memory for tests.

use std::sync::Mutex;
use tracing::Level;

/// `tracing` target for detection outcomes.
pub const DETECT_TARGET: &str = "binver::detect";

pub trait DetectionSink {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards events to the `tracing` subscriber under target `binver::detect`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DetectionSink for TracingSink {
    fn info(&self, message: &str) {
        tracing::info!(target: DETECT_TARGET, "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: DETECT_TARGET, "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: DETECT_TARGET, "{}", message);
    }
}

/// Collects events in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<(Level, String)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(Level, String)> {
        self.lock().clone()
    }

    /// Messages recorded at `level`.
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn push(&self, level: Level, message: &str) {
        self.lock().push((level, message.to_string()));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(Level, String)>> {
        // A panic while holding the lock leaves the Vec intact.
        self.events.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl DetectionSink for RecordingSink {
    fn info(&self, message: &str) {
        self.push(Level::INFO, message);
    }

    fn warn(&self, message: &str) {
        self.push(Level::WARN, message);
    }

    fn error(&self, message: &str) {
        self.push(Level::ERROR, message);
    }
}
