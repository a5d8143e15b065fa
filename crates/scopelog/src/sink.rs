//! Record sinks.
//!
//! A sink receives fully enriched records. [`CaptureSink`] stores them in
//! memory for inspection, [`TracingSink`] forwards them to the `tracing`
//! ecosystem so existing subscribers handle output.

use scopelog_core::{Level, LogRecord};
use std::sync::{Arc, Mutex};

/// Destination for emitted records.
pub trait LogSink: Send + Sync {
    fn emit(&self, record: LogRecord);
}

/// In-memory sink that keeps every emitted record.
#[derive(Default)]
pub struct CaptureSink {
    records: Mutex<Vec<LogRecord>>,
}

impl CaptureSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogRecord>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LogSink for CaptureSink {
    fn emit(&self, record: LogRecord) {
        self.lock().push(record);
    }
}

/// Sink that delegates to the `tracing` crate.
///
/// Properties do not map onto `tracing`'s static field names, so they are
/// carried as one JSON-encoded field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TracingSink {
    fn emit(&self, record: LogRecord) {
        let properties = serde_json::to_string(&record.properties).unwrap_or_default();
        match record.level {
            Level::Trace => tracing::trace!(
                category = %record.category,
                properties = %properties,
                "{}",
                record.message
            ),
            Level::Debug => tracing::debug!(
                category = %record.category,
                properties = %properties,
                "{}",
                record.message
            ),
            Level::Info => tracing::info!(
                category = %record.category,
                properties = %properties,
                "{}",
                record.message
            ),
            Level::Warn => tracing::warn!(
                category = %record.category,
                properties = %properties,
                "{}",
                record.message
            ),
            Level::Error => tracing::error!(
                category = %record.category,
                properties = %properties,
                "{}",
                record.message
            ),
        }
    }
}
