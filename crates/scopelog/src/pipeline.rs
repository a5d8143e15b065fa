//! Enrichment pipeline with token-based participant registration.
//!
//! Participants are applied to every record before it reaches the sink.
//! Registration returns a [`RegistrationToken`]; releasing the token removes
//! the participant again, exactly once. Pushing is rare (once per outermost
//! scope of a chain) while applying happens on every emit, so the stack sits
//! behind a plain mutex.

use crate::enrich::Enrich;
use scopelog_core::LogRecord;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

#[derive(Default)]
pub struct EnrichmentPipeline {
    participants: Mutex<Vec<(u64, Arc<dyn Enrich>)>>,
    next_id: AtomicU64,
}

impl EnrichmentPipeline {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Registers `participant` and returns the token that removes it.
    pub fn push_enricher(self: &Arc<Self>, participant: Arc<dyn Enrich>) -> RegistrationToken {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.lock().push((id, participant));
        tracing::trace!(registration = id, "enrichment participant registered");
        RegistrationToken {
            pipeline: Arc::downgrade(self),
            id: Some(id),
        }
    }

    /// Runs every registered participant over `record`, most recently
    /// registered first.
    pub fn apply(&self, record: &mut LogRecord) {
        let participants: Vec<Arc<dyn Enrich>> = self
            .lock()
            .iter()
            .rev()
            .map(|(_, participant)| participant.clone())
            .collect();
        for participant in participants {
            participant.enrich(record);
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn pop_registration(&self, id: u64) {
        self.lock().retain(|(entry_id, _)| *entry_id != id);
        tracing::trace!(registration = id, "enrichment participant released");
    }

    // Enrichment must not fail; a poisoned stack is recovered, not surfaced.
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(u64, Arc<dyn Enrich>)>> {
        self.participants
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Releasable handle for one pipeline registration.
///
/// Releasing (explicitly or on drop) removes the registered participant.
/// Release happens at most once; the token holds no strong reference to the
/// pipeline, so it is safe to outlive it.
#[must_use = "dropping the token releases the registration"]
pub struct RegistrationToken {
    pipeline: Weak<EnrichmentPipeline>,
    id: Option<u64>,
}

impl RegistrationToken {
    pub fn release(mut self) {
        self.release_inner();
    }

    fn release_inner(&mut self) {
        if let Some(id) = self.id.take() {
            if let Some(pipeline) = self.pipeline.upgrade() {
                pipeline.pop_registration(id);
            }
        }
    }
}

impl Drop for RegistrationToken {
    fn drop(&mut self) {
        self.release_inner();
    }
}
