//! Scope frames and the chain manager.
//!
//! A [`ScopeProvider`] tracks ambient nesting of logging scopes per logical
//! execution context and hands out releasable guards. Opening a scope links
//! a new frame under the current one; the first frame of a chain also
//! registers the provider as an enrichment participant on the pipeline and
//! keeps the registration token, so the participation ends exactly when the
//! outermost scope does.

use crate::ambient;
use crate::enrich::{enrich_from_ambient, Enrich};
use crate::pipeline::{EnrichmentPipeline, RegistrationToken};
use scopelog_core::{LogRecord, ScopeState};
use std::sync::{Arc, Weak};

/// One node of the ambient scope chain.
pub struct ScopeFrame {
    state: ScopeState,
    parent: Option<Arc<ScopeFrame>>,
    provider: Weak<ScopeProvider>,
}

impl ScopeFrame {
    pub fn state(&self) -> &ScopeState {
        &self.state
    }

    pub fn parent(&self) -> Option<Arc<ScopeFrame>> {
        self.parent.clone()
    }

    /// The provider that created this frame.
    pub fn provider(&self) -> Option<Arc<ScopeProvider>> {
        self.provider.upgrade()
    }

    /// Number of ancestors above this frame.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut cursor = self.parent();
        while let Some(frame) = cursor {
            depth += 1;
            cursor = frame.parent();
        }
        depth
    }
}

impl std::fmt::Debug for ScopeFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopeFrame")
            .field("state", &self.state)
            .field("depth", &self.depth())
            .finish()
    }
}

/// The scope chain manager.
pub struct ScopeProvider {
    pipeline: Arc<EnrichmentPipeline>,
}

impl ScopeProvider {
    pub fn new(pipeline: Arc<EnrichmentPipeline>) -> Arc<Self> {
        Arc::new(Self { pipeline })
    }

    /// Opens a scope carrying `state` and makes it the ambient current
    /// frame. Never fails.
    pub fn open_scope(self: &Arc<Self>, state: ScopeState) -> ScopeGuard {
        let parent = ambient::current();
        // First scope of a chain: one-shot registration, owned by this frame.
        let registration = if parent.is_none() {
            Some(self.pipeline.push_enricher(self.clone()))
        } else {
            None
        };
        let frame = Arc::new(ScopeFrame {
            state,
            parent: parent.clone(),
            provider: Arc::downgrade(self),
        });
        ambient::set(Some(frame.clone()));
        ScopeGuard {
            frame: Some(frame),
            parent,
            registration,
        }
    }
}

impl Enrich for ScopeProvider {
    fn enrich(&self, record: &mut LogRecord) {
        enrich_from_ambient(record);
    }
}

/// Releasable handle for one open scope.
///
/// Release restores the ambient current frame to the parent recorded at
/// open time and, for the outermost frame of a chain, releases the pipeline
/// registration. Close is idempotent: repeat releases are no-ops.
#[must_use = "dropping the guard closes the scope"]
pub struct ScopeGuard {
    frame: Option<Arc<ScopeFrame>>,
    parent: Option<Arc<ScopeFrame>>,
    registration: Option<RegistrationToken>,
}

impl ScopeGuard {
    /// Closes the scope now instead of at end of block.
    pub fn close(mut self) {
        self.release();
    }

    /// The frame this guard owns, while it is still open.
    pub fn frame(&self) -> Option<&Arc<ScopeFrame>> {
        self.frame.as_ref()
    }

    fn release(&mut self) {
        if self.frame.take().is_some() {
            ambient::set(self.parent.take());
            if let Some(token) = self.registration.take() {
                token.release();
            }
        }
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        self.release();
    }
}
