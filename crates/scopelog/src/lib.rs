//! Ambient scope propagation and log-record enrichment.
//!
//! Scopes opened through a [`Logger`] form a per-context chain of frames;
//! every record emitted while scopes are open gets an ordered `Scope`
//! sequence property (outermost first) plus any named values carried by
//! mapping-state scopes. Async tasks inherit the opener's chain through
//! [`FutureExt::in_current_scope`]; concurrent tasks stay isolated.

pub mod ambient;
pub mod enrich;
pub mod logger;
pub mod pipeline;
pub mod scope;
pub mod sink;

pub use ambient::{current, FutureExt, ScopedFuture};
pub use enrich::{enrich_from_ambient, Enrich};
pub use logger::{Logger, LoggerProvider};
pub use pipeline::{EnrichmentPipeline, RegistrationToken};
pub use scope::{ScopeFrame, ScopeGuard, ScopeProvider};
pub use sink::{CaptureSink, LogSink, TracingSink};

pub use scopelog_core::{
    Level, LogRecord, MessageTemplate, PropertyValue, Result, ScopeLogError, ScopeState,
    SCOPE_PROPERTY,
};
