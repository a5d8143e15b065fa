//! Logger facade.
//!
//! [`LoggerProvider`] owns the sink, the enrichment pipeline and the scope
//! chain manager, and creates category-named [`Logger`]s. Every record a
//! logger emits runs through the pipeline first, so open scopes on the
//! calling context show up on it automatically.

use crate::pipeline::EnrichmentPipeline;
use crate::scope::{ScopeGuard, ScopeProvider};
use crate::sink::LogSink;
use scopelog_core::{Level, LogRecord, MessageTemplate, PropertyValue, ScopeState};
use serde_json::Value;
use std::sync::Arc;

pub struct LoggerProvider {
    scopes: Arc<ScopeProvider>,
    pipeline: Arc<EnrichmentPipeline>,
    sink: Arc<dyn LogSink>,
}

impl LoggerProvider {
    pub fn new(sink: Arc<dyn LogSink>) -> Arc<Self> {
        let pipeline = EnrichmentPipeline::new();
        let scopes = ScopeProvider::new(pipeline.clone());
        Arc::new(Self { scopes, pipeline, sink })
    }

    pub fn create_logger(self: &Arc<Self>, category: impl Into<String>) -> Logger {
        Logger {
            category: category.into(),
            provider: self.clone(),
        }
    }
}

/// Category-named front end over one provider.
#[derive(Clone)]
pub struct Logger {
    category: String,
    provider: Arc<LoggerProvider>,
}

impl Logger {
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Opens a nested logging scope on the calling context.
    pub fn begin_scope(&self, state: ScopeState) -> ScopeGuard {
        self.provider.scopes.open_scope(state)
    }

    /// Renders `template` with `args`, enriches and emits the record.
    /// Template holes also attach their arguments as named properties.
    pub fn log(&self, level: Level, template: &str, args: &[Value]) {
        let template = MessageTemplate::parse_lossy(template);
        let message = template.render(args);
        let mut record = LogRecord::new(level, &self.category, message);
        for (name, value) in template.named_args(args) {
            record.add_property_if_absent(name, PropertyValue::Value(value.clone()));
        }
        self.provider.pipeline.apply(&mut record);
        self.provider.sink.emit(record);
    }

    pub fn trace(&self, template: &str, args: &[Value]) {
        self.log(Level::Trace, template, args);
    }

    pub fn debug(&self, template: &str, args: &[Value]) {
        self.log(Level::Debug, template, args);
    }

    pub fn info(&self, template: &str, args: &[Value]) {
        self.log(Level::Info, template, args);
    }

    pub fn warn(&self, template: &str, args: &[Value]) {
        self.log(Level::Warn, template, args);
    }

    pub fn error(&self, template: &str, args: &[Value]) {
        self.log(Level::Error, template, args);
    }
}
