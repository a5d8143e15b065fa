//! Log record and property types.
//!
//! A [`LogRecord`] is the unit handed from the logger facade to the
//! enrichment pipeline and then to a sink. Properties are append-only and
//! first-writer-wins: enrichment never overwrites a name that is already
//! present on the record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fixed property name for the ordered scope sequence attached by enrichment.
pub const SCOPE_PROPERTY: &str = "Scope";

/// Severity of a log record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A value attached to a record under a property name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum PropertyValue {
    /// Rendered text.
    Text(String),
    /// Structured value carried through unchanged.
    Value(Value),
    /// Ordered list of rendered items.
    Sequence(Vec<String>),
}

impl PropertyValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[String]> {
        match self {
            PropertyValue::Sequence(items) => Some(items),
            _ => None,
        }
    }
}

/// A structured log record about to be emitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub level: Level,
    /// Logger name, usually the module or type the record originates from.
    pub category: String,
    /// Fully rendered message text.
    pub message: String,
    /// Named properties in attachment order.
    pub properties: Vec<(String, PropertyValue)>,
}

impl LogRecord {
    pub fn new(level: Level, category: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            category: category.into(),
            message: message.into(),
            properties: Vec::new(),
        }
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.properties.iter().any(|(key, _)| key == name)
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Attaches `value` under `name` unless the record already carries that
    /// name. Returns whether the property was attached.
    pub fn add_property_if_absent(&mut self, name: impl Into<String>, value: PropertyValue) -> bool {
        let name = name.into();
        if self.has_property(&name) {
            return false;
        }
        self.properties.push((name, value));
        true
    }
}
