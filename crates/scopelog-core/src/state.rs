//! Scope state carried by an open scope.
//!
//! The state supplied when opening a scope is one of three shapes, and the
//! shape decides how enrichment uses it: scalars and templates contribute a
//! rendered item to the ordered `Scope` sequence, mappings attach their
//! entries directly to the record. A mapping may additionally carry a
//! template, in which case it contributes a rendered item as well.

use crate::error::Result;
use crate::template::{render_value_to_text, MessageTemplate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// State attached to a scope at open time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ScopeState {
    /// A plain value, rendered to text for the scope sequence.
    Scalar(Value),
    /// A message template with positional arguments.
    Template {
        template: MessageTemplate,
        args: Vec<Value>,
    },
    /// Named values attached directly to enriched records. The optional
    /// template is the human-readable form of the same state.
    Map {
        entries: Vec<(String, Value)>,
        template: Option<(MessageTemplate, Vec<Value>)>,
    },
}

impl ScopeState {
    /// Plain text state.
    pub fn text(text: impl Into<String>) -> Self {
        ScopeState::Scalar(Value::String(text.into()))
    }

    /// Arbitrary scalar state.
    pub fn scalar(value: impl Into<Value>) -> Self {
        ScopeState::Scalar(value.into())
    }

    /// Template state, rejecting malformed templates.
    pub fn template(text: impl Into<String>, args: Vec<Value>) -> Result<Self> {
        Ok(ScopeState::Template {
            template: MessageTemplate::parse(text)?,
            args,
        })
    }

    /// Template state; malformed templates degrade to plain text.
    pub fn template_lossy(text: impl Into<String>, args: Vec<Value>) -> Self {
        ScopeState::Template {
            template: MessageTemplate::parse_lossy(text),
            args,
        }
    }

    /// Named-mapping state.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        ScopeState::Map {
            entries: entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
            template: None,
        }
    }

    /// Named-mapping state that also renders through a template.
    pub fn map_with_template<K, I>(
        entries: I,
        text: impl Into<String>,
        args: Vec<Value>,
    ) -> Result<Self>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Ok(ScopeState::Map {
            entries: entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
            template: Some((MessageTemplate::parse(text)?, args)),
        })
    }

    /// Entries to attach directly to an enriched record. Empty for
    /// non-mapping state.
    pub fn map_entries(&self) -> &[(String, Value)] {
        match self {
            ScopeState::Map { entries, .. } => entries,
            _ => &[],
        }
    }

    /// The zero-or-one item this state contributes to the ordered scope
    /// sequence. Rendering never fails; values fall back to their default
    /// textual form.
    pub fn sequence_item(&self) -> Option<String> {
        match self {
            ScopeState::Scalar(value) => Some(render_value_to_text(value)),
            ScopeState::Template { template, args } => Some(template.render(args)),
            ScopeState::Map { template, .. } => template
                .as_ref()
                .map(|(template, args)| template.render(args)),
        }
    }
}

impl std::fmt::Display for ScopeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.sequence_item() {
            Some(item) => write!(f, "{item}"),
            None => {
                let entries = self.map_entries();
                let mut first = true;
                for (key, value) in entries {
                    if !first {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}={}", render_value_to_text(value))?;
                    first = false;
                }
                Ok(())
            }
        }
    }
}
