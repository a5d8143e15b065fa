//! Scopelog core types and shared utilities.

pub mod error;
pub mod record;
pub mod state;
pub mod template;

pub use error::{Result, ScopeLogError};
pub use record::{Level, LogRecord, PropertyValue, SCOPE_PROPERTY};
pub use state::ScopeState;
pub use template::{render_value_to_text, MessageTemplate};
