//! Record enrichment from the active scope chain.

use crate::ambient;
use scopelog_core::{LogRecord, PropertyValue, SCOPE_PROPERTY};

/// An enrichment participant: mutates a record before it reaches the sink.
pub trait Enrich: Send + Sync {
    fn enrich(&self, record: &mut LogRecord);
}

/// Enriches `record` from the ambient scope chain of the calling context.
///
/// Walks frames innermost to outermost. Mapping entries attach directly to
/// the record (innermost scope wins on duplicate names); scalar and template
/// state contributes a rendered item to the ordered sequence. The sequence
/// is attached outermost-first under [`SCOPE_PROPERTY`], and only when the
/// record does not already carry that name.
pub fn enrich_from_ambient(record: &mut LogRecord) {
    let mut items = Vec::new();
    let mut cursor = ambient::current();
    while let Some(frame) = cursor {
        for (name, value) in frame.state().map_entries() {
            record.add_property_if_absent(name.clone(), PropertyValue::Value(value.clone()));
        }
        if let Some(item) = frame.state().sequence_item() {
            items.push(item);
        }
        cursor = frame.parent();
    }
    if !items.is_empty() {
        items.reverse();
        record.add_property_if_absent(SCOPE_PROPERTY, PropertyValue::Sequence(items));
    }
}
