use scopelog::{
    enrich_from_ambient, CaptureSink, Level, LogRecord, LoggerProvider, PropertyValue, ScopeState,
    SCOPE_PROPERTY,
};
use serde_json::json;
use std::sync::Arc;

fn capture_setup() -> (Arc<CaptureSink>, scopelog::Logger) {
    let sink = CaptureSink::new();
    let provider = LoggerProvider::new(sink.clone());
    let logger = provider.create_logger("enrichment_test");
    (sink, logger)
}

fn scope_sequence(record: &LogRecord) -> Option<Vec<String>> {
    record
        .property(SCOPE_PROPERTY)
        .and_then(PropertyValue::as_sequence)
        .map(|items| items.to_vec())
}

#[test]
fn sequence_is_outermost_first() {
    let (sink, logger) = capture_setup();
    let _a = logger.begin_scope(ScopeState::text("A"));
    let _b = logger.begin_scope(ScopeState::text("B"));
    let _c = logger.begin_scope(ScopeState::text("C"));
    logger.info("inside", &[]);

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(
        scope_sequence(&records[0]),
        Some(vec!["A".to_string(), "B".to_string(), "C".to_string()])
    );
}

#[test]
fn mapping_state_attaches_directly_without_sequence_entry() {
    let (sink, logger) = capture_setup();
    let _scope = logger.begin_scope(ScopeState::map([("tenant", json!("t1"))]));
    logger.info("inside", &[]);

    let record = &sink.records()[0];
    assert_eq!(record.property("tenant"), Some(&PropertyValue::Value(json!("t1"))));
    assert!(!record.has_property(SCOPE_PROPERTY));
}

#[test]
fn innermost_mapping_wins_on_duplicate_names() {
    let (sink, logger) = capture_setup();
    let _outer = logger.begin_scope(ScopeState::map([("tenant", json!("outer"))]));
    let _inner = logger.begin_scope(ScopeState::map([("tenant", json!("inner"))]));
    logger.info("inside", &[]);

    let record = &sink.records()[0];
    assert_eq!(
        record.property("tenant"),
        Some(&PropertyValue::Value(json!("inner")))
    );
}

#[test]
fn mapping_with_template_contributes_both() {
    let (sink, logger) = capture_setup();
    let state = ScopeState::map_with_template(
        [("tenant", json!("t1"))],
        "tenant {Tenant}",
        vec![json!("t1")],
    )
    .expect("state");
    let _scope = logger.begin_scope(state);
    logger.info("inside", &[]);

    let record = &sink.records()[0];
    assert_eq!(record.property("tenant"), Some(&PropertyValue::Value(json!("t1"))));
    assert_eq!(scope_sequence(record), Some(vec!["tenant t1".to_string()]));
}

#[test]
fn enrichment_is_first_writer_wins_on_the_sequence() {
    let (_sink, logger) = capture_setup();
    let _scope = logger.begin_scope(ScopeState::text("active"));

    let mut record = LogRecord::new(Level::Info, "enrichment_test", "prefilled");
    record.add_property_if_absent(
        SCOPE_PROPERTY,
        PropertyValue::Sequence(vec!["already here".to_string()]),
    );
    enrich_from_ambient(&mut record);
    enrich_from_ambient(&mut record);

    assert_eq!(scope_sequence(&record), Some(vec!["already here".to_string()]));
}

#[test]
fn no_open_scopes_means_no_scope_property() {
    let (sink, logger) = capture_setup();
    logger.info("bare", &[]);
    let record = &sink.records()[0];
    assert!(!record.has_property(SCOPE_PROPERTY));
}

#[test]
fn closed_scopes_stop_contributing() {
    let (sink, logger) = capture_setup();
    let _outer = logger.begin_scope(ScopeState::text("outer"));
    {
        let _inner = logger.begin_scope(ScopeState::text("inner"));
        logger.info("both open", &[]);
    }
    logger.info("inner closed", &[]);

    let records = sink.records();
    assert_eq!(
        scope_sequence(&records[0]),
        Some(vec!["outer".to_string(), "inner".to_string()])
    );
    assert_eq!(scope_sequence(&records[1]), Some(vec!["outer".to_string()]));
}

#[test]
fn template_args_become_named_properties_on_the_record() {
    let (sink, logger) = capture_setup();
    logger.info("handling a request for {User}", &[json!("timmy")]);

    let record = &sink.records()[0];
    assert_eq!(record.message, "handling a request for timmy");
    assert_eq!(record.property("User"), Some(&PropertyValue::Value(json!("timmy"))));
}

// The end-to-end shape from the facade's point of view: a correlation scope
// around a plain message.
#[test]
fn correlation_scope_end_to_end() {
    let (sink, logger) = capture_setup();
    {
        let _scope = logger.begin_scope(
            ScopeState::template("Correlation {CorrelationID}", vec![json!(12345)])
                .expect("template"),
        );
        logger.info("Hello there", &[]);
    }

    let records = sink.records();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.level, Level::Info);
    assert_eq!(record.message, "Hello there");
    assert_eq!(
        scope_sequence(record),
        Some(vec!["Correlation 12345".to_string()])
    );
}
