#![allow(clippy::unwrap_used, clippy::expect_used)]

use rolesync_core::diff::{find_discrepancies, find_duplicates, merge_datasets};
use rolesync_core::errors::RoleSyncError;
use rolesync_core::extract::{Dataset, FieldSpec, Record, SourceText};
use rolesync_core::logging_facility::test_capture::init_test_capture;
use rolesync_core::mapping::IdentifierMapping;
use rolesync_core::{log_item_skip, log_op_end, log_op_error, log_op_start};
use rolesync_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_ITEM_SKIPPED, EVENT_START, FIELD_DUPLICATE_GROUPS,
    FIELD_DURATION_MS, FIELD_ERR_CODE, FIELD_ERR_KIND, FIELD_MISSING_COUNT, FIELD_PATH,
    FIELD_RECORD_COUNT, FIELD_RECORD_ID,
};
use tracing::Level;

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, record_count = 3);

    let starts = capture.find(op_name, EVENT_START);
    assert_eq!(starts.len(), 1, "Should have exactly one start event");
    assert_eq!(starts[0].field(FIELD_RECORD_COUNT), Some("3"));
    assert!(starts[0]
        .component
        .as_deref()
        .is_some_and(|c| c.starts_with("logging_facility_tests")));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let ends = capture.find(op_name, EVENT_END);
    assert_eq!(ends.len(), 1, "Should have exactly one end event");
    assert_eq!(ends[0].field(FIELD_DURATION_MS), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = RoleSyncError::UnbalancedBlock {
        identifier: "imp".to_string(),
        offset: 120,
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let errors = capture.find(op_name, EVENT_END_ERROR);
    assert_eq!(errors.len(), 1, "Should have exactly one error event");
    assert_eq!(errors[0].level, Level::ERROR);
    assert_eq!(errors[0].field(FIELD_ERR_CODE), Some("ERR_AMBIGUOUS_BLOCK"));
    assert_eq!(errors[0].field(FIELD_ERR_KIND), Some("AmbiguousBlock"));
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_test_capture_assert_event_exists_fails() {
    let capture = init_test_capture();
    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}

#[test]
fn test_batch_extraction_logs_boundaries_and_skips() {
    let capture = init_test_capture();
    let source = SourceText::new(r#""imp": { "name": "Imp" }"#);

    let batch = source.extract_all(["imp", "missing_unique_block_42"], &FieldSpec::role());
    assert_eq!(batch.failures.len(), 1);

    capture.assert_event_exists("extract_all", EVENT_START);
    capture.assert_event_exists("extract_all", EVENT_END);
    let skipped = capture.find("extract_all", EVENT_ITEM_SKIPPED);
    let skipped: Vec<_> = skipped
        .iter()
        .filter(|e| e.field(FIELD_RECORD_ID) == Some("missing_unique_block_42"))
        .collect();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].level, Level::WARN);
    assert_eq!(skipped[0].field(FIELD_ERR_CODE), Some("ERR_BLOCK_NOT_FOUND"));
}

#[test]
fn test_log_item_skip_carries_path_and_extra_fields() {
    let capture = init_test_capture();
    let op_name = "test_log_item_skip_unique_4";

    // Given: a per-item error that names a document path
    let err = RoleSyncError::InvalidDocument {
        path: "json/custom/unique_skip.json".to_string(),
        reason: "expected value at line 1".to_string(),
    };

    // When: the item is skipped with one extra field
    log_item_skip!(op_name, err, record_count = 9);

    // Then: a single warn event carries the path, code and extra field
    let events = capture.find(op_name, EVENT_ITEM_SKIPPED);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level, Level::WARN);
    assert_eq!(events[0].field(FIELD_PATH), Some("json/custom/unique_skip.json"));
    assert_eq!(events[0].field(FIELD_RECORD_ID), Some(""));
    assert_eq!(events[0].field(FIELD_ERR_CODE), Some("ERR_PARSE_FAILURE"));
    assert_eq!(events[0].field(FIELD_RECORD_COUNT), Some("9"));
}

#[test]
fn test_discrepancy_end_event_carries_count() {
    let capture = init_test_capture();
    let source: Dataset = vec![
        Record::new("unique_disc_a"),
        Record::new("unique_disc_b"),
        Record::new("unique_disc_c"),
        Record::new("unique_disc_d"),
        Record::new("unique_disc_e"),
        Record::new("unique_disc_f"),
        Record::new("unique_disc_g"),
    ]
    .into();

    find_discrepancies(&source, &Dataset::new(), &IdentifierMapping::default());

    let matching = capture.count_events(|e| {
        e.op.as_deref() == Some("find_discrepancies")
            && e.event.as_deref() == Some(EVENT_END)
            && e.field(FIELD_MISSING_COUNT) == Some("7")
    });
    assert!(matching >= 1);
}

#[test]
fn test_rejected_merge_logs_error_event() {
    let capture = init_test_capture();
    let existing: Dataset = vec![Record::new("unique_merge_imp")].into();
    let additions: Dataset = vec![Record::new("Unique-Merge-Imp")].into();

    assert!(merge_datasets(&existing, &additions).is_err());

    let rejected = capture.count_events(|e| {
        e.op.as_deref() == Some("merge_datasets")
            && e.event.as_deref() == Some(EVENT_END_ERROR)
            && e.field(FIELD_ERR_CODE) == Some("ERR_SCHEMA_ANOMALY")
    });
    assert!(rejected >= 1);
}

#[test]
fn test_duplicate_anomalies_logged_with_group_count() {
    let capture = init_test_capture();
    let data: Dataset = ["dup_log_a", "Dup-Log-A", "dup_log_b", "DUP_LOG_B", "dup_log_c", "duplogc"]
        .into_iter()
        .map(Record::new)
        .collect();

    assert_eq!(find_duplicates(&data).groups.len(), 3);

    let warnings = capture.count_events(|e| {
        e.level == Level::WARN && e.field(FIELD_DUPLICATE_GROUPS) == Some("3")
    });
    assert!(warnings >= 1);
}
