//! Tests for the query module

use super::*;
use crate::types::AreaType;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;

// ============================================================================
// Filters Tests
// ============================================================================

#[test]
fn test_filters_join_preserves_order() {
    let filters = Filters::from(["areaType=nation", "areaCode=E92000001"]);
    assert_eq!(filters.joined(), "areaType=nation;areaCode=E92000001");
}

#[test]
fn test_filters_are_not_validated() {
    let filters = Filters::new().with("not a predicate").with("x==y;z");
    assert_eq!(filters.joined(), "not a predicate;x==y;z");
    assert_eq!(filters.len(), 2);
}

#[test]
fn test_filters_builders() {
    let filters = Filters::new()
        .area_type(AreaType::Nation)
        .area_name("england")
        .area_code("E92000001")
        .date(NaiveDate::from_ymd_opt(2020, 11, 3).unwrap());

    let collected: Vec<&str> = filters.iter().collect();
    assert_eq!(
        collected,
        vec![
            "areaType=nation",
            "areaName=england",
            "areaCode=E92000001",
            "date=2020-11-03"
        ]
    );
}

#[test]
fn test_default_region_filter() {
    assert_eq!(Filters::default_region().joined(), "areaType=region");
}

// ============================================================================
// Structure Tests
// ============================================================================

#[test]
fn test_structure_compact_json() {
    let structure = Structure::new()
        .field("date", "date")
        .field("name", "areaName")
        .nested("cases", Structure::new().field("daily", "newCasesByPublishDate"));

    assert_eq!(
        structure.to_compact_json().unwrap(),
        r#"{"date":"date","name":"areaName","cases":{"daily":"newCasesByPublishDate"}}"#
    );
}

#[test]
fn test_structure_last_key_wins_keeps_position() {
    let structure = Structure::from_pairs([("a", "first"), ("b", "b"), ("a", "second")]);

    assert_eq!(structure.len(), 2);
    assert_eq!(structure.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(structure.get("a"), Some(&json!("second")));
}

#[test]
fn test_default_structure_collapses_duplicate() {
    let structure = default_structure();
    assert_eq!(DEFAULT_STRUCTURE_FIELDS.len(), 35);
    assert_eq!(structure.len(), 34);

    let keys: Vec<&str> = structure.keys().collect();
    assert_eq!(keys[0], "areaType");
    assert_eq!(keys[7], "cumCasesBySpecimenDateRate");
    assert_eq!(keys[8], "newCasesBySpecimenDate");
    assert_eq!(keys[33], "cumDeaths28DaysByDeathDateRate");

    let compact = structure.to_compact_json().unwrap();
    assert!(!compact.contains(' '));
    assert_eq!(compact.matches("\"cumCasesBySpecimenDateRate\":").count(), 1);
}

#[test]
fn test_structure_from_json_str() {
    let structure =
        Structure::from_json_str(r#"{"date": "date", "x": "a", "x": "b", "n": {"c": "cumCases"}}"#)
            .unwrap();
    assert_eq!(structure.get("x"), Some(&json!("b")));
    assert_eq!(
        structure.to_compact_json().unwrap(),
        r#"{"date":"date","x":"b","n":{"c":"cumCases"}}"#
    );
}

#[test]
fn test_structure_rejects_non_mapping_values() {
    assert!(Structure::from_json_str(r#"["date"]"#).is_err());
    assert!(Structure::from_json_str(r#"{"date": 1}"#).is_err());
    assert!(Structure::from_json_str(r#"{"n": {"deep": null}}"#).is_err());
    assert!(Structure::from_json_str("{not json").is_err());
}

// ============================================================================
// Query Tests
// ============================================================================

#[test]
fn test_query_params() {
    let query = Query::new(
        ["areaType=nation", "areaCode=E92000001"],
        Structure::new().field("date", "date"),
    );

    let params = query.params().unwrap();
    assert_eq!(
        params,
        vec![
            (
                "filters".to_string(),
                "areaType=nation;areaCode=E92000001".to_string()
            ),
            ("structure".to_string(), r#"{"date":"date"}"#.to_string()),
            ("format".to_string(), "json".to_string()),
        ]
    );
}

#[test]
fn test_query_csv_format() {
    let query = Query::new(["areaType=overview"], Structure::new().field("d", "date")).csv();
    assert!(query.is_csv());
    assert_eq!(query.params().unwrap()[2].1, "csv");
}

#[test]
fn test_query_requires_filters() {
    let query = Query::new(Filters::new(), Structure::new());
    assert!(query.params().is_err());
}

#[test]
fn test_query_latest_defaults() {
    let query = Query::latest();
    assert_eq!(query.filters.joined(), "areaType=region");
    assert_eq!(&query.structure, default_structure());
    assert!(!query.is_csv());
}
