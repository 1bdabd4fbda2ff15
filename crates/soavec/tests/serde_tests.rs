//! Tests for serializing the container through `#[soa_derive(Serialize, Deserialize)]`

use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use serde_json::json;
use soavec::StructOfArray;

#[derive(Debug, Clone, PartialEq, StructOfArray)]
#[soa_derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub sensor: String,
    pub value: f32,
}

#[derive(Debug, Clone, PartialEq, StructOfArray)]
#[soa_derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Station {
    #[soa(nested)]
    pub reading: Reading,
    pub elevation: u32,
}

fn sample() -> ReadingVec {
    vec![
        Reading {
            sensor: "north".into(),
            value: 1.5,
        },
        Reading {
            sensor: "south".into(),
            value: -2.25,
        },
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_serialize_as_columns() {
    let value = serde_json::to_value(sample()).unwrap();
    assert_eq!(
        value,
        json!({
            "sensor": ["north", "south"],
            "value": [1.5, -2.25],
        })
    );
}

#[test]
fn test_deserialize_round_trip() {
    let text = serde_json::to_string(&sample()).unwrap();
    let readings: ReadingVec = serde_json::from_str(&text).unwrap();

    assert_eq!(readings, sample());
    assert_eq!(readings.index(1).sensor, "south");
}

#[test]
fn test_deserialize_rejects_columns_of_different_lengths() {
    let err = serde_json::from_str::<ReadingVec>(r#"{"sensor": ["north", "south"], "value": [1.0]}"#)
        .unwrap_err();
    assert!(err
        .to_string()
        .contains("length mismatch on field `value`: expected 2 elements, got 1"));

    let err = serde_json::from_str::<ReadingVec>(r#"{"sensor": [], "value": [1.0]}"#).unwrap_err();
    assert!(err.to_string().contains("length mismatch"));
}

#[test]
fn test_deserialize_still_reports_missing_columns() {
    let err = serde_json::from_str::<ReadingVec>(r#"{"sensor": ["north"]}"#).unwrap_err();
    assert!(err.to_string().contains("missing field `value`"));
}

#[test]
fn test_deserialize_nested_columns_are_checked() {
    let err = serde_json::from_str::<StationVec>(
        r#"{"reading": {"sensor": ["north"], "value": []}, "elevation": [12]}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("field `value`: expected 1 elements, got 0"));

    let err = serde_json::from_str::<StationVec>(
        r#"{"reading": {"sensor": ["north"], "value": [0.5]}, "elevation": [12, 40]}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("field `elevation`: expected 1 elements, got 2"));

    let stations = serde_json::from_str::<StationVec>(
        r#"{"reading": {"sensor": ["north"], "value": [0.5]}, "elevation": [12]}"#,
    )
    .unwrap();
    assert_eq!(stations.len(), 1);
    assert_eq!(*stations.index(0).elevation, 12);
}

#[test]
fn test_empty_container() {
    let readings = ReadingVec::new();
    assert_eq!(
        serde_json::to_value(&readings).unwrap(),
        json!({ "sensor": [], "value": [] })
    );
}
