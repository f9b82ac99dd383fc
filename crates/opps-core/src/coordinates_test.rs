use std::path::Path;

use chrono::{TimeZone, Utc};

use super::*;

fn entry(name: &str, lat: f64, lon: f64) -> LocationEntry {
    LocationEntry {
        name: name.to_string(),
        lat,
        lon,
    }
}

fn listing(location: Option<&str>, coordinates: Option<Coordinates>) -> Listing {
    Listing {
        id: "l-1".to_string(),
        title: "Listing".to_string(),
        description: String::new(),
        tags: std::collections::BTreeSet::new(),
        category: "jobs".to_string(),
        status: "open".to_string(),
        location: location.map(str::to_string),
        coordinates,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

fn sample_table() -> CoordinateTable {
    CoordinateTable::from_entries(vec![
        entry("New York", 40.712_8, -74.006_0),
        entry("Los Angeles", 34.052_2, -118.243_7),
    ])
    .unwrap()
}

#[test]
fn lookup_is_case_insensitive_and_trimmed() {
    let table = sample_table();
    assert_eq!(
        table.lookup("  new york "),
        Some(Coordinates::new(40.712_8, -74.006_0))
    );
    assert!(table.contains("LOS ANGELES"));
    assert!(table.lookup("Chicago").is_none());
}

#[test]
fn sentinels_never_resolve() {
    let table = sample_table();
    assert!(table.lookup(REMOTE).is_none());
    assert!(table.lookup(ALL_LOCATIONS).is_none());
}

#[test]
fn resolve_prefers_explicit_coordinates() {
    let table = sample_table();
    let explicit = Coordinates::new(10.0, 20.0);
    let l = listing(Some("New York"), Some(explicit));
    assert_eq!(table.resolve(&l), Some(explicit));
}

#[test]
fn resolve_falls_back_to_label_lookup() {
    let table = sample_table();
    let l = listing(Some("Los Angeles"), None);
    assert_eq!(
        table.resolve(&l),
        Some(Coordinates::new(34.052_2, -118.243_7))
    );
}

#[test]
fn resolve_ignores_invalid_explicit_coordinates() {
    let table = sample_table();
    let l = listing(Some("New York"), Some(Coordinates::new(f64::NAN, 0.0)));
    assert_eq!(table.resolve(&l), table.lookup("New York"));
}

#[test]
fn resolve_returns_none_for_remote_and_unknown() {
    let table = sample_table();
    assert!(table.resolve(&listing(Some("Remote"), None)).is_none());
    assert!(table.resolve(&listing(Some("Atlantis"), None)).is_none());
    assert!(table.resolve(&listing(None, None)).is_none());
}

#[test]
fn validate_rejects_empty_name() {
    let err = CoordinateTable::from_entries(vec![entry("  ", 0.0, 0.0)]).unwrap_err();
    assert!(err.to_string().contains("non-empty"));
}

#[test]
fn validate_rejects_reserved_label() {
    let err = CoordinateTable::from_entries(vec![entry("remote", 0.0, 0.0)]).unwrap_err();
    assert!(err.to_string().contains("reserved"));
}

#[test]
fn validate_rejects_out_of_range_latitude() {
    let err = CoordinateTable::from_entries(vec![entry("Nowhere", 95.0, 0.0)]).unwrap_err();
    assert!(err.to_string().contains("out-of-range"));
}

#[test]
fn validate_rejects_duplicate_name() {
    let err = CoordinateTable::from_entries(vec![
        entry("Boston", 42.360_1, -71.058_9),
        entry("boston", 42.0, -71.0),
    ])
    .unwrap_err();
    assert!(err.to_string().contains("duplicate location name"));
}

#[test]
fn load_reports_missing_file() {
    let err = load_coordinate_table(Path::new("/definitely/not/here.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::CoordinatesFileIo { .. }));
}

#[test]
fn load_coordinate_table_from_real_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config")
        .join("coordinates.yaml");
    assert!(
        path.exists(),
        "coordinates.yaml missing at {path:?}; required for this test"
    );
    let result = load_coordinate_table(&path);
    assert!(result.is_ok(), "failed to load coordinates.yaml: {result:?}");
    let table = result.unwrap();
    assert!(table.contains("New York"));
    assert!(table.contains("Los Angeles"));
}
