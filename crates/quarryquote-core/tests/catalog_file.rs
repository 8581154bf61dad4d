use std::path::Path;

use quarryquote_core::{default_catalog, load_catalog, ConfigError};

const SHIPPED_CATALOG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/catalog.yaml");

#[test]
fn shipped_catalog_matches_built_in() {
    let catalog = load_catalog(Path::new(SHIPPED_CATALOG)).expect("load shipped catalog");
    assert_eq!(catalog, default_catalog());
}

#[test]
fn invalid_catalog_file_is_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("catalog.yaml");
    std::fs::write(
        &path,
        "materials:\n  - id: 1\n    name: A\n    quarry_id: Q_1\n    price: \"5\"\n    tax_rate: \"0.1\"\n  - id: 1\n    name: B\n    quarry_id: Q_1\n    price: \"6\"\n    tax_rate: \"0.1\"\n",
    )
    .expect("write catalog");

    let err = load_catalog(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)), "{err}");
}

#[test]
fn malformed_catalog_file_is_parse_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("catalog.yaml");
    std::fs::write(&path, "materials: [not: a: list").expect("write catalog");

    let err = load_catalog(&path).unwrap_err();
    assert!(matches!(err, ConfigError::CatalogFileParse(_)), "{err}");
}
