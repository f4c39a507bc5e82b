//! Tests for inventory persistence on disk

use iconsync_core::{Inventory, LocalRecord};
use iconsync_fs::{DiskStore, NormalizedPath};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

#[test]
fn test_save_then_load_on_disk() {
    let temp = TempDir::new().unwrap();
    let mut store = DiskStore::new(temp.path());
    let path = NormalizedPath::new("_inventory.json");

    let inventory = Inventory::new(vec![
        LocalRecord::new("1:1", "arrows/left", "sha256:aa").with_previous_names(&["left"]),
        LocalRecord::new("1:2", "logo", "sha256:bb"),
    ]);
    inventory.save(&mut store, &path).unwrap();

    let loaded = Inventory::load(&store, &path).unwrap().unwrap();
    assert_eq!(loaded, inventory);
}

#[test]
fn test_file_format() {
    let temp = TempDir::new().unwrap();
    let mut store = DiskStore::new(temp.path());
    let path = NormalizedPath::new("_inventory.json");

    Inventory::new(vec![
        LocalRecord::new("1:1", "arrows/left", "sha256:aa").with_previous_names(&["left"]),
    ])
    .save(&mut store, &path)
    .unwrap();

    let raw = std::fs::read_to_string(temp.path().join("_inventory.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        json!([{
            "id": "1:1",
            "name": "arrows/left",
            "previousNames": ["left"],
            "hash": "sha256:aa"
        }])
    );
    assert!(raw.ends_with('\n'));
}

#[test]
fn test_loading_normalizes_history() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("_inventory.json"),
        r#"[{"id":"1","name":"a","previousNames":["b","a","b","c"],"hash":"h"}]"#,
    )
    .unwrap();
    let store = DiskStore::new(temp.path());

    let loaded = Inventory::load(&store, &NormalizedPath::new("_inventory.json"))
        .unwrap()
        .unwrap();

    assert_eq!(loaded.get("1").unwrap().previous_names, vec!["b", "c"]);
}
