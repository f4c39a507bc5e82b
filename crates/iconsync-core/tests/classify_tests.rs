//! Tests for change classification

use iconsync_core::{Category, LocalRecord, SyncConfig, classify};
use iconsync_fs::MemoryStore;
use iconsync_remote::RemoteItem;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

fn remote(id: &str, name: &str, hash: &str) -> RemoteItem {
    RemoteItem {
        identifier: id.to_string(),
        name: name.to_string(),
        content_hash: hash.to_string(),
    }
}

#[rstest]
#[case::same_hash_file_present("h1", true, Category::Unmodified)]
#[case::new_hash_file_present("h2", true, Category::Modified)]
#[case::same_hash_file_missing("h1", false, Category::Restored)]
#[case::new_hash_file_missing("h2", false, Category::Restored)]
fn test_category_matrix(#[case] remote_hash: &str, #[case] on_disk: bool, #[case] expected: Category) {
    let mut store = MemoryStore::new();
    if on_disk {
        store.insert("logo.svg", "<svg/>");
    }
    let local = [LocalRecord::new("1", "logo", "h1")];

    let changelog = classify(
        &[remote("1", "logo", remote_hash)],
        Some(&local),
        false,
        &store,
        &SyncConfig::default(),
    );

    assert_eq!(changelog.len(), 1);
    assert_eq!(changelog.items()[0].category, expected);
    assert!(!changelog.items()[0].is_renamed);
}

#[rstest]
#[case::first_run(None, false)]
#[case::forced(Some(vec![LocalRecord::new("1", "old", "h0").with_previous_names(&["older"])]), true)]
fn test_everything_added(#[case] local: Option<Vec<LocalRecord>>, #[case] force_all: bool) {
    let store = MemoryStore::new().with_file("old.svg", "x");

    let changelog = classify(
        &[remote("1", "new", "h1"), remote("2", "other", "h2")],
        local.as_deref(),
        force_all,
        &store,
        &SyncConfig::default(),
    );

    assert_eq!(changelog.len(), 2);
    assert!(changelog.items().iter().all(|i| i.category == Category::Added));
    for item in changelog.items() {
        assert!(item.previous_names.is_empty());
        assert!(!item.is_renamed);
    }
}

#[test]
fn test_renamed_item_category_follows_old_file() {
    let store = MemoryStore::new().with_file("old.svg", "x");
    let local = [LocalRecord::new("1", "old", "h1")];

    let changelog = classify(
        &[remote("1", "new", "h1")],
        Some(&local),
        false,
        &store,
        &SyncConfig::default(),
    );

    let item = &changelog.items()[0];
    assert!(item.is_renamed);
    assert_eq!(item.category, Category::Unmodified);
    assert_eq!(item.previous_names, vec!["old"]);
}

#[test]
fn test_removed_only_when_file_remains() {
    let store = MemoryStore::new().with_file("kept.svg", "x");
    let local = [
        LocalRecord::new("1", "kept", "h1"),
        LocalRecord::new("2", "gone", "h2"),
    ];

    let changelog = classify(&[], Some(&local), false, &store, &SyncConfig::default());

    let removed: Vec<&str> = changelog
        .items()
        .iter()
        .filter(|i| i.category == Category::Removed)
        .map(|i| i.name.as_str())
        .collect();
    assert_eq!(removed, vec!["kept"]);
}

#[test]
fn test_discovery_order_is_remote_then_removed() {
    let store = MemoryStore::new().with_file("z.svg", "x");
    let local = [LocalRecord::new("9", "z", "h9")];

    let changelog = classify(
        &[remote("2", "b", "h2"), remote("1", "a", "h1")],
        Some(&local),
        false,
        &store,
        &SyncConfig::default(),
    );

    let ids: Vec<&str> = changelog.items().iter().map(|i| i.identifier.as_str()).collect();
    assert_eq!(ids, vec!["2", "1", "9"]);
}

fn record_strategy() -> impl Strategy<Value = (String, String, String, bool)> {
    (
        "[a-e]",
        "[a-e]",
        prop_oneof![Just("h1".to_string()), Just("h2".to_string())],
        any::<bool>(),
    )
}

proptest! {
    #[test]
    fn prop_category_independent_of_remote_order(
        entries in prop::collection::vec(record_strategy(), 0..8),
        remote_names in prop::collection::vec("[a-e]", 8),
    ) {
        let mut store = MemoryStore::new();
        let mut local = Vec::new();
        let mut seen = std::collections::HashSet::new();
        for (id, name, hash, on_disk) in &entries {
            if !seen.insert(id.clone()) {
                continue;
            }
            if *on_disk {
                store.insert(format!("{name}.svg").as_str(), "x");
            }
            local.push(LocalRecord::new(id.as_str(), name.as_str(), hash.as_str()));
        }
        let items: Vec<RemoteItem> = local
            .iter()
            .zip(&remote_names)
            .map(|(r, name)| remote(&r.identifier, name, "h1"))
            .collect();
        let mut reversed = items.clone();
        reversed.reverse();

        let config = SyncConfig::default();
        let forward = classify(&items, Some(&local), false, &store, &config);
        let backward = classify(&reversed, Some(&local), false, &store, &config);

        for item in forward.items() {
            let other = backward
                .items()
                .iter()
                .find(|i| i.identifier == item.identifier)
                .unwrap();
            prop_assert_eq!(item.category, other.category);
            prop_assert_eq!(item.is_renamed, other.is_renamed);
            prop_assert_eq!(&item.previous_names, &other.previous_names);
        }
        prop_assert_eq!(forward.len(), backward.len());
    }
}
