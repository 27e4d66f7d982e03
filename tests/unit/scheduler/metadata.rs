use std::sync::Arc;

use serde_json::json;

use super::*;

#[test]
fn dotted_path_lookup() {
    let store = MetadataStore::new();
    store.put(
        "bars",
        json!({"colour": [255, 0, 0], "grid": {"rows": 3, "cols": {"n": 4}}}),
    );

    assert_eq!(store.get("bars", "grid.rows"), Some(json!(3)));
    assert_eq!(store.get("bars", "grid.cols.n"), Some(json!(4)));
    assert_eq!(store.get("bars", "colour"), Some(json!([255, 0, 0])));
    assert_eq!(store.get("bars", "").unwrap()["grid"]["rows"], json!(3));
}

#[test]
fn missing_or_non_traversable_segments_are_none() {
    let store = MetadataStore::new();
    store.put("a", json!({"x": 1, "list": [1, 2]}));

    assert_eq!(store.get("nobody", ""), None);
    assert_eq!(store.get("a", "y"), None);
    assert_eq!(store.get("a", "x.deeper"), None);
    assert_eq!(store.get("a", "list.0"), None);
}

#[test]
fn put_replaces_existing_entry() {
    let store = MetadataStore::new();
    store.put("a", json!({"v": 1}));
    store.put("a", json!({"v": 2}));
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("a", "v"), Some(json!(2)));
}

#[test]
fn concurrent_put_and_get() {
    let store = Arc::new(MetadataStore::new());
    std::thread::scope(|s| {
        for i in 0..8 {
            let store = Arc::clone(&store);
            s.spawn(move || {
                let id = format!("w{i}");
                store.put(id.clone(), json!({ "index": i }));
                assert_eq!(store.get(&id, "index"), Some(json!(i)));
            });
        }
    });
    assert_eq!(store.len(), 8);
}
