use prontuario_storage::records::{load_all, load_json, save_json};
use prontuario_storage::store::{MemoryObjectStore, ObjectStore};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Row {
    n: u32,
}

#[tokio::test]
async fn list_is_prefix_scoped_and_ordered() {
    let store = MemoryObjectStore::new();
    for key in ["a/2.json", "a/1.json", "ab/3.json", "b/4.json"] {
        store.put(key, vec![], None).await.unwrap();
    }
    assert_eq!(store.list("a/").await.unwrap(), vec!["a/1.json", "a/2.json"]);
}

#[tokio::test]
async fn missing_key_is_not_found() {
    let store = MemoryObjectStore::new();
    let err = store.get("nope").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn load_all_skips_nested_and_non_json_keys() {
    let store = MemoryObjectStore::new();
    save_json(&store, "rows/1.json", &Row { n: 1 }).await.unwrap();
    save_json(&store, "rows/2.json", &Row { n: 2 }).await.unwrap();
    store.put("rows/blob.bin", vec![1, 2], None).await.unwrap();
    store.put("rows/nested/3.json", b"{}".to_vec(), None).await.unwrap();

    let rows: Vec<Row> = load_all(&store, "rows/").await.unwrap();
    assert_eq!(rows, vec![Row { n: 1 }, Row { n: 2 }]);

    let one: Row = load_json(&store, "rows/2.json").await.unwrap();
    assert_eq!(one, Row { n: 2 });
}

#[tokio::test]
async fn injected_failures_only_hit_matching_keys() {
    let store = MemoryObjectStore::new();
    store.fail_puts_containing("bad");
    assert!(store.put("good/1", vec![], None).await.is_ok());
    assert!(store.put("bad/1", vec![], None).await.is_err());

    store.fail_deletes_containing("good");
    assert!(store.delete("good/1").await.is_err());
    assert!(store.contains("good/1"));
}
