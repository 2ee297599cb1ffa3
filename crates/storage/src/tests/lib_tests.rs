use super::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct DemoSlice {
    items: Vec<String>,
    counter: u32,
}

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.health_check().await.expect("health check");
}

#[tokio::test]
async fn missing_slice_loads_as_none() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let loaded: Option<DemoSlice> = storage.load_slice("customers").await.expect("load");
    assert!(loaded.is_none());
}

#[tokio::test]
async fn saves_and_reloads_a_slice() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let slice = DemoSlice {
        items: vec!["a".into(), "b".into()],
        counter: 7,
    };

    storage.save_slice("customers", &slice).await.expect("save");
    let loaded: Option<DemoSlice> = storage.load_slice("customers").await.expect("load");
    assert_eq!(loaded, Some(slice));
}

#[tokio::test]
async fn save_overwrites_previous_payload() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let first = DemoSlice {
        items: vec!["a".into()],
        counter: 1,
    };
    let second = DemoSlice {
        items: vec!["b".into()],
        counter: 2,
    };

    storage.save_slice("holidays", &first).await.expect("save");
    storage.save_slice("holidays", &second).await.expect("save");

    let loaded: Option<DemoSlice> = storage.load_slice("holidays").await.expect("load");
    assert_eq!(loaded, Some(second));
}

#[tokio::test]
async fn unreadable_payload_loads_as_none() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage
        .save_slice("security", &"not an object")
        .await
        .expect("save");

    let loaded: Option<DemoSlice> = storage.load_slice("security").await.expect("load");
    assert!(loaded.is_none());
}

#[tokio::test]
async fn delete_removes_the_slice() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let slice = DemoSlice {
        items: Vec::new(),
        counter: 0,
    };

    storage.save_slice("master", &slice).await.expect("save");
    storage.delete_slice("master").await.expect("delete");

    let loaded: Option<DemoSlice> = storage.load_slice("master").await.expect("load");
    assert!(loaded.is_none());
}

#[tokio::test]
async fn lists_saved_slices_in_order() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let slice = DemoSlice {
        items: Vec::new(),
        counter: 0,
    };

    storage.save_slice("holidays", &slice).await.expect("save");
    storage.save_slice("customers", &slice).await.expect("save");

    let slices = storage.list_slices().await.expect("list");
    assert_eq!(slices, vec!["customers".to_string(), "holidays".to_string()]);
}

#[tokio::test]
async fn creates_database_file_when_missing() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("nested").join("state.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let storage = Storage::new(&database_url).await.expect("db");
    storage.health_check().await.expect("health check");
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should exist: {}",
        db_path.display()
    );
}
