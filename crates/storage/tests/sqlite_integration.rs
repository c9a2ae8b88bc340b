use storage::repository::{KeyValueStore, Storage};
use storage::sqlite::SqliteStore;

#[tokio::test]
async fn migrates_and_round_trips_documents() {
    let store = SqliteStore::connect("sqlite:file:memdb_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    store.migrate().await.expect("migrate");

    assert!(store.get("user_stats").await.unwrap().is_none());

    store
        .set("user_stats", r#"{"totalTests":2,"activeStreak":1}"#)
        .await
        .unwrap();
    let value = store.get("user_stats").await.unwrap();
    assert_eq!(
        value.as_deref(),
        Some(r#"{"totalTests":2,"activeStreak":1}"#)
    );
}

#[tokio::test]
async fn upsert_replaces_previous_value() {
    let store = SqliteStore::connect("sqlite:file:memdb_upsert?mode=memory&cache=shared")
        .await
        .expect("connect");
    store.migrate().await.expect("migrate");

    store.set("user_profile", "first").await.unwrap();
    store.set("user_profile", "second").await.unwrap();

    let value = store.get("user_profile").await.unwrap();
    assert_eq!(value.as_deref(), Some("second"));
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let store = SqliteStore::connect("sqlite:file:memdb_migrate_twice?mode=memory&cache=shared")
        .await
        .expect("connect");
    store.migrate().await.expect("migrate");
    store.migrate().await.expect("migrate again");

    store.set("study_plans", "[]").await.unwrap();
    assert!(store.get("study_plans").await.unwrap().is_some());
}

#[tokio::test]
async fn storage_aggregate_builds_sqlite_backend() {
    let storage = Storage::sqlite("sqlite:file:memdb_aggregate?mode=memory&cache=shared")
        .await
        .expect("connect");
    storage.kv.set("k", "v").await.unwrap();
    assert_eq!(storage.kv.get("k").await.unwrap().as_deref(), Some("v"));
}
