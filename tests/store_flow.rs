use chrono::NaiveDate;
use tempfile::TempDir;

use interview_scheduler_backend::models::interview::{
    InterviewDuration, InterviewPatch, InterviewRecord, InterviewStatus, DEFAULT_COLOR,
};
use interview_scheduler_backend::services::store::InterviewStore;

fn record(id: &str, date: &str) -> InterviewRecord {
    InterviewRecord {
        id: id.to_string(),
        company_name: "Acme".to_string(),
        position: "Backend Engineer".to_string(),
        date: date.to_string(),
        start_time: "14:00".to_string(),
        duration: InterviewDuration::NinetyMin,
        location: "Remote".to_string(),
        status: InterviewStatus::Scheduled,
        notes: "Bring questions".to_string(),
        color: DEFAULT_COLOR.to_string(),
    }
}

fn store_in(dir: &TempDir) -> InterviewStore {
    InterviewStore::load(dir.path().join("interviews.json"))
}

#[tokio::test]
async fn add_then_list_returns_the_record() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.add(record("a", "2025-03-11")).await;

    let all = store.list_all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], record("a", "2025-03-11"));
}

#[tokio::test]
async fn add_overwrites_an_existing_id_silently() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.add(record("a", "2025-03-11")).await;
    let mut replacement = record("a", "2025-03-12");
    replacement.company_name = "Globex".to_string();
    store.add(replacement.clone()).await;

    let all = store.list_all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], replacement);
}

#[tokio::test]
async fn update_merges_patch_fields_and_keeps_the_rest() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.add(record("a", "2025-03-11")).await;

    let patch = InterviewPatch {
        location: Some("On-site".to_string()),
        status: Some(InterviewStatus::Completed),
        ..Default::default()
    };
    let merged = store.update("a", patch).await.expect("record exists");

    assert_eq!(merged.location, "On-site");
    assert_eq!(merged.status, InterviewStatus::Completed);
    assert_eq!(merged.company_name, "Acme");
    assert_eq!(merged.start_time, "14:00");
    assert_eq!(store.list_all()[0], merged);
}

#[tokio::test]
async fn update_on_missing_id_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.add(record("a", "2025-03-11")).await;

    let patch = InterviewPatch {
        company_name: Some("Globex".to_string()),
        ..Default::default()
    };
    let result = store.update("missing", patch).await;

    assert!(result.is_none());
    let all = store.list_all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], record("a", "2025-03-11"));
}

#[tokio::test]
async fn delete_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.add(record("a", "2025-03-11")).await;

    store.delete("a").await;
    assert!(store.list_all().is_empty());

    // Second delete of the same id is a no-op.
    store.delete("a").await;
    assert!(store.list_all().is_empty());
}

#[tokio::test]
async fn list_by_date_matches_the_iso_string_exactly() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.add(record("a", "2025-03-11")).await;
    store.add(record("b", "2025-03-12")).await;

    let tuesday = NaiveDate::from_ymd_opt(2025, 3, 11).unwrap();
    let matches = store.list_by_date(tuesday);

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, "a");
}

#[tokio::test]
async fn records_survive_a_reload_from_disk() {
    let dir = TempDir::new().unwrap();
    let original = record("a", "2025-03-11");

    {
        let store = store_in(&dir);
        store.add(original.clone()).await;
    }

    let reloaded = store_in(&dir);
    let all = reloaded.list_all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], original);
}

#[tokio::test]
async fn unrecognized_duration_round_trips_through_persistence() {
    let dir = TempDir::new().unwrap();
    let mut odd = record("a", "2025-03-11");
    odd.duration = InterviewDuration::Other("45min".to_string());

    {
        let store = store_in(&dir);
        store.add(odd.clone()).await;
    }

    let reloaded = store_in(&dir);
    let all = reloaded.list_all();
    assert_eq!(all[0].duration, InterviewDuration::Other("45min".to_string()));
    // Layout still buckets it to the one-hour default.
    assert_eq!(all[0].duration.minutes(), 60);
}

#[tokio::test]
async fn corrupt_blob_loads_as_an_empty_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("interviews.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = InterviewStore::load(&path);
    assert!(store.list_all().is_empty());

    // The store stays usable and re-persists over the bad blob.
    store.add(record("a", "2025-03-11")).await;
    let reloaded = InterviewStore::load(&path);
    assert_eq!(reloaded.list_all().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_mutations_all_reach_the_blob() {
    let dir = TempDir::new().unwrap();
    let store = std::sync::Arc::new(store_in(&dir));

    let mut handles = Vec::new();
    for i in 0..20 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.add(record(&format!("id-{}", i), "2025-03-11")).await;
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    // Every completed add must be durable: a fresh load from disk sees
    // all twenty records, not just whichever snapshot renamed last.
    let reloaded = store_in(&dir);
    assert_eq!(reloaded.list_all().len(), 20);
}

#[tokio::test]
async fn demo_seed_populates_an_empty_store() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    assert!(store.is_empty());

    store.seed_demo_records().await;

    assert_eq!(store.list_all().len(), 3);
}
