use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::interview::{
    InterviewDuration, InterviewPatch, InterviewRecord, InterviewStatus,
};
use crate::utils::logger::LOGGER;

/// On-disk shape of the store: one JSON blob holding the full record map.
/// No version field and no checksum; an incompatible blob loads as empty.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedState {
    interviews: HashMap<String, InterviewRecord>,
}

/// The single owner of all interview records. Constructed once at startup,
/// shared through the router state. Every operation is total: missing ids
/// are no-ops, malformed field contents are accepted as-is (validation is
/// the caller's responsibility), and persistence failures are logged and
/// swallowed rather than surfaced.
#[derive(Debug)]
pub struct InterviewStore {
    interviews: std::sync::RwLock<HashMap<String, InterviewRecord>>,
    data_file: PathBuf,
    // Serializes snapshot+write+rename so concurrent mutations cannot land
    // a stale snapshot over a newer blob or race on the temp file.
    persist_lock: tokio::sync::Mutex<()>,
}

impl InterviewStore {
    /// Load the store from `data_file`, starting empty when the file is
    /// missing or unreadable.
    pub fn load(data_file: impl Into<PathBuf>) -> Self {
        let data_file = data_file.into();

        let interviews = match std::fs::read_to_string(&data_file) {
            Ok(content) => match serde_json::from_str::<PersistedState>(&content) {
                Ok(state) => state.interviews,
                Err(e) => {
                    tracing::warn!(
                        path = %data_file.display(),
                        error = %e,
                        "Stored interview blob did not parse, starting empty"
                    );
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                tracing::warn!(
                    path = %data_file.display(),
                    error = %e,
                    "Failed to read interview blob, starting empty"
                );
                HashMap::new()
            }
        };

        Self {
            interviews: std::sync::RwLock::new(interviews),
            data_file,
            persist_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Insert under `record.id`, silently overwriting an existing entry.
    pub async fn add(&self, record: InterviewRecord) {
        let id = record.id.clone();
        if let Ok(mut interviews) = self.interviews.write() {
            interviews.insert(id.clone(), record);
        }

        LOGGER.log_business_event(
            "interview_added",
            [(
                "interview_id".to_string(),
                serde_json::Value::String(id),
            )]
            .iter()
            .cloned()
            .collect(),
        );

        self.persist().await;
    }

    /// Merge `patch` onto the record at `id`, field by field. Returns the
    /// merged record, or `None` when the id is absent (store unchanged,
    /// no entry created).
    pub async fn update(&self, id: &str, patch: InterviewPatch) -> Option<InterviewRecord> {
        let merged = {
            if let Ok(mut interviews) = self.interviews.write() {
                match interviews.get_mut(id) {
                    Some(record) => {
                        patch.apply_to(record);
                        Some(record.clone())
                    }
                    None => None,
                }
            } else {
                None
            }
        };

        if merged.is_some() {
            LOGGER.log_business_event(
                "interview_updated",
                [(
                    "interview_id".to_string(),
                    serde_json::Value::String(id.to_string()),
                )]
                .iter()
                .cloned()
                .collect(),
            );
            self.persist().await;
        }

        merged
    }

    /// Remove the entry at `id` if present. Idempotent.
    pub async fn delete(&self, id: &str) {
        let removed = if let Ok(mut interviews) = self.interviews.write() {
            interviews.remove(id).is_some()
        } else {
            false
        };

        if removed {
            LOGGER.log_business_event(
                "interview_deleted",
                [(
                    "interview_id".to_string(),
                    serde_json::Value::String(id.to_string()),
                )]
                .iter()
                .cloned()
                .collect(),
            );
            self.persist().await;
        }
    }

    pub fn get(&self, id: &str) -> Option<InterviewRecord> {
        self.interviews
            .read()
            .ok()
            .and_then(|interviews| interviews.get(id).cloned())
    }

    /// Every record, order unspecified.
    pub fn list_all(&self) -> Vec<InterviewRecord> {
        self.interviews
            .read()
            .map(|interviews| interviews.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Records whose `date` string equals the ISO form of `date`.
    pub fn list_by_date(&self, date: NaiveDate) -> Vec<InterviewRecord> {
        let date_string = date.format("%Y-%m-%d").to_string();
        self.interviews
            .read()
            .map(|interviews| {
                interviews
                    .values()
                    .filter(|record| record.date == date_string)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.interviews
            .read()
            .map(|interviews| interviews.is_empty())
            .unwrap_or(true)
    }

    /// Insert the three demo interviews the dashboard ships with. Intended
    /// for a first run against an empty store.
    pub async fn seed_demo_records(&self) {
        for record in demo_records() {
            self.add(record).await;
        }
    }

    /// Serialize a snapshot of the full map and write it out, temp file +
    /// rename so a crash mid-write cannot truncate the blob. The map lock
    /// is not held across the file write; instead writers queue on
    /// `persist_lock` and snapshot only once they hold it, so the last
    /// rename always carries the newest state.
    async fn persist(&self) {
        let _guard = self.persist_lock.lock().await;
        let start_time = Instant::now();

        let snapshot = {
            match self.interviews.read() {
                Ok(interviews) => PersistedState {
                    interviews: interviews.clone(),
                },
                Err(_) => return,
            }
        };
        let record_count = snapshot.interviews.len();

        let content = match serde_json::to_string_pretty(&snapshot) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize interview blob");
                return;
            }
        };

        if let Some(parent) = self.data_file.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                tracing::warn!(path = %parent.display(), error = %e, "Failed to create data directory");
                return;
            }
        }

        let temp_file = self.data_file.with_extension("json.tmp");
        if let Err(e) = tokio::fs::write(&temp_file, content).await {
            tracing::warn!(path = %temp_file.display(), error = %e, "Failed to write interview blob");
            return;
        }
        if let Err(e) = tokio::fs::rename(&temp_file, &self.data_file).await {
            tracing::warn!(path = %self.data_file.display(), error = %e, "Failed to replace interview blob");
            return;
        }

        LOGGER.log_store_write(
            &self.data_file,
            start_time.elapsed().as_millis(),
            record_count,
        );
    }
}

fn demo_records() -> Vec<InterviewRecord> {
    vec![
        InterviewRecord {
            id: "1".to_string(),
            company_name: "Alibaba".to_string(),
            position: String::new(),
            date: "2025-03-13".to_string(),
            start_time: "11:00".to_string(),
            duration: InterviewDuration::OneHour,
            location: "969 Wenyi West Road, Hangzhou".to_string(),
            status: InterviewStatus::Scheduled,
            notes: "Brush up on React and Vue internals, plus algorithm questions".to_string(),
            color: "#f59e0b".to_string(),
        },
        InterviewRecord {
            id: "2".to_string(),
            company_name: "Tencent".to_string(),
            position: "Full-Stack Engineer".to_string(),
            date: "2025-03-11".to_string(),
            start_time: "14:00".to_string(),
            duration: InterviewDuration::NinetyMin,
            location: "Tencent Building, Nanshan District, Shenzhen".to_string(),
            status: InterviewStatus::Scheduled,
            notes: "Review Node.js and microservice architecture".to_string(),
            color: "#3b82f6".to_string(),
        },
        InterviewRecord {
            id: "3".to_string(),
            company_name: "ByteDance".to_string(),
            position: "Senior Frontend Engineer".to_string(),
            date: "2025-03-15".to_string(),
            start_time: "10:00".to_string(),
            duration: InterviewDuration::NinetyMin,
            location: "Zhongguancun Software Park Phase 2, Beijing".to_string(),
            status: InterviewStatus::Completed,
            notes: "Interviewer focused heavily on performance optimization".to_string(),
            color: "#10b981".to_string(),
        },
    ]
}
