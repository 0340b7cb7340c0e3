use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use std::path::Path;
use tracing::{error, info, warn};

#[derive(Debug)]
pub struct StructuredLogger;

impl StructuredLogger {
    pub fn log_request(&self, method: &str, path: &str, status: u16) {
        let log_entry = json!({
            "timestamp": Utc::now().to_rfc3339(),
            "event_type": "http_request",
            "method": method,
            "path": path,
            "status_code": status,
            "service": "interview-scheduler-backend"
        });

        info!("{}", log_entry);
    }

    pub fn log_store_write(&self, path: &Path, duration_ms: u128, record_count: usize) {
        let log_entry = json!({
            "timestamp": Utc::now().to_rfc3339(),
            "event_type": "store_write",
            "path": path.display().to_string(),
            "duration_ms": duration_ms,
            "record_count": record_count,
            "service": "interview-scheduler-backend"
        });

        if duration_ms > 1000 {
            warn!("Slow store write detected: {}", log_entry);
        } else {
            info!("{}", log_entry);
        }
    }

    pub fn log_error(&self, error: &str, context: HashMap<String, serde_json::Value>) {
        let mut log_entry = json!({
            "timestamp": Utc::now().to_rfc3339(),
            "event_type": "error",
            "error_message": error,
            "service": "interview-scheduler-backend"
        });

        for (key, value) in context {
            log_entry[key] = value;
        }

        error!("{}", log_entry);
    }

    pub fn log_business_event(&self, event_name: &str, metadata: HashMap<String, serde_json::Value>) {
        let mut log_entry = json!({
            "timestamp": Utc::now().to_rfc3339(),
            "event_type": "business_event",
            "event_name": event_name,
            "service": "interview-scheduler-backend"
        });

        for (key, value) in metadata {
            log_entry[key] = value;
        }

        info!("{}", log_entry);
    }
}

pub static LOGGER: StructuredLogger = StructuredLogger;
