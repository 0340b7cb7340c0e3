use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Color tag applied to new interviews when the form does not specify one.
pub const DEFAULT_COLOR: &str = "#3b82f6";

/// Default starting slot of the form, matching the first visible grid hour.
pub const DEFAULT_START_TIME: &str = "09:00";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRecord {
    pub id: String,
    pub company_name: String,
    pub position: String,
    /// ISO calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Wall-clock start, `HH:MM` 24-hour.
    pub start_time: String,
    pub duration: InterviewDuration,
    pub location: String,
    pub status: InterviewStatus,
    pub notes: String,
    pub color: String,
}

/// Closed set of selectable durations. Values that arrive from outside the
/// form (older persisted blobs, model output) and match none of the known
/// tokens are carried through as `Other` so the store round-trips them
/// unchanged; the layout engine buckets them to the one-hour default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InterviewDuration {
    ThirtyMin,
    OneHour,
    NinetyMin,
    TwoHours,
    TwoAndHalfHours,
    ThreeHours,
    Other(String),
}

impl InterviewDuration {
    /// Minute count used for layout. Unrecognized values fall back to 60.
    pub fn minutes(&self) -> i64 {
        match self {
            InterviewDuration::ThirtyMin => 30,
            InterviewDuration::OneHour => 60,
            InterviewDuration::NinetyMin => 90,
            InterviewDuration::TwoHours => 120,
            InterviewDuration::TwoAndHalfHours => 150,
            InterviewDuration::ThreeHours => 180,
            InterviewDuration::Other(_) => 60,
        }
    }
}

impl From<String> for InterviewDuration {
    fn from(value: String) -> Self {
        match value.as_str() {
            "30min" => InterviewDuration::ThirtyMin,
            "1h" => InterviewDuration::OneHour,
            "1.5h" => InterviewDuration::NinetyMin,
            "2h" => InterviewDuration::TwoHours,
            "2.5h" => InterviewDuration::TwoAndHalfHours,
            "3h" => InterviewDuration::ThreeHours,
            _ => InterviewDuration::Other(value),
        }
    }
}

impl From<InterviewDuration> for String {
    fn from(value: InterviewDuration) -> Self {
        match value {
            InterviewDuration::ThirtyMin => "30min".to_string(),
            InterviewDuration::OneHour => "1h".to_string(),
            InterviewDuration::NinetyMin => "1.5h".to_string(),
            InterviewDuration::TwoHours => "2h".to_string(),
            InterviewDuration::TwoAndHalfHours => "2.5h".to_string(),
            InterviewDuration::ThreeHours => "3h".to_string(),
            InterviewDuration::Other(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterviewStatus {
    Scheduled,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInterviewRequest {
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub position: String,
    pub date: String,
    pub start_time: String,
    pub duration: InterviewDuration,
    #[serde(default)]
    pub location: String,
    pub status: InterviewStatus,
    #[serde(default)]
    pub notes: String,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl Default for CreateInterviewRequest {
    /// The reset state of the add/edit form.
    fn default() -> Self {
        Self {
            company_name: String::new(),
            position: String::new(),
            date: Utc::now().format("%Y-%m-%d").to_string(),
            start_time: DEFAULT_START_TIME.to_string(),
            duration: InterviewDuration::OneHour,
            location: String::new(),
            status: InterviewStatus::Scheduled,
            notes: String::new(),
            color: DEFAULT_COLOR.to_string(),
        }
    }
}

impl CreateInterviewRequest {
    pub fn into_record(self, id: String) -> InterviewRecord {
        InterviewRecord {
            id,
            company_name: self.company_name,
            position: self.position,
            date: self.date,
            start_time: self.start_time,
            duration: self.duration,
            location: self.location,
            status: self.status,
            notes: self.notes,
            color: self.color,
        }
    }
}

/// Partial field update merged onto an existing record, last write wins.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewPatch {
    pub company_name: Option<String>,
    pub position: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub duration: Option<InterviewDuration>,
    pub location: Option<String>,
    pub status: Option<InterviewStatus>,
    pub notes: Option<String>,
    pub color: Option<String>,
}

impl InterviewPatch {
    pub fn apply_to(self, record: &mut InterviewRecord) {
        if let Some(company_name) = self.company_name {
            record.company_name = company_name;
        }
        if let Some(position) = self.position {
            record.position = position;
        }
        if let Some(date) = self.date {
            record.date = date;
        }
        if let Some(start_time) = self.start_time {
            record.start_time = start_time;
        }
        if let Some(duration) = self.duration {
            record.duration = duration;
        }
        if let Some(location) = self.location {
            record.location = location;
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(notes) = self.notes {
            record.notes = notes;
        }
        if let Some(color) = self.color {
            record.color = color;
        }
    }
}
