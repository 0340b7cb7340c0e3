use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::models::interview::InterviewRecord;

/// First visible hour of the weekly grid.
pub const VIEW_START_HOUR: i64 = 9;
/// Pixel height of one grid hour (h-20 in the dashboard, 5rem = 80px).
pub const HOUR_HEIGHT_PX: f64 = 80.0;
pub const PX_PER_MINUTE: f64 = HOUR_HEIGHT_PX / 60.0;
/// Floor so near-zero-duration events stay clickable.
pub const MIN_EVENT_HEIGHT_PX: f64 = 24.0;
/// Monday through Friday; the weekend is fixed out of the view.
pub const VISIBLE_WEEKDAYS: usize = 5;

/// Draw instruction for one interview: which weekday column it occupies and
/// its vertical pixel extent within that column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedEvent {
    /// 0-based weekday column, 0 = Monday.
    pub column: usize,
    /// Vertical offset in pixels from the 09:00 grid line. Not clipped;
    /// out-of-range start times produce negative or oversized offsets.
    pub top: f64,
    pub height: f64,
    pub interview: InterviewRecord,
}

/// Map a set of records onto the weekly grid starting at `week_start`.
/// Records dated outside the Monday-Friday window are dropped from the
/// frame (not from the store). Events are independent: no overlap
/// detection or stacking, same-slot events render atop one another in
/// list order.
pub fn layout(records: &[InterviewRecord], week_start: NaiveDate) -> Vec<PositionedEvent> {
    let week_dates: Vec<String> = (0..VISIBLE_WEEKDAYS)
        .map(|offset| {
            (week_start + Duration::days(offset as i64))
                .format("%Y-%m-%d")
                .to_string()
        })
        .collect();

    records
        .iter()
        .filter_map(|record| {
            let column = week_dates.iter().position(|date| *date == record.date)?;

            let (start_hour, start_minute) = parse_start_time(&record.start_time);
            let top = ((start_hour - VIEW_START_HOUR) * 60 + start_minute) as f64 * PX_PER_MINUTE;
            let height = event_height(record.duration.minutes());

            Some(PositionedEvent {
                column,
                top,
                height,
                interview: record.clone(),
            })
        })
        .collect()
}

/// Pixel height for a duration, floored at the minimum clickable height.
pub fn event_height(duration_minutes: i64) -> f64 {
    (duration_minutes as f64 * PX_PER_MINUTE).max(MIN_EVENT_HEIGHT_PX)
}

/// `HH:MM` split into hour and minute. Components that do not parse fall
/// back to 0, keeping the offset arithmetic total.
fn parse_start_time(start_time: &str) -> (i64, i64) {
    let mut parts = start_time.splitn(2, ':');
    let hour = parts
        .next()
        .and_then(|h| h.parse::<i64>().ok())
        .unwrap_or(0);
    let minute = parts
        .next()
        .and_then(|m| m.parse::<i64>().ok())
        .unwrap_or(0);
    (hour, minute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::interview::{InterviewDuration, InterviewStatus, DEFAULT_COLOR};

    fn record(id: &str, date: &str, start_time: &str, duration: InterviewDuration) -> InterviewRecord {
        InterviewRecord {
            id: id.to_string(),
            company_name: "Acme".to_string(),
            position: "Engineer".to_string(),
            date: date.to_string(),
            start_time: start_time.to_string(),
            duration,
            location: String::new(),
            status: InterviewStatus::Scheduled,
            notes: String::new(),
            color: DEFAULT_COLOR.to_string(),
        }
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[test]
    fn places_tuesday_interview_in_column_one() {
        let records = vec![record("2", "2025-03-11", "14:00", InterviewDuration::NinetyMin)];

        let events = layout(&records, monday());

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.column, 1);
        assert_eq!(event.top, (5 * 60) as f64 * PX_PER_MINUTE);
        assert_eq!(event.height, 90.0 * PX_PER_MINUTE);
    }

    #[test]
    fn height_scales_with_every_duration_token() {
        for (duration, minutes) in [
            (InterviewDuration::ThirtyMin, 30),
            (InterviewDuration::OneHour, 60),
            (InterviewDuration::NinetyMin, 90),
            (InterviewDuration::TwoHours, 120),
            (InterviewDuration::TwoAndHalfHours, 150),
            (InterviewDuration::ThreeHours, 180),
        ] {
            let records = vec![record("1", "2025-03-10", "10:00", duration)];
            let events = layout(&records, monday());
            assert_eq!(events[0].height, minutes as f64 * PX_PER_MINUTE);
        }
    }

    #[test]
    fn height_is_floored_at_minimum() {
        assert_eq!(event_height(10), MIN_EVENT_HEIGHT_PX);
        assert_eq!(event_height(0), MIN_EVENT_HEIGHT_PX);
        assert_eq!(event_height(30), 40.0);
    }

    #[test]
    fn drops_records_outside_the_week_window() {
        let records = vec![
            record("in", "2025-03-14", "09:00", InterviewDuration::OneHour),
            record("saturday", "2025-03-15", "09:00", InterviewDuration::OneHour),
            record("next-week", "2025-03-17", "09:00", InterviewDuration::OneHour),
            record("previous-week", "2025-03-07", "09:00", InterviewDuration::OneHour),
        ];

        let events = layout(&records, monday());

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].interview.id, "in");
        assert_eq!(events[0].column, 4);
    }

    #[test]
    fn unrecognized_duration_buckets_to_one_hour() {
        let records = vec![record(
            "1",
            "2025-03-10",
            "09:00",
            InterviewDuration::Other("45min".to_string()),
        )];

        let events = layout(&records, monday());

        assert_eq!(events[0].height, 60.0 * PX_PER_MINUTE);
    }

    #[test]
    fn out_of_range_start_time_is_not_clipped() {
        let records = vec![
            record("early", "2025-03-10", "08:00", InterviewDuration::OneHour),
            record("late", "2025-03-10", "21:30", InterviewDuration::OneHour),
        ];

        let events = layout(&records, monday());

        let early = events.iter().find(|e| e.interview.id == "early").unwrap();
        let late = events.iter().find(|e| e.interview.id == "late").unwrap();
        assert_eq!(early.top, -60.0 * PX_PER_MINUTE);
        assert_eq!(late.top, (12 * 60 + 30) as f64 * PX_PER_MINUTE);
    }

    #[test]
    fn unparseable_start_time_falls_back_to_midnight() {
        let records = vec![record("1", "2025-03-10", "garbage", InterviewDuration::OneHour)];

        let events = layout(&records, monday());

        assert_eq!(events[0].top, (-VIEW_START_HOUR * 60) as f64 * PX_PER_MINUTE);
    }

    #[test]
    fn malformed_record_date_never_matches_the_window() {
        let records = vec![record("1", "not-a-date", "10:00", InterviewDuration::OneHour)];

        assert!(layout(&records, monday()).is_empty());
    }
}
