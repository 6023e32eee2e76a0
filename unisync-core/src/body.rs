//! Event bodies for the write executor.
//!
//! A plan only names the class; the executor needs a concrete first
//! occurrence with start/end wall-clock times, the calendar timezone and a
//! weekly recurrence rule. Bodies use the Google Calendar v3 insert/update
//! field names.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::WEEKLY_RRULE;
use crate::diff::{DiffKind, WriteOperation, WritePlan};
use crate::event::NormalizedEvent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    /// Local wall-clock time, `YYYY-MM-DDTHH:MM:SS`, no offset.
    pub date_time: String,
    pub time_zone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBody {
    pub summary: String,
    pub location: String,
    pub description: String,
    pub start: EventDateTime,
    pub end: EventDateTime,
    pub recurrence: Vec<String>,
}

/// A plan operation with everything the executor needs to perform it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutableOperation {
    pub op: DiffKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<EventBody>,
}

/// First date on or after `today` that falls on `weekday`.
pub fn first_occurrence(weekday: Weekday, today: NaiveDate) -> NaiveDate {
    let ahead = (7 + weekday.num_days_from_monday() - today.weekday().num_days_from_monday()) % 7;
    today + Duration::days(ahead as i64)
}

/// Today's date in `time_zone`, or in UTC when the name is not an IANA zone.
pub fn today_in(time_zone: &str) -> NaiveDate {
    let now = Utc::now();
    match time_zone.parse::<Tz>() {
        Ok(tz) => now.with_timezone(&tz).date_naive(),
        Err(_) => {
            warn!("Unknown timezone '{}', computing today's date in UTC", time_zone);
            now.date_naive()
        }
    }
}

impl EventBody {
    /// Body for the weekly series of `event`, starting on its first
    /// occurrence on or after `today`. `time_zone` is passed through as-is.
    pub fn for_event(event: &NormalizedEvent, time_zone: &str, today: NaiveDate) -> Self {
        let date = first_occurrence(event.weekday, today);
        let start = NaiveDateTime::new(date, event.start.to_naive_time());
        let end = start + Duration::minutes(event.duration_minutes as i64);

        let stamp = |dt: NaiveDateTime| EventDateTime {
            date_time: dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
            time_zone: time_zone.to_string(),
        };

        EventBody {
            summary: event.subject.clone(),
            location: event.room.clone(),
            description: event.description(),
            start: stamp(start),
            end: stamp(end),
            recurrence: vec![WEEKLY_RRULE.to_string()],
        }
    }
}

impl ExecutableOperation {
    pub fn from_operation(op: &WriteOperation, time_zone: &str, today: NaiveDate) -> Self {
        ExecutableOperation {
            op: op.kind(),
            remote_id: op.remote_id().map(str::to_string),
            body: op.event().map(|e| EventBody::for_event(e, time_zone, today)),
        }
    }
}

/// Render every operation of `plan` for the executor.
pub fn render_plan(plan: &WritePlan, time_zone: &str, today: NaiveDate) -> Vec<ExecutableOperation> {
    plan.iter()
        .map(|op| ExecutableOperation::from_operation(op, time_zone, today))
        .collect()
}
