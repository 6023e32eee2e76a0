//! Event types on both sides of a sync.
//!
//! `NormalizedEvent` is what the grid parser produces from timetable markup;
//! `RemoteEvent` is the reconciler's read-only view of an event that already
//! exists on the remote calendar.

use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::{FALLBACK_DURATION_MINUTES, LECTURER_PREFIX, UNKNOWN_SUBJECT};
use crate::time::TimeOfDay;

/// One recurring weekly class, institution-agnostic.
///
/// Has no identity field: two events with the same weekday,
/// start and subject cannot be told apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedEvent {
    pub weekday: Weekday,
    pub start: TimeOfDay,
    pub duration_minutes: u32,
    pub subject: String,
    pub room: String,
    pub instructor: String,
}

impl NormalizedEvent {
    /// Build an event, clamping a zero duration to the 60 minute fallback and
    /// replacing a blank subject with a placeholder.
    pub fn new(
        weekday: Weekday,
        start: TimeOfDay,
        duration_minutes: u32,
        subject: impl Into<String>,
        room: impl Into<String>,
        instructor: impl Into<String>,
    ) -> Self {
        let mut subject = subject.into().trim().to_string();
        if subject.is_empty() {
            subject = UNKNOWN_SUBJECT.to_string();
        }

        let duration_minutes = if duration_minutes == 0 {
            warn!(
                "Zero duration for '{}' on {} at {}, using {} minutes",
                subject, weekday, start, FALLBACK_DURATION_MINUTES
            );
            FALLBACK_DURATION_MINUTES
        } else {
            duration_minutes
        };

        NormalizedEvent {
            weekday,
            start,
            duration_minutes,
            subject,
            room: room.into(),
            instructor: instructor.into(),
        }
    }

    /// The description text written to (and compared against) the remote event.
    pub fn description(&self) -> String {
        format!("{}{}", LECTURER_PREFIX, self.instructor)
    }

    pub fn end(&self) -> TimeOfDay {
        let end = (self.start.minutes() + self.duration_minutes as i64) % (24 * 60);
        TimeOfDay::new((end / 60) as u32, (end % 60) as u32).unwrap_or(self.start)
    }
}

impl fmt::Display for NormalizedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.subject)
    }
}

/// An event already present on the remote calendar.
///
/// `weekday` and `start` are the wall-clock decomposition of the remote start
/// timestamp in the event's declared timezone (see `remote`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEvent {
    pub remote_id: String,
    pub weekday: Weekday,
    pub start: TimeOfDay,
    pub subject: String,
    pub location: String,
    pub description: String,
}

impl fmt::Display for RemoteEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.subject)
    }
}
