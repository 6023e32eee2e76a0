//! Decoding the remote calendar's event list.
//!
//! The snapshot is the JSON an executor gets back from listing the target
//! calendar (Google Calendar v3 `events.list` item shape): either the raw
//! response object with an `items` array, or just the array.

use chrono::{DateTime, Datelike, NaiveDateTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{SyncError, SyncResult};
use crate::event::RemoteEvent;
use crate::time::TimeOfDay;

/// Start (or end) of a remote event as the calendar API reports it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteDateTime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    /// Set instead of `date_time` for all-day events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

/// One item of the remote snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteEventRecord {
    pub id: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub start: Option<RemoteDateTime>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Snapshot {
    Items(Vec<RemoteEventRecord>),
    #[serde(rename_all = "camelCase")]
    Listing {
        items: Vec<RemoteEventRecord>,
        #[serde(default)]
        time_zone: Option<String>,
    },
}

/// Decode a snapshot into remote events, skipping cancelled ones.
///
/// An object without an `items` array (an API error body, say) is an error,
/// not an empty calendar. Any other item that cannot be decomposed into weekday and time is an
/// error: dropping it would make the reconciler create a duplicate.
pub fn decode_snapshot(json: &str) -> SyncResult<Vec<RemoteEvent>> {
    let (items, time_zone) = match serde_json::from_str::<Snapshot>(json)? {
        Snapshot::Items(items) => (items, None),
        Snapshot::Listing { items, time_zone } => (items, time_zone),
    };

    let mut events = Vec::with_capacity(items.len());
    for record in &items {
        if let Some(event) = record.to_remote_event(time_zone.as_deref())? {
            events.push(event);
        }
    }

    debug!("Decoded {} of {} remote events", events.len(), items.len());
    Ok(events)
}

impl RemoteEventRecord {
    /// `None` for cancelled events. `default_tz` is the calendar's zone, used
    /// when the item does not declare its own.
    pub fn to_remote_event(&self, default_tz: Option<&str>) -> SyncResult<Option<RemoteEvent>> {
        if self.status.as_deref() == Some("cancelled") {
            return Ok(None);
        }

        let invalid = |reason: String| SyncError::InvalidRemoteEvent {
            id: self.id.clone(),
            reason,
        };

        let start = self
            .start
            .as_ref()
            .ok_or_else(|| invalid("event has no start".to_string()))?;
        let date_time = start.date_time.as_deref().ok_or_else(|| {
            invalid("all-day events cannot be matched to a class slot".to_string())
        })?;
        let tz = start.time_zone.as_deref().or(default_tz);

        let local = wall_clock(date_time, tz).map_err(invalid)?;

        Ok(Some(RemoteEvent {
            remote_id: self.id.clone(),
            weekday: local.weekday(),
            start: TimeOfDay::of(&local),
            subject: self.summary.clone(),
            location: self.location.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
        }))
    }
}

/// Wall-clock date and time of a remote timestamp in its declared zone.
///
/// Timestamps with an offset are converted into `tz` when it names an IANA
/// zone and otherwise read in their own offset. Timestamps without an offset
/// are already wall-clock.
pub fn wall_clock(date_time: &str, tz: Option<&str>) -> Result<NaiveDateTime, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_time) {
        return Ok(match tz.map(|name| (name, name.parse::<Tz>())) {
            Some((_, Ok(zone))) => dt.with_timezone(&zone).naive_local(),
            Some((name, Err(_))) => {
                warn!("Unknown timezone '{}', using the timestamp's own offset", name);
                dt.naive_local()
            }
            None => dt.naive_local(),
        });
    }

    NaiveDateTime::parse_from_str(date_time, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(date_time, "%Y-%m-%dT%H:%M"))
        .map_err(|_| format!("unparseable start '{}'", date_time))
}
