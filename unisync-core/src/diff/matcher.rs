use crate::event::{NormalizedEvent, RemoteEvent};

/// Whether `remote` is the calendar copy of `event`.
///
/// Identity is subject (trimmed, case-sensitive), weekday and start hour and
/// minute. Room and instructor are not part of identity; they are what an
/// update may change.
pub fn is_same_class(event: &NormalizedEvent, remote: &RemoteEvent) -> bool {
    event.subject.trim() == remote.subject.trim()
        && event.weekday == remote.weekday
        && event.start.hour() == remote.start.hour()
        && event.start.minute() == remote.start.minute()
}
