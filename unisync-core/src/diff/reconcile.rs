//! Create/update/delete plan computation.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::diff::{WriteOperation, WritePlan, is_same_class};
use crate::event::{NormalizedEvent, RemoteEvent};

/// Compute the writes that bring the remote calendar in line with `events`.
///
/// Each parsed event takes the first not-yet-matched remote event (in remote
/// order) that is the same class. A match whose location or description
/// differs becomes an update, an unmatched event a create, and every remote
/// event left unmatched afterwards an orphan delete. Matched remote events
/// keep their ids, so repeated runs do not churn the calendar.
pub fn reconcile(events: &[NormalizedEvent], remote: &[RemoteEvent]) -> WritePlan {
    let mut consumed: HashSet<&str> = HashSet::new();
    let mut operations = Vec::new();

    for event in events {
        let matched = remote
            .iter()
            .filter(|r| !consumed.contains(r.remote_id.as_str()))
            .find(|r| is_same_class(event, r));

        match matched {
            Some(r) => {
                consumed.insert(r.remote_id.as_str());
                if needs_update(event, r) {
                    debug!("'{}' on {} changed, updating {}", event, event.weekday, r.remote_id);
                    operations.push(WriteOperation::Update {
                        remote_id: r.remote_id.clone(),
                        event: event.clone(),
                    });
                }
            }
            None => operations.push(WriteOperation::Create {
                event: event.clone(),
            }),
        }
    }

    for r in remote {
        // `insert` is false for ids already matched or already deleted.
        if consumed.insert(r.remote_id.as_str()) {
            debug!("'{}' ({}) no longer in timetable", r.subject, r.remote_id);
            operations.push(WriteOperation::Delete {
                remote_id: r.remote_id.clone(),
            });
        }
    }

    let plan = WritePlan(operations);
    let (created, updated, deleted) = plan.counts();
    info!(
        "Plan: {} to create, {} to update, {} to delete",
        created, updated, deleted
    );
    plan
}

/// Location or description text differs (whitespace-trimmed).
fn needs_update(event: &NormalizedEvent, remote: &RemoteEvent) -> bool {
    event.room.trim() != remote.location.trim()
        || event.description().trim() != remote.description.trim()
}
