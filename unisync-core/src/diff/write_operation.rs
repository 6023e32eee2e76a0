use std::fmt;

use serde::{Deserialize, Serialize};

use crate::diff::DiffKind;
use crate::event::NormalizedEvent;

/// One write the executor must perform against the remote calendar.
///
/// Create and Update imply a weekly recurrence starting at the event's next
/// occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum WriteOperation {
    Create {
        event: NormalizedEvent,
    },
    Update {
        remote_id: String,
        event: NormalizedEvent,
    },
    Delete {
        remote_id: String,
    },
}

impl WriteOperation {
    pub fn kind(&self) -> DiffKind {
        match self {
            WriteOperation::Create { .. } => DiffKind::Create,
            WriteOperation::Update { .. } => DiffKind::Update,
            WriteOperation::Delete { .. } => DiffKind::Delete,
        }
    }

    pub fn remote_id(&self) -> Option<&str> {
        match self {
            WriteOperation::Create { .. } => None,
            WriteOperation::Update { remote_id, .. } | WriteOperation::Delete { remote_id } => {
                Some(remote_id)
            }
        }
    }

    pub fn event(&self) -> Option<&NormalizedEvent> {
        match self {
            WriteOperation::Create { event } | WriteOperation::Update { event, .. } => Some(event),
            WriteOperation::Delete { .. } => None,
        }
    }
}

impl fmt::Display for WriteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.event(), self.remote_id()) {
            (Some(event), _) => write!(f, "{}: {}", self.kind(), event),
            (None, Some(id)) => write!(f, "{}: {}", self.kind(), id),
            (None, None) => write!(f, "{}", self.kind()),
        }
    }
}

/// The ordered result of one reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WritePlan(pub Vec<WriteOperation>);

impl WritePlan {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WriteOperation> {
        self.0.iter()
    }

    /// (created, updated, deleted)
    pub fn counts(&self) -> (usize, usize, usize) {
        let mut created = 0;
        let mut updated = 0;
        let mut deleted = 0;

        for op in &self.0 {
            match op.kind() {
                DiffKind::Create => created += 1,
                DiffKind::Update => updated += 1,
                DiffKind::Delete => deleted += 1,
            }
        }

        (created, updated, deleted)
    }
}

impl<'a> IntoIterator for &'a WritePlan {
    type Item = &'a WriteOperation;
    type IntoIter = std::slice::Iter<'a, WriteOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::TimeOfDay;
    use chrono::Weekday;

    fn make_test_event() -> NormalizedEvent {
        NormalizedEvent::new(
            Weekday::Thu,
            TimeOfDay::new(14, 0).unwrap(),
            120,
            "ECO201 Macroeconomics",
            "Room 4",
            "",
        )
    }

    #[test]
    fn test_counts() {
        let plan = WritePlan(vec![
            WriteOperation::Create {
                event: make_test_event(),
            },
            WriteOperation::Delete {
                remote_id: "a".to_string(),
            },
            WriteOperation::Delete {
                remote_id: "b".to_string(),
            },
        ]);

        assert_eq!(plan.counts(), (1, 0, 2));
        assert_eq!(plan.len(), 3);
    }

    #[test]
    fn test_serialized_shape() {
        let op = WriteOperation::Update {
            remote_id: "abc".to_string(),
            event: make_test_event(),
        };
        let json = serde_json::to_value(&op).unwrap();

        assert_eq!(json["op"], "update");
        assert_eq!(json["remote_id"], "abc");
        assert_eq!(json["event"]["start"], "14:00");
        assert_eq!(json["event"]["duration_minutes"], 120);
    }
}
