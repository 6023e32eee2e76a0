//! Colored terminal rendering for unisync-core types.

use owo_colors::OwoColorize;
use unisync_core::diff::{DiffKind, WriteOperation, WritePlan};
use unisync_core::{NormalizedEvent, RemoteEvent};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for DiffKind {
    fn render(&self) -> String {
        let symbol = self.symbol();
        match self {
            DiffKind::Create => symbol.green().to_string(),
            DiffKind::Update => symbol.yellow().to_string(),
            DiffKind::Delete => symbol.red().to_string(),
        }
    }
}

fn colorize_diff(kind: DiffKind, text: &str) -> String {
    match kind {
        DiffKind::Create => text.green().to_string(),
        DiffKind::Update => text.yellow().to_string(),
        DiffKind::Delete => text.red().to_string(),
    }
}

/// "Mon 08:00-10:00"
fn slot(event: &NormalizedEvent) -> String {
    format!("{} {}-{}", event.weekday, event.start, event.end())
}

impl Render for NormalizedEvent {
    fn render(&self) -> String {
        let mut details = vec![self.room.as_str()];
        if !self.instructor.is_empty() {
            details.push(self.instructor.as_str());
        }

        format!(
            "{} {} {}",
            slot(self).dimmed(),
            self.subject.bold(),
            format!("({})", details.join(", ")).dimmed()
        )
    }
}

/// Rendering of a plan, which needs the snapshot to describe updates and deletes.
pub trait PlanRender {
    fn render(&self, remote: &[RemoteEvent]) -> String;
}

impl PlanRender for WritePlan {
    fn render(&self, remote: &[RemoteEvent]) -> String {
        if self.is_empty() {
            return "   Calendar is up to date".dimmed().to_string();
        }

        let mut lines = Vec::new();
        for op in self {
            let existing = op
                .remote_id()
                .and_then(|id| remote.iter().find(|r| r.remote_id == id));
            lines.push(format!("   {}", render_operation(op, existing)));

            if let (WriteOperation::Update { event, .. }, Some(old)) = (op, existing) {
                lines.extend(
                    render_field_diffs(old, event)
                        .into_iter()
                        .map(|l| format!("      {}", l)),
                );
            }
        }

        let (created, updated, deleted) = self.counts();
        lines.push(String::new());
        lines.push(
            format!(
                "   {} to create, {} to update, {} to delete",
                created, updated, deleted
            )
            .dimmed()
            .to_string(),
        );

        lines.join("\n")
    }
}

fn render_operation(op: &WriteOperation, existing: Option<&RemoteEvent>) -> String {
    let kind = op.kind();
    match (op.event(), existing) {
        (Some(event), _) => format!(
            "{} {} {}",
            kind.render(),
            colorize_diff(kind, &event.subject),
            slot(event).dimmed()
        ),
        (None, Some(old)) => format!(
            "{} {} {}",
            kind.render(),
            colorize_diff(kind, &old.subject),
            format!("{} {}", old.weekday, old.start).dimmed()
        ),
        (None, None) => format!(
            "{} {}",
            kind.render(),
            colorize_diff(kind, op.remote_id().unwrap_or_default())
        ),
    }
}

/// The fields an update rewrites, old value in red and new in green.
fn render_field_diffs(old: &RemoteEvent, new: &NormalizedEvent) -> Vec<String> {
    let mut lines = Vec::new();

    if old.location.trim() != new.room.trim() {
        lines.push(format!(
            "{}: {} → {}",
            "location".dimmed(),
            old.location.red(),
            new.room.green()
        ));
    }
    let description = new.description();
    if old.description.trim() != description.trim() {
        lines.push(format!(
            "{}: {} → {}",
            "description".dimmed(),
            old.description.red(),
            description.green()
        ));
    }

    lines
}

/// Summary line for a parse run.
pub fn render_event_count(count: usize) -> String {
    let noun = if count == 1 { "class" } else { "classes" };
    format!("{} {} found", count, noun)
        .dimmed()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use unisync_core::TimeOfDay;

    fn make_test_event(room: &str) -> NormalizedEvent {
        NormalizedEvent::new(
            Weekday::Mon,
            TimeOfDay::new(8, 0).unwrap(),
            120,
            "MAT110 Calculus",
            room,
            "K. Zulu",
        )
    }

    fn make_test_remote(id: &str, location: &str) -> RemoteEvent {
        RemoteEvent {
            remote_id: id.to_string(),
            weekday: Weekday::Mon,
            start: TimeOfDay::new(8, 0).unwrap(),
            subject: "MAT110 Calculus".to_string(),
            location: location.to_string(),
            description: "Lecturer: K. Zulu".to_string(),
        }
    }

    #[test]
    fn test_empty_plan() {
        let rendered = WritePlan::default().render(&[]);
        assert!(rendered.contains("up to date"));
    }

    #[test]
    fn test_update_shows_location_diff_only() {
        let remote = vec![make_test_remote("abc", "Old Hall")];
        let plan = WritePlan(vec![WriteOperation::Update {
            remote_id: "abc".to_string(),
            event: make_test_event("Hall 1"),
        }]);

        let rendered = plan.render(&remote);

        assert!(rendered.contains("Old Hall"), "{}", rendered);
        assert!(rendered.contains("Hall 1"), "{}", rendered);
        assert!(!rendered.contains("description"), "{}", rendered);
        assert!(rendered.contains("0 to create, 1 to update, 0 to delete"));
    }

    #[test]
    fn test_delete_names_remote_subject() {
        let remote = vec![make_test_remote("gone", "Room 9")];
        let plan = WritePlan(vec![WriteOperation::Delete {
            remote_id: "gone".to_string(),
        }]);

        assert!(plan.render(&remote).contains("MAT110 Calculus"));
    }

    #[test]
    fn test_event_slot() {
        assert_eq!(slot(&make_test_event("Hall 1")), "Mon 08:00-10:00");
    }
}
