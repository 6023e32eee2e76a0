//! Optional time-of-day cut-off applied to parsed events.

use tracing::info;

use crate::event::NormalizedEvent;
use crate::time::TimeOfDay;

/// Keep only classes starting strictly before `cutoff`.
///
/// Used to leave out evening (part-time) sessions, e.g. with a cut-off of
/// 17:30 a class at 17:00 is kept and one at 17:30 dropped.
pub fn exclude_from(events: Vec<NormalizedEvent>, cutoff: TimeOfDay) -> Vec<NormalizedEvent> {
    let before = events.len();
    let kept: Vec<NormalizedEvent> = events.into_iter().filter(|e| e.start < cutoff).collect();

    let dropped = before - kept.len();
    if dropped > 0 {
        info!("Excluded {} classes starting at or after {}", dropped, cutoff);
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn class_at(h: u32, m: u32) -> NormalizedEvent {
        NormalizedEvent::new(Weekday::Mon, TimeOfDay::new(h, m).unwrap(), 60, "X", "", "")
    }

    #[test]
    fn test_exclude_from_boundary() {
        let cutoff = TimeOfDay::new(17, 30).unwrap();
        let kept = exclude_from(
            vec![class_at(8, 0), class_at(17, 0), class_at(17, 30), class_at(18, 30)],
            cutoff,
        );

        let starts: Vec<String> = kept.iter().map(|e| e.start.to_string()).collect();
        assert_eq!(starts, vec!["08:00", "17:00"]);
    }
}
