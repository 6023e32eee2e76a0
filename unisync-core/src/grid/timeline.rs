//! Row -> time slot mapping built from the leading cell of each row.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::constants::FALLBACK_DURATION_MINUTES;
use crate::time::TimeOfDay;

/// Matches `08:00-09:00`, `8.00 - 9.00`, `17:00 – 17:30` and similar.
static TIME_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2})[:.](\d{2})\s*[-\x{2013}\x{2014}]\s*(\d{1,2})[:.](\d{2})")
        .expect("valid time range regex")
});

/// One time-slot row of the timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineEntry {
    pub row_index: usize,
    pub start: TimeOfDay,
    pub duration_minutes: u32,
}

/// Time-slot rows of one table, keyed by row index.
///
/// Rows whose leading cell carries no time range (section separators,
/// spacer rows) are simply absent.
#[derive(Debug, Default)]
pub struct Timeline {
    entries: BTreeMap<usize, TimelineEntry>,
}

impl Timeline {
    /// Build the timeline from the leading-cell text of every row.
    ///
    /// `labels[i]` is the visible text of row `i`'s first cell, `None` when the
    /// row has no cells. Only rows after `header_index` are considered.
    pub fn build(labels: &[Option<String>], header_index: usize) -> Self {
        let mut entries = BTreeMap::new();

        for (row_index, label) in labels.iter().enumerate().skip(header_index + 1) {
            let Some(label) = label else { continue };

            match parse_time_range(label) {
                Some((start, duration_minutes)) => {
                    entries.insert(
                        row_index,
                        TimelineEntry {
                            row_index,
                            start,
                            duration_minutes,
                        },
                    );
                }
                None => debug!("Row {} is not a time slot: {:?}", row_index, label.trim()),
            }
        }

        Timeline { entries }
    }

    pub fn get(&self, row_index: usize) -> Option<&TimelineEntry> {
        self.entries.get(&row_index)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The `span` timeline rows a merged cell starting at `row_index` covers.
    ///
    /// Non-timeline rows in between are skipped. Fewer than `span` entries are
    /// returned when the table ends first.
    pub fn span(&self, row_index: usize, span: usize) -> impl Iterator<Item = &TimelineEntry> {
        self.entries.range(row_index..).map(|(_, e)| e).take(span)
    }

    /// Total minutes covered by a merged cell starting at `row_index`.
    pub fn span_duration(&self, row_index: usize, span: usize) -> u32 {
        self.span(row_index, span).map(|e| e.duration_minutes).sum()
    }
}

/// Parse the first time range found in `text` into (start, duration).
///
/// A non-positive or unparseable end falls back to 60 minutes; an invalid
/// start means the text is not a time slot at all.
pub fn parse_time_range(text: &str) -> Option<(TimeOfDay, u32)> {
    let caps = TIME_RANGE.captures(text)?;
    let num = |i: usize| caps[i].parse::<u32>().ok();

    let start = TimeOfDay::new(num(1)?, num(2)?)?;
    let end = num(3).zip(num(4)).and_then(|(h, m)| TimeOfDay::new(h, m));

    let duration = match end {
        Some(end) if end.minutes() > start.minutes() => (end.minutes() - start.minutes()) as u32,
        _ => FALLBACK_DURATION_MINUTES,
    };

    Some((start, duration))
}
