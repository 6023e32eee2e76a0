//! Locating the timetable grid inside arbitrary page markup.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

static TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("valid selector"));
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("valid selector"));

const WEEKDAY_NAMES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// How an institution's timetable table is recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableLocator {
    /// First table with a row naming two consecutive weekdays.
    WeekdayHeader,
    /// A table carrying `name="value"` (case-insensitive value), falling back
    /// to `WeekdayHeader` when no such table has a weekday header row.
    Attribute {
        name: &'static str,
        value: &'static str,
    },
}

/// The located grid: the table's own rows and the position of its header row.
#[derive(Debug)]
pub struct GridTable<'a> {
    pub rows: Vec<ElementRef<'a>>,
    pub header_index: usize,
}

impl<'a> GridTable<'a> {
    fn from_table(table: ElementRef<'a>) -> Option<Self> {
        let rows = own_rows(table);
        let header_index = rows.iter().position(|row| is_header_row(*row))?;
        Some(GridTable { rows, header_index })
    }
}

/// Find the timetable grid in `document`; `None` when the page has none.
pub fn locate<'a>(document: &'a Html, locator: TableLocator) -> Option<GridTable<'a>> {
    let tables: Vec<ElementRef<'a>> = document.select(&TABLE).collect();
    debug!("Scanning {} tables for a timetable grid", tables.len());

    if let TableLocator::Attribute { name, value } = locator {
        let found = tables
            .iter()
            .filter(|t| {
                t.value()
                    .attr(name)
                    .is_some_and(|v| v.trim().eq_ignore_ascii_case(value))
            })
            .find_map(|t| GridTable::from_table(*t));

        if found.is_some() {
            return found;
        }
        debug!("No table with {}=\"{}\", falling back to weekday header scan", name, value);
    }

    tables.into_iter().find_map(GridTable::from_table)
}

/// Rows belonging to `table` itself, excluding rows of nested tables.
fn own_rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    table
        .select(&ROW)
        .filter(|row| {
            row.ancestors()
                .filter_map(ElementRef::wrap)
                .find(|a| a.value().name() == "table")
                .is_some_and(|t| t.id() == table.id())
        })
        .collect()
}

/// A row split into its leading time-label cell (`<td>` or `<th>`) and the
/// `<td>` day cells after it, in DOM order.
pub fn split_row(row: ElementRef<'_>) -> (Option<ElementRef<'_>>, Vec<ElementRef<'_>>) {
    let mut cells = row
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|c| matches!(c.value().name(), "td" | "th"));

    let label = cells.next();
    let days = cells.filter(|c| c.value().name() == "td").collect();
    (label, days)
}

/// A header row names at least two consecutive weekdays and does not wrap a
/// nested table (layout tables would otherwise match on their content).
fn is_header_row(row: ElementRef<'_>) -> bool {
    if row.select(&TABLE).next().is_some() {
        return false;
    }
    let text = row.text().collect::<Vec<_>>().join(" ").to_lowercase();
    has_consecutive_weekdays(&text)
}

fn has_consecutive_weekdays(text: &str) -> bool {
    WEEKDAY_NAMES
        .windows(2)
        .any(|pair| text.contains(pair[0]) && text.contains(pair[1]))
}
