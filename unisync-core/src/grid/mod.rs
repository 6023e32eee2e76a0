//! Timetable grid parsing.
//!
//! A timetable grid is an HTML table whose rows are time slots and whose
//! columns are weekdays. Classes spanning several slots are vertical merges
//! (`rowspan`), which remove cells from the rows below them; the walk keeps
//! an occupancy grid so those slots are not read as fresh cells.

mod cell;
mod occupancy;
mod table;
mod timeline;

use chrono::Weekday;
use scraper::Html;
use tracing::{debug, info, warn};

use crate::event::NormalizedEvent;

pub use cell::{CellDetails, DetailOrder, extract_details, is_class_cell, row_span, visible_text};
pub use occupancy::Occupancy;
pub use table::{GridTable, TableLocator};
pub use timeline::{Timeline, TimelineEntry, parse_time_range};

/// Per-institution knobs for the grid walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    pub locator: TableLocator,
    /// Weekday of each day column, left to right, after the time-label cell.
    pub days: Vec<Weekday>,
    pub detail_order: DetailOrder,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            locator: TableLocator::WeekdayHeader,
            days: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
                Weekday::Sat,
                Weekday::Sun,
            ],
            detail_order: DetailOrder::default(),
        }
    }
}

/// Parse a timetable page into normalized events.
///
/// Returns an empty list when the page has no recognisable grid or no
/// populated cells; markup irregularities never make this fail.
pub fn parse_grid(html: &str, config: &GridConfig) -> Vec<NormalizedEvent> {
    let document = Html::parse_document(html);

    let Some(grid) = table::locate(&document, config.locator) else {
        warn!("Could not find a timetable grid in the page");
        return Vec::new();
    };

    let (events, _) = walk(&grid, config);
    info!("Parsed {} classes from timetable grid", events.len());
    events
}

/// Walk the located grid row by row, day column by day column.
///
/// Also returns the final occupancy so merges can be inspected.
fn walk(grid: &GridTable<'_>, config: &GridConfig) -> (Vec<NormalizedEvent>, Occupancy) {
    let labels: Vec<Option<String>> = grid
        .rows
        .iter()
        .map(|row| table::split_row(*row).0.map(visible_text))
        .collect();
    let timeline = Timeline::build(&labels, grid.header_index);

    let mut occupancy = Occupancy::new(grid.rows.len(), config.days.len());
    let mut events = Vec::new();

    if timeline.is_empty() {
        warn!("Timetable grid has no time-slot rows");
        return (events, occupancy);
    }

    for (row_index, row) in grid.rows.iter().enumerate().skip(grid.header_index + 1) {
        let Some(slot) = timeline.get(row_index) else {
            continue;
        };

        let (_, cells) = table::split_row(*row);
        let mut next_cell = 0;

        for (column, weekday) in config.days.iter().enumerate() {
            if occupancy.is_occupied(row_index, column) {
                continue;
            }

            let Some(cell) = cells.get(next_cell) else {
                break;
            };
            next_cell += 1;

            if !is_class_cell(*cell) {
                continue;
            }

            let span = row_span(*cell);
            let duration = timeline.span_duration(row_index, span);
            for covered in timeline.span(row_index, span).skip(1) {
                occupancy.mark(covered.row_index, column);
            }

            let details = extract_details(*cell, config.detail_order);
            debug!(
                "Row {} {}: '{}' for {} minutes (rowspan {})",
                row_index, weekday, details.subject, duration, span
            );

            events.push(NormalizedEvent::new(
                *weekday,
                slot.start,
                duration,
                details.subject,
                details.room,
                details.instructor,
            ));
        }
    }

    (events, occupancy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::TimeOfDay;

    const HEADER: &str = "<tr><td>Time</td><td>Monday</td><td>Tuesday</td><td>Wednesday</td>\
        <td>Thursday</td><td>Friday</td><td>Saturday</td><td>Sunday</td></tr>";

    fn empty_days(n: usize) -> String {
        "<td>&nbsp;</td>".repeat(n)
    }

    fn page(rows: &[String]) -> String {
        format!(
            "<html><body><h1>Timetable</h1><table><tr><td colspan=\"8\">Semester 1</td></tr>{}{}</table></body></html>",
            HEADER,
            rows.concat()
        )
    }

    fn at(h: u32, m: u32) -> TimeOfDay {
        TimeOfDay::new(h, m).unwrap()
    }

    fn walk_page(html: &str) -> (Vec<NormalizedEvent>, Occupancy) {
        let document = Html::parse_document(html);
        let config = GridConfig::default();
        let grid = table::locate(&document, config.locator).unwrap();
        walk(&grid, &config)
    }

    #[test]
    fn test_end_to_end_single_cell() {
        let html = page(&[
            format!("<tr><td>08:00-09:00</td>{}</tr>", empty_days(7)),
            format!("<tr><td>09:00-10:00</td>{}</tr>", empty_days(7)),
            format!(
                "<tr><td>10:00-11:00</td><td><b>CS301 - Data Structures</b><br>Room 2B<br>J. Banda</td>{}</tr>",
                empty_days(6)
            ),
        ]);

        let events = parse_grid(&html, &GridConfig::default());

        assert_eq!(
            events,
            vec![NormalizedEvent::new(
                Weekday::Mon,
                at(10, 0),
                60,
                "CS301 - Data Structures",
                "Room 2B",
                "J. Banda"
            )]
        );
    }

    #[test]
    fn test_no_populated_cells_is_empty() {
        let html = page(&[
            format!("<tr><td>08:00-09:00</td>{}</tr>", empty_days(7)),
            format!("<tr><td>09:00-10:00</td>{}</tr>", empty_days(7)),
        ]);
        assert!(parse_grid(&html, &GridConfig::default()).is_empty());
    }

    #[test]
    fn test_no_grid_is_empty() {
        assert!(parse_grid("<html><body>Maintenance</body></html>", &GridConfig::default()).is_empty());
        assert!(parse_grid("", &GridConfig::default()).is_empty());
    }

    #[test]
    fn test_header_without_time_rows_is_empty() {
        let html = page(&[format!("<tr><td>Notes</td>{}</tr>", empty_days(7))]);
        assert!(parse_grid(&html, &GridConfig::default()).is_empty());
    }

    #[test]
    fn test_rowspan_three_sums_duration_and_occupies_next_two_rows() {
        // Rows: 0 title, 1 header, 2..=4 time slots.
        let html = page(&[
            format!(
                "<tr><td>08:00-09:00</td><td rowspan=\"3\"><b>MAT110 Calculus</b><br>Hall 1<br>K. Zulu</td>{}</tr>",
                empty_days(6)
            ),
            format!("<tr><td>09:00-10:00</td>{}</tr>", empty_days(6)),
            format!("<tr><td>10:00-11:00</td>{}</tr>", empty_days(6)),
        ]);

        let (events, occupancy) = walk_page(&html);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].duration_minutes, 180);
        assert_eq!(events[0].start, at(8, 0));
        assert_eq!(occupancy.occupied_rows(0), vec![3, 4]);
        for column in 1..7 {
            assert!(occupancy.occupied_rows(column).is_empty());
        }
    }

    #[test]
    fn test_cells_after_merge_shift_to_correct_day() {
        // Monday spans two rows, so row 3's first data cell is Tuesday's.
        let html = page(&[
            format!(
                "<tr><td>08:00-09:00</td><td rowspan=\"2\"><b>MAT110 Calculus</b><br>Hall 1</td>{}</tr>",
                empty_days(6)
            ),
            format!(
                "<tr><td>09:00-10:00</td><td><a href=\"#\">PHY120 Physics</a><br>Lab 3</td>{}</tr>",
                empty_days(5)
            ),
        ]);

        let events = parse_grid(&html, &GridConfig::default());

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].weekday, Weekday::Mon);
        assert_eq!(events[0].duration_minutes, 120);
        assert_eq!(events[1].weekday, Weekday::Tue);
        assert_eq!(events[1].start, at(9, 0));
        assert_eq!(events[1].subject, "PHY120 Physics");
    }

    #[test]
    fn test_rowspan_across_separator_row() {
        // Rows: 2 = 17:00-17:30, 3 = "Part-time" separator, 4 = 17:30-18:30.
        let html = page(&[
            format!(
                "<tr><td>17:00-17:30</td>{}<td rowspan=\"2\"><b>ACC210 Accounting</b><br>Room 7</td>{}</tr>",
                empty_days(2),
                empty_days(4)
            ),
            "<tr><td colspan=\"8\">Part-time</td></tr>".to_string(),
            format!("<tr><td>17:30-18:30</td>{}</tr>", empty_days(6)),
        ]);

        let (events, occupancy) = walk_page(&html);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].weekday, Weekday::Wed);
        assert_eq!(events[0].duration_minutes, 90);
        assert_eq!(occupancy.occupied_rows(2), vec![4]);
        assert!(!occupancy.is_occupied(3, 2));
    }

    #[test]
    fn test_rowspan_past_table_end_does_not_panic() {
        let html = page(&[format!(
            "<tr><td>08:00-09:00</td><td rowspan=\"5\"><b>ENG101 English</b><br>Room 1</td>{}</tr>",
            empty_days(6)
        )]);

        let events = parse_grid(&html, &GridConfig::default());

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].duration_minutes, 60);
    }

    #[test]
    fn test_short_row_stops_walk() {
        let html = page(&[
            "<tr><td>08:00-09:00</td><td>&nbsp;</td><td><b>BIO100 Biology</b><br>Lab 1</td></tr>"
                .to_string(),
        ]);

        let events = parse_grid(&html, &GridConfig::default());

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].weekday, Weekday::Tue);
    }

    #[test]
    fn test_time_labels_in_header_cells() {
        let html = page(&[
            format!("<tr><th>08:00-09:00</th>{}</tr>", empty_days(7)),
            format!(
                "<tr><th>09:00-10:00</th><td>&nbsp;</td><td rowspan=\"2\"><b>STA150 Statistics</b><br>Room 5</td>{}</tr>",
                empty_days(5)
            ),
            format!("<tr><th>10:00-11:00</th>{}</tr>", empty_days(6)),
        ]);

        let events = parse_grid(&html, &GridConfig::default());

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].weekday, Weekday::Tue);
        assert_eq!(events[0].start, at(9, 0));
        assert_eq!(events[0].duration_minutes, 120);
    }

    #[test]
    fn test_custom_day_columns() {
        let config = GridConfig {
            days: vec![Weekday::Sun, Weekday::Mon],
            ..GridConfig::default()
        };
        let html = page(&[format!(
            "<tr><td>08:00-09:00</td><td><b>REL100 Ethics</b><br>Chapel</td>{}</tr>",
            empty_days(6)
        )]);

        let events = parse_grid(&html, &config);

        assert_eq!(events[0].weekday, Weekday::Sun);
    }
}
