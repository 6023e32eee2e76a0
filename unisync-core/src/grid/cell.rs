//! Reading a single timetable cell: is it a class, how far does it span, and
//! what subject/room/instructor does it name.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use crate::constants::{MIN_CLASS_TEXT_LEN, UNKNOWN_ROOM, UNKNOWN_SUBJECT};

/// Emphasis or link markup; the first match in a class cell is its subject.
static EMPHASIS_OR_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("b, strong, em, a").expect("valid selector"));

const BLOCK_ELEMENTS: [&str; 8] = ["div", "p", "li", "ul", "ol", "tr", "table", "h4"];

/// Order of the lines that follow the subject in a class cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailOrder {
    #[default]
    RoomThenInstructor,
    InstructorThenRoom,
}

/// Text fields of a populated cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellDetails {
    pub subject: String,
    pub room: String,
    pub instructor: String,
}

/// A cell holds a class when its visible text is longer than five characters
/// and it contains emphasis or link markup. Blank and `&nbsp;` filler cells
/// fail the first condition, stray labels the second.
pub fn is_class_cell(cell: ElementRef<'_>) -> bool {
    let long_enough = visible_text(cell).chars().count() > MIN_CLASS_TEXT_LEN;
    let has_markup = cell.select(&EMPHASIS_OR_LINK).next().is_some();
    long_enough && has_markup
}

/// Number of rows the cell covers (`rowspan`, at least 1).
pub fn row_span(cell: ElementRef<'_>) -> usize {
    cell.value()
        .attr("rowspan")
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(1)
}

/// Extract subject, room and instructor.
///
/// The subject is the first emphasis/link element. The remaining text is split
/// into non-empty lines: with the default order the first is the room and the
/// second the instructor, each with a placeholder when missing.
pub fn extract_details(cell: ElementRef<'_>, order: DetailOrder) -> CellDetails {
    let subject_el = cell.select(&EMPHASIS_OR_LINK).next();

    let subject = subject_el
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| UNKNOWN_SUBJECT.to_string());

    let mut raw = String::new();
    push_text(cell, subject_el, &mut raw);
    let mut lines = lines(&raw).into_iter();
    let first = lines.next();
    let second = lines.next();

    let (room, instructor) = match order {
        DetailOrder::RoomThenInstructor => (first, second),
        DetailOrder::InstructorThenRoom => (second, first),
    };

    CellDetails {
        subject,
        room: room.unwrap_or_else(|| UNKNOWN_ROOM.to_string()),
        instructor: instructor.unwrap_or_default(),
    }
}

/// Rendered text of an element: `<br>` and block boundaries become line
/// breaks, other whitespace collapses, blank lines are dropped.
pub fn visible_text(el: ElementRef<'_>) -> String {
    let mut raw = String::new();
    push_text(el, None, &mut raw);
    lines(&raw).join("\n")
}

fn push_text(el: ElementRef<'_>, skip: Option<ElementRef<'_>>, out: &mut String) {
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(&text.replace(char::is_whitespace, " "));
            continue;
        }

        let Some(child_el) = ElementRef::wrap(child) else {
            continue;
        };
        if skip.is_some_and(|s| s.id() == child_el.id()) {
            continue;
        }

        match child_el.value().name() {
            "br" => out.push('\n'),
            "script" | "style" => {}
            name if BLOCK_ELEMENTS.contains(&name) => {
                out.push('\n');
                push_text(child_el, skip, out);
                out.push('\n');
            }
            _ => push_text(child_el, skip, out),
        }
    }
}

fn lines(raw: &str) -> Vec<String> {
    raw.split('\n')
        .map(collapse_whitespace)
        .filter(|l| !l.is_empty())
        .collect()
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
