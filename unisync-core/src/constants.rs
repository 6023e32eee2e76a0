/// Duration used when a time range is malformed or yields a non-positive length.
pub const FALLBACK_DURATION_MINUTES: u32 = 60;

/// Visible text must be longer than this for a cell to count as a class.
pub const MIN_CLASS_TEXT_LEN: usize = 5;

pub const UNKNOWN_ROOM: &str = "Unknown Room";
pub const UNKNOWN_SUBJECT: &str = "Unknown Subject";

/// Prefix of the description written for every class event.
pub const LECTURER_PREFIX: &str = "Lecturer: ";

pub const WEEKLY_RRULE: &str = "RRULE:FREQ=WEEKLY";

pub const DEFAULT_TIMEZONE: &str = "Africa/Lusaka";
pub const DEFAULT_CALENDAR_NAME: &str = "UniSync Timetable";
