//! Wall-clock time of day used for class slots.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SyncError;

/// A time of day with minute precision (hour 0-23, minute 0-59).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Returns `None` when either component is out of range.
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(TimeOfDay {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    pub fn hour(&self) -> u32 {
        self.hour as u32
    }

    pub fn minute(&self) -> u32 {
        self.minute as u32
    }

    /// Minutes since midnight.
    pub fn minutes(&self) -> i64 {
        self.hour as i64 * 60 + self.minute as i64
    }

    /// Wall-clock hour and minute of any chrono time value.
    pub fn of<T: Timelike>(value: &T) -> Self {
        TimeOfDay {
            hour: value.hour() as u8,
            minute: value.minute() as u8,
        }
    }

    pub fn to_naive_time(&self) -> NaiveTime {
        // Components are range-checked in `new`, so this cannot fail.
        NaiveTime::from_hms_opt(self.hour(), self.minute(), 0).unwrap_or(NaiveTime::MIN)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = SyncError;

    /// Parse `H:MM`, `HH:MM` or `HH.MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SyncError::InvalidTime(format!("'{}' (expected HH:MM)", s));

        let (h, m) = s.trim().split_once([':', '.']).ok_or_else(invalid)?;
        let hour: u32 = h.parse().map_err(|_| invalid())?;
        let minute: u32 = m.parse().map_err(|_| invalid())?;
        if m.len() != 2 {
            return Err(invalid());
        }

        TimeOfDay::new(hour, minute).ok_or_else(invalid)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
