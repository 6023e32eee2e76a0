//! Core types and algorithms for unisync.
//!
//! This crate turns an institution's HTML timetable into normalized weekly
//! class events and reconciles them against a remote calendar snapshot:
//! - `grid` and `institution` parse timetable markup into `NormalizedEvent`s
//! - `remote` decodes the remote calendar's event list into `RemoteEvent`s
//! - `diff` computes the create/update/delete `WritePlan`
//! - `body` renders plan operations into the event bodies an executor sends

pub mod body;
pub mod config;
pub mod constants;
pub mod diff;
pub mod error;
pub mod event;
pub mod filter;
pub mod grid;
pub mod institution;
pub mod remote;
pub mod time;

pub use event::{NormalizedEvent, RemoteEvent};
pub use time::TimeOfDay;
