//! Reconciliation of freshly parsed events against the remote calendar.

mod diff_kind;
mod matcher;
mod reconcile;
mod write_operation;

pub use diff_kind::DiffKind;
pub use matcher::is_same_class;
pub use reconcile::reconcile;
pub use write_operation::{WriteOperation, WritePlan};
