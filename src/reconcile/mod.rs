mod reconciler;
mod status;

pub use reconciler::{Reconciler, RecordOutcome};
pub use status::StatusMessage;
