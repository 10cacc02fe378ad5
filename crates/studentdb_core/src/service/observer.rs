//! State-change notifications emitted by `StudentService`.
//!
//! Observers are informational only; service return values stay the sole
//! correctness signal.

use crate::model::student::StudentId;
use log::info;

/// Successful state change of one student row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentEvent {
    Created { id: StudentId },
    Updated { id: StudentId },
    Deleted { id: StudentId },
}

impl StudentEvent {
    /// Stable event name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Created { .. } => "student_created",
            Self::Updated { .. } => "student_updated",
            Self::Deleted { .. } => "student_deleted",
        }
    }

    pub fn id(&self) -> StudentId {
        match self {
            Self::Created { id } | Self::Updated { id } | Self::Deleted { id } => *id,
        }
    }
}

/// Callback invoked after each successful mutation.
pub trait StudentObserver {
    fn on_event(&self, event: &StudentEvent);
}

/// Observer that writes metadata-only log events (ids, never names/emails).
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

impl StudentObserver for LoggingObserver {
    fn on_event(&self, event: &StudentEvent) {
        info!(
            "event={} module=service status=ok id={}",
            event.name(),
            event.id()
        );
    }
}
