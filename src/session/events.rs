//! Session lifecycle events and run outcomes

use serde::Serialize;
use uuid::Uuid;

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The real search finished with this many results
    Completed { total_results: u64 },
    /// The real search failed; carries the user-facing message
    Failed { message: String },
    /// The user cancelled and the host stopped the run
    Cancelled,
}

impl RunOutcome {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Completed { .. } => "completed",
            Self::Failed { .. } => "failed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Published on the session's event channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    Started {
        run_id: Uuid,
    },
    Completed {
        run_id: Uuid,
        total_results: u64,
    },
    Failed {
        run_id: Uuid,
        message: String,
    },
    /// The user asked to cancel; the host decides when to stop
    CancelRequested {
        run_id: Uuid,
    },
    Stopped {
        run_id: Uuid,
        outcome: Option<RunOutcome>,
    },
}

impl SessionEvent {
    #[must_use]
    pub fn run_id(&self) -> Uuid {
        match self {
            Self::Started { run_id }
            | Self::Completed { run_id, .. }
            | Self::Failed { run_id, .. }
            | Self::CancelRequested { run_id }
            | Self::Stopped { run_id, .. } => *run_id,
        }
    }
}
