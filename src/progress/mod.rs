//! Stage-weighted progress simulation
//!
//! The pure state machine lives in `state`, the timer wiring in `model`.

pub mod jitter;
pub mod model;
pub mod snapshot;
pub mod stage;
pub mod state;
pub mod summary;

pub use jitter::{FixedJitter, JitterSource, RandomJitter};
pub use model::StageProgressModel;
pub use snapshot::{ProgressSnapshot, StageStatus};
pub use stage::{Stage, StageSequence, default_stages};
pub use state::{ProgressState, ResultEstimate};
pub use summary::{ExternalSummary, ResultsSummary};
