//! Staged progress simulation for digital footprint searches
//!
//! Two independent timer-driven engines keep a search dialog alive while the
//! real search runs as a single opaque request: [`StageProgressModel`] walks a
//! weighted list of stages and reconciles with the real result summary, and
//! [`StatusRotator`] plays a fixed list of status messages once.
//! [`ProgressSession`] drives both from the host's running flag.

pub mod config;
pub mod error;
pub mod icon;
pub mod progress;
pub mod render;
pub mod scheduler;
pub mod search;
pub mod session;
pub mod status;
pub mod utils;

pub use config::{ProgressConfig, ProgressConfigBuilder, SummaryStyle, Theme};
pub use error::{ProgressError, ProgressResult};
pub use icon::Icon;
pub use progress::{
    ExternalSummary, FixedJitter, JitterSource, ProgressSnapshot, ProgressState, RandomJitter,
    ResultEstimate, ResultsSummary, Stage, StageProgressModel, StageSequence, StageStatus,
};
pub use scheduler::{Epoch, TickControl, TimerHandle};
pub use search::{
    FootprintResult, ResultStats, RetryPolicy, SearchClient, SearchError, SearchRequest,
    SearchResponse, SearchResult,
};
pub use session::{ProgressSession, RunOutcome, SessionEvent};
pub use status::{StatusEntry, StatusRotator, StatusSequence, StatusSnapshot};
