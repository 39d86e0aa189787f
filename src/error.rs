//! Error types for progress engine construction
//!
//! The engines themselves never fail at runtime. Every error here is raised
//! while validating a stage list, a status sequence or a configuration, before
//! any timer is scheduled.

/// Result type for progress engine construction
pub type ProgressResult<T> = Result<T, ProgressError>;

/// Validation errors for stage sequences, status sequences and configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressError {
    /// A stage sequence must contain at least one stage
    #[error("Stage sequence is empty")]
    EmptyStages,

    /// Every stage needs a nominal duration of at least one second
    #[error("Stage '{name}' (index {index}) has a zero nominal duration")]
    ZeroStageDuration { index: usize, name: String },

    /// A status sequence must contain at least one entry
    #[error("Status sequence is empty")]
    EmptyStatusEntries,

    /// Every status entry needs a positive display duration
    #[error("Status entry '{message}' (index {index}) has a zero duration")]
    ZeroStatusDuration { index: usize, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration: {what}")]
    InvalidConfig { what: &'static str },
}
