//! Test utilities shared by the footprint progress test suite

use std::time::Duration;

use kodegen_tools_footprint::{
    FixedJitter, ProgressConfig, ResultEstimate, StageProgressModel, StageSequence, StatusEntry,
    StatusRotator, StatusSequence,
};

/// Let spawned timer tasks run after the clock moved
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

/// Advance paused time one second at a time
#[allow(dead_code)]
pub async fn advance_secs(secs: u64) {
    for _ in 0..secs {
        tokio::time::advance(Duration::from_secs(1)).await;
        settle().await;
    }
}

/// Advance paused time in a single step
#[allow(dead_code)]
pub async fn advance_ms(ms: u64) {
    tokio::time::advance(Duration::from_millis(ms)).await;
    settle().await;
}

/// Default seven-stage model with jitter pinned to zero
#[allow(dead_code)]
pub fn fixed_model() -> StageProgressModel {
    StageProgressModel::new(
        StageSequence::default(),
        Duration::from_secs(1),
        ResultEstimate::default(),
    )
    .unwrap()
    .with_jitter(FixedJitter(0))
}

/// Rotator over the given `(message, millis)` pairs
#[allow(dead_code)]
pub fn rotator(entries: &[(&str, u64)]) -> StatusRotator {
    let entries = entries
        .iter()
        .map(|(message, ms)| StatusEntry::new(*message, "search", *ms))
        .collect();
    StatusRotator::new(StatusSequence::new(entries).unwrap())
}

/// Default configuration with a short grace period
#[allow(dead_code)]
pub fn quick_config() -> ProgressConfig {
    ProgressConfig::builder()
        .completion_grace_ms(1000)
        .jitter_max(0)
        .build()
        .unwrap()
}
