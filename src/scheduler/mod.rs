//! Owned timer handles on top of the tokio runtime
//!
//! Both engines schedule their callbacks through this module instead of
//! keeping ambient timers around. Every schedule call returns a
//! [`TimerHandle`] that owns the spawned task; cancelling it is idempotent and
//! dropping it cancels too.
//!
//! Aborting a task is not enough to make a reset race-free: a callback may
//! already be past its `.await` when the abort lands. Callers therefore tag
//! every callback with the [`Epoch`] that was current when it was scheduled
//! and compare it against their live epoch under their state lock before
//! mutating anything.

pub mod epoch;
pub mod timer;

pub use epoch::Epoch;
pub use timer::{TickControl, TimerHandle, spawn_after, spawn_interval};
