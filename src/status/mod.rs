//! Floating status line driven by a fixed sequence of timed messages

pub mod entry;
pub mod rotator;

pub use entry::{StatusEntry, StatusSequence, default_status_entries};
pub use rotator::{StatusRotator, StatusSnapshot};
