//! Self-chaining status line rotator
//!
//! Each entry schedules the one-shot timer that replaces it, so entries keep
//! their own durations without a shared cadence. The sequence plays once and
//! holds its last message.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use super::entry::{StatusEntry, StatusSequence};
use crate::icon::Icon;
use crate::scheduler::{Epoch, TimerHandle, spawn_after};

/// What the status line currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub running: bool,
    /// Empty while stopped
    pub message: String,
    pub icon: Icon,
    pub active_index: Option<usize>,
    /// The last entry is displayed and nothing further is scheduled
    pub finished: bool,
}

impl StatusSnapshot {
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.message.is_empty()
    }
}

struct RotatorInner {
    epoch: Epoch,
    timer: Option<TimerHandle>,
    running: bool,
    active_index: Option<usize>,
    message: String,
    icon: Icon,
}

impl RotatorInner {
    fn show(&mut self, index: usize, entry: &StatusEntry) {
        self.active_index = Some(index);
        self.message.clone_from(&entry.message);
        self.icon = entry.icon.clone();
    }

    fn clear(&mut self) {
        self.running = false;
        self.active_index = None;
        self.message.clear();
        self.icon = Icon::none();
    }
}

/// Plays a [`StatusSequence`] once per run
///
/// Cloning yields another handle to the same rotator. `start` must be called
/// from within a tokio runtime.
#[derive(Clone)]
pub struct StatusRotator {
    inner: Arc<Mutex<RotatorInner>>,
    entries: Arc<StatusSequence>,
}

impl StatusRotator {
    #[must_use]
    pub fn new(entries: StatusSequence) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RotatorInner {
                epoch: Epoch::INITIAL,
                timer: None,
                running: false,
                active_index: None,
                message: String::new(),
                icon: Icon::none(),
            })),
            entries: Arc::new(entries),
        }
    }

    /// Show the first entry and schedule the rest of the sequence
    ///
    /// Calling it again restarts playback from the first entry.
    pub fn start(&self) {
        let mut inner = self.inner.lock();
        if let Some(mut timer) = inner.timer.take() {
            timer.cancel();
        }
        let scheduled = inner.epoch.bump();

        inner.running = true;
        inner.show(0, &self.entries[0]);
        inner.timer = Some(schedule_advance(&self.inner, &self.entries, scheduled, 0));
        log::debug!(
            "Status rotator started ({scheduled}, {} entries)",
            self.entries.len()
        );
    }

    /// Cancel the pending entry and blank the status line
    pub fn stop(&self) {
        let mut inner = self.inner.lock();
        if !inner.running {
            return;
        }
        inner.epoch.bump();
        if let Some(mut timer) = inner.timer.take() {
            timer.cancel();
        }
        inner.clear();
        log::debug!("Status rotator stopped ({})", inner.epoch);
    }

    #[must_use]
    pub fn snapshot(&self) -> StatusSnapshot {
        let inner = self.inner.lock();
        StatusSnapshot {
            running: inner.running,
            message: inner.message.clone(),
            icon: inner.icon.clone(),
            active_index: inner.active_index,
            finished: inner.running && inner.timer.is_none(),
        }
    }

    #[must_use]
    pub fn current_message(&self) -> String {
        self.inner.lock().message.clone()
    }

    #[must_use]
    pub fn current_icon(&self) -> Icon {
        self.inner.lock().icon.clone()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.lock().running
    }

    #[must_use]
    pub fn entries(&self) -> &Arc<StatusSequence> {
        &self.entries
    }
}

impl Default for StatusRotator {
    fn default() -> Self {
        Self::new(StatusSequence::default())
    }
}

impl std::fmt::Debug for StatusRotator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("StatusRotator")
            .field("epoch", &inner.epoch)
            .field("running", &inner.running)
            .field("active_index", &inner.active_index)
            .finish_non_exhaustive()
    }
}

/// Schedule the timer that moves on from the entry at `index`
fn schedule_advance(
    inner: &Arc<Mutex<RotatorInner>>,
    entries: &Arc<StatusSequence>,
    scheduled: Epoch,
    index: usize,
) -> TimerHandle {
    let weak = Arc::downgrade(inner);
    let chained = Arc::clone(entries);
    spawn_after(entries[index].duration(), "status-rotator", move || {
        advance(&weak, &chained, scheduled);
    })
}

fn advance(weak: &Weak<Mutex<RotatorInner>>, entries: &Arc<StatusSequence>, scheduled: Epoch) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let mut inner = shared.lock();
    if !inner.epoch.admits(scheduled) {
        log::debug!("Dropping stale status fire ({scheduled}, live {})", inner.epoch);
        return;
    }

    // The handle belongs to the task running this very callback
    if let Some(timer) = inner.timer.take() {
        timer.detach();
    }

    let next = inner.active_index.map_or(0, |index| index + 1);
    match entries.get(next) {
        Some(entry) => {
            inner.show(next, entry);
            inner.timer = Some(schedule_advance(&shared, entries, scheduled, next));
        }
        None => log::debug!("Status rotator holding last entry ({scheduled})"),
    }
}
