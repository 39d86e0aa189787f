//! Generation counter used to invalidate stale callbacks

use std::fmt;

/// Generation of an engine's schedule
///
/// Bumped on every start, stop and completion. A callback captured with an
/// older epoch must leave state untouched when it fires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Epoch(u64);

impl Epoch {
    /// The epoch of an engine that has never been started
    pub const INITIAL: Epoch = Epoch(0);

    /// Advance to the next generation and return it
    #[inline]
    pub fn bump(&mut self) -> Epoch {
        self.0 = self.0.wrapping_add(1);
        *self
    }

    /// Whether a callback scheduled under `scheduled` may still act
    #[inline]
    #[must_use]
    pub fn admits(self, scheduled: Epoch) -> bool {
        self == scheduled
    }

    /// Raw generation number
    #[inline]
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "epoch#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bump_invalidates_previous_generation() {
        let mut live = Epoch::INITIAL;
        let scheduled = live.bump();
        assert!(live.admits(scheduled));

        live.bump();
        assert!(!live.admits(scheduled));
        assert_eq!(live.value(), 2);
    }

    #[test]
    fn display_includes_generation() {
        let mut epoch = Epoch::default();
        epoch.bump();
        assert_eq!(epoch.to_string(), "epoch#1");
    }
}
