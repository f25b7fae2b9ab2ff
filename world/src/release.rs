//! Countdown that opens the pen.

/// Single elapsed-frame counter driving both the pen release and the
/// disappearance of the pen's stone decorations.
#[derive(Clone, Debug)]
pub(crate) struct ReleaseClock {
    elapsed_ticks: u64,
    ticks_per_second: u64,
    release_seconds: u64,
}

impl ReleaseClock {
    pub(crate) fn new(ticks_per_second: u32, release_seconds: u32) -> Self {
        Self {
            elapsed_ticks: 0,
            ticks_per_second: u64::from(ticks_per_second.max(1)),
            release_seconds: u64::from(release_seconds),
        }
    }

    pub(crate) fn advance(&mut self) {
        self.elapsed_ticks = self.elapsed_ticks.saturating_add(1);
    }

    /// Whole seconds before the pen opens, never below zero.
    pub(crate) fn seconds_left(&self) -> u32 {
        let elapsed_seconds = self.elapsed_ticks / self.ticks_per_second;
        let left = self.release_seconds.saturating_sub(elapsed_seconds);
        u32::try_from(left).unwrap_or(u32::MAX)
    }

    /// Frames left before disappearing stones vanish.
    pub(crate) fn ticks_until_release(&self) -> u64 {
        (self.release_seconds * self.ticks_per_second).saturating_sub(self.elapsed_ticks)
    }

    pub(crate) fn expired(&self) -> bool {
        self.ticks_until_release() == 0
    }
}
