//! Restore scheduler - epoch-guarded delayed volume restoration
//!
//! When swallow mode is on, each press schedules a volume write back to the
//! baseline, delayed slightly so the OS's own change notification finishes
//! propagating before it is reversed. Rapid presses re-schedule; only the
//! newest timer may fire, and the target volume is read at fire time rather
//! than captured at schedule time, so a stale timer can never overwrite a
//! baseline set later (e.g., by an explicit `set_volume`).

/// Delay before a scheduled restore fires (milliseconds)
pub const RESTORE_DELAY_MS: u64 = 50;

/// Epoch-based anti-obsolescence tracker for scheduled restores
///
/// The actor owns one of these; the epoch is bumped whenever a new restore
/// is scheduled and whenever the baseline is replaced out-of-band.
#[derive(Debug, Default)]
pub struct RestoreSchedule {
    epoch: u64,
}

impl RestoreSchedule {
    /// Create a scheduler with no pending restores
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new scheduled restore, superseding any pending one
    ///
    /// Returns the epoch number for this restore. The timer must pass it to
    /// `is_current()` before applying the write.
    pub fn schedule(&mut self) -> u64 {
        self.epoch += 1;
        self.epoch
    }

    /// Invalidate all pending restores without scheduling a new one
    ///
    /// Used when the baseline is replaced explicitly (`set_volume`): the
    /// explicit write already establishes the target, so any in-flight
    /// restore timer becomes obsolete.
    pub fn invalidate(&mut self) {
        self.epoch += 1;
    }

    /// Check whether a timer's epoch is still the newest
    pub fn is_current(&self, epoch: u64) -> bool {
        self.epoch == epoch
    }
}
