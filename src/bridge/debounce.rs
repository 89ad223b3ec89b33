//! Debounce gate - collapses notification bursts into one logical press
//!
//! Physical buttons and OS-level key repeat can emit change notifications
//! faster than a human-perceptible press. The gate accepts at most one
//! sample per minimum interval; rejected samples produce no event and do
//! not advance the gate clock, so a burst is measured from its first
//! accepted sample.

/// Minimum interval between accepted samples (milliseconds)
pub const MIN_EVENT_INTERVAL_MS: u64 = 100;

/// Outcome of offering a sample to the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Sample accepted; the gate clock advanced to its timestamp
    Accepted,
    /// Sample arrived within the minimum interval of the last accepted one
    Rejected,
}

/// Stateful debounce filter over sample timestamps
///
/// `last_event_ms` is monotonic and non-decreasing: it only ever moves
/// forward, and only on acceptance.
#[derive(Debug)]
pub struct DebounceGate {
    min_interval_ms: u64,
    last_event_ms: Option<u64>,
}

impl DebounceGate {
    /// Create a gate with the given minimum interval
    pub fn new(min_interval_ms: u64) -> Self {
        Self {
            min_interval_ms,
            last_event_ms: None,
        }
    }

    /// Offer a sample observed at `ts_ms`
    ///
    /// Accepts if at least the minimum interval has elapsed since the last
    /// accepted sample (or if nothing has been accepted yet). A timestamp
    /// earlier than the last accepted one is rejected, which keeps the gate
    /// clock monotonic even if the observer misbehaves.
    pub fn offer(&mut self, ts_ms: u64) -> GateDecision {
        match self.last_event_ms {
            Some(last) if ts_ms < last + self.min_interval_ms => GateDecision::Rejected,
            _ => {
                self.last_event_ms = Some(ts_ms);
                GateDecision::Accepted
            }
        }
    }

    /// Timestamp of the last accepted sample, if any
    pub fn last_event_ms(&self) -> Option<u64> {
        self.last_event_ms
    }
}

impl Default for DebounceGate {
    fn default() -> Self {
        Self::new(MIN_EVENT_INTERVAL_MS)
    }
}
