//! Command enum for the bridge actor
//!
//! All bridge state lives inside the actor; this is its message protocol.
//! Commands are divided into two categories:
//! - **Hot path** (no response): fire-and-forget operations that never block
//!   the sender (raw samples, lifecycle toggles, restore timers)
//! - **Request-response**: status queries that return data via oneshot channel

use std::sync::Arc;
use tokio::sync::oneshot;

use crate::backend::RawSample;
use crate::event::VolumeEvent;

/// Consumer callback type
///
/// Called once per accepted, classified sample with the normalized event.
/// Delivery is fire-and-forget; the bridge never waits on the consumer.
pub type ConsumerFn = Arc<dyn Fn(VolumeEvent) + Send + Sync>;

/// Snapshot of bridge status for queries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BridgeStatus {
    /// Whether the observer subscription is active
    pub is_listening: bool,
    /// Whether presses are audibly reversed after delivery
    pub swallow_changes: bool,
    /// Baseline volume used for comparison and restoration
    pub last_volume: f32,
}

/// Commands for the bridge actor
pub enum BridgeCommand {
    // -------------------------------------------------------------------------
    // Hot path commands (no response - fire and forget)
    // -------------------------------------------------------------------------
    /// Begin listening: subscribe the observer and set the 0.5 baseline.
    /// No-op if already listening.
    Start,

    /// Stop listening: unsubscribe the observer. Baseline and swallow flag
    /// persist for a later Start. No-op if not listening.
    Stop,

    /// Toggle the restore-after-press policy, effective from the next sample
    SetSwallowChanges(bool),

    /// Set the system volume and the internal baseline immediately
    ///
    /// Clamped to [0.0, 1.0]; valid whether or not the bridge is listening.
    SetVolume(f32),

    /// Replace the registered consumer (None unregisters)
    SetConsumer(Option<ConsumerFn>),

    /// Raw volume sample from the observer subscription
    Sample(RawSample),

    /// A scheduled restore timer fired; apply only if `epoch` is current
    FireRestore { epoch: u64 },

    // -------------------------------------------------------------------------
    // Request-response commands
    // -------------------------------------------------------------------------
    /// Query the current bridge status
    GetStatus {
        /// Channel for the response
        response: oneshot::Sender<BridgeStatus>,
    },
}
