//! BridgeHandle - public API for the bridge actor
//!
//! Wraps message passing with ergonomic methods. Control operations are
//! fire-and-forget (they never block the caller and never fail); status
//! queries use oneshot channels.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use super::commands::{BridgeCommand, BridgeStatus, ConsumerFn};
use crate::backend::RawSample;
use crate::event::VolumeEvent;

/// Handle for interacting with a [`BridgeActor`](super::actor::BridgeActor)
///
/// Cloneable; all clones talk to the same actor. Bridge state lives for the
/// life of the actor task; `stop()` only releases the observer subscription.
#[derive(Clone)]
pub struct BridgeHandle {
    /// Command channel to the actor
    cmd_tx: mpsc::UnboundedSender<BridgeCommand>,
}

impl BridgeHandle {
    /// Create a handle over an existing command channel
    pub(crate) fn new(cmd_tx: mpsc::UnboundedSender<BridgeCommand>) -> Self {
        Self { cmd_tx }
    }

    // =========================================================================
    // Control operations (fire-and-forget)
    // =========================================================================

    /// Begin listening for volume button presses
    ///
    /// Sets the system volume to the configured mid-scale baseline so both
    /// directions stay detectable (audible side effect on first start).
    /// Idempotent: a second start while listening is a no-op.
    pub fn start(&self) {
        let _ = self.cmd_tx.send(BridgeCommand::Start);
    }

    /// Stop listening
    ///
    /// Idempotent. The baseline volume and swallow flag persist for a
    /// subsequent start. Restores already in flight may still complete;
    /// they are harmless no-ops if the volume is already at the target.
    pub fn stop(&self) {
        let _ = self.cmd_tx.send(BridgeCommand::Stop);
    }

    /// Enable or disable snapping volume back after a press
    ///
    /// Effective for the next observed sample; no immediate side effect.
    pub fn set_swallow_volume_changes(&self, enable: bool) {
        let _ = self.cmd_tx.send(BridgeCommand::SetSwallowChanges(enable));
    }

    /// Set the system volume and the internal baseline
    ///
    /// `level` is clamped to [0.0, 1.0]. Valid whether or not the bridge is
    /// listening; the next accepted press reports this level as `old_value`.
    pub fn set_volume(&self, level: f32) {
        let _ = self.cmd_tx.send(BridgeCommand::SetVolume(level));
    }

    /// Register the consumer that receives [`VolumeEvent`]s
    ///
    /// Replaces any previously registered consumer; events are delivered to
    /// exactly one consumer, at most once per accepted sample.
    pub fn set_consumer(&self, consumer: impl Fn(VolumeEvent) + Send + Sync + 'static) {
        let consumer: ConsumerFn = Arc::new(consumer);
        let _ = self.cmd_tx.send(BridgeCommand::SetConsumer(Some(consumer)));
    }

    /// Unregister the current consumer, if any
    pub fn clear_consumer(&self) {
        let _ = self.cmd_tx.send(BridgeCommand::SetConsumer(None));
    }

    /// Inject a raw sample directly, bypassing the observer subscription
    ///
    /// Samples are still gated on the listening state, debounced, and
    /// classified like observer-delivered ones. Intended for platform shims
    /// that push rather than subscribe (e.g., key-event dispatch).
    pub fn on_sample(&self, sample: RawSample) {
        let _ = self.cmd_tx.send(BridgeCommand::Sample(sample));
    }

    // =========================================================================
    // Query operations (async with response)
    // =========================================================================

    /// Get a snapshot of the bridge status
    pub async fn status(&self) -> Option<BridgeStatus> {
        let (response_tx, response_rx) = oneshot::channel();
        let cmd = BridgeCommand::GetStatus {
            response: response_tx,
        };

        if self.cmd_tx.send(cmd).is_err() {
            return None;
        }

        response_rx.await.ok()
    }

    /// Whether the observer subscription is currently active
    pub async fn is_listening(&self) -> bool {
        self.status().await.map(|s| s.is_listening).unwrap_or(false)
    }

    /// Current baseline volume
    pub async fn last_volume(&self) -> Option<f32> {
        self.status().await.map(|s| s.last_volume)
    }
}
