//! BridgeActor - actor-based volume bridge core
//!
//! Owns all bridge state and processes commands sequentially from a channel.
//! This design:
//! - Serializes all state access (raw samples are handled strictly in
//!   arrival order, no locks)
//! - Keeps volume writes and restore timers fire-and-forget
//! - Simplifies testing through message inspection
//!
//! ```text
//! observer ──samples──▶ forwarder ──┐
//! handle ───commands────────────────┼──▶ cmd_rx ──▶ BridgeActor
//! restore timers ──FireRestore──────┘                  │
//!                                                      ▼
//!                                          consumer / backend writes
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

use super::classify::classify;
use super::commands::{BridgeCommand, BridgeStatus, ConsumerFn};
use super::debounce::{DebounceGate, GateDecision};
use super::handle::BridgeHandle;
use super::restore::RestoreSchedule;
use crate::backend::{RawSample, SubscriptionId, VolumeBackend};
use crate::config::BridgeConfig;
use crate::event::VolumeEvent;

/// Listening state machine
///
/// Transition table:
///
/// | State       | start()                  | stop()           | sample      |
/// |-------------|--------------------------|------------------|-------------|
/// | `Idle`      | subscribe → `Listening`  | no-op            | dropped     |
/// | `Listening` | no-op                    | unsubscribe → `Idle` | processed |
///
/// A failed subscription stays in `Idle` (logged, never surfaced).
enum ListenState {
    /// Not observing; samples are dropped
    Idle,
    /// Observer subscription active
    Listening {
        /// Handle for unsubscribing on stop
        subscription: SubscriptionId,
    },
}

/// Actor owning all volume-bridge state
///
/// Spawned once per bridge instance; interacted with exclusively through
/// [`BridgeHandle`]. The state outlives stop/start cycles: `stop()` clears
/// only the listening state, the baseline and swallow flag persist.
pub struct BridgeActor {
    /// Platform seam for observation and volume writes
    backend: Arc<dyn VolumeBackend>,

    /// Static tuning (debounce interval, restore delay, baseline)
    config: BridgeConfig,

    /// Listening state machine
    listen: ListenState,

    /// Restore-after-press policy, mutable independently of listening
    swallow_changes: bool,

    /// Baseline volume: what the bridge considers "current" for comparison
    /// and restoration, independent of the OS's live volume
    last_volume: f32,

    /// Debounce filter over sample timestamps
    gate: DebounceGate,

    /// Epoch tracker for scheduled restores
    restores: RestoreSchedule,

    /// Currently registered consumer, if any
    consumer: Option<ConsumerFn>,

    /// Receiver for incoming commands
    cmd_rx: mpsc::UnboundedReceiver<BridgeCommand>,

    /// Sender kept for sample forwarding and restore timers
    cmd_tx: mpsc::UnboundedSender<BridgeCommand>,
}

impl BridgeActor {
    /// Spawn a new BridgeActor and return a handle for interacting with it
    pub fn spawn(backend: Arc<dyn VolumeBackend>, config: BridgeConfig) -> BridgeHandle {
        let config = config.sanitized();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();

        let actor = BridgeActor {
            backend,
            gate: DebounceGate::new(config.debounce_ms),
            listen: ListenState::Idle,
            swallow_changes: config.swallow_changes,
            last_volume: config.baseline_volume,
            restores: RestoreSchedule::new(),
            consumer: None,
            cmd_rx,
            cmd_tx: cmd_tx.clone(),
            config,
        };

        tokio::spawn(actor.run());

        BridgeHandle::new(cmd_tx)
    }

    /// Actor run loop: process commands until every handle is gone
    async fn run(mut self) {
        debug!(backend = self.backend.name(), "bridge actor started");

        while let Some(cmd) = self.cmd_rx.recv().await {
            match cmd {
                BridgeCommand::Start => self.handle_start().await,
                BridgeCommand::Stop => self.handle_stop().await,
                BridgeCommand::SetSwallowChanges(enable) => {
                    debug!(enable, "swallow policy updated");
                    self.swallow_changes = enable;
                }
                BridgeCommand::SetVolume(level) => self.handle_set_volume(level),
                BridgeCommand::SetConsumer(consumer) => {
                    self.consumer = consumer;
                }
                BridgeCommand::Sample(sample) => self.handle_sample(sample),
                BridgeCommand::FireRestore { epoch } => self.handle_fire_restore(epoch),
                BridgeCommand::GetStatus { response } => {
                    let _ = response.send(BridgeStatus {
                        is_listening: matches!(self.listen, ListenState::Listening { .. }),
                        swallow_changes: self.swallow_changes,
                        last_volume: self.last_volume,
                    });
                }
            }
        }

        debug!("bridge actor stopped");
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    async fn handle_start(&mut self) {
        if matches!(self.listen, ListenState::Listening { .. }) {
            debug!("start ignored: already listening");
            return;
        }

        let (sample_tx, mut sample_rx) = mpsc::unbounded_channel::<RawSample>();

        let subscription = match self.backend.subscribe(sample_tx).await {
            Ok(id) => id,
            Err(e) => {
                // Never fatal: the bridge stays idle and the caller sees a no-op
                warn!(error = %e, "could not start volume observation");
                return;
            }
        };

        // Forward observer samples into the command stream. The task ends on
        // its own once the backend drops the sender after unsubscribe.
        let cmd_tx = self.cmd_tx.clone();
        tokio::spawn(async move {
            while let Some(sample) = sample_rx.recv().await {
                if cmd_tx.send(BridgeCommand::Sample(sample)).is_err() {
                    break;
                }
            }
        });

        self.listen = ListenState::Listening { subscription };

        // Mid-scale baseline so the very next press is classifiable in
        // either direction. Audible side effect, by contract.
        self.last_volume = self.config.baseline_volume;
        self.write_volume_best_effort(self.config.baseline_volume);

        info!(
            backend = self.backend.name(),
            baseline = self.config.baseline_volume as f64,
            "volume bridge listening"
        );
    }

    async fn handle_stop(&mut self) {
        let ListenState::Listening { subscription } = &self.listen else {
            debug!("stop ignored: not listening");
            return;
        };

        self.backend.unsubscribe(*subscription).await;
        self.listen = ListenState::Idle;

        info!("volume bridge stopped");
    }

    fn handle_set_volume(&mut self, level: f32) {
        // Clamped, never rejected; NaN counts as out-of-range
        let clamped = if level.is_finite() {
            level.clamp(0.0, 1.0)
        } else {
            0.0
        };

        // The explicit write supersedes any in-flight restore
        self.restores.invalidate();
        self.last_volume = clamped;
        self.write_volume_best_effort(clamped);

        debug!(level = clamped as f64, "baseline volume set");
    }

    // =========================================================================
    // Sample pipeline
    // =========================================================================

    fn handle_sample(&mut self, sample: RawSample) {
        if !matches!(self.listen, ListenState::Listening { .. }) {
            trace!(?sample, "sample dropped: not listening");
            return;
        }

        if self.gate.offer(sample.ts_ms) == GateDecision::Rejected {
            trace!(?sample, "sample debounced");
            // A rapid repeat is exactly the case where OS volume has drifted
            // from the baseline: roll the committed change back anyway.
            // Restoring to an already-correct level is a harmless no-op.
            if self.swallow_changes {
                self.schedule_restore();
            }
            return;
        }

        let Some(direction) = classify(sample.old, sample.new) else {
            trace!(?sample, "sample had no classifiable direction");
            return;
        };

        let event = VolumeEvent {
            direction,
            old_value: self.last_volume,
            new_value: sample.new,
            pressed_at: sample.ts_ms,
        };

        debug!(
            direction = %direction,
            old = event.old_value as f64,
            new = event.new_value as f64,
            "volume button press"
        );

        // Deliver before any restoration is scheduled: the consumer must
        // never be blocked or delayed by cosmetic volume repair.
        self.deliver(event);

        if self.swallow_changes {
            // Baseline deliberately not advanced: repeats converge on it
            self.schedule_restore();
        } else {
            self.last_volume = sample.new;
        }
    }

    fn deliver(&self, event: VolumeEvent) {
        if let Some(consumer) = &self.consumer {
            consumer(event);
        }
    }

    // =========================================================================
    // Restoration
    // =========================================================================

    /// Schedule a delayed restore of the baseline volume
    ///
    /// The delay lets the OS's own change notification finish propagating
    /// before it is reversed; a synchronous restore can race the OS's
    /// internal volume commit and fail silently on some platforms.
    fn schedule_restore(&mut self) {
        let epoch = self.restores.schedule();
        let delay = Duration::from_millis(self.config.restore_delay_ms);
        let cmd_tx = self.cmd_tx.clone();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = cmd_tx.send(BridgeCommand::FireRestore { epoch });
        });
    }

    fn handle_fire_restore(&mut self, epoch: u64) {
        if !self.restores.is_current(epoch) {
            trace!(epoch, "stale restore dropped");
            return;
        }

        // Target is read now, at fire time, never captured at schedule time
        self.write_volume_best_effort(self.last_volume);
    }

    /// Issue an asynchronous system-volume write, logging failures
    ///
    /// Write failures are cosmetic: never retried, never surfaced, never
    /// allowed to block event processing.
    fn write_volume_best_effort(&self, level: f32) {
        let backend = Arc::clone(&self.backend);
        tokio::spawn(async move {
            if let Err(e) = backend.write_volume(level).await {
                warn!(level = level as f64, error = %e, "volume write failed");
            }
        });
    }
}
