//! Simulated volume backend - in-memory stand-in for platform audio shims
//!
//! This is useful for:
//! - Exercising the bridge without real hardware buttons
//! - Driving the demo REPL
//! - Deterministic integration tests (injected timestamps, recorded writes)

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, trace};

use super::{BackendError, RawSample, SubscriptionId, VolumeBackend};

const PRESS_STEP: f32 = 0.0625; // one hardware volume notch (1/16 scale)

struct Inner {
    /// Live system volume as the OS would report it
    volume: f32,
    /// Every volume level written through the backend, in order
    writes: Vec<f32>,
    /// Active sample subscribers
    subscribers: Vec<(SubscriptionId, mpsc::UnboundedSender<RawSample>)>,
    /// Next subscription handle
    next_id: u64,
    /// When true, subscribe() fails (simulates an inactive audio session)
    fail_subscribe: bool,
    /// When true, write_volume() fails (simulates an OS write rejection)
    fail_writes: bool,
}

/// In-memory [`VolumeBackend`] with injectable samples and recorded writes
pub struct SimulatedBackend {
    inner: Mutex<Inner>,
}

impl SimulatedBackend {
    /// Create a backend with live volume at `initial`
    pub fn new(initial: f32) -> Self {
        Self {
            inner: Mutex::new(Inner {
                volume: initial.clamp(0.0, 1.0),
                writes: Vec::new(),
                subscribers: Vec::new(),
                next_id: 1,
                fail_subscribe: false,
                fail_writes: false,
            }),
        }
    }

    /// Current live volume level
    pub fn volume(&self) -> f32 {
        self.inner.lock().volume
    }

    /// All levels written through `write_volume`, in call order
    pub fn writes(&self) -> Vec<f32> {
        self.inner.lock().writes.clone()
    }

    /// Number of active subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().subscribers.len()
    }

    /// Make subsequent `subscribe` calls fail
    pub fn set_fail_subscribe(&self, fail: bool) {
        self.inner.lock().fail_subscribe = fail;
    }

    /// Make subsequent `write_volume` calls fail
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.lock().fail_writes = fail;
    }

    /// Inject a raw sample as-is, without touching the live volume
    pub fn emit_sample(&self, old: f32, new: f32, ts_ms: u64) {
        let mut inner = self.inner.lock();
        inner.volume = new.clamp(0.0, 1.0);
        Self::fan_out(&mut inner, RawSample { old, new, ts_ms });
    }

    /// Simulate one hardware button press at time `ts_ms`
    ///
    /// Moves the live volume by one notch (up or down), clamped to scale,
    /// and notifies subscribers with the resulting (old, new) pair. Returns
    /// the new live volume.
    pub fn press(&self, up: bool, ts_ms: u64) -> f32 {
        let mut inner = self.inner.lock();
        let old = inner.volume;
        let new = if up {
            (old + PRESS_STEP).min(1.0)
        } else {
            (old - PRESS_STEP).max(0.0)
        };
        inner.volume = new;
        Self::fan_out(&mut inner, RawSample { old, new, ts_ms });
        new
    }

    fn fan_out(inner: &mut Inner, sample: RawSample) {
        trace!(
            old = sample.old as f64,
            new = sample.new as f64,
            ts = sample.ts_ms,
            "simulated sample"
        );
        inner
            .subscribers
            .retain(|(_, tx)| tx.send(sample).is_ok());
    }
}

#[async_trait]
impl VolumeBackend for SimulatedBackend {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn subscribe(
        &self,
        tx: mpsc::UnboundedSender<RawSample>,
    ) -> Result<SubscriptionId, BackendError> {
        let mut inner = self.inner.lock();
        if inner.fail_subscribe {
            return Err(BackendError::SubscriptionFailed(
                "simulated audio session inactive".to_string(),
            ));
        }
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.subscribers.push((id, tx));
        debug!(?id, "simulated backend subscribed");
        Ok(id)
    }

    async fn unsubscribe(&self, id: SubscriptionId) {
        let mut inner = self.inner.lock();
        inner.subscribers.retain(|(sub_id, _)| *sub_id != id);
        debug!(?id, "simulated backend unsubscribed");
    }

    async fn write_volume(&self, level: f32) -> Result<(), BackendError> {
        let mut inner = self.inner.lock();
        if inner.fail_writes {
            return Err(BackendError::WriteFailed(
                "simulated OS rejected the write".to_string(),
            ));
        }
        let clamped = level.clamp(0.0, 1.0);
        inner.volume = clamped;
        inner.writes.push(clamped);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribe_and_press() {
        let backend = SimulatedBackend::new(0.5);
        let (tx, mut rx) = mpsc::unbounded_channel();

        let id = backend.subscribe(tx).await.unwrap();
        assert_eq!(backend.subscriber_count(), 1);

        backend.press(true, 100);
        let sample = rx.recv().await.unwrap();
        assert_eq!(sample.old, 0.5);
        assert!(sample.new > 0.5);
        assert_eq!(sample.ts_ms, 100);

        backend.unsubscribe(id).await;
        assert_eq!(backend.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_press_clamps_at_scale_edges() {
        let backend = SimulatedBackend::new(1.0);
        assert_eq!(backend.press(true, 0), 1.0);

        let backend = SimulatedBackend::new(0.0);
        assert_eq!(backend.press(false, 0), 0.0);
    }

    #[tokio::test]
    async fn test_writes_recorded_and_applied() {
        let backend = SimulatedBackend::new(0.5);
        backend.write_volume(0.8).await.unwrap();
        backend.write_volume(1.5).await.unwrap(); // clamped

        assert_eq!(backend.writes(), vec![0.8, 1.0]);
        assert_eq!(backend.volume(), 1.0);
    }

    #[tokio::test]
    async fn test_failure_toggles() {
        let backend = SimulatedBackend::new(0.5);

        backend.set_fail_subscribe(true);
        let (tx, _rx) = mpsc::unbounded_channel();
        assert!(backend.subscribe(tx).await.is_err());

        backend.set_fail_writes(true);
        assert!(backend.write_volume(0.3).await.is_err());
        assert!(backend.writes().is_empty());
    }
}
