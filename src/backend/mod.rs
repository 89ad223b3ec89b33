//! Platform audio backends
//!
//! The bridge core is platform-agnostic; everything OS-specific lives behind
//! the [`VolumeBackend`] trait: a subscribe/unsubscribe primitive yielding
//! raw volume samples, and a best-effort system volume write. Real platform
//! shims (key events, audio-session KVO) implement this trait; the crate
//! ships [`simulated::SimulatedBackend`] for tests and the demo REPL.

use async_trait::async_trait;
use tokio::sync::mpsc;

pub mod simulated;

pub use simulated::SimulatedBackend;

/// Raw volume-change notification from the OS audio subsystem
///
/// Produced by an observer prior to debouncing and classification.
/// Levels are normalized to [0.0, 1.0]; `ts_ms` is stamped by the observer
/// at delivery time (epoch milliseconds).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSample {
    /// Volume level before the change
    pub old: f32,
    /// Volume level after the change
    pub new: f32,
    /// Delivery timestamp (epoch milliseconds)
    pub ts_ms: u64,
}

/// Opaque handle identifying an active observer subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Backend operation errors
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The platform audio session could not be activated for observation
    #[error("volume observer subscription failed: {0}")]
    SubscriptionFailed(String),

    /// The OS rejected a system volume write
    #[error("volume write failed: {0}")]
    WriteFailed(String),
}

/// Platform seam for volume observation and control
///
/// Note: All methods take &self (not &mut self) to support Arc<dyn VolumeBackend>.
/// Backends should use interior mutability for their own state.
///
/// Write semantics are best-effort and asynchronous: a returned error means
/// the write was rejected, but callers must treat any write as potentially
/// lost (the bridge logs failures and never retries or surfaces them).
#[async_trait]
pub trait VolumeBackend: Send + Sync {
    /// Get the backend name (e.g., "simulated", "avaudiosession", "audiomanager")
    fn name(&self) -> &str;

    /// Begin delivering raw volume samples into `tx`
    ///
    /// Returns a handle to pass to [`unsubscribe`](Self::unsubscribe).
    /// Samples must be delivered in observation order.
    async fn subscribe(
        &self,
        tx: mpsc::UnboundedSender<RawSample>,
    ) -> Result<SubscriptionId, BackendError>;

    /// Stop delivering samples for the given subscription
    ///
    /// Unknown or already-removed handles are ignored.
    async fn unsubscribe(&self, id: SubscriptionId);

    /// Set the system volume to `level` (already clamped to [0.0, 1.0])
    async fn write_volume(&self, level: f32) -> Result<(), BackendError>;
}
