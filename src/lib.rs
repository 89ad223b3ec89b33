//! volume-bridge - hardware volume-button detection
//!
//! Neither mobile OS exposes a "volume button pressed" signal, only the
//! resulting volume-level change. This crate observes those changes through
//! a platform backend, debounces and classifies them into directional
//! events, and can optionally "swallow" a press by restoring the previous
//! volume after the consumer has been notified.
//!
//! ```no_run
//! use std::sync::Arc;
//! use volume_bridge::backend::SimulatedBackend;
//! use volume_bridge::bridge::BridgeActor;
//! use volume_bridge::config::BridgeConfig;
//!
//! # #[tokio::main] async fn main() {
//! let backend = Arc::new(SimulatedBackend::new(0.5));
//! let bridge = BridgeActor::spawn(backend, BridgeConfig::default());
//!
//! bridge.set_consumer(|event| println!("{} press at {}", event.direction, event.pressed_at));
//! bridge.set_swallow_volume_changes(true);
//! bridge.start();
//! # }
//! ```

pub mod backend;
pub mod bridge;
pub mod config;
pub mod event;

pub use backend::{BackendError, RawSample, SubscriptionId, VolumeBackend};
pub use bridge::{BridgeActor, BridgeHandle, BridgeStatus};
pub use config::BridgeConfig;
pub use event::{Direction, VolumeEvent, EVENT_NAME};
