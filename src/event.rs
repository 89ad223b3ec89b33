//! Volume button event types
//!
//! Defines the normalized event record emitted once per accepted press, and
//! the wire payload delivered to consumers under the `HardwareVolumeButton`
//! event name.

use serde::{Deserialize, Serialize};

/// Event name used when delivering payloads to host-environment consumers
pub const EVENT_NAME: &str = "HardwareVolumeButton";

/// Direction of a volume button press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Volume increased
    Up,
    /// Volume decreased
    Down,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Normalized volume button event, emitted at most once per accepted sample
///
/// `old_value`/`new_value` are normalized system volume levels in [0.0, 1.0].
/// `pressed_at` is milliseconds since the Unix epoch, captured when the
/// sample was accepted by the debounce gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeEvent {
    /// Press direction (never "none"; unclassifiable samples are dropped)
    pub direction: Direction,
    /// Baseline volume before the press
    pub old_value: f32,
    /// Volume reported by the OS after the press
    pub new_value: f32,
    /// Acceptance timestamp (epoch milliseconds)
    pub pressed_at: u64,
}
