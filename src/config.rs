//! Configuration management for the volume bridge
//!
//! Handles loading and parsing of YAML configuration files. All fields are
//! optional; the defaults match the behavior of the original hardware
//! volume-button modules (100 ms debounce, 50 ms restore delay, mid-scale
//! baseline).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

use crate::bridge::debounce::MIN_EVENT_INTERVAL_MS;
use crate::bridge::restore::RESTORE_DELAY_MS;

/// Bridge configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BridgeConfig {
    /// Minimum interval between accepted presses (milliseconds)
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Delay before a swallowed press is reversed (milliseconds)
    #[serde(default = "default_restore_delay_ms")]
    pub restore_delay_ms: u64,
    /// Baseline volume established on start, mid-scale so both directions
    /// stay detectable
    #[serde(default = "default_baseline_volume")]
    pub baseline_volume: f32,
    /// Whether presses are audibly reversed after delivery
    #[serde(default)]
    pub swallow_changes: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            restore_delay_ms: default_restore_delay_ms(),
            baseline_volume: default_baseline_volume(),
            swallow_changes: false,
        }
    }
}

impl BridgeConfig {
    /// Clamp out-of-range values instead of rejecting them
    ///
    /// Mirrors the volume-write policy: bad levels are clamped, never an
    /// error.
    pub fn sanitized(mut self) -> Self {
        if !self.baseline_volume.is_finite() {
            self.baseline_volume = default_baseline_volume();
        }
        self.baseline_volume = self.baseline_volume.clamp(0.0, 1.0);
        self
    }
}

fn default_debounce_ms() -> u64 {
    MIN_EVENT_INTERVAL_MS
}

fn default_restore_delay_ms() -> u64 {
    RESTORE_DELAY_MS
}

fn default_baseline_volume() -> f32 {
    0.5
}

/// Load configuration from a YAML file
pub async fn load_config(path: impl AsRef<Path>) -> Result<BridgeConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: BridgeConfig = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config.sanitized())
}
