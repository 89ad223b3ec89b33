//! Tests for the bridge actor

use super::*;
use crate::backend::{RawSample, SimulatedBackend};
use crate::config::BridgeConfig;
use crate::event::{Direction, VolumeEvent};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Short restore delay so tests settle quickly
fn test_config() -> BridgeConfig {
    BridgeConfig {
        restore_delay_ms: 20,
        ..Default::default()
    }
}

fn spawn_bridge(config: BridgeConfig) -> (BridgeHandle, Arc<SimulatedBackend>) {
    let backend = Arc::new(SimulatedBackend::new(0.5));
    let bridge = BridgeActor::spawn(backend.clone(), config);
    (bridge, backend)
}

/// Register a consumer that forwards events into a channel
fn collect_events(bridge: &BridgeHandle) -> mpsc::UnboundedReceiver<VolumeEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    bridge.set_consumer(move |event| {
        let _ = tx.send(event);
    });
    rx
}

/// Wait for spawned writes and restore timers to land
async fn settle() {
    tokio::time::sleep(Duration::from_millis(80)).await;
}

#[tokio::test]
async fn test_start_is_idempotent() {
    let (bridge, backend) = spawn_bridge(test_config());

    bridge.start();
    bridge.start();
    assert!(bridge.is_listening().await);
    settle().await;

    // Exactly one subscription and one baseline write
    assert_eq!(backend.subscriber_count(), 1);
    assert_eq!(backend.writes(), vec![0.5]);
}

#[tokio::test]
async fn test_stop_when_idle_is_noop() {
    let (bridge, backend) = spawn_bridge(test_config());

    bridge.stop();
    assert!(!bridge.is_listening().await);
    settle().await;

    assert_eq!(backend.subscriber_count(), 0);
    assert!(backend.writes().is_empty());
}

#[tokio::test]
async fn test_stop_releases_subscription() {
    let (bridge, backend) = spawn_bridge(test_config());

    bridge.start();
    assert!(bridge.is_listening().await);

    bridge.stop();
    assert!(!bridge.is_listening().await);
    assert_eq!(backend.subscriber_count(), 0);
}

#[tokio::test]
async fn test_samples_dropped_while_idle() {
    let (bridge, _backend) = spawn_bridge(test_config());
    let mut events = collect_events(&bridge);

    bridge.on_sample(RawSample {
        old: 0.5,
        new: 0.65,
        ts_ms: 0,
    });
    settle().await;

    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_stop_prevents_future_events() {
    let (bridge, backend) = spawn_bridge(test_config());
    let mut events = collect_events(&bridge);

    bridge.start();
    assert!(bridge.is_listening().await);
    bridge.stop();
    assert!(!bridge.is_listening().await);

    backend.press(true, 0);
    settle().await;

    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_subscription_failure_stays_idle() {
    let (bridge, backend) = spawn_bridge(test_config());
    backend.set_fail_subscribe(true);

    bridge.start();
    assert!(!bridge.is_listening().await);
    settle().await;

    // No baseline write when observation could not start
    assert!(backend.writes().is_empty());

    // A later start succeeds once the session activates
    backend.set_fail_subscribe(false);
    bridge.start();
    assert!(bridge.is_listening().await);
}

#[tokio::test]
async fn test_press_emits_directional_event() {
    let (bridge, backend) = spawn_bridge(test_config());
    let mut events = collect_events(&bridge);

    bridge.start();
    assert!(bridge.is_listening().await);

    backend.emit_sample(0.5, 0.65, 0);
    let event = events.recv().await.unwrap();
    assert_eq!(event.direction, Direction::Up);
    assert_eq!(event.old_value, 0.5);
    assert_eq!(event.new_value, 0.65);
    assert_eq!(event.pressed_at, 0);
}

#[tokio::test]
async fn test_no_op_change_produces_no_event() {
    let (bridge, backend) = spawn_bridge(test_config());
    let mut events = collect_events(&bridge);

    bridge.start();
    assert!(bridge.is_listening().await);

    // Already at max: the OS reports an unchanged level
    backend.emit_sample(1.0, 1.0, 0);
    settle().await;

    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_debounce_collapses_rapid_presses() {
    let (bridge, backend) = spawn_bridge(test_config());
    let mut events = collect_events(&bridge);

    bridge.start();
    assert!(bridge.is_listening().await);

    backend.emit_sample(0.5, 0.5625, 1000);
    backend.emit_sample(0.5625, 0.625, 1050); // 50ms later: rejected
    backend.emit_sample(0.625, 0.6875, 1100); // exactly at threshold: accepted
    settle().await;

    let first = events.try_recv().unwrap();
    let second = events.try_recv().unwrap();
    assert!(events.try_recv().is_err());

    assert_eq!(first.pressed_at, 1000);
    assert_eq!(second.pressed_at, 1100);
}

#[tokio::test]
async fn test_non_swallow_commits_new_reading() {
    let (bridge, backend) = spawn_bridge(test_config());
    let mut events = collect_events(&bridge);

    bridge.start();
    assert!(bridge.is_listening().await);

    backend.emit_sample(0.5, 0.6, 0);
    let first = events.recv().await.unwrap();
    assert_eq!(first.old_value, 0.5);
    assert_eq!(first.new_value, 0.6);

    // The committed reading is the baseline for the next press
    backend.emit_sample(0.6, 0.7, 200);
    let second = events.recv().await.unwrap();
    assert_eq!(second.old_value, 0.6);
    assert_eq!(second.new_value, 0.7);

    assert_eq!(bridge.last_volume().await, Some(0.7));
}

#[tokio::test]
async fn test_swallow_keeps_baseline_and_restores() {
    let (bridge, backend) = spawn_bridge(test_config());
    let mut events = collect_events(&bridge);

    bridge.start();
    bridge.set_swallow_volume_changes(true);
    assert!(bridge.is_listening().await);

    // Three spaced presses; the baseline never advances
    backend.press(true, 0);
    backend.press(true, 150);
    backend.press(true, 300);

    for _ in 0..3 {
        let event = events.recv().await.unwrap();
        assert_eq!(event.direction, Direction::Up);
        assert_eq!(event.old_value, 0.5);
    }

    assert_eq!(bridge.last_volume().await, Some(0.5));
    settle().await;

    // The surviving restore snapped the live volume back
    assert_eq!(backend.volume(), 0.5);
    assert_eq!(backend.writes().last(), Some(&0.5));
}

#[tokio::test]
async fn test_set_volume_updates_baseline_while_idle() {
    let (bridge, backend) = spawn_bridge(test_config());

    bridge.set_volume(0.2);
    assert_eq!(bridge.last_volume().await, Some(0.2));
    settle().await;
    assert_eq!(backend.writes(), vec![0.2]);
}

#[tokio::test]
async fn test_set_volume_clamps_input() {
    let (bridge, _backend) = spawn_bridge(test_config());

    bridge.set_volume(1.8);
    assert_eq!(bridge.last_volume().await, Some(1.0));

    bridge.set_volume(-0.3);
    assert_eq!(bridge.last_volume().await, Some(0.0));

    bridge.set_volume(f32::NAN);
    assert_eq!(bridge.last_volume().await, Some(0.0));
}

#[tokio::test]
async fn test_set_volume_baseline_observed_by_next_press() {
    let (bridge, backend) = spawn_bridge(test_config());
    let mut events = collect_events(&bridge);

    bridge.start();
    assert!(bridge.is_listening().await);

    bridge.set_volume(0.2);
    assert_eq!(bridge.last_volume().await, Some(0.2));

    backend.emit_sample(0.2, 0.3, 500);
    let event = events.recv().await.unwrap();
    assert_eq!(event.old_value, 0.2);
}

#[tokio::test]
async fn test_set_volume_supersedes_pending_restore() {
    let (bridge, backend) = spawn_bridge(BridgeConfig {
        restore_delay_ms: 60,
        ..Default::default()
    });
    let mut events = collect_events(&bridge);

    bridge.start();
    bridge.set_swallow_volume_changes(true);
    assert!(bridge.is_listening().await);

    // Press schedules a restore to 0.5, but the explicit write lands first
    backend.press(true, 0);
    events.recv().await.unwrap();
    bridge.set_volume(0.9);

    tokio::time::sleep(Duration::from_millis(150)).await;

    // The stale restore was dropped; the explicit level stands
    assert_eq!(backend.volume(), 0.9);
    assert_eq!(bridge.last_volume().await, Some(0.9));
}

#[tokio::test]
async fn test_consumer_replacement() {
    let (bridge, backend) = spawn_bridge(test_config());

    let mut first = collect_events(&bridge);
    bridge.start();
    assert!(bridge.is_listening().await);

    backend.press(true, 0);
    assert!(first.recv().await.is_some());

    let mut second = collect_events(&bridge);
    // Round-trip so the replacement is processed before the next press
    assert!(bridge.is_listening().await);

    backend.press(true, 200);
    assert!(second.recv().await.is_some());
    settle().await;
    assert!(first.try_recv().is_err());
}

#[tokio::test]
async fn test_baseline_persists_across_stop_start_cycle() {
    let (bridge, backend) = spawn_bridge(test_config());

    bridge.set_swallow_volume_changes(true);
    bridge.start();
    assert!(bridge.is_listening().await);
    bridge.stop();

    // Swallow flag survives the cycle; baseline resets with the new start
    bridge.start();
    let status = bridge.status().await.unwrap();
    assert!(status.is_listening);
    assert!(status.swallow_changes);
    assert_eq!(status.last_volume, 0.5);
    settle().await;

    assert_eq!(backend.writes(), vec![0.5, 0.5]);
}

#[tokio::test]
async fn test_end_to_end_swallowed_session() {
    let (bridge, backend) = spawn_bridge(test_config());
    let mut events = collect_events(&bridge);

    bridge.start();
    bridge.set_swallow_volume_changes(true);
    assert!(bridge.is_listening().await);

    // Press up at t=0
    backend.emit_sample(0.5, 0.65, 0);
    let up = events.recv().await.unwrap();
    assert_eq!(up.direction, Direction::Up);
    assert_eq!(up.old_value, 0.5);
    assert_eq!(up.new_value, 0.65);
    assert_eq!(up.pressed_at, 0);

    // Drift back at t=40: debounced, no event, but still rolled back
    backend.emit_sample(0.65, 0.5, 40);

    // Press down at t=150
    backend.emit_sample(0.5, 0.35, 150);
    let down = events.recv().await.unwrap();
    assert_eq!(down.direction, Direction::Down);
    assert_eq!(down.old_value, 0.5);
    assert_eq!(down.new_value, 0.35);
    assert_eq!(down.pressed_at, 150);

    assert!(events.try_recv().is_err());
    settle().await;

    // Every restore converged on the unmoved baseline
    assert_eq!(bridge.last_volume().await, Some(0.5));
    assert_eq!(backend.volume(), 0.5);
}
