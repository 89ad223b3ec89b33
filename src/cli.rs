//! Command-line interface and REPL
//!
//! Drives the simulated backend interactively: `up`/`down` inject presses,
//! `swallow` toggles the restore policy, `status` inspects bridge state.

use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use rustyline::DefaultEditor;
use std::sync::Arc;

use volume_bridge::backend::SimulatedBackend;
use volume_bridge::bridge::BridgeHandle;
use volume_bridge::event::{Direction, VolumeEvent};

/// Console consumer: pretty-print one event per accepted press
pub fn print_event(event: VolumeEvent) {
    let arrow = match event.direction {
        Direction::Up => "▲ up".green(),
        Direction::Down => "▼ down".red(),
    };
    println!(
        "{} {}  {:.3} → {:.3}  at {}",
        "press".bold(),
        arrow,
        event.old_value,
        event.new_value,
        event.pressed_at
    );
}

fn now_ms() -> u64 {
    Utc::now().timestamp_millis() as u64
}

pub async fn run_repl(bridge: BridgeHandle, backend: Arc<SimulatedBackend>) -> Result<()> {
    println!(
        "{}",
        "Commands: up, down, start, stop, swallow on|off, set <0..1>, status, quit".dimmed()
    );

    let mut rl = DefaultEditor::new()?;

    loop {
        let readline = rl.readline("volume> ");
        let line = match readline {
            Ok(line) => line,
            Err(_) => break,
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(line);

        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("quit"), _) | (Some("exit"), _) => break,
            (Some("up"), _) => {
                let level = backend.press(true, now_ms());
                println!("simulated volume: {:.3}", level);
            }
            (Some("down"), _) => {
                let level = backend.press(false, now_ms());
                println!("simulated volume: {:.3}", level);
            }
            (Some("start"), _) => bridge.start(),
            (Some("stop"), _) => bridge.stop(),
            (Some("swallow"), Some("on")) => bridge.set_swallow_volume_changes(true),
            (Some("swallow"), Some("off")) => bridge.set_swallow_volume_changes(false),
            (Some("set"), Some(level)) => match level.parse::<f32>() {
                Ok(level) => bridge.set_volume(level),
                Err(_) => println!("{}", "usage: set <0..1>".yellow()),
            },
            (Some("status"), _) => {
                if let Some(status) = bridge.status().await {
                    println!(
                        "listening: {}  swallow: {}  baseline: {:.3}  live: {:.3}",
                        status.is_listening,
                        status.swallow_changes,
                        status.last_volume,
                        backend.volume()
                    );
                }
            }
            _ => println!("{}", format!("unknown command: {line}").yellow()),
        }
    }

    Ok(())
}
