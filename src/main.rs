//! Headless host runner.
//!
//! Drives a `SilBridge` at a fixed step interval with a vehicle sitting level
//! and motionless on the ground. Useful for checking that an autopilot
//! connects and streams actuator frames without a full simulation host.
//!
//! Usage: `sil-bridge [config.toml]`

use anyhow::Context;
use env_logger::Builder;
use log::{LevelFilter, error, info};
use sil_bridge::bridge::OUTPUT_PORT_WIDTH;
use sil_bridge::{Config, HostBlock, HostConfig, SilBridge};
use std::env;
use std::path::Path;
use std::thread;
use std::time::Instant;

/// Standard gravity (m/s²).
const GRAVITY: f64 = 9.80665;

fn main() -> anyhow::Result<()> {
    // Logging setup
    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter(Some("sil_bridge"), LevelFilter::Debug)
        .parse_default_env()
        .init();

    let config = match env::args().nth(1) {
        Some(path) => Config::load(Path::new(&path))?,
        None => Config::default(),
    };

    info!("Starting up");

    let mut bridge = SilBridge::new(config.bridge.clone());
    bridge.start().context("Failed to start bridge")?;

    let result = run(&mut bridge, &config.host);
    if let Err(e) = &result {
        error!("{:#}", e);
    }
    bridge.terminate()?;
    result
}

fn run(bridge: &mut SilBridge, host: &HostConfig) -> anyhow::Result<()> {
    let interval = host.step_interval();
    let dt = interval.as_secs_f64();

    // At rest and level, the accelerometer reads -g along body z (NED).
    let gyro = [0.0; 3];
    let accel = [0.0, 0.0, -GRAVITY];
    let position = [0.0; 3];
    let attitude = [0.0; 3];
    let velocity = [0.0; 3];

    let mut outputs = [0.0; OUTPUT_PORT_WIDTH];
    let mut step: u64 = 0;
    let mut next_tick = Instant::now();

    while host.max_steps == 0 || step < host.max_steps {
        let time = [step as f64 * dt];
        bridge
            .step(&[&time, &gyro, &accel, &position, &attitude, &velocity], &mut outputs)
            .with_context(|| format!("Step {} failed", step))?;
        step += 1;

        if host.summary_interval_steps != 0 && step % host.summary_interval_steps == 0 {
            if let Some(stats) = bridge.stats() {
                info!(
                    "t={:.3}s steps={} frames={} sent={} peer={} outputs={:?}",
                    time[0],
                    stats.steps,
                    stats.frames_received,
                    stats.packets_sent,
                    stats.last_peer.map_or_else(|| "-".to_string(), |p| p.to_string()),
                    &outputs[..8]
                );
            }
        }

        // Fixed-rate pacing; if a step overran, restart the schedule from now.
        next_tick += interval;
        let now = Instant::now();
        if next_tick > now {
            thread::sleep(next_tick - now);
        } else {
            next_tick = now;
        }
    }

    info!("Reached {} steps, stopping", step);
    Ok(())
}
