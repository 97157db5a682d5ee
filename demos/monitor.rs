//! Headless rig monitor
//!
//! Connects to a serial device, streams telemetry, and prints the
//! latest per-channel readings once a second. Useful for checking a
//! rig without the GUI.
//!
//! Usage: cargo run --example monitor -- /dev/ttyUSB0

use anyhow::{bail, Context, Result};
use pressure_rig::config::PUMP_PERIOD;
use pressure_rig::{list_ports, RigConfig, RigSession, CHANNEL_COUNT};
use std::time::{Duration, Instant};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let device = match std::env::args().nth(1) {
        Some(device) => device,
        None => {
            let ports = list_ports().context("failed to enumerate serial ports")?;
            if ports.is_empty() {
                bail!("no serial ports found; pass a device path explicitly");
            }
            eprintln!("available ports:");
            for port in &ports {
                eprintln!("  {}", port);
            }
            ports[0].clone()
        }
    };

    let mut session = RigSession::new(RigConfig::default());
    session
        .connect(&device)
        .with_context(|| format!("failed to open {}", device))?;
    println!("connected to {}", device);

    let mut last_print = Instant::now();
    let mut seen_events = session.events().len();
    loop {
        session.pump();

        // Echo event lines as they arrive
        let events: Vec<String> = session
            .events()
            .entries()
            .map(|e| e.display_line())
            .collect();
        for line in events.iter().skip(seen_events.min(events.len())) {
            println!("{}", line);
        }
        seen_events = events.len();

        if last_print.elapsed() >= Duration::from_secs(1) {
            let latest = session.latest_per_channel();
            let stats = session.stats();
            print!("P:");
            for i in 0..CHANNEL_COUNT {
                print!(" {:7.3}", latest[i]);
            }
            println!(
                "  (telemetry {}, events {}, dropped {})",
                stats.telemetry_lines, stats.event_lines, stats.dropped_lines
            );
            last_print = Instant::now();
        }

        std::thread::sleep(PUMP_PERIOD);
    }
}
