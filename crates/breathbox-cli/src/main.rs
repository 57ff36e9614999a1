//! Terminal session driver.
//!
//! Plays the external-scheduler role: sleeps, feeds wall-clock timestamps to
//! the state machine, and diffs consecutive snapshots to announce phase
//! changes and the per-second countdown.

use std::io::Write;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use breathbox_core::{builtin_patterns, get_pattern, SessionConfig, SessionMachine};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "breathbox", about = "Guided breathing sessions in the terminal")]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a guided session
    Run {
        /// Builtin pattern id (see `breathbox patterns`)
        #[arg(long, default_value = "box", conflicts_with = "config")]
        pattern: String,
        /// TOML file with explicit phase durations
        #[arg(long)]
        config: Option<PathBuf>,
        /// Session length in minutes
        #[arg(long, default_value_t = 5.0)]
        minutes: f32,
        /// Tick interval in milliseconds
        #[arg(long, default_value_t = 100)]
        tick_ms: u64,
    },
    /// List builtin patterns
    Patterns {},
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Run {
            pattern,
            config,
            minutes,
            tick_ms,
        } => {
            let session_config = match config {
                Some(path) => SessionConfig::from_file_with_env(path)?,
                None => {
                    let p = get_pattern(&pattern)
                        .ok_or_else(|| format!("unknown pattern '{}'", pattern))?;
                    p.timings.to_session_config(minutes * 60.0)
                }
            };
            run_session(session_config, tick_ms)?;
        }
        Commands::Patterns {} => {
            let mut patterns: Vec<_> = builtin_patterns().into_values().collect();
            patterns.sort_by(|a, b| a.id.cmp(&b.id));
            for p in patterns {
                println!(
                    "{:<10} {:<12} {}-{}-{}-{}  ({:.1} breaths/min)  {}",
                    p.id,
                    p.label,
                    p.timings.inhale,
                    p.timings.hold_in,
                    p.timings.exhale,
                    p.timings.hold_out,
                    p.breaths_per_minute(),
                    p.description
                );
            }
        }
    }
    Ok(())
}

fn run_session(config: SessionConfig, tick_ms: u64) -> Result<(), Box<dyn std::error::Error>> {
    let mut machine = SessionMachine::new(config)?;
    log::info!(
        "session: {}-{}-{}-{} over {} s, {} ms ticks",
        config.inhale_sec,
        config.hold_in_sec,
        config.exhale_sec,
        config.hold_out_sec,
        config.total_session_sec,
        tick_ms
    );

    let origin = Instant::now();
    machine.start(0);
    let mut prev = machine.snapshot();
    announce_phase(&prev, &config);

    loop {
        thread::sleep(Duration::from_millis(tick_ms));
        let now_us = origin.elapsed().as_micros() as i64;
        let res = machine.update(now_us);

        if let Some(finished) = res.completed {
            println!();
            println!(
                "Session complete: {} full cycles, well done.",
                finished.cycles_completed
            );
            return Ok(());
        }

        let snap = machine.snapshot();
        if snap.phase != prev.phase {
            log::debug!("phase change {:?} -> {:?} at {} us", prev.phase, snap.phase, now_us);
            println!();
            announce_phase(&snap, &config);
        } else {
            // per-second countdown tick, same diffing app-side cue the
            // snapshot contract expects from collaborators
            let prev_count = prev.phase_remaining_sec.ceil() as i64;
            let count = snap.phase_remaining_sec.ceil() as i64;
            if count != prev_count && count > 0 {
                print!(" {}", count);
                std::io::stdout().flush()?;
            }
        }
        prev = snap;
    }
}

fn announce_phase(snap: &breathbox_core::SessionSnapshot, config: &SessionConfig) {
    let remaining = snap.session_remaining_sec.round() as i64;
    print!(
        "{:<7} [{:>2}:{:02} left] {}",
        snap.phase.label(),
        remaining / 60,
        remaining % 60,
        config.phase_duration(snap.phase).ceil() as i64
    );
    let _ = std::io::stdout().flush();
}
