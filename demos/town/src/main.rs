//! town — runnable demo for the city traffic simulation core.
//!
//! Builds a street grid with zoned lots, runs a fixed number of frame-sized
//! ticks and prints a census of what the residents are doing.
//!
//! ```text
//! cargo run -p town --release               # default configuration
//! cargo run -p town --release -- town.json  # SimConfig overrides as JSON
//! RUST_LOG=ct_agent=debug cargo run -p town # trace state transitions
//! ```

mod layout;

use std::fs::File;
use std::io::BufReader;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use ct_agent::AgentState;
use ct_core::{AgentId, SimConfig, Tick, TileCoord};
use ct_grid::BuildingKind;
use ct_sim::{SimObserver, TickSummary, WorldBuilder};

// ── Constants ─────────────────────────────────────────────────────────────────

const SIM_TICKS:       u64 = 12_000;
const DT_MS:           f32 = 16.0; // one 60 Hz frame
const REPORT_INTERVAL: u64 = 1_000;

// ── Observer ──────────────────────────────────────────────────────────────────

/// Logs a progress line every `interval` ticks and keeps running totals.
struct Census {
    interval:     u64,
    spawned:      usize,
    removed:      usize,
    peak_driving: usize,
    resolved:     usize,
}

impl Census {
    fn new(interval: u64) -> Self {
        Self { interval, spawned: 0, removed: 0, peak_driving: 0, resolved: 0 }
    }
}

impl SimObserver for Census {
    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.peak_driving = self.peak_driving.max(summary.driving);
        self.resolved += summary.paths_resolved;
        if summary.tick.0 % self.interval == 0 {
            tracing::info!(
                tick    = %summary.tick,
                agents  = summary.agents,
                driving = summary.driving,
                output  = summary.output,
                "progress"
            );
        }
    }

    fn on_agent_spawned(&mut self, _agent: AgentId, _home: TileCoord) {
        self.spawned += 1;
    }

    fn on_agent_removed(&mut self, _agent: &ct_agent::Agent) {
        self.removed += 1;
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        tracing::info!(tick = %final_tick, "simulation finished");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn load_config() -> Result<SimConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(SimConfig::default());
    };
    let file = File::open(&path).with_context(|| format!("opening config {path}"))?;
    let config = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing config {path}"))?;
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config()?;
    println!("=== town: city traffic simulation ===");
    println!(
        "Grid: {}×{} tiles  |  Ticks: {SIM_TICKS} × {DT_MS} ms  |  Seed: {}",
        config.columns, config.rows, config.seed
    );
    println!();

    // 1. Lay out the town.
    let (columns, rows) = (config.columns, config.rows);
    let mut world = layout::town(WorldBuilder::new(config), columns, rows).build()?;
    println!("Initial residents: {}", world.agents().len());

    // 2. Run.
    let mut census = Census::new(REPORT_INTERVAL);
    let t0 = Instant::now();
    world.run_ticks(SIM_TICKS, DT_MS, &mut census)?;
    let elapsed = t0.elapsed();

    // 3. Summary.
    println!("Simulation complete in {:.3} s ({})", elapsed.as_secs_f64(), world.clock);
    println!("  residents spawned : {}", census.spawned);
    println!("  residents left    : {}", census.removed);
    println!("  paths resolved    : {}", census.resolved);
    println!("  peak vehicles     : {}", census.peak_driving);
    println!("  output metric     : {:.3}", world.output());
    println!(
        "  productive now    : {}",
        world.agents().iter().filter(|a| a.state.is_productive()).count()
    );
    println!();

    // 4. Residents by state.
    println!("{:<14} {:>8}", "State", "Agents");
    println!("{}", "-".repeat(23));
    for state in AgentState::ALL {
        let n = world.agents().iter().filter(|a| a.state == state).count();
        println!("{:<14} {:>8}", state.to_string(), n);
    }
    println!();

    // 5. Recent departures from one house.
    if let Some(house) = layout::first_of(&world, BuildingKind::Residential) {
        let tile = world.grid().tile(house)?;
        println!("Recent departures from {house}: {}", tile.recent_paths.len());
        for path in tile.recent_paths.iter() {
            if let (Some(from), Some(to)) = (path.first(), path.last()) {
                println!("  {from} → {to} ({} cells)", path.len());
            }
        }
    }

    Ok(())
}
