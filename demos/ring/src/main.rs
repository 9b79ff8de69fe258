//! ring — agents walking out of the safe zone into the storm.
//!
//! Agents start scattered inside the inner radius and walk straight out.
//! As they cross the band their stability drains; past the outer radius it
//! drains at the full rate and, once exhausted, hunger sets in.  A few
//! mobile hazards are spawned wherever the placement gate allows, and two
//! landmarks hold stability up along the way.
//!
//! Every walker carries one gear and uses it when stability falls below
//! `--gear-below`.  Odd-numbered walkers are newcomers starting at age 0;
//! the dead are revived at the reference point and set off again.
//!
//! ```text
//! cargo run -p ring -- --agents 32 --seconds 900 --output output/ring
//! RUST_LOG=sw_sim=debug cargo run -p ring
//! ```

use std::f64::consts::TAU;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sw_agent::{AgentRoster, AgentTraits};
use sw_core::{AgentId, HazardId, Position3D, SimRng};
use sw_field::{ConfigHandle, load_or_create, within_inner_radius};
use sw_output::{CsvWriter, SimOutputObserver};
use sw_sim::{LandmarkFloor, LandmarkSet, SimBuilder, StormRuntime};

// ── Constants ─────────────────────────────────────────────────────────────────

const WALK_SPEED:      f64 = 6.0; // units per second
const GROUND_LEVEL:    f64 = 64.0;
const LANDMARK_RADIUS: f64 = 40.0;
const SECONDS_PER_DAY: f64 = 1_200.0;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "ring")]
#[command(about = "Agents walking out of the safe zone into the storm")]
struct Cli {
    /// Config document; written with defaults if missing
    #[arg(long, default_value = "storm.json")]
    config: PathBuf,

    /// Number of agents
    #[arg(short, long, default_value = "16")]
    agents: u64,

    /// Simulated seconds to run
    #[arg(short, long, default_value = "600")]
    seconds: u64,

    /// Hazard spawn attempts
    #[arg(long, default_value = "12")]
    hazards: u32,

    /// Stability below which a walker uses its gear
    #[arg(long, default_value = "0.2")]
    gear_below: f64,

    /// Random seed
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Directory for the CSV output
    #[arg(short, long, default_value = "output/ring")]
    output: PathBuf,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

struct Walker {
    id:       AgentId,
    heading:  f64,
    has_gear: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // ── Config ────────────────────────────────────────────────────────────
    let loaded = load_or_create(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if loaded.created {
        info!(path = %cli.config.display(), "wrote default config");
    }
    let mut cfg = loaded.config;
    cfg.field.reference_point.get_or_insert(Position3D::new(0.0, GROUND_LEVEL, 0.0));
    let (config, _) = ConfigHandle::new(cfg);

    // ── World ─────────────────────────────────────────────────────────────
    let mut rng = SimRng::new(cli.seed);
    let mut roster = AgentRoster::new(cfg.hazard).with_saturation(cfg.saturation);
    let mut walkers = Vec::with_capacity(cli.agents as usize);
    for n in 0..cli.agents {
        let id = AgentId(n);
        let heading = rng.gen_range(0.0..TAU);
        let start = polar(heading, rng.gen_range(0.0..cfg.field.inner_radius.max(1.0)));
        if n % 2 == 1 {
            roster.join_new(id, start, within_inner_radius(start, &cfg.field));
        } else {
            roster.join(id, start);
            roster.set_traits(id, AgentTraits::with_age(rng.gen_range(0.0..60.0)))?;
        }
        walkers.push(Walker { id, heading, has_gear: true });
    }

    // ── Runtime ───────────────────────────────────────────────────────────
    let writer = CsvWriter::new(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    let sim = SimBuilder::new(config).build();
    let mut runtime = StormRuntime::new(sim, roster, SimOutputObserver::new(writer));

    let gate = runtime.placement_gate();
    let mut spawned = 0u32;
    for n in 0..cli.hazards {
        let at = polar(rng.gen_range(0.0..TAU), rng.gen_range(0.0..cfg.field.outer_radius * 1.5));
        if gate.allows(at) {
            runtime.world_mut().spawn_hazard(HazardId(n), at, rng.gen_range(0.5..2.0));
            spawned += 1;
        }
    }
    info!(attempted = cli.hazards, spawned, "hazards placed");

    let mut landmarks = LandmarkSet::new();
    let midway = (cfg.field.inner_radius + cfg.field.outer_radius) / 2.0;
    landmarks.insert(polar(0.0, midway), LANDMARK_RADIUS);
    landmarks.insert(polar(TAU / 2.0, cfg.field.outer_radius * 1.2), LANDMARK_RADIUS);
    runtime.register_override("landmarks", Arc::new(LandmarkFloor::new(landmarks)));

    let spawn = polar(0.0, 0.0);
    runtime.start()?;
    let (mut ticks, mut gears_used, mut revived) = (0, 0u32, 0u32);
    for _ in 0..cli.seconds {
        for w in &mut walkers {
            let Some(record) = runtime.world().get(w.id) else { continue };
            if !record.is_alive() {
                let sheltered = runtime.is_sheltered(spawn);
                runtime.world_mut().revive(w.id, spawn, sheltered)?;
                revived += 1;
                continue;
            }
            if w.has_gear && record.agent.stability.get() < cli.gear_below {
                let msg = runtime.use_gear(w.id)?;
                info!(agent = %w.id, "{msg}");
                w.has_gear = false;
                gears_used += 1;
            }
            let Some(record) = runtime.world().get(w.id) else { continue };
            let p = record.agent.position;
            let next = Position3D::new(
                p.x + w.heading.cos() * WALK_SPEED,
                p.y,
                p.z + w.heading.sin() * WALK_SPEED,
            );
            runtime.world_mut().move_agent(w.id, next)?;
        }
        runtime.world_mut().advance_age(1.0 / SECONDS_PER_DAY);
        ticks += runtime.advance(1.0);
    }
    runtime.shutdown();

    let (roster, mut observer) = runtime.into_parts();
    if let Some(e) = observer.take_error() {
        return Err(e).context("writing output");
    }

    // ── Summary ───────────────────────────────────────────────────────────
    let records = roster.records();
    let exhausted = records.iter().filter(|r| r.agent.stability.get() == 0.0).count();
    let mean = if records.is_empty() {
        0.0
    } else {
        records.iter().map(|r| r.agent.stability.get()).sum::<f64>() / records.len() as f64
    };
    let dead = records.iter().filter(|r| !r.is_alive()).count();
    info!(ticks, agents = records.len(), exhausted, dead, gears_used, revived, mean_stability = mean, "run complete");
    println!(
        "{ticks} ticks, {} agents: mean stability {:.1}%, {exhausted} exhausted, {dead} dead, \
         {gears_used} gears used, {revived} revived; output in {}",
        records.len(),
        mean * 100.0,
        cli.output.display(),
    );
    Ok(())
}

/// Ground-level position at `heading` radians and `distance` from the origin.
fn polar(heading: f64, distance: f64) -> Position3D {
    Position3D::new(heading.cos() * distance, GROUND_LEVEL, heading.sin() * distance)
}
