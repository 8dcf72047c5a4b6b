//! ttc — batch time-to-collision trials on the two-lane road.
//!
//! Every trial puts one pedestrian on a kerb beside the crosswalk and one
//! East-bound car upstream of it, at distances drawn from clamped normal
//! distributions, runs the episode with a `MetricCollector` attached, and
//! appends one TTC row per recorded sample.  All rows land in a single
//! `TTC.csv`, written once at the end.
//!
//! ```text
//! cargo run --release -p ttc -- --trials 500 --steps 2 --seed 7 --out results/
//! RUST_LOG=debug cargo run -p ttc -- --config trials.json
//! ```

mod trial;


use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use log::info;

use gt_core::{AgentId, Direction, SimRng};
use gt_output::{CsvWriter, MetricCollector, SampleWriter, episode_samples};
use gt_sim::{EnvBuilder, scenario};

use trial::TrialConfig;

// ── Constants ─────────────────────────────────────────────────────────────────

const PED_ID:         AgentId = AgentId(0);
const VEH_ID:         AgentId = AgentId(1);
const PROGRESS_EVERY: u32     = 50;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "ttc", about = "Pedestrian/vehicle time-to-collision trials exported to TTC.csv")]
struct Cli {
    /// Number of trials (overrides the config file).
    #[arg(long)]
    trials: Option<u32>,

    /// Steps per trial (overrides the config file).
    #[arg(long)]
    steps: Option<u64>,

    /// Master seed (overrides the config file).
    #[arg(long)]
    seed: Option<u64>,

    /// Directory that receives TTC.csv.
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// JSON trial configuration; missing fields take the defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn trial_config(&self) -> Result<TrialConfig> {
        let mut cfg = match &self.config {
            Some(path) => TrialConfig::load(path)?,
            None => TrialConfig::default(),
        };
        if let Some(trials) = self.trials {
            cfg.trials = trials;
        }
        if let Some(steps) = self.steps {
            cfg.sim.max_steps = steps;
        }
        if let Some(seed) = self.seed {
            cfg.sim.seed = seed;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let cfg = cli.trial_config()?;
    println!("=== ttc — time-to-collision trials ===");
    println!("Trials: {}  |  Steps: {}  |  Seed: {}", cfg.trials, cfg.sim.max_steps, cfg.sim.seed);

    let sampler = cfg.sampler()?;
    let mut rng = SimRng::new(cfg.sim.seed);
    let mut env = EnvBuilder::new(cfg.sim.clone(), scenario::two_lane_road()?).build()?;
    let mut collector = MetricCollector::new();
    let mut rows = Vec::new();
    let started = Instant::now();

    for trial in 0..cfg.trials {
        let mut trial_rng = rng.child(u64::from(trial));
        let placement = sampler.sample(&mut trial_rng);
        let (ped, car) = placement.agents(&cfg, PED_ID, VEH_ID, env.lanes())?;
        env.add_ped_agent(ped)?;
        env.add_vehicle_agent(car)?;

        env.reset_with(&mut collector);
        env.run(&mut collector)?;
        rows.extend(episode_samples(&collector, PED_ID, VEH_ID, placement.vehicle_speed, Direction::East));

        env.remove_ped_agent(PED_ID)?;
        env.remove_vehicle_agent(VEH_ID)?;
        if trial % PROGRESS_EVERY == 0 {
            info!("completed trial {}", trial + 1);
        }
    }

    fs::create_dir_all(&cli.out)?;
    let mut writer = CsvWriter::new(&cli.out)?;
    writer.write_samples(&rows)?;
    writer.finish()?;

    println!(
        "{} rows from {} trials in {:.2?} → {}",
        rows.len(),
        cfg.trials,
        started.elapsed(),
        cli.out.join(gt_output::csv::CSV_FILE).display(),
    );
    Ok(())
}
