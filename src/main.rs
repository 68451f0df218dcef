/*
 * Boid Backdrop
 *
 * Opens a window with a flock of boids that fade in on start, steer by
 * separation, alignment and cohesion, and fade out again on stop.
 *
 * Parameters come from an optional TOML file, individual values can be
 * overridden on the command line, and RUST_LOG controls log verbosity.
 */

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use boid_backdrop::app;
use boid_backdrop::SimulationParams;

#[derive(Debug, Parser)]
#[command(name = "boid-backdrop", version, about = "Flocking backdrop with staggered fades")]
struct Cli {
    /// TOML file overriding any subset of the simulation parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Number of boids
    #[arg(long)]
    boids: Option<usize>,

    /// Emit particle trails behind each boid
    #[arg(long)]
    particles: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut params = match &cli.config {
        Some(path) => SimulationParams::load(path)
            .with_context(|| format!("loading parameters from {}", path.display()))?,
        None => SimulationParams::default(),
    };

    if let Some(seed) = cli.seed {
        params.seed = Some(seed);
    }
    if let Some(boids) = cli.boids {
        params.num_boids = boids;
    }
    if cli.particles {
        params.emit_particles = true;
    }
    params.validate().context("invalid parameters")?;

    info!(
        boids = params.num_boids,
        particles = params.emit_particles,
        seed = ?params.seed,
        "launching backdrop"
    );
    app::launch(params);
    Ok(())
}
