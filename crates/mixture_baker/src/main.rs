//! Gaussian splat level-of-detail baker.
//!
//! Reads one mixture level from JSON, reduces it `levels` times with
//! hierarchical EM and writes the resulting levels as a JSON array in the
//! same per-level format:
//!
//! - `xyz`: positions `[x, y, z]`
//! - `colors`: `[r, g, b]`
//! - `covariance`: upper triangle `[e00, e01, e02, e11, e12, e22]`
//! - `opacities`: scalars
//! - `features`: one equal-length vector per splat

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use hem_mixture::{HemMixture, MixtureLevel};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};

use config::Config;

/// Gaussian splat level-of-detail baker.
#[derive(Parser, Debug)]
#[command(name = "bake_mixture")]
#[command(about = "Bakes coarser Gaussian mixture levels from a JSON splat level")]
struct Args {
	/// Path to configuration TOML file.
	#[arg(short, long)]
	config: PathBuf,

	/// Input mixture level (JSON).
	#[arg(short, long)]
	input: PathBuf,

	/// Output path (default: `<input>.lod.json`).
	#[arg(short, long)]
	output: Option<PathBuf>,

	/// Override the seed from the config file.
	#[arg(long)]
	seed: Option<u64>,
}

fn main() -> Result<()> {
	tracing_subscriber::fmt::init();

	let args = Args::parse();

	let output = args
		.output
		.clone()
		.unwrap_or_else(|| args.input.with_extension("lod.json"));

	println!("Loading config from: {}", args.config.display());
	let config = Config::load(&args.config)?;

	println!("Loading mixture from: {}", args.input.display());
	let initial = load_level(&args.input)?;

	let seed = args.seed.or(config.seed);
	let rng = match seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_os_rng(),
	};

	println!(
		"Reducing {} splats over {} levels (factor {}, seed {})",
		initial.len(),
		config.levels,
		config.hem_reduction,
		seed.map_or_else(|| "random".to_string(), |s| s.to_string())
	);

	let mut mixture = HemMixture::new(&initial, config.hem_config(), rng)
		.context("Failed to initialize mixture")?;
	for stats in mixture.create_levels(config.levels) {
		println!("  ✓ {stats}");
	}

	let levels = mixture.result(config.selection());
	write_levels(&levels, &output).context("Writing mixture levels")?;

	println!(
		"\nDone! {} levels written to: {}",
		levels.len(),
		output.display()
	);

	Ok(())
}

fn load_level(path: &Path) -> Result<MixtureLevel> {
	let content = std::fs::read_to_string(path)
		.with_context(|| format!("Failed to read input: {}", path.display()))?;
	let level: MixtureLevel =
		serde_json::from_str(&content).with_context(|| "Failed to parse mixture JSON")?;
	if level.is_empty() {
		anyhow::bail!("Input mixture has no splats");
	}
	tracing::debug!(splats = level.len(), "loaded mixture level");
	Ok(level)
}

fn write_levels(levels: &[MixtureLevel], path: &Path) -> Result<()> {
	if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
		std::fs::create_dir_all(dir)
			.with_context(|| format!("Failed to create output dir: {}", dir.display()))?;
	}
	let json = serde_json::to_string(levels).context("Failed to serialize levels")?;
	std::fs::write(path, json).with_context(|| format!("Failed to write: {}", path.display()))?;
	Ok(())
}
