//! Configuration parsing for mixture baking.

use anyhow::{Context, Result};
use hem_mixture::{HemConfig, LevelSelection, Likelihood};
use serde::Deserialize;
use std::path::Path;

/// Root configuration for a bake.
#[derive(Debug, Deserialize)]
pub struct Config {
	/// Number of reduction steps. Zero only makes sense with `keep_initial`.
	pub levels: usize,
	/// Expected input/output size ratio per step.
	#[serde(default = "default_hem_reduction")]
	pub hem_reduction: f32,
	/// KL divergence gate, in standard deviations.
	#[serde(default = "default_delta")]
	pub distance_delta: f32,
	/// Color distance gate.
	#[serde(default = "default_delta")]
	pub color_delta: f32,
	/// Seed for the parent draws (OS entropy when absent).
	pub seed: Option<u64>,
	/// Also write the unreduced input level.
	#[serde(default)]
	pub keep_initial: bool,
	#[serde(default)]
	pub likelihood: Likelihood,
}

fn default_hem_reduction() -> f32 {
	3.0
}

fn default_delta() -> f32 {
	2.5
}

impl Config {
	/// Load configuration from a TOML file.
	pub fn load(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read config file: {}", path.display()))?;
		Self::parse(&content)
	}

	/// Parse and validate configuration TOML.
	pub fn parse(content: &str) -> Result<Self> {
		let config: Config = toml::from_str(content).with_context(|| "Failed to parse config TOML")?;

		if config.levels == 0 && !config.keep_initial {
			anyhow::bail!("levels = 0 without keep_initial would write no levels");
		}
		config
			.hem_config()
			.validate()
			.context("Invalid reduction parameters")?;

		Ok(config)
	}

	pub fn hem_config(&self) -> HemConfig {
		HemConfig::default()
			.with_hem_reduction_factor(self.hem_reduction)
			.with_distance_delta(self.distance_delta)
			.with_color_delta(self.color_delta)
			.with_likelihood(self.likelihood)
	}

	pub fn selection(&self) -> LevelSelection {
		LevelSelection::keep_initial(self.keep_initial)
	}
}
