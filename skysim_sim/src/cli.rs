// skysim_sim/src/cli.rs

use clap::Parser;
use std::path::PathBuf;

/// Skysim: a quadrotor on-board sensor simulator.
///
/// This struct defines the command-line arguments shared by any binary
/// application that drives the sensor simulation library.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the scenario TOML file to run.
    #[arg(
        short,
        long,
        default_value = "skysim_sim/assets/scenarios/01_hover_fixed_features.toml"
    )]
    pub scenario: PathBuf,

    /// Override the scenario's PRNG seed for a reproducible run.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the scenario's duration in seconds.
    #[arg(long)]
    pub duration: Option<f64>,
}
