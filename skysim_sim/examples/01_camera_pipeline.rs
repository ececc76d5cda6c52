//! Hover demo: a quadrotor parked over a small landmark field, with a
//! rate-gated camera and a couple of stub sensors assembled into one
//! packet per simulation step.
//!
//! Run with:
//!   cargo run --example 01_camera_pipeline -- \
//!     --scenario skysim_sim/assets/scenarios/01_hover_fixed_features.toml

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use skysim_sim::cli::Cli;
use skysim_sim::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let mut config = load_scenario(&cli.scenario)?;
    if let Some(seed) = cli.seed {
        config.simulation.seed = Some(seed);
    }
    if let Some(duration) = cli.duration {
        config.simulation.duration_seconds = duration;
    }
    config.validate()?;

    let mut rng = SimulationRng::from_scenario_seed(config.simulation.seed);
    let mut manager = build_sensor_manager(&config, &mut rng)?;

    let step_duration = config.simulation.step_duration;
    let steps = (config.simulation.duration_seconds / step_duration).round() as u64;
    let vehicle = config.vehicle.to_state();

    info!(
        sensors = manager.len(),
        steps,
        step_duration,
        "Starting hover run"
    );

    for step in 0..steps {
        let packet = manager.get_data_packet(&vehicle, step, step_duration)?;

        // Print one packet per simulated second.
        if step % ((1.0 / step_duration).round() as u64).max(1) == 0 {
            for (name, reading) in packet.iter() {
                match reading {
                    SensorReading::Pixels(pixels) => {
                        info!(step, sensor = name, features = pixels.len(), first = ?pixels.first(), "reading");
                    }
                    SensorReading::Empty => {
                        info!(step, sensor = name, "no data");
                    }
                }
            }
        }
    }

    info!("Hover run complete");
    Ok(())
}
