// skysim_sim/src/simulation/core/simulation_setup.rs

use tracing::info;

use crate::simulation::core::config::{ScenarioConfig, SensorConfig};
use crate::simulation::core::prng::SimulationRng;
use crate::simulation::sensors::camera::CameraSensor;
use crate::simulation::sensors::features::StaticFeatureSource;
use crate::simulation::sensors::manager::SensorManager;
use crate::simulation::sensors::{NullSensor, SensorError};

/// Turns a parsed scenario into a registered `SensorManager`.
///
/// Every camera gets its own child generator derived from the master RNG,
/// and a `StaticFeatureSource` over the world's landmarks when the
/// scenario declares any. Duplicate sensor names fail registration.
pub fn build_sensor_manager(
    config: &ScenarioConfig,
    rng: &mut SimulationRng,
) -> Result<SensorManager, SensorError> {
    let landmarks = config.world.landmark_points();
    let mut manager = SensorManager::new();

    for sensor_config in &config.sensors {
        info!(
            kind = sensor_config.get_kind_str(),
            name = sensor_config.get_name(),
            "Spawning sensor"
        );
        match sensor_config {
            SensorConfig::Camera(camera_config) => {
                let mut camera = CameraSensor::from_config(camera_config, rng.derive_child())?;
                if !landmarks.is_empty() {
                    camera.register_feature(Box::new(StaticFeatureSource::new(landmarks.clone())));
                }
                manager.register(Box::new(camera))?;
            }
            SensorConfig::Null(null_config) => {
                manager.register(Box::new(NullSensor::new(null_config.name.clone())))?;
            }
        }
    }

    Ok(manager)
}
