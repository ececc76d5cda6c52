// skysim_sim/src/prelude.rs

// --- Scenario configuration ---
pub use crate::simulation::core::config::{
    load_scenario, CameraConfig, ScenarioConfig, SensorConfig,
};
pub use crate::simulation::core::prng::SimulationRng;
pub use crate::simulation::core::simulation_setup::build_sensor_manager;

// --- Sensors ---
pub use crate::simulation::sensors::camera::CameraSensor;
pub use crate::simulation::sensors::features::{FeatureSource, StaticFeatureSource};
pub use crate::simulation::sensors::manager::{SensorManager, SensorPacket};
pub use crate::simulation::sensors::{NullSensor, Sensor, SensorError, SensorReading};

// --- Re-export the pure core's nouns for convenience ---
pub use skysim_core::prelude::*;
