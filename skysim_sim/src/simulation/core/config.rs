// skysim_sim/src/simulation/core/config.rs

use figment::{
    providers::{Format, Toml},
    Figment,
};
use nalgebra::{Rotation3, Vector3};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

use skysim_core::models::camera::{CameraExtrinsics, ProjectionPolicy};
use skysim_core::types::VehicleState;

use crate::simulation::sensors::SensorError;
use crate::simulation::utils::serde_helpers;

// =========================================================================
// == Top-Level Scenario Configuration ==
// =========================================================================

/// # ScenarioConfig
/// The root of the data parsed from a `scenario.toml` file: one vehicle,
/// a set of world landmarks, and the sensor suite mounted on the vehicle.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct ScenarioConfig {
    #[serde(default)] // Use defaults if the [simulation] section is missing
    pub simulation: Simulation,

    #[serde(default)]
    pub world: WorldConfig,

    #[serde(default)]
    pub vehicle: VehicleConfig,

    // The TOML has `[[sensors]]`, which becomes a Vec of SensorConfig.
    #[serde(default)]
    pub sensors: Vec<SensorConfig>,
}

impl ScenarioConfig {
    /// Rejects values that would poison the step loop before it starts.
    pub fn validate(&self) -> Result<(), SensorError> {
        if self.simulation.step_duration <= 0.0 {
            return Err(SensorError::InvalidStepDuration(
                self.simulation.step_duration,
            ));
        }
        if self.simulation.duration_seconds < 0.0 {
            return Err(SensorError::InvalidDuration(
                self.simulation.duration_seconds,
            ));
        }
        Ok(())
    }
}

/// Loads and validates a scenario file from disk.
pub fn load_scenario(path: &Path) -> Result<ScenarioConfig, SensorError> {
    info!(path = %path.display(), "Loading scenario");
    let config: ScenarioConfig = Figment::new()
        .merge(Toml::file(path))
        .extract()
        .map_err(|e| SensorError::Config(Box::new(e)))?;
    config.validate()?;
    Ok(config)
}

// =========================================================================
// == Configuration Sub-Structs ==
// These map directly to the sections of a scenario.toml file.
// =========================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Simulation {
    /// Optional seed for the pseudo-random number generator for determinism.
    pub seed: Option<u64>,
    /// Duration of the simulation in seconds.
    #[serde(default = "default_duration_seconds")]
    pub duration_seconds: f64,
    /// The fixed time step `Ts` the simulator advances by, in seconds.
    #[serde(default = "default_step_duration")]
    pub step_duration: f64,
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            seed: None,
            duration_seconds: default_duration_seconds(),
            step_duration: default_step_duration(),
        }
    }
}

fn default_duration_seconds() -> f64 {
    10.0
}

fn default_step_duration() -> f64 {
    0.01
}

/// Static world content: landmark points every camera is asked to image.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct WorldConfig {
    /// Inertial-frame `[x, y, z]` positions, meters.
    #[serde(default)]
    pub landmarks: Vec<[f64; 3]>,
}

impl WorldConfig {
    pub fn landmark_points(&self) -> Vec<Vector3<f64>> {
        self.landmarks
            .iter()
            .map(|p| Vector3::new(p[0], p[1], p[2]))
            .collect()
    }
}

/// Where the vehicle sits for the duration of a (hovering) run.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct VehicleConfig {
    #[serde(with = "serde_helpers::vec3_f64_from_f32_array", default)]
    pub starting_position: Vector3<f64>,

    /// `(roll, pitch, yaw)` in degrees.
    #[serde(with = "serde_helpers::vec3_f64_from_f32_array", default)]
    pub starting_attitude_deg: Vector3<f64>,
}

impl VehicleConfig {
    pub fn to_state(&self) -> VehicleState {
        VehicleState::new(
            self.starting_position,
            self.starting_attitude_deg.map(f64::to_radians),
        )
    }
}

// =========================================================================
// == Helper Structs for Nested Configuration ==
// =========================================================================

#[derive(Deserialize, Debug, Clone, Copy, Default)]
pub struct Pose {
    #[serde(with = "serde_helpers::vec3_f64_from_f32_array", default)]
    pub translation: Vector3<f64>,

    #[serde(with = "serde_helpers::rotation3_f64_from_euler_deg_f32", default)]
    pub rotation: Rotation3<f64>,
}

impl Pose {
    pub fn to_extrinsics(&self) -> CameraExtrinsics {
        CameraExtrinsics::new(self.rotation, self.translation)
    }
}

// =========================================================================
// == Sensors ==
// =========================================================================

// This enum can represent ANY sensor that might appear in the config list.
// The `tag = "kind"` tells Serde to look for a `kind = "..."` field in the
// TOML to decide which variant to parse.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
#[serde(rename_all = "PascalCase")] // "Camera" in TOML maps to Camera variant
pub enum SensorConfig {
    Camera(CameraConfig),
    /// A named placeholder slot for sensor kinds that are not modeled yet
    /// (accelerometer, gyro, GPS). Always reads empty.
    Null(NullSensorConfig),
}

impl SensorConfig {
    // Helper to get the string identifier for logging.
    pub fn get_kind_str(&self) -> &str {
        match self {
            SensorConfig::Camera(_) => "Camera",
            SensorConfig::Null(_) => "Null",
        }
    }

    pub fn get_name(&self) -> &str {
        match self {
            SensorConfig::Camera(c) => &c.name,
            SensorConfig::Null(c) => &c.name,
        }
    }
}

/// Configuration parameters for a simulated pinhole camera.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraConfig {
    /// A unique name for this sensor instance (e.g., "nav_camera").
    pub name: String,

    /// The camera's own sampling rate in frames per second, decoupled
    /// from the simulation step rate.
    #[serde(default = "default_camera_rate")]
    pub rate: f64,

    /// Image size as `[width, height]` in pixels.
    #[serde(default = "default_camera_resolution")]
    pub resolution: [u32; 2],

    /// Horizontal field of view in degrees; together with the width this
    /// fixes the focal length.
    #[serde(default = "default_camera_hfov_deg")]
    pub hfov_deg: f64,

    /// Standard deviation of the zero-mean Gaussian noise added
    /// independently to each pixel coordinate, in pixels.
    #[serde(default)]
    pub pixel_noise_stddev: f64,

    /// The static body-to-camera transform.
    #[serde(default)]
    pub transform: Pose,

    /// What to do with points behind the camera or outside the frame.
    #[serde(default)]
    pub projection_policy: ProjectionPolicy,
}

fn default_camera_rate() -> f64 {
    30.0
}

fn default_camera_resolution() -> [u32; 2] {
    [800, 600]
}

fn default_camera_hfov_deg() -> f64 {
    34.0
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NullSensorConfig {
    pub name: String,
}
