// skysim_sim/src/simulation/sensors/mod.rs

use std::fmt::Debug;
use thiserror::Error;

use skysim_core::errors::GeometryError;
use skysim_core::types::{PixelMeasurement, VehicleState};

pub mod camera;
pub mod features;
pub mod manager;

// =========================================================================
// == Errors ==
// =========================================================================

/// Errors raised while configuring, registering, or reading sensors.
#[derive(Debug, Error)]
pub enum SensorError {
    #[error("sensor name '{0}' is already registered with this manager")]
    DuplicateName(String),

    #[error("camera rate must be positive, got {0} fps")]
    InvalidRate(f64),

    #[error("pixel noise standard deviation must be non-negative, got {0}")]
    InvalidNoise(f64),

    #[error("simulation step duration must be positive, got {0}")]
    InvalidStepDuration(f64),

    #[error("simulation duration must be non-negative, got {0}")]
    InvalidDuration(f64),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// A feature source failed. Never swallowed: a misconfigured
    /// simulation should fail visibly, not run seed-corrupted.
    #[error("feature source '{source_name}' failed: {message}")]
    FeatureSource {
        source_name: String,
        message: String,
    },

    #[error("failed to load scenario: {0}")]
    Config(#[from] Box<figment::Error>),
}

// =========================================================================
// == Readings ==
// =========================================================================

/// What a single sensor produced on one simulation step.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SensorReading {
    /// No new data this tick. Distinct from a stale cached measurement.
    #[default]
    Empty,
    /// Pixel-plane measurements, one per imaged feature point, in
    /// feature-source registration order.
    Pixels(Vec<PixelMeasurement>),
}

impl SensorReading {
    pub fn is_empty(&self) -> bool {
        matches!(self, SensorReading::Empty)
    }

    /// The pixel measurements, if this reading carries any.
    pub fn as_pixels(&self) -> Option<&[PixelMeasurement]> {
        match self {
            SensorReading::Pixels(pixels) => Some(pixels),
            SensorReading::Empty => None,
        }
    }
}

// =========================================================================
// == The Sensor Contract ==
// =========================================================================

/// The minimal polymorphic surface all on-board sensors share.
///
/// `read` must be deterministic given identical inputs and internal state,
/// except where noise is configured; noise is reproducible under a fixed
/// seed. Implementations may keep internal state for rate-gating and
/// caching, but nothing else.
pub trait Sensor: Debug + Send + Sync {
    /// Stable, human-readable name, used as the packet key.
    fn name(&self) -> &str;

    /// Produces this sensor's reading for one simulation step.
    ///
    /// The default is the neutral, empty reading; real sensors override.
    fn read(
        &mut self,
        vehicle: &VehicleState,
        step_index: u64,
        step_duration: f64,
    ) -> Result<SensorReading, SensorError> {
        let _ = (vehicle, step_index, step_duration);
        Ok(SensorReading::Empty)
    }
}

/// A named placeholder for sensor kinds that are not modeled yet
/// (accelerometer, gyro, GPS). It occupies a packet slot and always
/// reads empty, via the contract's default `read`.
#[derive(Debug, Clone)]
pub struct NullSensor {
    name: String,
}

impl NullSensor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Sensor for NullSensor {
    fn name(&self) -> &str {
        &self.name
    }
}
