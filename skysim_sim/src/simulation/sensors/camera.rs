// skysim_sim/src/simulation/sensors/camera.rs

use nalgebra::{Rotation3, Vector3};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use std::fmt;
use tracing::debug;

use skysim_core::models::camera::{CameraExtrinsics, CameraModel};
use skysim_core::types::{InertialPoint, Resolution, VehicleState};

use crate::simulation::core::config::CameraConfig;
use crate::simulation::sensors::features::FeatureSource;
use crate::simulation::sensors::{Sensor, SensorError, SensorReading};

// =========================================================================
// == Camera Sensor ==
// =========================================================================

/// A pinhole camera running at its own frame rate, decoupled from the
/// simulation step rate.
///
/// Each `read` gathers inertial points from the registered feature
/// sources, and only on ticks where the rate gate opens does it project
/// them and refresh the cached measurement; between camera frames the
/// cache is returned unchanged. Optional zero-mean Gaussian pixel noise
/// is drawn from the sensor's own seeded generator.
pub struct CameraSensor {
    name: String,
    frames_per_second: f64,
    model: CameraModel,
    noise: Option<Normal<f64>>,
    rng: ChaCha8Rng,
    sources: Vec<Box<dyn FeatureSource>>,
    /// Advances on every `read`, gated or not, so the modulo rate gate
    /// stays correctly phased.
    tick: u64,
    cache: Option<SensorReading>,
}

impl fmt::Debug for CameraSensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CameraSensor")
            .field("name", &self.name)
            .field("frames_per_second", &self.frames_per_second)
            .field("model", &self.model)
            .field("sources", &self.sources.len())
            .field("tick", &self.tick)
            .finish()
    }
}

impl CameraSensor {
    /// Builds a camera from its scenario configuration and a dedicated
    /// child generator for its noise stream. Malformed configuration
    /// fails here, not at read time.
    pub fn from_config(config: &CameraConfig, rng: ChaCha8Rng) -> Result<Self, SensorError> {
        if config.rate <= 0.0 {
            return Err(SensorError::InvalidRate(config.rate));
        }
        if config.pixel_noise_stddev < 0.0 {
            return Err(SensorError::InvalidNoise(config.pixel_noise_stddev));
        }

        let mut model = CameraModel::new(
            Resolution::new(config.resolution[0], config.resolution[1]),
            config.hfov_deg,
            config.projection_policy,
        )?;
        model.set_extrinsics(config.transform.to_extrinsics());

        let noise = if config.pixel_noise_stddev > 0.0 {
            Some(
                Normal::new(0.0, config.pixel_noise_stddev)
                    .map_err(|_| SensorError::InvalidNoise(config.pixel_noise_stddev))?,
            )
        } else {
            None
        };

        debug!(
            camera = %config.name,
            rate = config.rate,
            focal_length = model.intrinsics().focal_length(),
            "Built camera sensor"
        );

        Ok(Self {
            name: config.name.clone(),
            frames_per_second: config.rate,
            model,
            noise,
            rng,
            sources: Vec::new(),
            tick: 0,
            cache: None,
        })
    }

    /// Registers a source whose points this camera will image. Sources
    /// are polled in registration order and their points concatenated in
    /// that order. Registration is append-only.
    pub fn register_feature(&mut self, source: Box<dyn FeatureSource>) {
        self.sources.push(source);
    }

    /// Builder-style sugar over `register_feature` for an initial source.
    pub fn with_feature_source(mut self, source: Box<dyn FeatureSource>) -> Self {
        self.register_feature(source);
        self
    }

    /// Replaces the body-to-camera extrinsics. Each omitted parameter
    /// independently resets to zero translation / identity rotation.
    /// Affects only subsequent projections.
    pub fn set_transformation(
        &mut self,
        translation: Option<Vector3<f64>>,
        rotation: Option<Rotation3<f64>>,
    ) {
        self.model.set_extrinsics(CameraExtrinsics::new(
            rotation.unwrap_or_else(Rotation3::identity),
            translation.unwrap_or_else(Vector3::zeros),
        ));
    }

    pub fn model(&self) -> &CameraModel {
        &self.model
    }

    /// Simulator steps per camera frame: the rounded ratio between the
    /// camera's frame interval and the step duration. A camera cannot
    /// sample faster than the simulator steps, so a rounded ratio below
    /// one clamps to one instead of making the modulo divisor zero.
    fn steps_per_frame(&self, step_duration: f64) -> u64 {
        let ratio = 1.0 / (self.frames_per_second * step_duration);
        (ratio.round() as u64).max(1)
    }

    /// Polls every feature source and concatenates their points in
    /// registration order. `None` means no source produced anything.
    fn gather_features(
        &mut self,
        step_index: u64,
        step_duration: f64,
    ) -> Result<Option<Vec<InertialPoint>>, SensorError> {
        let mut points: Vec<InertialPoint> = Vec::new();
        let mut any_produced = false;
        for source in &mut self.sources {
            if let Some(mut batch) = source.tick(true, step_index, step_duration)? {
                any_produced = true;
                points.append(&mut batch);
            }
        }
        Ok(any_produced.then_some(points))
    }
}

impl Sensor for CameraSensor {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(
        &mut self,
        vehicle: &VehicleState,
        step_index: u64,
        step_duration: f64,
    ) -> Result<SensorReading, SensorError> {
        // 1. Gather the combined feature set for this tick.
        let Some(points) = self.gather_features(step_index, step_duration)? else {
            // No new data available at all this call. This is distinct
            // from "camera frame not due yet": the stale cache must not
            // leak out, but the gate must stay phased.
            self.tick += 1;
            return Ok(SensorReading::Empty);
        };

        // 2/3. Recompute the projection and refresh the cache only when
        // the rate gate opens; between frames the cache is returned
        // unchanged even though fresh feature data arrived.
        if self.tick % self.steps_per_frame(step_duration) == 0 {
            let mut pixels = self.model.project(vehicle, &points)?;
            if let Some(noise) = self.noise {
                for pixel in &mut pixels {
                    pixel.x += noise.sample(&mut self.rng);
                    pixel.y += noise.sample(&mut self.rng);
                }
            }
            self.cache = Some(SensorReading::Pixels(pixels));
        }

        // 4. The counter advances unconditionally.
        self.tick += 1;

        // 5. Return the current cache (post-update on gated ticks).
        Ok(self.cache.clone().unwrap_or_default())
    }
}
