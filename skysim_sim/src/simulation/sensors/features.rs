// skysim_sim/src/simulation/sensors/features.rs

use skysim_core::types::InertialPoint;

use crate::simulation::sensors::SensorError;

/// Supplies inertial-frame 3D points to be imaged each tick, decoupling
/// "what exists to be sensed" from the camera's projection logic.
///
/// `capture` is always true when invoked by the camera today; it is
/// reserved for future shutter gating. Returning `Ok(None)` contributes
/// nothing this tick. Errors propagate to the simulation loop.
pub trait FeatureSource: Send + Sync {
    fn tick(
        &mut self,
        capture: bool,
        step_index: u64,
        step_duration: f64,
    ) -> Result<Option<Vec<InertialPoint>>, SensorError>;
}

// Plain closures are the lightest way to inject features from a script
// or test.
impl<F> FeatureSource for F
where
    F: FnMut(bool, u64, f64) -> Option<Vec<InertialPoint>> + Send + Sync,
{
    fn tick(
        &mut self,
        capture: bool,
        step_index: u64,
        step_duration: f64,
    ) -> Result<Option<Vec<InertialPoint>>, SensorError> {
        Ok(self(capture, step_index, step_duration))
    }
}

/// Emits the same fixed landmark set on every capture tick.
#[derive(Debug, Clone)]
pub struct StaticFeatureSource {
    points: Vec<InertialPoint>,
}

impl StaticFeatureSource {
    pub fn new(points: Vec<InertialPoint>) -> Self {
        Self { points }
    }
}

impl FeatureSource for StaticFeatureSource {
    fn tick(
        &mut self,
        _capture: bool,
        _step_index: u64,
        _step_duration: f64,
    ) -> Result<Option<Vec<InertialPoint>>, SensorError> {
        if self.points.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.points.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn closures_are_feature_sources() {
        let mut source = |_capture: bool, step_index: u64, _dt: f64| {
            if step_index % 2 == 0 {
                Some(vec![Vector3::new(step_index as f64, 0.0, 5.0)])
            } else {
                None
            }
        };
        assert_eq!(
            source.tick(true, 0, 0.01).unwrap(),
            Some(vec![Vector3::new(0.0, 0.0, 5.0)])
        );
        assert_eq!(source.tick(true, 1, 0.01).unwrap(), None);
    }

    #[test]
    fn static_source_repeats_its_landmarks() {
        let points = vec![Vector3::new(0.0, 0.0, 5.0), Vector3::new(1.0, 1.0, 5.0)];
        let mut source = StaticFeatureSource::new(points.clone());
        assert_eq!(source.tick(true, 0, 0.01).unwrap(), Some(points.clone()));
        assert_eq!(source.tick(true, 99, 0.01).unwrap(), Some(points));
    }

    #[test]
    fn empty_static_source_contributes_nothing() {
        let mut source = StaticFeatureSource::new(Vec::new());
        assert_eq!(source.tick(true, 0, 0.01).unwrap(), None);
    }
}
