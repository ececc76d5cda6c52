// skysim_core/src/types.rs

use nalgebra::{Vector2, Vector3};

// --- Core Type Aliases ---

/// A 3D point expressed in the inertial (world) frame.
pub type InertialPoint = Vector3<f64>;

/// A projected 2D measurement in pixel units `(u, v)`.
pub type PixelMeasurement = Vector2<f64>;

/// Image dimensions in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

// --- Vehicle Ground Truth ---

/// The slice of vehicle ground truth that sensors are allowed to see:
/// inertial position plus the attitude needed to build the
/// inertial-to-body rotation. Everything else about the vehicle
/// (velocities, rotor states, ...) stays with the dynamics model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleState {
    /// Position of the body origin in the inertial frame, meters.
    pub position: Vector3<f64>,
    /// Attitude as `(roll, pitch, yaw)` in radians, body relative to
    /// inertial, intrinsic Z-Y-X (yaw, then pitch, then roll).
    pub attitude: Vector3<f64>,
}

impl VehicleState {
    pub fn new(position: Vector3<f64>, attitude: Vector3<f64>) -> Self {
        Self { position, attitude }
    }

    /// A vehicle parked at the inertial origin with zero attitude.
    pub fn at_rest() -> Self {
        Self {
            position: Vector3::zeros(),
            attitude: Vector3::zeros(),
        }
    }
}

impl Default for VehicleState {
    fn default() -> Self {
        Self::at_rest()
    }
}
