// skysim_core/src/frames.rs

use nalgebra::{Rotation3, Vector3};

use crate::types::VehicleState;

// --- Frame conventions ---
// Inertial: fixed world frame, the source of truth for positions.
// Body: attached to the vehicle at its origin, rotated by (roll, pitch, yaw).
// Camera: attached to the camera, offset from the body by the extrinsics.

/// Builds the rotation that takes body-frame coordinates into the
/// inertial frame, from intrinsic Z-Y-X Euler angles.
pub fn rotation_body_to_inertial(attitude: &Vector3<f64>) -> Rotation3<f64> {
    // nalgebra's convention: R = Rz(yaw) * Ry(pitch) * Rx(roll).
    Rotation3::from_euler_angles(attitude.x, attitude.y, attitude.z)
}

/// Builds the rotation that takes inertial-frame coordinates into the
/// body frame (the inverse of `rotation_body_to_inertial`).
pub fn rotation_inertial_to_body(attitude: &Vector3<f64>) -> Rotation3<f64> {
    rotation_body_to_inertial(attitude).inverse()
}

/// Expresses an inertial-frame point in the vehicle's body frame:
/// translate to a vehicle-relative position, then rotate.
pub fn inertial_point_to_body(vehicle: &VehicleState, point: &Vector3<f64>) -> Vector3<f64> {
    rotation_inertial_to_body(&vehicle.attitude) * (point - vehicle.position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn zero_attitude_is_identity() {
        let vehicle = VehicleState::at_rest();
        let p = Vector3::new(1.0, -2.0, 3.0);
        let body = inertial_point_to_body(&vehicle, &p);
        assert_abs_diff_eq!(body, p, epsilon = 1e-12);
    }

    #[test]
    fn translation_is_applied_before_rotation() {
        let vehicle = VehicleState::new(Vector3::new(1.0, 2.0, 3.0), Vector3::zeros());
        let p = Vector3::new(1.0, 2.0, 8.0);
        let body = inertial_point_to_body(&vehicle, &p);
        assert_abs_diff_eq!(body, Vector3::new(0.0, 0.0, 5.0), epsilon = 1e-12);
    }

    #[test]
    fn yaw_rotates_about_inertial_z() {
        // Yaw of +90 deg: the body x-axis points along inertial +y, so a
        // point on inertial +y sits on the body's +x axis.
        let vehicle = VehicleState::new(Vector3::zeros(), Vector3::new(0.0, 0.0, FRAC_PI_2));
        let body = inertial_point_to_body(&vehicle, &Vector3::new(0.0, 4.0, 0.0));
        assert_abs_diff_eq!(body, Vector3::new(4.0, 0.0, 0.0), epsilon = 1e-12);
    }
}
