// skysim_core/src/models/camera.rs

use nalgebra::{Matrix3, Rotation3, Vector3};
use serde::Deserialize;

use crate::errors::GeometryError;
use crate::frames;
use crate::types::{InertialPoint, PixelMeasurement, Resolution, VehicleState};

// =========================================================================
// == Intrinsics ==
// =========================================================================

/// Pinhole intrinsics: focal length (in pixels) and principal point.
/// Derived once from `(resolution, horizontal field of view)` at
/// construction and never mutated afterward, so the fields stay private.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraIntrinsics {
    focal_length: f64,
    cx: f64,
    cy: f64,
}

impl CameraIntrinsics {
    /// Derives the intrinsics from the image size and the horizontal
    /// field of view: `f = (width / 2) / tan(hfov / 2)`, principal point
    /// at the image center.
    pub fn from_fov(resolution: Resolution, hfov_deg: f64) -> Result<Self, GeometryError> {
        if resolution.width == 0 || resolution.height == 0 {
            return Err(GeometryError::InvalidResolution {
                width: resolution.width,
                height: resolution.height,
            });
        }
        if hfov_deg <= 0.0 || hfov_deg >= 180.0 {
            return Err(GeometryError::InvalidFieldOfView(hfov_deg));
        }

        let half_width = f64::from(resolution.width) / 2.0;
        let focal_length = half_width / (hfov_deg.to_radians() / 2.0).tan();
        if !focal_length.is_finite() || focal_length <= 0.0 {
            return Err(GeometryError::InvalidFocalLength(focal_length));
        }

        Ok(Self {
            focal_length,
            cx: half_width,
            cy: f64::from(resolution.height) / 2.0,
        })
    }

    pub fn focal_length(&self) -> f64 {
        self.focal_length
    }

    /// Principal point `(cx, cy)` in pixels.
    pub fn principal_point(&self) -> (f64, f64) {
        (self.cx, self.cy)
    }

    /// The 3x3 calibration matrix `K`.
    pub fn matrix(&self) -> Matrix3<f64> {
        Matrix3::new(
            self.focal_length,
            0.0,
            self.cx,
            0.0,
            self.focal_length,
            self.cy,
            0.0,
            0.0,
            1.0,
        )
    }
}

// =========================================================================
// == Extrinsics ==
// =========================================================================

/// The body-to-camera transform: `p_cam = R * p_body + t`.
///
/// Precondition (not enforced at runtime): `rotation` must stay
/// orthonormal for the projection math to be meaningful. `Rotation3`
/// preserves this for every constructor short of raw matrix access.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraExtrinsics {
    pub rotation: Rotation3<f64>,
    pub translation: Vector3<f64>,
}

impl CameraExtrinsics {
    pub fn new(rotation: Rotation3<f64>, translation: Vector3<f64>) -> Self {
        Self {
            rotation,
            translation,
        }
    }
}

impl Default for CameraExtrinsics {
    /// Identity rotation, zero translation: camera frame == body frame.
    fn default() -> Self {
        Self {
            rotation: Rotation3::identity(),
            translation: Vector3::zeros(),
        }
    }
}

// =========================================================================
// == Projection Policy ==
// =========================================================================

/// What to do with points that fall behind the camera or outside the
/// pixel plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ProjectionPolicy {
    /// Project every point. Non-positive depth is a hard error rather
    /// than a silent NaN.
    #[default]
    KeepAll,
    /// Drop points with non-positive camera-frame depth; the output may
    /// then be shorter than the input.
    DropBehindCamera,
    /// Drop points behind the camera and clamp the rest onto the pixel
    /// plane bounds `[0, width-1] x [0, height-1]`.
    ClipToFrame,
}

// =========================================================================
// == Camera Model ==
// =========================================================================

/// The full geometric camera: intrinsics, body-to-camera extrinsics, and
/// the projection pipeline from inertial points to pixel measurements.
/// Pure and deterministic; noise injection lives with the runtime sensor.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraModel {
    intrinsics: CameraIntrinsics,
    extrinsics: CameraExtrinsics,
    resolution: Resolution,
    policy: ProjectionPolicy,
}

impl CameraModel {
    pub fn new(
        resolution: Resolution,
        hfov_deg: f64,
        policy: ProjectionPolicy,
    ) -> Result<Self, GeometryError> {
        Ok(Self {
            intrinsics: CameraIntrinsics::from_fov(resolution, hfov_deg)?,
            extrinsics: CameraExtrinsics::default(),
            resolution,
            policy,
        })
    }

    pub fn intrinsics(&self) -> &CameraIntrinsics {
        &self.intrinsics
    }

    pub fn extrinsics(&self) -> &CameraExtrinsics {
        &self.extrinsics
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Replaces the body-to-camera transform. Affects only subsequent
    /// projections.
    pub fn set_extrinsics(&mut self, extrinsics: CameraExtrinsics) {
        self.extrinsics = extrinsics;
    }

    /// Projects a set of inertial-frame points into pixel coordinates.
    ///
    /// Per point: translate to a vehicle-relative position, rotate into
    /// the body frame, apply the body-to-camera extrinsics, multiply by
    /// the calibration matrix, and perform the perspective divide by the
    /// camera-frame depth. Output order follows input order (minus any
    /// points the policy drops).
    pub fn project(
        &self,
        vehicle: &VehicleState,
        points: &[InertialPoint],
    ) -> Result<Vec<PixelMeasurement>, GeometryError> {
        let k = self.intrinsics.matrix();
        let mut pixels = Vec::with_capacity(points.len());

        for (index, point) in points.iter().enumerate() {
            let body = frames::inertial_point_to_body(vehicle, point);
            let cam = self.extrinsics.rotation * body + self.extrinsics.translation;

            let depth = cam.z;
            if depth <= 0.0 {
                match self.policy {
                    ProjectionPolicy::KeepAll => {
                        return Err(GeometryError::NonPositiveDepth { index, depth });
                    }
                    ProjectionPolicy::DropBehindCamera | ProjectionPolicy::ClipToFrame => continue,
                }
            }

            // Homogeneous pixel coordinates, then the perspective divide.
            let h = k * cam;
            let mut u = h.x / h.z;
            let mut v = h.y / h.z;

            if self.policy == ProjectionPolicy::ClipToFrame {
                u = u.clamp(0.0, f64::from(self.resolution.width - 1));
                v = v.clamp(0.0, f64::from(self.resolution.height - 1));
            }

            pixels.push(PixelMeasurement::new(u, v));
        }

        Ok(pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::Vector3;
    use std::f64::consts::FRAC_PI_2;

    fn default_model() -> CameraModel {
        CameraModel::new(Resolution::default(), 34.0, ProjectionPolicy::KeepAll).unwrap()
    }

    #[test]
    fn principal_point_is_half_resolution() {
        let intr = CameraIntrinsics::from_fov(Resolution::new(800, 600), 34.0).unwrap();
        assert_eq!(intr.principal_point(), (400.0, 300.0));

        let intr = CameraIntrinsics::from_fov(Resolution::new(1280, 720), 60.0).unwrap();
        assert_eq!(intr.principal_point(), (640.0, 360.0));
    }

    #[test]
    fn focal_length_from_fov() {
        let intr = CameraIntrinsics::from_fov(Resolution::new(800, 600), 33.99).unwrap();
        let expected = 400.0 / (33.99f64.to_radians() / 2.0).tan();
        assert_abs_diff_eq!(intr.focal_length(), expected, epsilon = 1e-12);
        assert!(intr.focal_length() > 0.0);
    }

    #[test]
    fn malformed_intrinsics_fail_fast() {
        assert!(matches!(
            CameraIntrinsics::from_fov(Resolution::new(0, 600), 34.0),
            Err(GeometryError::InvalidResolution { .. })
        ));
        assert!(matches!(
            CameraIntrinsics::from_fov(Resolution::new(800, 600), 0.0),
            Err(GeometryError::InvalidFieldOfView(_))
        ));
        assert!(matches!(
            CameraIntrinsics::from_fov(Resolution::new(800, 600), 180.0),
            Err(GeometryError::InvalidFieldOfView(_))
        ));
        assert!(matches!(
            CameraIntrinsics::from_fov(Resolution::new(800, 600), -15.0),
            Err(GeometryError::InvalidFieldOfView(_))
        ));
    }

    #[test]
    fn on_axis_point_projects_to_principal_point() {
        let model = default_model();
        let vehicle = VehicleState::at_rest();
        let pixels = model
            .project(&vehicle, &[Vector3::new(0.0, 0.0, 5.0)])
            .unwrap();
        assert_eq!(pixels.len(), 1);
        assert_abs_diff_eq!(pixels[0].x, 400.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pixels[0].y, 300.0, epsilon = 1e-12);
    }

    #[test]
    fn off_axis_point_matches_pinhole_formula() {
        // End-to-end check against (f*x/z + cx, f*y/z + cy).
        let model = CameraModel::new(Resolution::new(800, 600), 33.99, ProjectionPolicy::KeepAll)
            .unwrap();
        let f = 400.0 / (33.99f64.to_radians() / 2.0).tan();
        let (x, y, z) = (0.5, -0.25, 4.0);

        let pixels = model
            .project(&VehicleState::at_rest(), &[Vector3::new(x, y, z)])
            .unwrap();
        assert_abs_diff_eq!(pixels[0].x, f * x / z + 400.0, epsilon = 1e-6);
        assert_abs_diff_eq!(pixels[0].y, f * y / z + 300.0, epsilon = 1e-6);
    }

    #[test]
    fn vehicle_pose_is_compensated() {
        // Translation only: the point sits 5 m ahead of the displaced vehicle.
        let model = default_model();
        let vehicle = VehicleState::new(Vector3::new(1.0, 2.0, 3.0), Vector3::zeros());
        let pixels = model
            .project(&vehicle, &[Vector3::new(1.0, 2.0, 8.0)])
            .unwrap();
        assert_abs_diff_eq!(pixels[0].x, 400.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pixels[0].y, 300.0, epsilon = 1e-9);

        // Pitch of +90 deg swings the body z-axis onto inertial +x, so a
        // point on inertial +x is on the optical axis.
        let vehicle = VehicleState::new(Vector3::zeros(), Vector3::new(0.0, FRAC_PI_2, 0.0));
        let pixels = model
            .project(&vehicle, &[Vector3::new(5.0, 0.0, 0.0)])
            .unwrap();
        assert_abs_diff_eq!(pixels[0].x, 400.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pixels[0].y, 300.0, epsilon = 1e-9);
    }

    #[test]
    fn extrinsic_rotation_is_applied() {
        // Camera rolled +90 deg about body x: Rx(90) maps (0,3,0) to
        // (0,0,3), putting a point on the body's +y axis onto the
        // optical axis at depth 3.
        let mut model = default_model();
        model.set_extrinsics(CameraExtrinsics::new(
            Rotation3::from_axis_angle(&Vector3::x_axis(), FRAC_PI_2),
            Vector3::zeros(),
        ));
        let pixels = model
            .project(&VehicleState::at_rest(), &[Vector3::new(0.0, 3.0, 0.0)])
            .unwrap();
        assert_abs_diff_eq!(pixels[0].x, 400.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pixels[0].y, 300.0, epsilon = 1e-9);
    }

    #[test]
    fn extrinsic_translation_is_applied() {
        // Camera offset 0.5 m along body x: the measurement shifts by
        // f * 0.5 / z relative to the body-origin projection.
        let mut model = default_model();
        model.set_extrinsics(CameraExtrinsics::new(
            Rotation3::identity(),
            Vector3::new(0.5, 0.0, 0.0),
        ));
        let f = model.intrinsics().focal_length();
        let pixels = model
            .project(&VehicleState::at_rest(), &[Vector3::new(0.0, 0.0, 5.0)])
            .unwrap();
        assert_abs_diff_eq!(pixels[0].x, 400.0 + f * 0.5 / 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pixels[0].y, 300.0, epsilon = 1e-9);
    }

    #[test]
    fn behind_camera_point_is_an_error_by_default() {
        let model = default_model();
        let err = model
            .project(&VehicleState::at_rest(), &[Vector3::new(0.0, 0.0, -1.0)])
            .unwrap_err();
        assert!(matches!(
            err,
            GeometryError::NonPositiveDepth { index: 0, .. }
        ));
    }

    #[test]
    fn drop_behind_camera_filters_bad_points() {
        let model = CameraModel::new(
            Resolution::default(),
            34.0,
            ProjectionPolicy::DropBehindCamera,
        )
        .unwrap();
        let pixels = model
            .project(
                &VehicleState::at_rest(),
                &[
                    Vector3::new(0.0, 0.0, -1.0),
                    Vector3::new(0.0, 0.0, 5.0),
                    Vector3::new(0.0, 0.0, 0.0),
                ],
            )
            .unwrap();
        assert_eq!(pixels.len(), 1);
        assert_abs_diff_eq!(pixels[0].x, 400.0, epsilon = 1e-9);
    }

    #[test]
    fn clip_to_frame_clamps_out_of_bounds_pixels() {
        let model =
            CameraModel::new(Resolution::new(800, 600), 34.0, ProjectionPolicy::ClipToFrame)
                .unwrap();
        // A point far off-axis projects well outside the 800x600 plane.
        let pixels = model
            .project(&VehicleState::at_rest(), &[Vector3::new(100.0, -100.0, 1.0)])
            .unwrap();
        assert_eq!(pixels[0].x, 799.0);
        assert_eq!(pixels[0].y, 0.0);
    }
}
