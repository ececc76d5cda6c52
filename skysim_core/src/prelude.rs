// skysim_core/src/prelude.rs

// --- Core Data Structures (The "nouns" of the library) ---
pub use crate::types::{InertialPoint, PixelMeasurement, Resolution, VehicleState};

// --- Frame Conversions ---
pub use crate::frames::{inertial_point_to_body, rotation_body_to_inertial};

// --- Camera Model ---
pub use crate::models::camera::{
    CameraExtrinsics, CameraIntrinsics, CameraModel, ProjectionPolicy,
};

// --- Errors ---
pub use crate::errors::GeometryError;
