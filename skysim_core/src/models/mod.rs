// skysim_core/src/models/mod.rs

pub mod camera;
