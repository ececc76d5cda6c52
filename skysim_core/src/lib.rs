// skysim_core/src/lib.rs

// This file defines the public modules of the library.
pub mod errors;
pub mod frames;
pub mod models;
pub mod prelude;
pub mod types;
