// skysim_sim/src/lib.rs

// This prelude is for convenience for other files WITHIN the skysim_sim crate.
pub mod prelude;

// This module contains all the simulation-specific logic.
pub mod cli;
pub mod simulation;
