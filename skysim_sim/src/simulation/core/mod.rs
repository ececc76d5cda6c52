// skysim_sim/src/simulation/core/mod.rs

pub mod config;
pub mod prng;
pub mod simulation_setup;
