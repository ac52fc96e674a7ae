//! Scheduling of generations over wall-clock time

pub mod runner;

pub use runner::{RunStats, Simulation};
