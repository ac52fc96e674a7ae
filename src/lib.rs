//! Sparse Game of Life
//!
//! Simulates Conway's Game of Life on an unbounded integer grid. Only live
//! cells are stored, and each generation only visits the live cells and
//! their neighbors.

pub mod config;
pub mod error;
pub mod life;
pub mod simulation;
pub mod utils;

pub use config::Settings;
pub use error::{LifeError, PatternError};
pub use life::{Cell, LifeEngine, PatternSource};
pub use simulation::Simulation;

use anyhow::Result;

/// Load the seed named by `settings`: the pattern file if one is set,
/// otherwise the built-in pattern. Centered when `input.center` is true.
pub fn load_configured_seed(settings: &Settings) -> Result<Vec<Cell>> {
    let source: Box<dyn PatternSource> = match settings.input.pattern_file {
        Some(ref path) => Box::new(life::PatternFile::new(path)),
        None => Box::new(settings.input.builtin_pattern),
    };
    life::load_seed(source.as_ref(), settings.input.center)
}
