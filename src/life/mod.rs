//! Game of Life core functionality

pub mod analysis;
pub mod cell;
pub mod engine;
pub mod io;
pub mod pattern;
pub mod rules;

pub use analysis::{analyze, Behavior, PatternAnalysis};
pub use cell::{BoundingBox, Cell, NEIGHBOR_OFFSETS};
pub use engine::{LifeEngine, LiveSet, Snapshot};
pub use io::{create_example_patterns, load_pattern_from_file, save_pattern_to_file};
pub use pattern::{center, load_seed, BuiltinPattern, PatternFile, PatternSource};
pub use rules::LifeRules;
