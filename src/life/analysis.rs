//! Long-run behavior of a seed: extinction, still life, oscillation or travel

use super::cell::{BoundingBox, Cell};
use super::engine::LifeEngine;
use crate::error::LifeError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// How a pattern ends up behaving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Behavior {
    /// Every cell is dead from `generation` on
    Extinct { generation: u64 },
    StillLife,
    Oscillator { period: u64 },
    /// Repeats its shape every `period` generations, shifted by `(dx, dy)`
    Spaceship { period: u64, dx: i64, dy: i64 },
    /// No repeat found within the generation limit
    Unresolved,
}

/// Result of running a seed until it repeats or the limit is hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternAnalysis {
    pub behavior: Behavior,
    /// First generation that belongs to the repeating cycle
    pub settled_at: Option<u64>,
    pub generations_run: u64,
    pub initial_population: usize,
    pub final_population: usize,
    pub peak_population: usize,
    pub population_history: Vec<usize>,
    pub final_bounds: Option<BoundingBox>,
}

/// Step a copy of `seed` up to `max_generations` times looking for a repeat.
///
/// Shapes are compared after translating them to the origin, so a pattern
/// that reappears elsewhere is recognised as a spaceship.
pub fn analyze(seed: &[Cell], max_generations: u64) -> Result<PatternAnalysis, LifeError> {
    let mut engine = LifeEngine::with_cells(seed.iter().copied());
    let mut seen: HashMap<Vec<Cell>, (u64, Cell)> = HashMap::new();
    let mut history = Vec::new();
    let mut settled_at = None;

    let behavior = loop {
        let generation = engine.generation();
        history.push(engine.population());

        if engine.is_empty() {
            settled_at = Some(generation);
            break Behavior::Extinct { generation };
        }

        let (shape, origin) = normalized_shape(&engine)?;
        if let Some(&(first_seen, first_origin)) = seen.get(&shape) {
            settled_at = Some(first_seen);
            let period = generation - first_seen;
            let shift = origin
                .checked_offset_from(first_origin)
                .ok_or(LifeError::CoordinateOverflow(origin))?;
            break match (period, shift.x, shift.y) {
                (1, 0, 0) => Behavior::StillLife,
                (_, 0, 0) => Behavior::Oscillator { period },
                _ => Behavior::Spaceship { period, dx: shift.x, dy: shift.y },
            };
        }
        seen.insert(shape, (generation, origin));

        if generation >= max_generations {
            break Behavior::Unresolved;
        }
        engine.step()?;
    };

    log::debug!(
        "Analysis finished after {} generations: {:?}",
        engine.generation(),
        behavior
    );

    Ok(PatternAnalysis {
        behavior,
        settled_at,
        generations_run: engine.generation(),
        initial_population: history.first().copied().unwrap_or(0),
        final_population: engine.population(),
        peak_population: history.iter().copied().max().unwrap_or(0),
        population_history: history,
        final_bounds: engine.bounding_box(),
    })
}

/// Sorted cells translated so the bounding box starts at the origin, plus
/// the original top-left corner. Fails when the board spans more than the
/// coordinate range on either axis.
fn normalized_shape(engine: &LifeEngine) -> Result<(Vec<Cell>, Cell), LifeError> {
    let origin = engine.bounding_box().map(|b| b.min).unwrap_or(Cell::ORIGIN);
    let mut shape = engine
        .live_cells()
        .iter()
        .map(|&c| c.checked_offset_from(origin).ok_or(LifeError::CoordinateOverflow(c)))
        .collect::<Result<Vec<Cell>, LifeError>>()?;
    shape.sort_unstable();
    Ok((shape, origin))
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Behavior::Extinct { generation } => write!(f, "Extinct at generation {}", generation),
            Behavior::StillLife => write!(f, "Still life"),
            Behavior::Oscillator { period } => write!(f, "Oscillator (period {})", period),
            Behavior::Spaceship { period, dx, dy } => {
                write!(f, "Spaceship (period {}, moves ({}, {}))", period, dx, dy)
            }
            Behavior::Unresolved => write!(f, "Unresolved"),
        }
    }
}

impl fmt::Display for PatternAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pattern Analysis:")?;
        writeln!(f, "  Behavior: {}", self.behavior)?;
        if let Some(settled) = self.settled_at {
            writeln!(f, "  Settled at generation: {}", settled)?;
        }
        writeln!(f, "  Generations run: {}", self.generations_run)?;
        writeln!(
            f,
            "  Population: {} initial, {} final, {} peak",
            self.initial_population, self.final_population, self.peak_population
        )?;
        if let Some(bounds) = self.final_bounds {
            writeln!(
                f,
                "  Final bounds: {} to {} ({}x{})",
                bounds.min,
                bounds.max,
                bounds.width(),
                bounds.height()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::life::pattern::{BuiltinPattern, PatternSource};

    fn analyze_builtin(pattern: BuiltinPattern, limit: u64) -> PatternAnalysis {
        analyze(&pattern.cells().unwrap(), limit).unwrap()
    }

    #[test]
    fn test_still_lifes() {
        for pattern in [BuiltinPattern::Block, BuiltinPattern::Beehive] {
            let analysis = analyze_builtin(pattern, 10);
            assert_eq!(analysis.behavior, Behavior::StillLife);
            assert_eq!(analysis.settled_at, Some(0));
            assert_eq!(analysis.generations_run, 1);
        }
    }

    #[test]
    fn test_period_two_oscillators() {
        for pattern in [BuiltinPattern::Blinker, BuiltinPattern::Toad, BuiltinPattern::Beacon] {
            let analysis = analyze_builtin(pattern, 10);
            assert_eq!(analysis.behavior, Behavior::Oscillator { period: 2 }, "{}", pattern);
        }
    }

    #[test]
    fn test_spaceships() {
        let glider = analyze_builtin(BuiltinPattern::Glider, 10);
        assert_eq!(glider.behavior, Behavior::Spaceship { period: 4, dx: 1, dy: 1 });

        let lwss = analyze_builtin(BuiltinPattern::Lwss, 10);
        assert_eq!(lwss.behavior, Behavior::Spaceship { period: 4, dx: -2, dy: 0 });
    }

    #[test]
    fn test_extinction() {
        let analysis = analyze(&[Cell::new(5, 5)], 10).unwrap();
        assert_eq!(analysis.behavior, Behavior::Extinct { generation: 1 });
        assert_eq!(analysis.population_history, vec![1, 0]);

        let empty = analyze(&[], 10).unwrap();
        assert_eq!(empty.behavior, Behavior::Extinct { generation: 0 });
    }

    #[test]
    fn test_diehard_dies_at_130() {
        let analysis = analyze_builtin(BuiltinPattern::Diehard, 200);
        assert_eq!(analysis.behavior, Behavior::Extinct { generation: 130 });
    }

    #[test]
    fn test_unresolved_within_limit() {
        let analysis = analyze_builtin(BuiltinPattern::RPentomino, 20);
        assert_eq!(analysis.behavior, Behavior::Unresolved);
        assert_eq!(analysis.generations_run, 20);
        assert_eq!(analysis.population_history.len(), 21);
        assert!(analysis.peak_population >= analysis.initial_population);
    }

    #[test]
    fn test_board_wider_than_coordinate_range() {
        let cells = [Cell::new(i64::MIN, 0), Cell::new(i64::MAX, 0)];
        let err = analyze(&cells, 0).unwrap_err();
        assert!(matches!(err, LifeError::CoordinateOverflow(c) if c.x == i64::MAX));
    }

    #[test]
    fn test_display() {
        let analysis = analyze_builtin(BuiltinPattern::Glider, 10);
        let text = analysis.to_string();
        assert!(text.contains("Spaceship (period 4, moves (1, 1))"));
        assert!(text.contains("5 initial"));
    }
}
