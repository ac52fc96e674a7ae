//! Sparse generation-by-generation Life engine
//!
//! The board is a hashed set of live cells. Each step only looks at the live
//! cells and their immediate neighbors; every other coordinate has no live
//! neighbor and is known to stay dead.

use super::cell::{BoundingBox, Cell, NEIGHBOR_OFFSETS};
use super::rules::LifeRules;
use crate::error::LifeError;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub type LiveSet = HashSet<Cell>;

/// Owns the live-cell set and advances it one generation at a time.
#[derive(Debug, Clone, Default)]
pub struct LifeEngine {
    live: LiveSet,
    candidates: HashSet<Cell>,
    generation: u64,
    parallel: bool,
}

/// An owned copy of one generation, cells sorted by `(x, y)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub generation: u64,
    pub population: usize,
    pub cells: Vec<Cell>,
}

impl LifeEngine {
    /// Create an empty engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine seeded with `cells`
    pub fn with_cells<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = Cell>,
    {
        let mut engine = Self::new();
        engine.reset(cells);
        engine
    }

    /// Evaluate candidates on the rayon pool instead of the calling thread.
    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Replace the whole board with `cells`. Duplicates collapse.
    pub fn reset<I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = Cell>,
    {
        self.live.clear();
        self.candidates.clear();
        self.live.extend(cells);
        self.generation = 0;
        log::debug!("Engine reset with {} live cells", self.live.len());
    }

    /// Advance exactly one generation.
    ///
    /// Neighbor counts are always taken against the generation being
    /// replaced. On error the board is left as it was before the call.
    pub fn step(&mut self) -> Result<(), LifeError> {
        let candidates = self.collect_candidates()?;

        let live = &self.live;
        let survives = |cell: &&Cell| {
            LifeRules::should_be_alive(live.contains(*cell), count_live_neighbors(live, **cell))
        };
        let next: LiveSet = if self.parallel {
            candidates.par_iter().filter(survives).copied().collect()
        } else {
            candidates.iter().filter(survives).copied().collect()
        };

        log::trace!(
            "Generation {} -> {}: {} candidates, population {} -> {}",
            self.generation,
            self.generation + 1,
            candidates.len(),
            self.live.len(),
            next.len()
        );

        self.candidates = candidates;
        self.live = next;
        self.generation += 1;
        Ok(())
    }

    /// Call [`step`](Self::step) `generations` times, stopping at the first error.
    pub fn step_n(&mut self, generations: u64) -> Result<(), LifeError> {
        for _ in 0..generations {
            self.step()?;
        }
        Ok(())
    }

    /// Every live cell and its eight neighbors, built aside so a failure
    /// leaves the previous candidate set in place.
    fn collect_candidates(&self) -> Result<HashSet<Cell>, LifeError> {
        let mut candidates = HashSet::with_capacity(self.live.len() * 3);
        for &cell in &self.live {
            let neighbors = cell.neighbors().ok_or(LifeError::CoordinateOverflow(cell))?;
            candidates.insert(cell);
            candidates.extend(neighbors);
        }
        Ok(candidates)
    }

    /// Read-only view of the current generation
    pub fn live_cells(&self) -> &LiveSet {
        &self.live
    }

    /// Candidates examined by the most recent step; empty after a reset.
    pub fn candidates(&self) -> &HashSet<Cell> {
        &self.candidates
    }

    pub fn is_alive(&self, cell: Cell) -> bool {
        self.live.contains(&cell)
    }

    /// Number of live cells among the eight neighbors of `cell`
    pub fn neighbor_count(&self, cell: Cell) -> u8 {
        count_live_neighbors(&self.live, cell)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::of(&self.live)
    }

    /// Sorted owned copy of the current generation, for hand-off to other threads.
    pub fn snapshot(&self) -> Snapshot {
        let mut cells: Vec<Cell> = self.live.iter().copied().collect();
        cells.sort_unstable();
        Snapshot {
            generation: self.generation,
            population: cells.len(),
            cells,
        }
    }
}

/// Neighbors outside the coordinate range can never be alive, so they are skipped.
fn count_live_neighbors(live: &LiveSet, cell: Cell) -> u8 {
    NEIGHBOR_OFFSETS
        .iter()
        .filter_map(|&(dx, dy)| cell.checked_offset(dx, dy))
        .filter(|neighbor| live.contains(neighbor))
        .count() as u8
}
