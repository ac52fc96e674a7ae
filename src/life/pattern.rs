//! Seed patterns and centering

use super::cell::{BoundingBox, Cell};
use super::io::load_pattern_from_file;
use crate::error::{LifeError, PatternError};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Anything that can produce a finite seed for the engine.
pub trait PatternSource {
    fn cells(&self) -> Result<Vec<Cell>>;
}

impl PatternSource for Vec<Cell> {
    fn cells(&self) -> Result<Vec<Cell>> {
        Ok(self.clone())
    }
}

/// A pattern read from a plaintext or JSON file.
#[derive(Debug, Clone)]
pub struct PatternFile {
    pub path: PathBuf,
}

impl PatternFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PatternSource for PatternFile {
    fn cells(&self) -> Result<Vec<Cell>> {
        load_pattern_from_file(&self.path)
    }
}

/// Well-known patterns that ship with the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinPattern {
    Block,
    Beehive,
    Blinker,
    Toad,
    Beacon,
    Glider,
    Lwss,
    RPentomino,
    Diehard,
    Acorn,
    GosperGun,
}

impl BuiltinPattern {
    pub const ALL: [BuiltinPattern; 11] = [
        BuiltinPattern::Block,
        BuiltinPattern::Beehive,
        BuiltinPattern::Blinker,
        BuiltinPattern::Toad,
        BuiltinPattern::Beacon,
        BuiltinPattern::Glider,
        BuiltinPattern::Lwss,
        BuiltinPattern::RPentomino,
        BuiltinPattern::Diehard,
        BuiltinPattern::Acorn,
        BuiltinPattern::GosperGun,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BuiltinPattern::Block => "block",
            BuiltinPattern::Beehive => "beehive",
            BuiltinPattern::Blinker => "blinker",
            BuiltinPattern::Toad => "toad",
            BuiltinPattern::Beacon => "beacon",
            BuiltinPattern::Glider => "glider",
            BuiltinPattern::Lwss => "lwss",
            BuiltinPattern::RPentomino => "r_pentomino",
            BuiltinPattern::Diehard => "diehard",
            BuiltinPattern::Acorn => "acorn",
            BuiltinPattern::GosperGun => "gosper_gun",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            BuiltinPattern::Block => "2x2 still life",
            BuiltinPattern::Beehive => "six-cell still life",
            BuiltinPattern::Blinker => "period 2 oscillator",
            BuiltinPattern::Toad => "period 2 oscillator",
            BuiltinPattern::Beacon => "period 2 oscillator",
            BuiltinPattern::Glider => "diagonal spaceship, period 4",
            BuiltinPattern::Lwss => "lightweight spaceship, period 4",
            BuiltinPattern::RPentomino => "methuselah, stabilizes after 1103 generations",
            BuiltinPattern::Diehard => "methuselah, dies out after 130 generations",
            BuiltinPattern::Acorn => "methuselah, stabilizes after 5206 generations",
            BuiltinPattern::GosperGun => "glider gun, period 30",
        }
    }

    fn coords(self) -> &'static [(i64, i64)] {
        match self {
            BuiltinPattern::Block => &[(0, 0), (1, 0), (0, 1), (1, 1)],
            BuiltinPattern::Beehive => &[(1, 0), (2, 0), (0, 1), (3, 1), (1, 2), (2, 2)],
            BuiltinPattern::Blinker => &[(0, 0), (1, 0), (2, 0)],
            BuiltinPattern::Toad => &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
            BuiltinPattern::Beacon => &[
                (0, 0), (1, 0), (0, 1), (1, 1),
                (2, 2), (3, 2), (2, 3), (3, 3),
            ],
            BuiltinPattern::Glider => &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
            BuiltinPattern::Lwss => &[
                (1, 0), (4, 0),
                (0, 1),
                (0, 2), (4, 2),
                (0, 3), (1, 3), (2, 3), (3, 3),
            ],
            BuiltinPattern::RPentomino => &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
            BuiltinPattern::Diehard => &[(6, 0), (0, 1), (1, 1), (1, 2), (5, 2), (6, 2), (7, 2)],
            BuiltinPattern::Acorn => &[(1, 0), (3, 1), (0, 2), (1, 2), (4, 2), (5, 2), (6, 2)],
            BuiltinPattern::GosperGun => &[
                // left block
                (1, 5), (1, 6), (2, 5), (2, 6),
                // left ship
                (11, 5), (11, 6), (11, 7),
                (12, 4), (12, 8),
                (13, 3), (13, 9),
                (14, 3), (14, 9),
                (15, 6),
                (16, 4), (16, 8),
                (17, 5), (17, 6), (17, 7),
                (18, 6),
                // right ship
                (21, 3), (21, 4), (21, 5),
                (22, 3), (22, 4), (22, 5),
                (23, 2), (23, 6),
                (25, 1), (25, 2), (25, 6), (25, 7),
                // right block
                (35, 3), (35, 4), (36, 3), (36, 4),
            ],
        }
    }
}

impl PatternSource for BuiltinPattern {
    fn cells(&self) -> Result<Vec<Cell>> {
        Ok(self.coords().iter().map(|&c| Cell::from(c)).collect())
    }
}

impl fmt::Display for BuiltinPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BuiltinPattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| PatternError::UnknownBuiltin(s.to_string()))
    }
}

/// Translate `cells` so the middle of their bounding box lands on the origin.
pub fn center(cells: &[Cell]) -> Result<Vec<Cell>, LifeError> {
    let Some(bounds) = BoundingBox::of(cells) else {
        return Ok(Vec::new());
    };
    let mid = bounds.center();
    cells
        .iter()
        .map(|&cell| cell.checked_offset_from(mid).ok_or(LifeError::CoordinateOverflow(cell)))
        .collect()
}

/// Read a seed from `source`, optionally centered on the origin.
pub fn load_seed(source: &dyn PatternSource, centered: bool) -> Result<Vec<Cell>> {
    let cells = source.cells()?;
    if centered {
        Ok(center(&cells)?)
    } else {
        Ok(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtins_have_unique_cells() {
        for pattern in BuiltinPattern::ALL {
            let cells = pattern.cells().unwrap();
            let unique: HashSet<_> = cells.iter().collect();
            assert_eq!(unique.len(), cells.len(), "{} has duplicate cells", pattern);
        }
        assert_eq!(BuiltinPattern::GosperGun.cells().unwrap().len(), 36);
    }

    #[test]
    fn test_builtin_names_round_trip() {
        for pattern in BuiltinPattern::ALL {
            assert_eq!(pattern.name().parse::<BuiltinPattern>().unwrap(), pattern);
        }
        assert_eq!("R-Pentomino".parse::<BuiltinPattern>().unwrap(), BuiltinPattern::RPentomino);
        assert!(matches!(
            "spaceship".parse::<BuiltinPattern>(),
            Err(PatternError::UnknownBuiltin(_))
        ));
    }

    #[test]
    fn test_center_uses_true_bounding_box() {
        // x spans 10..=20, y spans -4..=0
        let cells = vec![Cell::new(10, -4), Cell::new(20, 0), Cell::new(15, -2)];
        let centered = center(&cells).unwrap();
        assert_eq!(centered, vec![Cell::new(-5, -2), Cell::new(5, 2), Cell::new(0, 0)]);
    }

    #[test]
    fn test_center_even_extent_rounds_down() {
        let centered = center(&BuiltinPattern::Block.cells().unwrap()).unwrap();
        assert_eq!(
            centered,
            vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(0, 1), Cell::new(1, 1)]
        );
    }

    #[test]
    fn test_center_empty() {
        assert!(center(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_center_overflow() {
        let cells = vec![Cell::new(i64::MIN, 0), Cell::new(i64::MAX, 0)];
        assert!(center(&cells).is_err());
    }

    #[test]
    fn test_load_seed() {
        let seed = load_seed(&BuiltinPattern::Blinker, true).unwrap();
        assert_eq!(seed, vec![Cell::new(-1, 0), Cell::new(0, 0), Cell::new(1, 0)]);

        let raw = vec![Cell::new(7, 7)];
        assert_eq!(load_seed(&raw, false).unwrap(), raw);
    }
}
