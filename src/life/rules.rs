//! Conway's B3/S23 transition rule

use itertools::Itertools;

/// Game of Life rules engine
pub struct LifeRules;

impl LifeRules {
    /// Check if a cell should be alive in the next generation, given whether it
    /// is alive now and how many of its neighbors are
    #[inline]
    pub fn should_be_alive(alive: bool, neighbors: u8) -> bool {
        matches!((alive, neighbors), (true, 2) | (true, 3) | (false, 3))
    }

    /// Neighbor counts that turn a dead cell alive
    pub fn birth_neighbor_counts() -> &'static [u8] {
        &[3]
    }

    /// Neighbor counts that keep a live cell alive
    pub fn survival_neighbor_counts() -> &'static [u8] {
        &[2, 3]
    }

    /// Maximum possible neighbor count in the Moore neighborhood
    pub fn max_neighbor_count() -> u8 {
        8
    }

    /// Rule string in B/S notation
    pub fn notation() -> String {
        format!(
            "B{}/S{}",
            Self::birth_neighbor_counts().iter().join(""),
            Self::survival_neighbor_counts().iter().join("")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_logic() {
        assert!(LifeRules::should_be_alive(true, 2));   // survival
        assert!(LifeRules::should_be_alive(true, 3));   // survival
        assert!(LifeRules::should_be_alive(false, 3));  // birth
        assert!(!LifeRules::should_be_alive(true, 1));  // underpopulation
        assert!(!LifeRules::should_be_alive(true, 4));  // overpopulation
        assert!(!LifeRules::should_be_alive(false, 2));
        assert!(!LifeRules::should_be_alive(false, 0));
    }

    #[test]
    fn test_rule_matches_tables() {
        for n in 0..=LifeRules::max_neighbor_count() {
            assert_eq!(
                LifeRules::should_be_alive(false, n),
                LifeRules::birth_neighbor_counts().contains(&n)
            );
            assert_eq!(
                LifeRules::should_be_alive(true, n),
                LifeRules::survival_neighbor_counts().contains(&n)
            );
        }
    }

    #[test]
    fn test_notation() {
        assert_eq!(LifeRules::notation(), "B3/S23");
    }
}
