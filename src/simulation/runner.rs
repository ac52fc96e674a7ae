//! Fixed-cadence driver around the engine

use crate::config::Settings;
use crate::life::{Cell, LifeEngine};
use anyhow::{Context, Result};
use std::ops::ControlFlow;
use std::time::{Duration, Instant};

/// Steps an engine once per `interval` and reports every generation to an observer.
pub struct Simulation {
    engine: LifeEngine,
    interval: Duration,
    max_generations: Option<u64>,
}

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq)]
pub struct RunStats {
    pub generations: u64,
    pub final_population: usize,
    pub elapsed: Duration,
    /// Ticks that started more than one interval late
    pub late_ticks: u64,
}

impl Simulation {
    pub fn new(engine: LifeEngine, interval: Duration) -> Self {
        Self {
            engine,
            interval,
            max_generations: None,
        }
    }

    /// Build a simulation from validated settings and an already-centered seed
    pub fn from_settings(settings: &Settings, seed: Vec<Cell>) -> Self {
        let mut engine = LifeEngine::with_cells(seed);
        engine.set_parallel(settings.simulation.parallel);
        Self::new(engine, settings.simulation.interval())
            .with_max_generations(settings.simulation.max_generations)
    }

    pub fn with_max_generations(mut self, max_generations: Option<u64>) -> Self {
        self.max_generations = max_generations;
        self
    }

    pub fn engine(&self) -> &LifeEngine {
        &self.engine
    }

    pub fn into_engine(self) -> LifeEngine {
        self.engine
    }

    /// Run until the observer breaks or the generation cap is reached.
    ///
    /// The observer sees the seed first, then every new generation. Ticks are
    /// scheduled against fixed deadlines so slow steps do not accumulate drift;
    /// a tick that misses its deadline by a whole interval is not made up.
    pub fn run<F>(&mut self, mut observer: F) -> Result<RunStats>
    where
        F: FnMut(&LifeEngine) -> ControlFlow<()>,
    {
        let start = Instant::now();
        let first_generation = self.engine.generation();
        let mut late_ticks = 0;

        log::info!(
            "Starting simulation: {} live cells, interval {:?}, limit {:?}",
            self.engine.population(),
            self.interval,
            self.max_generations
        );

        let mut next_tick = start + self.interval;
        if observer(&self.engine).is_continue() {
            while !self.limit_reached(first_generation) {
                let now = Instant::now();
                if now < next_tick {
                    std::thread::sleep(next_tick - now);
                } else if now - next_tick > self.interval {
                    late_ticks += 1;
                    log::debug!(
                        "Generation {} started {:?} late",
                        self.engine.generation() + 1,
                        now - next_tick
                    );
                    next_tick = now;
                }
                next_tick += self.interval;

                let next_generation = self.engine.generation() + 1;
                self.engine
                    .step()
                    .with_context(|| format!("Failed to compute generation {}", next_generation))?;

                if observer(&self.engine).is_break() {
                    break;
                }
            }
        }

        let stats = RunStats {
            generations: self.engine.generation() - first_generation,
            final_population: self.engine.population(),
            elapsed: start.elapsed(),
            late_ticks,
        };
        log::info!(
            "Simulation stopped after {} generations ({} live cells)",
            stats.generations,
            stats.final_population
        );
        Ok(stats)
    }

    fn limit_reached(&self, first_generation: u64) -> bool {
        self.max_generations
            .is_some_and(|max| self.engine.generation() - first_generation >= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::life::{BuiltinPattern, PatternSource};

    fn blinker_simulation(interval: Duration) -> Simulation {
        let engine = LifeEngine::with_cells(BuiltinPattern::Blinker.cells().unwrap());
        Simulation::new(engine, interval)
    }

    #[test]
    fn test_runs_to_generation_limit() {
        let mut simulation =
            blinker_simulation(Duration::from_millis(1)).with_max_generations(Some(4));
        let mut seen = Vec::new();
        let stats = simulation
            .run(|engine| {
                seen.push(engine.generation());
                ControlFlow::Continue(())
            })
            .unwrap();

        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
        assert_eq!(stats.generations, 4);
        assert_eq!(stats.final_population, 3);
        assert_eq!(simulation.engine().generation(), 4);
    }

    #[test]
    fn test_observer_can_stop() {
        let mut simulation = blinker_simulation(Duration::from_millis(1));
        let stats = simulation
            .run(|engine| {
                if engine.generation() == 3 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
            .unwrap();
        assert_eq!(stats.generations, 3);
    }

    #[test]
    fn test_break_on_seed_does_not_step() {
        let mut simulation = blinker_simulation(Duration::from_secs(60));
        let stats = simulation.run(|_| ControlFlow::Break(())).unwrap();
        assert_eq!(stats.generations, 0);
        assert!(stats.elapsed < Duration::from_secs(60));
    }

    #[test]
    fn test_cadence_is_respected() {
        let interval = Duration::from_millis(20);
        let mut simulation = blinker_simulation(interval).with_max_generations(Some(3));
        let stats = simulation.run(|_| ControlFlow::Continue(())).unwrap();
        assert!(stats.elapsed >= interval * 3);
    }

    #[test]
    fn test_from_settings() {
        let mut settings = Settings::default();
        settings.simulation.update_interval = 0.001;
        settings.simulation.max_generations = Some(2);
        settings.simulation.parallel = true;

        let seed = BuiltinPattern::Block.cells().unwrap();
        let mut simulation = Simulation::from_settings(&settings, seed);
        assert!(simulation.engine().is_parallel());

        let stats = simulation.run(|_| ControlFlow::Continue(())).unwrap();
        assert_eq!(stats.generations, 2);
        assert_eq!(simulation.into_engine().population(), 4);
    }

    #[test]
    fn test_overflow_surfaces_as_error() {
        let engine = LifeEngine::with_cells(vec![Cell::new(i64::MIN, 0)]);
        let mut simulation =
            Simulation::new(engine, Duration::from_millis(1)).with_max_generations(Some(1));
        assert!(simulation.run(|_| ControlFlow::Continue(())).is_err());
        assert_eq!(simulation.engine().population(), 1);
    }
}
