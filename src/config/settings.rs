//! Configuration settings for the simulator

use crate::life::BuiltinPattern;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Longest accepted `simulation.update_interval`, one day. Keeps the interval
/// inside what `Duration` and `Instant` arithmetic can hold.
pub const MAX_UPDATE_INTERVAL_SECS: f64 = 86_400.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: SimulationConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Seconds between generations
    pub update_interval: f64,
    /// Stop after this many generations; run forever when absent
    #[serde(default)]
    pub max_generations: Option<u64>,
    #[serde(default)]
    pub parallel: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Pattern file to seed from; takes precedence over `builtin_pattern`
    #[serde(default)]
    pub pattern_file: Option<PathBuf>,
    pub builtin_pattern: BuiltinPattern,
    pub center: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub viewport: ViewportConfig,
    pub show_stats: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

/// Terminal area used to draw the board, in cells, centered on the origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                update_interval: 0.05,
                max_generations: None,
                parallel: false,
            },
            input: InputConfig {
                pattern_file: None,
                builtin_pattern: BuiltinPattern::Glider,
                center: true,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                viewport: ViewportConfig {
                    width: 80,
                    height: 40,
                },
                show_stats: true,
            },
        }
    }
}

impl SimulationConfig {
    /// The update interval as a `Duration`. Call after `Settings::validate`.
    pub fn interval(&self) -> Duration {
        Duration::from_secs_f64(self.update_interval)
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        let interval = self.simulation.update_interval;
        if !interval.is_finite() || interval <= 0.0 {
            anyhow::bail!("Update interval must be a positive number of seconds, got {}", interval);
        }
        if interval > MAX_UPDATE_INTERVAL_SECS {
            anyhow::bail!(
                "Update interval {} exceeds the maximum of {} seconds",
                interval,
                MAX_UPDATE_INTERVAL_SECS
            );
        }

        if self.output.viewport.width == 0 || self.output.viewport.height == 0 {
            anyhow::bail!("Viewport dimensions must be positive");
        }

        if let Some(ref pattern_file) = self.input.pattern_file {
            if !pattern_file.exists() {
                anyhow::bail!("Pattern file does not exist: {}", pattern_file.display());
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(update_interval) = cli_overrides.update_interval {
            self.simulation.update_interval = update_interval;
        }
        if let Some(max_generations) = cli_overrides.max_generations {
            self.simulation.max_generations = Some(max_generations);
        }
        if cli_overrides.parallel {
            self.simulation.parallel = true;
        }
        if let Some(ref pattern_file) = cli_overrides.pattern_file {
            self.input.pattern_file = Some(pattern_file.clone());
        }
        if let Some(builtin) = cli_overrides.builtin_pattern {
            self.input.builtin_pattern = builtin;
            // An explicit built-in wins over a file named in the config
            if cli_overrides.pattern_file.is_none() {
                self.input.pattern_file = None;
            }
        }
        if cli_overrides.no_center {
            self.input.center = false;
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub update_interval: Option<f64>,
    pub max_generations: Option<u64>,
    pub parallel: bool,
    pub pattern_file: Option<PathBuf>,
    pub builtin_pattern: Option<BuiltinPattern>,
    pub no_center: bool,
    pub format: Option<OutputFormat>,
}
