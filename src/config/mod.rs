//! Configuration management for the simulator

pub mod settings;

pub use settings::{
    CliOverrides, InputConfig, OutputConfig, OutputFormat, Settings, SimulationConfig,
    ViewportConfig,
};
