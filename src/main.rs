//! Command line front end for the sparse Game of Life simulator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sparse_life::{
    config::{CliOverrides, OutputFormat, Settings},
    life::{self, BuiltinPattern, LifeEngine, LifeRules},
    load_configured_seed,
    simulation::Simulation,
    utils::{BoardFormatter, ColorOutput},
};
use std::io::Write;
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "sparse_life")]
#[command(about = "Conway's Game of Life on an unbounded sparse grid")]
#[command(version = "0.1.0")]
struct Cli {
    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where the seed comes from
#[derive(clap::Args, Debug, Default)]
struct SeedArgs {
    /// Pattern file (.cells / .txt plaintext or .json coordinates)
    #[arg(short, long)]
    pattern: Option<PathBuf>,

    /// Built-in pattern
    #[arg(short, long, value_enum)]
    builtin: Option<BuiltinPattern>,

    /// Keep the pattern's own coordinates instead of centering it
    #[arg(long)]
    no_center: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation at a fixed cadence, drawing every generation
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        #[command(flatten)]
        seed: SeedArgs,

        /// Seconds between generations (overrides config)
        #[arg(short, long)]
        interval: Option<f64>,

        /// Stop after this many generations (overrides config)
        #[arg(short, long)]
        generations: Option<u64>,

        /// Evaluate candidate cells on all cores
        #[arg(long)]
        parallel: bool,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Advance a pattern without delay and print the result
    Step {
        #[command(flatten)]
        seed: SeedArgs,

        /// Number of generations to advance
        #[arg(short, long, default_value_t = 1)]
        generations: u64,

        /// Save the resulting pattern here (.json keeps absolute coordinates)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Evaluate candidate cells on all cores
        #[arg(long)]
        parallel: bool,
    },

    /// Classify a pattern as extinct, still life, oscillator or spaceship
    Analyze {
        #[command(flatten)]
        seed: SeedArgs,

        /// Give up after this many generations
        #[arg(short = 'm', long, default_value_t = 1000)]
        max_generations: u64,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Create example configuration and pattern files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// List the built-in patterns
    Patterns,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = execute(cli.command) {
        eprintln!("{}", ColorOutput::error(&format!("Error: {:#}", e)));
        std::process::exit(1);
    }
}

fn execute(command: Commands) -> Result<()> {
    match command {
        Commands::Run { config, seed, interval, generations, parallel, format } => {
            let overrides = CliOverrides {
                update_interval: interval,
                max_generations: generations,
                parallel,
                format,
                ..seed.into_overrides()
            };
            run_command(config, overrides)
        }
        Commands::Step { seed, generations, output, format, parallel } => {
            step_command(seed, generations, output, format, parallel)
        }
        Commands::Analyze { seed, max_generations, format } => {
            analyze_command(seed, max_generations, format)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Patterns => {
            patterns_command();
            Ok(())
        }
    }
}

impl SeedArgs {
    fn into_overrides(self) -> CliOverrides {
        CliOverrides {
            pattern_file: self.pattern,
            builtin_pattern: self.builtin,
            no_center: self.no_center,
            ..Default::default()
        }
    }
}

/// Defaults plus seed overrides, for commands that take no config file
fn settings_from_seed_args(seed: SeedArgs) -> Result<Settings> {
    let mut settings = Settings::default();
    settings.merge_with_cli(&seed.into_overrides());
    settings.validate().context("Invalid pattern selection")?;
    Ok(settings)
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        log::warn!("Config file {} not found, using defaults", config_path.display());
        Ok(Settings::default())
    }
}

fn run_command(config_path: PathBuf, overrides: CliOverrides) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);
    settings.validate().context("Configuration validation failed")?;

    let seed = load_configured_seed(&settings).context("Failed to load seed pattern")?;
    let mut simulation = Simulation::from_settings(&settings, seed);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut write_error = None;

    let stats = simulation.run(|engine| {
        let written = match settings.output.format {
            OutputFormat::Text => {
                let frame = BoardFormatter::format_frame(
                    engine,
                    settings.output.viewport,
                    settings.output.show_stats,
                );
                write!(out, "{}", frame).and_then(|_| out.flush()).map_err(anyhow::Error::from)
            }
            OutputFormat::Json => serde_json::to_string(&engine.snapshot())
                .map_err(anyhow::Error::from)
                .and_then(|line| writeln!(out, "{}", line).map_err(anyhow::Error::from)),
        };
        match written {
            Ok(()) => ControlFlow::Continue(()),
            Err(e) => {
                write_error = Some(e);
                ControlFlow::Break(())
            }
        }
    })?;

    if let Some(e) = write_error {
        return Err(e.context("Failed to write generation output"));
    }

    if settings.output.show_stats && settings.output.format == OutputFormat::Text {
        println!(
            "\n{}",
            ColorOutput::success(&format!(
                "Ran {} generations in {:.3}s, {} live cells remain",
                stats.generations,
                stats.elapsed.as_secs_f64(),
                stats.final_population
            ))
        );
        if stats.late_ticks > 0 {
            println!(
                "{}",
                ColorOutput::warning(&format!(
                    "{} generations missed their deadline",
                    stats.late_ticks
                ))
            );
        }
    }

    Ok(())
}

fn step_command(
    seed: SeedArgs,
    generations: u64,
    output: Option<PathBuf>,
    format: OutputFormat,
    parallel: bool,
) -> Result<()> {
    let settings = settings_from_seed_args(seed)?;
    let seed = load_configured_seed(&settings).context("Failed to load seed pattern")?;

    let mut engine = LifeEngine::with_cells(seed);
    engine.set_parallel(parallel);

    let start_time = Instant::now();
    engine
        .step_n(generations)
        .with_context(|| format!("Failed after {} generations", engine.generation()))?;
    let elapsed = start_time.elapsed();

    match format {
        OutputFormat::Text => {
            println!("{}", BoardFormatter::format_header(&engine));
            println!("{}", BoardFormatter::format_compact(engine.live_cells()));
            println!(
                "{}",
                ColorOutput::info(&format!(
                    "{} generations in {:.3}s ({})",
                    generations,
                    elapsed.as_secs_f64(),
                    LifeRules::notation()
                ))
            );
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&engine.snapshot())
                .context("Failed to serialize snapshot")?;
            println!("{}", json);
        }
    }

    if let Some(path) = output {
        life::save_pattern_to_file(&engine.snapshot().cells, &path)
            .context("Failed to save resulting pattern")?;
        log::info!("Saved generation {} to {}", engine.generation(), path.display());
    }

    Ok(())
}

fn analyze_command(seed: SeedArgs, max_generations: u64, format: OutputFormat) -> Result<()> {
    let settings = settings_from_seed_args(seed)?;
    let seed = load_configured_seed(&settings).context("Failed to load seed pattern")?;

    let analysis = life::analyze(&seed, max_generations).context("Analysis failed")?;

    match format {
        OutputFormat::Text => {
            println!("{}", ColorOutput::info("Initial pattern:"));
            println!("{}", BoardFormatter::format_compact(&seed.iter().copied().collect()));
            print!("{}", analysis);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&analysis)
                .context("Failed to serialize analysis")?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let patterns_dir = directory.join("patterns");

    for dir in [&config_dir, &patterns_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    life::create_example_patterns(&patterns_dir).context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", patterns_dir.display());

    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    let mut gun_config = Settings::default();
    gun_config.input.builtin_pattern = BuiltinPattern::GosperGun;
    gun_config.output.viewport.width = 60;
    gun_config.to_file(&examples_dir.join("gun.yaml"))?;

    let mut methuselah_config = Settings::default();
    methuselah_config.simulation.update_interval = 0.02;
    methuselah_config.simulation.max_generations = Some(1103);
    methuselah_config.input.builtin_pattern = BuiltinPattern::RPentomino;
    methuselah_config.to_file(&examples_dir.join("r_pentomino.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Add your own patterns to {}", patterns_dir.display());
    println!("3. Run: sparse_life run --config config/default.yaml");

    Ok(())
}

fn patterns_command() {
    println!("Built-in patterns:");
    for pattern in BuiltinPattern::ALL {
        println!("  {:<12} {}", pattern.name(), pattern.description());
    }
}
