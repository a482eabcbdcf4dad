//! axisctl - AxisDrive characterization CLI
//!
//! Loads a controller configuration, drives one axis against an in-memory joint
//! and reports the response.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod config_file;
mod error;
mod output;
mod simulate;

use anyhow::{Context, Result};
use axisdrive_engine::{ControlMode, ControllerConfig};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config_file::{ConfigFormat, load_config, render_config};
use crate::error::CliError;
use crate::simulate::{RunOptions, simulate};

#[derive(Parser)]
#[command(name = "axisctl")]
#[command(about = "AxisDrive CLI - characterize single-axis actuator controller configurations")]
#[command(version)]
struct Cli {
    /// Output in JSON format for machine parsing
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive one axis from a configuration and report the response
    Run(RunArgs),

    /// Check a configuration file
    Validate {
        /// Configuration file (.yaml, .yml or .json)
        config: PathBuf,
    },

    /// Print the default configuration
    DefaultConfig {
        /// Output format
        #[arg(long, value_enum, default_value_t = ConfigFormat::Yaml)]
        format: ConfigFormat,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Configuration file; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured mode
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Override the configured setpoint
    #[arg(long, allow_hyphen_values = true)]
    setpoint: Option<f64>,

    /// Simulated duration in seconds
    #[arg(long, default_value_t = 2.0)]
    duration: f64,

    /// Step time in seconds
    #[arg(long, default_value_t = 0.002)]
    step_time: f64,

    /// Print a sample every N ticks (0 prints none)
    #[arg(long, default_value_t = 0)]
    sample_every: u64,

    /// Joint inertia in kg·m²
    #[arg(long)]
    inertia: Option<f64>,

    /// Joint viscous damping in N·m·s/rad
    #[arg(long)]
    damping: Option<f64>,

    /// Constant external load torque in N·m
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    load: f64,

    /// Initial joint angle in degrees
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    start_angle: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Off,
    Current,
    Velocity,
    Position,
    PositionCircular,
}

impl From<ModeArg> for ControlMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Off => ControlMode::Off,
            ModeArg::Current => ControlMode::Current,
            ModeArg::Velocity => ControlMode::Velocity,
            ModeArg::Position => ControlMode::Position,
            ModeArg::PositionCircular => ControlMode::PositionCircular,
        }
    }
}

impl RunArgs {
    fn options(&self) -> RunOptions {
        let defaults = RunOptions::default();
        RunOptions {
            duration_s: self.duration,
            step_time: self.step_time,
            sample_every: self.sample_every,
            inertia: self.inertia.unwrap_or(defaults.inertia),
            damping: self.damping.unwrap_or(defaults.damping),
            load_torque: self.load,
            start_angle_deg: self.start_angle,
        }
    }

    fn config(&self) -> Result<ControllerConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)
                .with_context(|| format!("Failed to load {}", path.display()))?,
            None => ControllerConfig::default(),
        };
        if let Some(mode) = self.mode {
            config.mode = mode.into();
        }
        if let Some(setpoint) = self.setpoint {
            config.setpoint = setpoint;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("axisctl={log_level},axisdrive_engine={log_level}").into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match execute_command(&cli) {
        Ok(()) => Ok(()),
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let exit_code = e
                .chain()
                .find_map(|cause| cause.downcast_ref::<CliError>())
                .map_or(1, CliError::exit_code);
            std::process::exit(exit_code);
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Run(args) => {
            let config = args.config()?;
            let result = simulate(config, &args.options())?;
            output::print_run(&result, cli.json);
            Ok(())
        }
        Commands::Validate { config } => {
            let loaded = load_config(config)
                .with_context(|| format!("Failed to validate {}", config.display()))?;
            output::print_validation(&config.display().to_string(), &loaded, cli.json);
            Ok(())
        }
        Commands::DefaultConfig { format } => {
            let text = render_config(&ControllerConfig::default(), *format)?;
            println!("{}", text.trim_end());
            Ok(())
        }
    }
}
