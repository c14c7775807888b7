use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, ValueEnum, Default)]
pub enum ModelKind {
    #[default]
    #[clap(alias = "logistic4")]
    Logistic,
    #[clap(alias = "linear")]
    Linear2d,
    Henon,
    Lorenz,
}

#[derive(Debug, Parser)]
#[command(
    name = "lyap",
    about = "Lyapunov exponent estimation — spectrum and maximum-exponent runs on built-in systems",
    version,
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct LyapCli {
    /// Global: path to config (TOML); default: ~/.lyap/config.toml
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Full Lyapunov spectrum of a built-in system
    Spectrum {
        #[arg(long = "model", value_enum, default_value = "logistic")]
        model: ModelKind,
        /// Run length: renormalization steps (discrete) or checkpoints (continuous)
        #[arg(long = "steps", short = 'n', default_value_t = 10_000)]
        steps: usize,
        /// Transient discarded before measurement (steps or time units)
        #[arg(long = "transient", default_value_t = 1000.0)]
        transient: f64,
        /// Renormalization cadence for continuous systems
        #[arg(long = "dt")]
        dt: Option<f64>,
        /// Write the spectrum as JSON to this file
        #[arg(long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Maximum Lyapunov exponent via the two-trajectory method
    Maxexp {
        #[arg(long = "model", value_enum, default_value = "logistic")]
        model: ModelKind,
        /// Run length: steps (discrete) or total time (continuous)
        #[arg(long = "steps", short = 'n', default_value_t = 100_000)]
        steps: usize,
        #[arg(long = "transient", default_value_t = 1000.0)]
        transient: f64,
        /// Initial/rescale separation
        #[arg(long = "d0")]
        d0: Option<f64>,
        /// Rescale threshold (must exceed d0)
        #[arg(long = "threshold")]
        threshold: Option<f64>,
        #[arg(long = "dt")]
        dt: Option<f64>,
        /// Perturb the test trajectory in a random direction instead of the
        /// uniform default
        #[arg(long = "random-init", action = ArgAction::SetTrue)]
        random_init: bool,
        /// Record the convergence series and write it as JSON to this file
        #[arg(long = "series", value_name = "FILE")]
        series: Option<PathBuf>,
    },
    /// List the built-in systems
    Models,
}
