mod cli;
mod commands;
mod config;
mod core;

use clap::Parser; // trait import enables LyapCli::parse()

use crate::cli::{Command, LyapCli};
use crate::config::{load_defaults, resolve_config_path};

fn main() -> anyhow::Result<()> {
    let args = LyapCli::parse();

    let cfg_path = resolve_config_path(&args.config);
    let defaults = load_defaults(&cfg_path)?;

    match args.cmd {
        Command::Spectrum { model, steps, transient, dt, out } => {
            commands::spectrum::main_with_opts(model, steps, transient, dt, out, &defaults)
        }
        Command::Maxexp { model, steps, transient, d0, threshold, dt, random_init, series } => {
            commands::maxexp::main_with_opts(
                model, steps, transient, d0, threshold, dt, random_init, series, &defaults,
            )
        }
        Command::Models => commands::models::main(),
    }
}
