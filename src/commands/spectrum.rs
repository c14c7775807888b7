use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::json;

use super::model_name;
use crate::cli::ModelKind;
use crate::config::Defaults;
use crate::core::integrator::Rk4;
use crate::core::models::{DiagonalMap, Henon, LogisticMap, Lorenz};
use crate::core::{spectrum_continuous, spectrum_discrete};

pub fn main_with_opts(
    model: ModelKind,
    steps: usize,
    transient: f64,
    dt: Option<f64>,
    out: Option<PathBuf>,
    defaults: &Defaults,
) -> Result<()> {
    let dt = dt.or(defaults.dt).unwrap_or(0.1);

    let spectrum = match model {
        ModelKind::Logistic => {
            spectrum_discrete(&LogisticMap { r: 4.0 }, &[0.4], steps, transient as usize)?
        }
        ModelKind::Linear2d => spectrum_discrete(
            &DiagonalMap { diag: vec![2.0, 0.5] },
            &[1.0, 1.0],
            steps,
            transient as usize,
        )?,
        ModelKind::Henon => {
            spectrum_discrete(&Henon::default(), &[0.1, 0.1], steps, transient as usize)?
        }
        ModelKind::Lorenz => {
            let mut stepper = Rk4::new(0.01);
            spectrum_continuous(&Lorenz::default(), &[1.0, 1.0, 1.0], steps, dt, transient, &mut stepper)?
        }
    };

    println!("{} {}", "model:".cyan().bold(), model_name(model));
    for (i, lambda) in spectrum.iter().enumerate() {
        println!("  lambda[{i}] = {lambda:+.6}");
    }
    if spectrum.first().map(|&l| l > 0.0).unwrap_or(false) {
        println!("{} positive maximum exponent: chaotic", "note:".yellow().bold());
    }

    if let Some(path) = out {
        let payload = json!({
            "model": model_name(model),
            "steps": steps,
            "spectrum": spectrum,
        });
        std::fs::write(&path, serde_json::to_string_pretty(&payload)?)
            .with_context(|| format!("Write spectrum output {}", path.display()))?;
        println!("{} wrote {}", "out:".green().bold(), path.display());
    }

    Ok(())
}
