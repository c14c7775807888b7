use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::json;

use super::model_name;
use crate::cli::ModelKind;
use crate::config::Defaults;
use crate::core::integrator::Rk4;
use crate::core::models::{DiagonalMap, Henon, LogisticMap, Lorenz};
use crate::core::system::random_perturbation;
use crate::core::{
    max_exponent_continuous, max_exponent_continuous_series, max_exponent_discrete,
    max_exponent_discrete_series, BenettinParams,
};

#[allow(clippy::too_many_arguments)]
pub fn main_with_opts(
    model: ModelKind,
    steps: usize,
    transient: f64,
    d0: Option<f64>,
    threshold: Option<f64>,
    dt: Option<f64>,
    random_init: bool,
    series_out: Option<PathBuf>,
    defaults: &Defaults,
) -> Result<()> {
    let mut params = BenettinParams::default();
    if let Some(d0) = d0.or(defaults.d0) {
        params.d0 = d0;
    }
    if let Some(threshold) = threshold.or(defaults.threshold) {
        params.threshold = threshold;
    }
    if random_init {
        params.inittest = random_perturbation;
    }
    let dt = dt.or(defaults.dt).unwrap_or(0.1);
    let record = series_out.is_some();

    let (lambda, series) = match model {
        ModelKind::Logistic => {
            let map = LogisticMap { r: 4.0 };
            if record {
                max_exponent_discrete_series(&map, &[0.4], steps, transient as usize, &params)?
            } else {
                (max_exponent_discrete(&map, &[0.4], steps, transient as usize, &params)?, Vec::new())
            }
        }
        ModelKind::Linear2d => {
            let map = DiagonalMap { diag: vec![2.0, 0.5] };
            if record {
                max_exponent_discrete_series(&map, &[1.0, 1.0], steps, transient as usize, &params)?
            } else {
                (max_exponent_discrete(&map, &[1.0, 1.0], steps, transient as usize, &params)?, Vec::new())
            }
        }
        ModelKind::Henon => {
            let map = Henon::default();
            if record {
                max_exponent_discrete_series(&map, &[0.1, 0.1], steps, transient as usize, &params)?
            } else {
                (max_exponent_discrete(&map, &[0.1, 0.1], steps, transient as usize, &params)?, Vec::new())
            }
        }
        ModelKind::Lorenz => {
            let flow = Lorenz::default();
            let x0 = [1.0, 1.0, 1.0];
            let total_time = steps as f64 * dt;
            let mut stepper = Rk4::new(0.01);
            if record {
                max_exponent_continuous_series(&flow, &x0, total_time, dt, transient, &params, &mut stepper)?
            } else {
                (
                    max_exponent_continuous(&flow, &x0, total_time, dt, transient, &params, &mut stepper)?,
                    Vec::new(),
                )
            }
        }
    };

    println!("{} {}", "model:".cyan().bold(), model_name(model));
    println!("{} {:+.6}", "max exponent:".bold(), lambda);
    if lambda > 0.0 {
        println!("{} positive exponent: chaotic", "note:".yellow().bold());
    }

    if let Some(path) = series_out {
        let payload = json!({
            "model": model_name(model),
            "max_exponent": lambda,
            "series": series,
        });
        std::fs::write(&path, serde_json::to_string_pretty(&payload)?)
            .with_context(|| format!("Write convergence series {}", path.display()))?;
        println!("{} wrote {} rescale events to {}", "out:".green().bold(), series.len(), path.display());
    }

    Ok(())
}
