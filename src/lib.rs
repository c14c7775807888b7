// Make the same modules available from the library crate so the CLI binary
// and the integration tests can reach them via `lyapunov::...`.
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;

pub use crate::core::{
    max_exponent_continuous, max_exponent_continuous_series, max_exponent_discrete,
    max_exponent_discrete_series, scalar_exponent, spectrum_continuous, spectrum_discrete,
    BenettinParams, LyapunovError,
};
