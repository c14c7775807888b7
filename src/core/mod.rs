//! Core module tree for the Lyapunov exponent engine.

pub mod benettin;
pub mod error;
pub mod integrator;
pub mod linalg;
pub mod models;
pub mod spectrum;
pub mod system;

pub use benettin::{
    max_exponent_continuous, max_exponent_continuous_series, max_exponent_discrete,
    max_exponent_discrete_series, BenettinParams,
};
pub use error::LyapunovError;
pub use spectrum::{scalar_exponent, spectrum_continuous, spectrum_discrete};
