pub mod maxexp;
pub mod models;
pub mod spectrum;

use crate::cli::ModelKind;

pub fn model_name(model: ModelKind) -> &'static str {
    match model {
        ModelKind::Logistic => "logistic (r = 4)",
        ModelKind::Linear2d => "linear2d (diag 2, 0.5)",
        ModelKind::Henon => "henon (a = 1.4, b = 0.3)",
        ModelKind::Lorenz => "lorenz (sigma = 10, rho = 28, beta = 8/3)",
    }
}
