use std::fmt;

#[derive(Debug)]
pub enum LyapunovError {
    ConfigError(String),
    DegenerateRun(String),
    DimensionMismatch(String),
}

impl fmt::Display for LyapunovError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LyapunovError::ConfigError(msg) => write!(f, "Configuration Error: {}", msg),
            LyapunovError::DegenerateRun(msg) => write!(f, "Degenerate Run: {}", msg),
            LyapunovError::DimensionMismatch(msg) => write!(f, "Dimension Mismatch: {}", msg),
        }
    }
}

impl std::error::Error for LyapunovError {}

impl LyapunovError {
    pub fn config(message: &str) -> Self { LyapunovError::ConfigError(message.to_string()) }
    pub fn degenerate(message: &str) -> Self { LyapunovError::DegenerateRun(message.to_string()) }
    pub fn dimension(message: &str) -> Self { LyapunovError::DimensionMismatch(message.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test] fn test_config_error() {
        let err = LyapunovError::config("threshold must exceed d0");
        assert_eq!(format!("{}", err), "Configuration Error: threshold must exceed d0");
    }
    #[test] fn test_degenerate_run() {
        let err = LyapunovError::degenerate("no rescale occurred");
        assert_eq!(format!("{}", err), "Degenerate Run: no rescale occurred");
    }
    #[test] fn test_dimension_mismatch() {
        let err = LyapunovError::dimension("state has 2 entries, system expects 3");
        assert_eq!(format!("{}", err), "Dimension Mismatch: state has 2 entries, system expects 3");
    }
}
