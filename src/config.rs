use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// Fixed-point iteration settings shared by Hooghoudt and Glover-Dumm
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub tolerance: f64,        // Stop when |L(n+1) - L(n)| < tolerance [m]
    pub max_iterations: usize, // Iteration cap before reporting non-convergence
    pub initial_spacing: f64,  // Seed spacing L0 [m]
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            tolerance: 1e-4,
            max_iterations: 200,
            initial_spacing: 5.0,
        }
    }
}

impl SolverConfig {
    pub fn new(tolerance: f64, max_iterations: usize, initial_spacing: f64) -> Self {
        SolverConfig {
            tolerance,
            max_iterations,
            initial_spacing,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_initial_spacing(mut self, initial_spacing: f64) -> Self {
        self.initial_spacing = initial_spacing;
        self
    }

    // Parse settings from a TOML document; missing keys keep their defaults
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: SolverConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let toml_str = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&toml_str)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "tolerance",
                value: self.tolerance,
                reason: "must be positive",
            });
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_iterations",
                value: 0.0,
                reason: "must allow at least one iteration",
            });
        }
        if !(self.initial_spacing.is_finite() && self.initial_spacing > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "initial_spacing",
                value: self.initial_spacing,
                reason: "must be positive",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SolverConfig::default();
        assert_eq!(config.tolerance, 1e-4);
        assert_eq!(config.max_iterations, 200);
        assert_eq!(config.initial_spacing, 5.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = SolverConfig::from_toml_str("tolerance = 0.001\n").unwrap();
        assert_eq!(config.tolerance, 1e-3);
        assert_eq!(config.max_iterations, 200);
        assert_eq!(config.initial_spacing, 5.0);
    }

    #[test]
    fn full_toml() {
        let toml_str = r#"
            tolerance = 0.0005
            max_iterations = 50
            initial_spacing = 10.0
        "#;
        let config = SolverConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config, SolverConfig::new(5e-4, 50, 10.0));
    }

    #[test]
    fn rejects_zero_iterations() {
        let err = SolverConfig::from_toml_str("max_iterations = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "max_iterations",
                ..
            }
        ));
    }

    #[test]
    fn rejects_negative_tolerance() {
        assert!(SolverConfig::default().with_tolerance(-1.0).validate().is_err());
        assert!(SolverConfig::default().with_initial_spacing(0.0).validate().is_err());
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = SolverConfig::from_toml_str("tolerance = \"tight\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file() {
        let err = SolverConfig::from_file("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
