use std::path::PathBuf;
use thiserror::Error;

use crate::result::{Method, Status};

pub type SpacingOutcome = Result<crate::result::SpacingResult, SpacingError>;

/// Failure of a spacing solver.
///
/// A non-convergent iteration is not an error: its last estimate comes back
/// inside the result, tagged [`Status::NonConvergent`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpacingError {
    /// A precondition failed before the unsafe step (log, sqrt or division).
    #[error("{method}: invalid parameters: {reason}")]
    Domain { method: Method, reason: String },

    /// The equation has no physically real spacing for these parameters.
    #[error("{method}: no real solution: {reason}")]
    NoRealSolution { method: Method, reason: String },

    /// Drain geometry or depths cannot be resolved, whatever the method.
    #[error("invalid drain geometry: {reason}")]
    Geometry { reason: String },
}

impl SpacingError {
    pub fn domain(method: Method, reason: impl Into<String>) -> Self {
        SpacingError::Domain {
            method,
            reason: reason.into(),
        }
    }

    pub fn no_real_solution(method: Method, reason: impl Into<String>) -> Self {
        SpacingError::NoRealSolution {
            method,
            reason: reason.into(),
        }
    }

    pub fn geometry(reason: impl Into<String>) -> Self {
        SpacingError::Geometry {
            reason: reason.into(),
        }
    }

    pub fn method(&self) -> Option<Method> {
        match self {
            SpacingError::Domain { method, .. } | SpacingError::NoRealSolution { method, .. } => {
                Some(*method)
            }
            SpacingError::Geometry { .. } => None,
        }
    }

    pub fn status(&self) -> Status {
        match self {
            SpacingError::Domain { .. } | SpacingError::Geometry { .. } => Status::DomainError,
            SpacingError::NoRealSolution { .. } => Status::NoRealSolution,
        }
    }

    // Attach a geometry failure to the method that needed the geometry
    pub(crate) fn for_method(self, method: Method) -> Self {
        match self {
            SpacingError::Geometry { reason } => SpacingError::Domain { method, reason },
            other => other,
        }
    }
}

/// Failure while loading solver settings or the soil catalog.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {field}: {value} ({reason})")]
    InvalidValue {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("unknown soil texture '{0}'")]
    UnknownSoil(String),
}

/// Reject anything that is not a finite, strictly positive number.
pub(crate) fn require_positive(method: Method, name: &str, value: f64) -> Result<(), SpacingError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SpacingError::domain(
            method,
            format!("{name} must be positive and finite (got {value})"),
        ))
    }
}
