use std::fmt;

use serde::Serialize;

// Drain spacing formulation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Method {
    Donnan,
    Hooghoudt,
    Ernst,
    ErnstTwoLayer,
    Dagan,
    GloverDumm,
}

impl Method {
    pub const ALL: [Method; 6] = [
        Method::Donnan,
        Method::Hooghoudt,
        Method::Ernst,
        Method::ErnstTwoLayer,
        Method::Dagan,
        Method::GloverDumm,
    ];

    // Glover-Dumm is the only transient (falling water table) formulation
    pub fn is_transient(self) -> bool {
        matches!(self, Method::GloverDumm)
    }

    pub fn is_iterative(self) -> bool {
        matches!(self, Method::Hooghoudt | Method::GloverDumm)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Donnan => "Donnan",
            Method::Hooghoudt => "Hooghoudt",
            Method::Ernst => "Ernst",
            Method::ErnstTwoLayer => "Ernst (two-layer)",
            Method::Dagan => "Dagan",
            Method::GloverDumm => "Glover-Dumm",
        };
        f.write_str(name)
    }
}

/// What the presentation layer keys off. Anything other than `Ok` means
/// there is no verified spacing to plot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Status {
    Ok,
    DomainError,
    NoRealSolution,
    NonConvergent,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpacingResult {
    pub method: Method,
    pub spacing: Option<f64>, // Drain spacing L [m], absent on failure
    pub iterations: usize,    // Fixed-point rounds (0 for closed-form methods)
    pub status: Status,
    pub diagnostic: Option<String>,
}

impl SpacingResult {
    pub(crate) fn closed_form(method: Method, spacing: f64) -> Self {
        SpacingResult {
            method,
            spacing: Some(spacing),
            iterations: 0,
            status: Status::Ok,
            diagnostic: None,
        }
    }

    pub(crate) fn converged(method: Method, spacing: f64, iterations: usize) -> Self {
        SpacingResult {
            method,
            spacing: Some(spacing),
            iterations,
            status: Status::Ok,
            diagnostic: None,
        }
    }

    // Last estimate of an iteration that ran out of rounds
    pub(crate) fn non_convergent(method: Method, spacing: f64, iterations: usize, step: f64) -> Self {
        SpacingResult {
            method,
            spacing: Some(spacing),
            iterations,
            status: Status::NonConvergent,
            diagnostic: Some(format!(
                "no convergence after {iterations} iterations (last step {step:.3e} m)"
            )),
        }
    }

    pub(crate) fn failed(method: Method, error: &crate::SpacingError) -> Self {
        SpacingResult {
            method: error.method().unwrap_or(method),
            spacing: None,
            iterations: 0,
            status: error.status(),
            diagnostic: Some(error.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    // Spacing only when it is verified; what a plot should use
    pub fn verified_spacing(&self) -> Option<f64> {
        if self.is_ok() { self.spacing } else { None }
    }
}

impl fmt::Display for SpacingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.status, self.spacing) {
            (Status::Ok, Some(l)) => write!(f, "{} spacing: {:.2} m", self.method, l),
            (Status::NonConvergent, Some(l)) => {
                write!(f, "{} spacing: {:.2} m (unverified)", self.method, l)
            }
            _ => match &self.diagnostic {
                Some(diagnostic) => f.write_str(diagnostic),
                None => write!(f, "{}: no result", self.method),
            },
        }
    }
}
