use crate::error::{SpacingError, require_positive};
use crate::result::Method;

// Steady state: constant recharge balanced by drain discharge
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SteadyState {
    pub recharge: f64, // Recharge rate R [m/day]
}

// Transient: water table falling between two depths after a recharge event
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transient {
    pub drainable_porosity: f64, // S [-]
    pub elapsed_time: f64,       // t [day]
    pub initial_depth: f64,      // Water table depth below surface at t = 0 [m]
    pub target_depth: f64,       // Water table depth below surface required at t [m]
}

impl Transient {
    pub fn new(drainable_porosity: f64, elapsed_time: f64, initial_depth: f64, target_depth: f64) -> Self {
        Transient {
            drainable_porosity,
            elapsed_time,
            initial_depth,
            target_depth,
        }
    }

    // Initial and final water table heights above the drain (ho, ht) [m]
    pub fn heights(&self, drain_depth: f64, drain_offset: f64) -> (f64, f64) {
        let level = drain_depth - drain_offset;
        (level - self.initial_depth, level - self.target_depth)
    }

    pub(crate) fn validate(&self, method: Method) -> Result<(), SpacingError> {
        require_positive(method, "drainable porosity S", self.drainable_porosity)?;
        require_positive(method, "elapsed time t", self.elapsed_time)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Regime {
    Steady(SteadyState),
    Transient(Transient),
}

impl Regime {
    pub fn steady(recharge: f64) -> Self {
        Regime::Steady(SteadyState { recharge })
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, Regime::Transient(_))
    }

    pub(crate) fn recharge(&self, method: Method) -> Result<f64, SpacingError> {
        match self {
            Regime::Steady(steady) => Ok(steady.recharge),
            Regime::Transient(_) => Err(SpacingError::domain(
                method,
                "steady-state method needs a recharge rate, got a transient regime",
            )),
        }
    }

    pub(crate) fn transient(&self, method: Method) -> Result<&Transient, SpacingError> {
        match self {
            Regime::Transient(transient) => Ok(transient),
            Regime::Steady(_) => Err(SpacingError::domain(
                method,
                "transient method needs a falling water table, got a steady regime",
            )),
        }
    }
}
