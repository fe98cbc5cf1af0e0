use std::f64::consts::PI;

use crate::config::SolverConfig;
use crate::error::{SpacingError, require_positive};
use crate::geometry::DerivedGeometry;
use crate::result::{Method, SpacingResult};

// Steady-state spacing with radial flow resistance near the drain
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HooghoudtInput {
    pub conductivity: f64,     // K [m/day]
    pub recharge: f64,         // R [m/day]
    pub depth_to_barrier: f64, // Do [m]
    pub wetted_perimeter: f64, // p [m]
    pub head: f64,             // h [m]
}

impl HooghoudtInput {
    pub fn new(conductivity: f64, recharge: f64, geometry: &DerivedGeometry) -> Self {
        HooghoudtInput {
            conductivity,
            recharge,
            depth_to_barrier: geometry.depth_to_barrier,
            wetted_perimeter: geometry.wetted_perimeter,
            head: geometry.head,
        }
    }
}

/// Hooghoudt's equivalent depth `d` for a trial spacing `l`.
///
/// Callers must have checked `depth_to_barrier > wetted_perimeter > 0` and `l > 0`.
pub(crate) fn equivalent_depth(depth_to_barrier: f64, wetted_perimeter: f64, l: f64) -> f64 {
    let radial = (8.0 * depth_to_barrier / (PI * l)) * (depth_to_barrier / wetted_perimeter).ln();
    depth_to_barrier / (radial + 1.0)
}

// ln(Do/p) must be positive for the equivalent depth to mean anything
pub(crate) fn check_convergence_zone(
    method: Method,
    depth_to_barrier: f64,
    wetted_perimeter: f64,
) -> Result<(), SpacingError> {
    require_positive(method, "depth to impermeable layer Do", depth_to_barrier)?;
    require_positive(method, "wetted perimeter p", wetted_perimeter)?;
    if depth_to_barrier <= wetted_perimeter {
        return Err(SpacingError::domain(
            method,
            format!(
                "depth to impermeable layer ({depth_to_barrier:.3} m) must exceed the wetted perimeter ({wetted_perimeter:.3} m)"
            ),
        ));
    }
    Ok(())
}

/// Iterate `L(n+1) = next(L(n))` from the configured seed.
///
/// Stops when two successive spacings differ by less than the tolerance. If the
/// cap is reached the last spacing is returned flagged as non-convergent; a NaN
/// or non-positive iterate is a domain error.
pub(crate) fn fixed_point<F>(
    method: Method,
    config: &SolverConfig,
    mut next: F,
) -> Result<SpacingResult, SpacingError>
where
    F: FnMut(f64) -> f64,
{
    let mut spacing = config.initial_spacing;
    let mut step = f64::INFINITY;

    for iteration in 1..=config.max_iterations {
        let candidate = next(spacing);
        if !(candidate.is_finite() && candidate > 0.0) {
            return Err(SpacingError::domain(
                method,
                format!("iteration {iteration} produced a non-physical spacing ({candidate})"),
            ));
        }

        step = (candidate - spacing).abs();
        log::trace!("{method}: iteration {iteration}, L = {candidate:.6} m, step = {step:.3e}");
        spacing = candidate;

        if step < config.tolerance {
            log::debug!("{method}: L = {spacing:.3} m after {iteration} iterations");
            return Ok(SpacingResult::converged(method, spacing, iteration));
        }
    }

    log::warn!(
        "{method}: no convergence after {} iterations, last L = {spacing:.3} m",
        config.max_iterations
    );
    Ok(SpacingResult::non_convergent(
        method,
        spacing,
        config.max_iterations,
        step,
    ))
}

pub fn hooghoudt(input: &HooghoudtInput, config: &SolverConfig) -> Result<SpacingResult, SpacingError> {
    let method = Method::Hooghoudt;
    require_positive(method, "hydraulic conductivity K", input.conductivity)?;
    require_positive(method, "recharge R", input.recharge)?;
    require_positive(method, "head h", input.head)?;
    check_convergence_zone(method, input.depth_to_barrier, input.wetted_perimeter)?;

    let k = input.conductivity;
    let h = input.head;
    fixed_point(method, config, |l| {
        let d = equivalent_depth(input.depth_to_barrier, input.wetted_perimeter, l);
        ((8.0 * k * d * h + 4.0 * k * h.powi(2)) / input.recharge).sqrt()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Status;
    use approx::assert_relative_eq;

    fn pipe_input(recharge: f64) -> HooghoudtInput {
        HooghoudtInput {
            conductivity: 1.2,
            recharge,
            depth_to_barrier: 3.4,
            wetted_perimeter: PI * 0.1,
            head: 0.4,
        }
    }

    #[test]
    fn equivalent_depth_is_shallower_than_barrier() {
        let d = equivalent_depth(3.4, PI * 0.1, 30.0);
        assert!(d > 0.0 && d < 3.4);
        // Wider spacing, less radial resistance
        assert!(equivalent_depth(3.4, PI * 0.1, 300.0) > d);
    }

    #[test]
    fn converges_for_pipe_drain() {
        let result = hooghoudt(&pipe_input(0.01), &SolverConfig::default()).unwrap();
        assert_eq!(result.status, Status::Ok);
        assert_eq!(result.iterations, 10);
        assert_relative_eq!(result.spacing.unwrap(), 28.9754, epsilon = 1e-3);
    }

    #[test]
    fn fixed_point_is_idempotent() {
        let config = SolverConfig::default();
        let first = hooghoudt(&pipe_input(0.01), &config).unwrap();
        let l = first.spacing.unwrap();

        let again = hooghoudt(&pipe_input(0.01), &config.with_initial_spacing(l)).unwrap();
        assert_eq!(again.status, Status::Ok);
        assert_eq!(again.iterations, 1);
        assert_relative_eq!(again.spacing.unwrap(), l, epsilon = config.tolerance);
    }

    #[test]
    fn drain_wider_than_flow_zone() {
        let mut input = pipe_input(0.01);
        input.wetted_perimeter = 3.4;
        let err = hooghoudt(&input, &SolverConfig::default()).unwrap_err();
        assert_eq!(err.status(), Status::DomainError);
    }

    #[test]
    fn iteration_cap_reports_non_convergence() {
        let config = SolverConfig::default().with_max_iterations(3);
        let result = hooghoudt(&pipe_input(0.01), &config).unwrap();
        assert_eq!(result.status, Status::NonConvergent);
        assert_eq!(result.iterations, 3);
        assert!(result.spacing.unwrap() > 0.0);
        assert!(result.diagnostic.is_some());
    }

    #[test]
    fn more_recharge_closer_drains() {
        let config = SolverConfig::default();
        let spacings: Vec<f64> = [0.005, 0.01, 0.02]
            .iter()
            .map(|&r| hooghoudt(&pipe_input(r), &config).unwrap().spacing.unwrap())
            .collect();
        assert!(spacings[0] > spacings[1] && spacings[1] > spacings[2]);
    }

    #[test]
    fn non_physical_iterate_stops_the_loop() {
        let err = fixed_point(Method::Hooghoudt, &SolverConfig::default(), |_| f64::NAN).unwrap_err();
        assert_eq!(err.status(), Status::DomainError);

        let err = fixed_point(Method::Hooghoudt, &SolverConfig::default(), |l| l - 10.0).unwrap_err();
        assert_eq!(err.status(), Status::DomainError);
    }
}
