//! Donnan's steady-state drain spacing.
//!
//! Closed form, no convergence resistance:
//!
//! ```text
//! L = sqrt(4·K·(H² − Do²) / R)
//! ```
//!
//! # Errors
//! - `Domain` if `K` or `R` is not positive, or `Do` is negative.
//! - `NoRealSolution` if `H ≤ Do`: the drain sits above the target head and no
//!   spacing reaches it.

use crate::error::{SpacingError, require_positive};
use crate::geometry::DerivedGeometry;
use crate::result::{Method, SpacingResult};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DonnanInput {
    pub conductivity: f64,     // K [m/day]
    pub recharge: f64,         // R [m/day]
    pub total_head: f64,       // H [m]
    pub depth_to_barrier: f64, // Do [m]
}

impl DonnanInput {
    pub fn new(conductivity: f64, recharge: f64, geometry: &DerivedGeometry) -> Self {
        DonnanInput {
            conductivity,
            recharge,
            total_head: geometry.total_head,
            depth_to_barrier: geometry.depth_to_barrier,
        }
    }
}

pub fn donnan(input: &DonnanInput) -> Result<SpacingResult, SpacingError> {
    let method = Method::Donnan;
    require_positive(method, "hydraulic conductivity K", input.conductivity)?;
    require_positive(method, "recharge R", input.recharge)?;
    if !(input.depth_to_barrier.is_finite() && input.depth_to_barrier >= 0.0) {
        return Err(SpacingError::domain(
            method,
            format!("Do must be non-negative (got {})", input.depth_to_barrier),
        ));
    }
    if !input.total_head.is_finite() {
        return Err(SpacingError::domain(method, "total head H is not finite"));
    }

    let head_term = input.total_head.powi(2) - input.depth_to_barrier.powi(2);
    if input.total_head <= input.depth_to_barrier || head_term <= 0.0 {
        return Err(SpacingError::no_real_solution(
            method,
            format!(
                "drain depth exceeds the target head (H = {:.3} m, Do = {:.3} m)",
                input.total_head, input.depth_to_barrier
            ),
        ));
    }

    let spacing = (4.0 * input.conductivity * head_term / input.recharge).sqrt();
    if !spacing.is_finite() {
        return Err(SpacingError::domain(
            method,
            format!(
                "spacing overflows (K = {:e}, R = {:e})",
                input.conductivity, input.recharge
            ),
        ));
    }
    log::debug!("{method}: L = {spacing:.3} m");
    Ok(SpacingResult::closed_form(method, spacing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Status;
    use approx::assert_relative_eq;

    fn input(recharge: f64) -> DonnanInput {
        DonnanInput {
            conductivity: 1.2,
            recharge,
            total_head: 3.8,
            depth_to_barrier: 3.3,
        }
    }

    #[test]
    fn textbook_case() {
        let result = donnan(&input(0.01)).unwrap();
        assert_eq!(result.status, Status::Ok);
        assert_eq!(result.iterations, 0);
        assert_relative_eq!(result.spacing.unwrap(), 41.2795, epsilon = 1e-3);
    }

    #[test]
    fn head_below_drain() {
        let mut bad = input(0.01);
        bad.total_head = 3.0;
        assert_eq!(donnan(&bad).unwrap_err().status(), Status::NoRealSolution);

        bad.total_head = 3.3;
        assert_eq!(donnan(&bad).unwrap_err().status(), Status::NoRealSolution);
    }

    #[test]
    fn non_positive_recharge() {
        assert_eq!(donnan(&input(0.0)).unwrap_err().status(), Status::DomainError);
        assert_eq!(donnan(&input(-0.01)).unwrap_err().status(), Status::DomainError);
    }

    #[test]
    fn overflowing_spacing() {
        let huge = DonnanInput {
            conductivity: 1e300,
            recharge: 1e-10,
            ..input(0.01)
        };
        assert_eq!(donnan(&huge).unwrap_err().status(), Status::DomainError);
    }

    #[test]
    fn more_recharge_closer_drains() {
        let wide = donnan(&input(0.005)).unwrap().spacing.unwrap();
        let narrow = donnan(&input(0.02)).unwrap().spacing.unwrap();
        assert!(wide > narrow);
    }
}
