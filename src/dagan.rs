use std::f64::consts::PI;

use crate::error::{SpacingError, require_positive};
use crate::geometry::DerivedGeometry;
use crate::quadratic::SpacingQuadratic;
use crate::result::{Method, SpacingResult};

// Dagan's steady-state spacing, radial resistance through the beta term
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DaganInput {
    pub conductivity: f64,     // K [m/day]
    pub recharge: f64,         // R [m/day]
    pub depth_to_barrier: f64, // Do [m]
    pub wetted_perimeter: f64, // p [m]
    pub head: f64,             // h [m]
}

impl DaganInput {
    pub fn new(conductivity: f64, recharge: f64, geometry: &DerivedGeometry) -> Self {
        DaganInput {
            conductivity,
            recharge,
            depth_to_barrier: geometry.depth_to_barrier,
            wetted_perimeter: geometry.wetted_perimeter,
            head: geometry.head,
        }
    }

    // beta = (2/π)·ln(2·cosh(p/Do) − 2)
    fn beta(&self, method: Method) -> Result<f64, SpacingError> {
        let ratio = self.wetted_perimeter / self.depth_to_barrier;
        let log_arg = 2.0 * ratio.cosh() - 2.0;
        if !(log_arg > 0.0 && log_arg.is_finite()) {
            return Err(SpacingError::domain(
                method,
                format!("cosh(p/Do) must exceed 1 and stay finite (p/Do = {ratio:.3e})"),
            ));
        }
        Ok((2.0 / PI) * log_arg.ln())
    }

    pub fn quadratic(&self, method: Method) -> Result<SpacingQuadratic, SpacingError> {
        let r = self.recharge;
        let a = r / (2.0 * self.depth_to_barrier);
        let b = r * self.beta(method)?;
        let c = -4.0 * self.head * self.conductivity;
        Ok(SpacingQuadratic::new(a, b, c))
    }
}

pub fn dagan(input: &DaganInput) -> Result<SpacingResult, SpacingError> {
    let method = Method::Dagan;
    require_positive(method, "hydraulic conductivity K", input.conductivity)?;
    require_positive(method, "recharge R", input.recharge)?;
    require_positive(method, "depth to impermeable layer Do", input.depth_to_barrier)?;
    require_positive(method, "wetted perimeter p", input.wetted_perimeter)?;
    require_positive(method, "head h", input.head)?;

    let quadratic = input.quadratic(method)?;
    let spacing = quadratic.spacing(method)?;
    log::debug!("{method}: L = {spacing:.3} m");
    Ok(SpacingResult::closed_form(method, spacing))
}
