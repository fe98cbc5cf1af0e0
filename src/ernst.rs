//! Ernst's steady-state drain spacing for one or two soil layers.
//!
//! The total head is split into vertical, horizontal and radial losses, giving a
//! quadratic in the spacing `L`:
//!
//! ```text
//! D1 = Do + h/2
//! A  = R / (8·Kh·D1)
//! B  = R / (π·Kr) · ln(Do / u)
//! C  = R·(y + h) / Kv − h
//! ```
//!
//! With one layer `Kh = Kr = Kv = K`. With two layers the horizontal term uses the
//! thickness-weighted conductivity of both layers and the vertical and radial
//! terms use the lower layer's `K2`.

use std::f64::consts::PI;

use crate::error::{SpacingError, require_positive};
use crate::geometry::DerivedGeometry;
use crate::quadratic::SpacingQuadratic;
use crate::result::{Method, SpacingResult};
use crate::soil::LayeredSoil;

// Shared by both variants: everything except the conductivities
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ErnstFlow {
    pub recharge: f64,         // R [m/day]
    pub depth_to_barrier: f64, // Do [m]
    pub head: f64,             // h [m]
    pub wetted_length: f64,    // u [m]
    pub vertical_zone: f64,    // y, water depth in the drain [m]
}

impl ErnstFlow {
    pub fn new(recharge: f64, geometry: &DerivedGeometry) -> Self {
        ErnstFlow {
            recharge,
            depth_to_barrier: geometry.depth_to_barrier,
            head: geometry.head,
            wetted_length: geometry.wetted_length,
            vertical_zone: geometry.drain_offset,
        }
    }

    fn validate(&self, method: Method) -> Result<(), SpacingError> {
        require_positive(method, "recharge R", self.recharge)?;
        require_positive(method, "head h", self.head)?;
        require_positive(method, "wetted length u", self.wetted_length)?;
        require_positive(method, "depth to impermeable layer Do", self.depth_to_barrier)?;
        if !(self.vertical_zone.is_finite() && self.vertical_zone >= 0.0) {
            return Err(SpacingError::domain(
                method,
                format!("water depth y must be non-negative (got {})", self.vertical_zone),
            ));
        }
        if self.depth_to_barrier <= self.wetted_length {
            return Err(SpacingError::domain(
                method,
                format!(
                    "depth to impermeable layer ({:.3} m) must exceed the wetted length ({:.3} m)",
                    self.depth_to_barrier, self.wetted_length
                ),
            ));
        }
        Ok(())
    }

    pub fn quadratic(&self, horizontal_k: f64, radial_k: f64, vertical_k: f64) -> SpacingQuadratic {
        let r = self.recharge;
        let d1 = self.depth_to_barrier + self.head / 2.0;
        let a = r / (8.0 * horizontal_k * d1);
        let b = (r / (PI * radial_k)) * (self.depth_to_barrier / self.wetted_length).ln();
        let c = r * (self.vertical_zone + self.head) / vertical_k - self.head;
        SpacingQuadratic::new(a, b, c)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ErnstInput {
    pub conductivity: f64, // K [m/day]
    pub flow: ErnstFlow,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ErnstTwoLayerInput {
    pub layers: LayeredSoil,
    pub flow: ErnstFlow,
}

pub fn ernst(input: &ErnstInput) -> Result<SpacingResult, SpacingError> {
    let method = Method::Ernst;
    require_positive(method, "hydraulic conductivity K", input.conductivity)?;
    input.flow.validate(method)?;

    let k = input.conductivity;
    solve(method, input.flow.quadratic(k, k, k))
}

pub fn ernst_two_layer(input: &ErnstTwoLayerInput) -> Result<SpacingResult, SpacingError> {
    let method = Method::ErnstTwoLayer;
    input.layers.validate(method)?;
    input.flow.validate(method)?;

    let k2 = input.layers.bottom_conductivity();
    let quadratic = input
        .flow
        .quadratic(input.layers.effective_conductivity(), k2, k2);
    solve(method, quadratic)
}

fn solve(method: Method, quadratic: SpacingQuadratic) -> Result<SpacingResult, SpacingError> {
    log::trace!(
        "{method}: A={:.4e} B={:.4e} C={:.4e} discriminant={:.4e}",
        quadratic.a,
        quadratic.b,
        quadratic.c,
        quadratic.discriminant()
    );
    let spacing = quadratic.spacing(method)?;
    log::debug!("{method}: L = {spacing:.3} m");
    Ok(SpacingResult::closed_form(method, spacing))
}
