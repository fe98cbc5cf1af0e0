use std::f64::consts::PI;

use crate::config::SolverConfig;
use crate::error::{SpacingError, require_positive};
use crate::geometry::{DepthParams, DerivedGeometry};
use crate::hooghoudt::{check_convergence_zone, equivalent_depth, fixed_point};
use crate::regime::Transient;
use crate::result::{Method, SpacingResult};

// Transient spacing: water table falls from ho to ht above the drain within time t
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GloverDummInput {
    pub conductivity: f64,       // K [m/day]
    pub drainable_porosity: f64, // S [-]
    pub elapsed_time: f64,       // t [day]
    pub depth_to_barrier: f64,   // Do [m]
    pub wetted_perimeter: f64,   // p [m]
    pub initial_height: f64,     // ho, water table above the drain at t = 0 [m]
    pub final_height: f64,       // ht, water table above the drain at t [m]
}

impl GloverDummInput {
    pub fn new(
        conductivity: f64,
        regime: &Transient,
        depths: &DepthParams,
        geometry: &DerivedGeometry,
    ) -> Self {
        let (initial_height, final_height) = regime.heights(depths.drain_depth, geometry.drain_offset);
        GloverDummInput {
            conductivity,
            drainable_porosity: regime.drainable_porosity,
            elapsed_time: regime.elapsed_time,
            depth_to_barrier: geometry.depth_to_barrier,
            wetted_perimeter: geometry.wetted_perimeter,
            initial_height,
            final_height,
        }
    }
}

pub fn glover_dumm(input: &GloverDummInput, config: &SolverConfig) -> Result<SpacingResult, SpacingError> {
    let method = Method::GloverDumm;
    let (ho, ht) = (input.initial_height, input.final_height);
    require_positive(method, "initial height ho", ho)?;
    require_positive(method, "final height ht", ht)?;
    if ho <= ht {
        return Err(SpacingError::domain(
            method,
            format!("water table not descending (ho = {ho:.3} m, ht = {ht:.3} m)"),
        ));
    }
    require_positive(method, "hydraulic conductivity K", input.conductivity)?;
    require_positive(method, "drainable porosity S", input.drainable_porosity)?;
    require_positive(method, "elapsed time t", input.elapsed_time)?;
    check_convergence_zone(method, input.depth_to_barrier, input.wetted_perimeter)?;

    // ho > ht keeps 1.16·ho/ht above 1
    let recession = input.drainable_porosity * (1.16 * ho / ht).ln();
    let flow = PI.powi(2) * input.conductivity * input.elapsed_time;
    fixed_point(method, config, |l| {
        let d = equivalent_depth(input.depth_to_barrier, input.wetted_perimeter, l);
        (flow * (d + (ho + ht) / 4.0) / recession).sqrt()
    })
}
