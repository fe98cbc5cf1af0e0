use std::f64::consts::PI;

use crate::error::SpacingError;

// Cross-section of the drain
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrainGeometry {
    Trench {
        bed_width: f64,   // Bed width b [m]
        water_depth: f64, // Water depth in the trench y [m]
        side_slope: f64,  // Side slope Z (horizontal/vertical) [-]
    },
    Pipe {
        radius: f64, // Drain pipe radius r [m]
    },
}

impl DrainGeometry {
    pub fn trench(bed_width: f64, water_depth: f64, side_slope: f64) -> Self {
        DrainGeometry::Trench {
            bed_width,
            water_depth,
            side_slope,
        }
    }

    pub fn pipe(radius: f64) -> Self {
        DrainGeometry::Pipe { radius }
    }

    fn validate(&self) -> Result<(), SpacingError> {
        match *self {
            DrainGeometry::Trench {
                bed_width,
                water_depth,
                side_slope,
            } => {
                positive_length("bed width b", bed_width)?;
                positive_length("water depth y", water_depth)?;
                if !(side_slope.is_finite() && side_slope >= 0.0) {
                    return Err(SpacingError::geometry(format!(
                        "side slope Z must be non-negative (got {side_slope})"
                    )));
                }
                Ok(())
            }
            DrainGeometry::Pipe { radius } => positive_length("radius r", radius),
        }
    }

    // Height of the drain's water level above its installation depth (y or r) [m]
    pub fn offset(&self) -> f64 {
        match *self {
            DrainGeometry::Trench { water_depth, .. } => water_depth,
            DrainGeometry::Pipe { radius } => radius,
        }
    }
}

// Depths measured from the soil surface
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepthParams {
    pub drain_depth: f64,       // Drain installation depth PZ [m]
    pub impermeable_depth: f64, // Depth of the impermeable layer [m]
    pub target_height: f64,     // Desired residual water table height NFd [m]
}

impl DepthParams {
    pub fn new(drain_depth: f64, impermeable_depth: f64, target_height: f64) -> Self {
        DepthParams {
            drain_depth,
            impermeable_depth,
            target_height,
        }
    }

    fn validate(&self) -> Result<(), SpacingError> {
        for (name, value) in [
            ("drain depth", self.drain_depth),
            ("impermeable layer depth", self.impermeable_depth),
            ("target water table height", self.target_height),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SpacingError::geometry(format!(
                    "{name} must be non-negative (got {value})"
                )));
            }
        }
        if self.impermeable_depth <= self.drain_depth {
            return Err(SpacingError::geometry(format!(
                "impermeable layer ({} m) must lie below the drain ({} m)",
                self.impermeable_depth, self.drain_depth
            )));
        }
        Ok(())
    }
}

/// Quantities every spacing formula is written in terms of.
///
/// Built once per request by [`resolve`] and never modified.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DerivedGeometry {
    pub wetted_perimeter: f64, // p [m]
    pub depth_to_barrier: f64, // Do, impermeable layer to drain [m]
    pub head: f64,             // h, effective hydraulic head [m]
    pub wetted_length: f64,    // u, equivalent wetted length [m]
    pub total_head: f64,       // H = impermeable depth - NFd [m]
    pub drain_offset: f64,     // y for trenches, r for pipes [m]
}

// Derive p, Do, h, u and H from the drain cross-section and depths
pub fn resolve(geometry: &DrainGeometry, depths: &DepthParams) -> Result<DerivedGeometry, SpacingError> {
    geometry.validate()?;
    depths.validate()?;

    let (wetted_perimeter, wetted_length) = match *geometry {
        DrainGeometry::Trench {
            bed_width,
            water_depth,
            side_slope,
        } => {
            let p = bed_width + 2.0 * water_depth * (1.0 + side_slope.powi(2)).sqrt();
            (p, p)
        }
        DrainGeometry::Pipe { radius } => (PI * radius, 4.0 * radius),
    };

    let drain_offset = geometry.offset();
    let total_head = depths.impermeable_depth - depths.target_height;
    let depth_to_barrier = depths.impermeable_depth - depths.drain_depth + drain_offset;
    let head = total_head - depth_to_barrier;

    if depth_to_barrier <= 0.0 {
        return Err(SpacingError::geometry(format!(
            "depth from impermeable layer to drain must be positive (Do = {depth_to_barrier})"
        )));
    }

    let derived = DerivedGeometry {
        wetted_perimeter,
        depth_to_barrier,
        head,
        wetted_length,
        total_head,
        drain_offset,
    };
    log::debug!(
        "resolved drain geometry: p={:.3} Do={:.3} h={:.3} u={:.3} H={:.3}",
        derived.wetted_perimeter,
        derived.depth_to_barrier,
        derived.head,
        derived.wetted_length,
        derived.total_head
    );
    Ok(derived)
}

fn positive_length(name: &str, value: f64) -> Result<(), SpacingError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SpacingError::geometry(format!(
            "{name} must be positive (got {value})"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn depths() -> DepthParams {
        DepthParams::new(1.5, 4.8, 1.0)
    }

    #[test]
    fn trench_geometry() {
        let g = resolve(&DrainGeometry::trench(0.5, 0.2, 1.0), &depths()).unwrap();
        assert_relative_eq!(g.wetted_perimeter, 0.5 + 0.4 * 2f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(g.wetted_length, g.wetted_perimeter);
        assert_relative_eq!(g.depth_to_barrier, 3.5, epsilon = 1e-12);
        assert_relative_eq!(g.total_head, 3.8, epsilon = 1e-12);
        assert_relative_eq!(g.head, 0.3, epsilon = 1e-12);
        assert_relative_eq!(g.drain_offset, 0.2);
    }

    #[test]
    fn vertical_trench_walls() {
        let g = resolve(&DrainGeometry::trench(0.5, 0.2, 0.0), &depths()).unwrap();
        assert_relative_eq!(g.wetted_perimeter, 0.9, epsilon = 1e-12);
    }

    #[test]
    fn pipe_geometry() {
        let g = resolve(&DrainGeometry::pipe(0.1), &depths()).unwrap();
        assert_relative_eq!(g.wetted_perimeter, PI * 0.1, epsilon = 1e-12);
        assert_relative_eq!(g.wetted_length, 0.4, epsilon = 1e-12);
        assert_relative_eq!(g.depth_to_barrier, 3.4, epsilon = 1e-12);
        assert_relative_eq!(g.head, 0.4, epsilon = 1e-12);
    }

    #[test]
    fn head_is_total_head_minus_depth() {
        let g = resolve(&DrainGeometry::pipe(0.05), &DepthParams::new(2.0, 6.0, 1.2)).unwrap();
        assert_relative_eq!(g.head, g.total_head - g.depth_to_barrier, epsilon = 1e-12);
    }

    #[test]
    fn rejects_non_positive_lengths() {
        assert!(resolve(&DrainGeometry::pipe(0.0), &depths()).is_err());
        assert!(resolve(&DrainGeometry::trench(0.5, -0.1, 1.0), &depths()).is_err());
        assert!(resolve(&DrainGeometry::trench(0.5, 0.2, -1.0), &depths()).is_err());
        assert!(resolve(&DrainGeometry::pipe(f64::NAN), &depths()).is_err());
    }

    #[test]
    fn impermeable_layer_must_be_below_drain() {
        let err = resolve(&DrainGeometry::pipe(0.1), &DepthParams::new(2.0, 2.0, 0.5)).unwrap_err();
        assert!(matches!(err, SpacingError::Geometry { .. }));
    }

    #[test]
    fn target_below_drain_leaves_negative_head() {
        // H = 4.8 - 1.5 = 3.3 < Do = 3.4; each method decides what that means
        let g = resolve(&DrainGeometry::pipe(0.1), &DepthParams::new(1.5, 4.8, 1.5)).unwrap();
        assert_relative_eq!(g.head, -0.1, epsilon = 1e-12);
        assert!(g.total_head < g.depth_to_barrier);
    }
}
