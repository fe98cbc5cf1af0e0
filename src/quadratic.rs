use crate::error::SpacingError;
use crate::result::Method;

// A·L² + B·L + C = 0 in the drain spacing L
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpacingQuadratic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl SpacingQuadratic {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        SpacingQuadratic { a, b, c }
    }

    pub fn discriminant(&self) -> f64 {
        self.b.powi(2) - 4.0 * self.a * self.c
    }

    pub fn eval(&self, l: f64) -> f64 {
        (self.a * l + self.b) * l + self.c
    }

    // Physically admissible spacing: the (-B + sqrt Δ)/2A root when positive, else the other one
    pub fn spacing(&self, method: Method) -> Result<f64, SpacingError> {
        if !(self.a.is_finite() && self.b.is_finite() && self.c.is_finite()) || self.a == 0.0 {
            return Err(SpacingError::domain(
                method,
                format!(
                    "degenerate quadratic coefficients (A={}, B={}, C={})",
                    self.a, self.b, self.c
                ),
            ));
        }

        let discriminant = self.discriminant();
        if !discriminant.is_finite() {
            return Err(SpacingError::domain(
                method,
                format!("discriminant overflows (A={}, B={}, C={})", self.a, self.b, self.c),
            ));
        }
        if discriminant < 0.0 {
            return Err(SpacingError::no_real_solution(
                method,
                format!("negative discriminant ({discriminant:.4e})"),
            ));
        }

        let root = discriminant.sqrt();
        let l_pos = (-self.b + root) / (2.0 * self.a);
        let l_neg = (-self.b - root) / (2.0 * self.a);
        log::trace!("{method}: roots {l_pos:.4} and {l_neg:.4}");

        let selected = if l_pos > 0.0 {
            l_pos
        } else if l_neg > 0.0 {
            l_neg
        } else {
            return Err(SpacingError::no_real_solution(
                method,
                format!("no positive root (roots {l_pos:.4} and {l_neg:.4})"),
            ));
        };
        if !selected.is_finite() {
            return Err(SpacingError::domain(
                method,
                format!("spacing overflows (A={})", self.a),
            ));
        }
        Ok(selected)
    }
}
