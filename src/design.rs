use crate::config::SolverConfig;
use crate::dagan::{DaganInput, dagan};
use crate::donnan::{DonnanInput, donnan};
use crate::error::{SpacingError, SpacingOutcome};
use crate::ernst::{ErnstFlow, ErnstInput, ErnstTwoLayerInput, ernst, ernst_two_layer};
use crate::geometry::{DepthParams, DerivedGeometry, DrainGeometry, resolve};
use crate::glover_dumm::{GloverDummInput, glover_dumm};
use crate::hooghoudt::{HooghoudtInput, hooghoudt};
use crate::regime::Regime;
use crate::result::{Method, SpacingResult};
use crate::soil::SoilProfile;

// One drainage design: drain cross-section, depths, soil and flow regime
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrainageDesign {
    pub geometry: DrainGeometry,
    pub depths: DepthParams,
    pub soil: SoilProfile,
    pub regime: Regime,
}

impl Default for DrainageDesign {
    // Open trench, uniform soil (K = 1.2 m/day), 10 mm/day recharge
    fn default() -> Self {
        DrainageDesign {
            geometry: DrainGeometry::trench(0.5, 0.2, 1.0),
            depths: DepthParams::new(1.5, 4.8, 1.0),
            soil: SoilProfile::uniform(1.2),
            regime: Regime::steady(0.01),
        }
    }
}

impl DrainageDesign {
    pub fn new(geometry: DrainGeometry, depths: DepthParams, soil: SoilProfile, regime: Regime) -> Self {
        DrainageDesign {
            geometry,
            depths,
            soil,
            regime,
        }
    }

    pub fn resolve(&self) -> Result<DerivedGeometry, SpacingError> {
        resolve(&self.geometry, &self.depths)
    }

    // Methods that apply to this regime and soil profile
    pub fn methods(&self) -> Vec<Method> {
        match self.regime {
            Regime::Transient(_) => vec![Method::GloverDumm],
            Regime::Steady(_) => {
                let ernst = if self.soil.layers().is_some() {
                    Method::ErnstTwoLayer
                } else {
                    Method::Ernst
                };
                vec![Method::Donnan, Method::Hooghoudt, ernst, Method::Dagan]
            }
        }
    }

    pub fn evaluate(&self, method: Method, config: &SolverConfig) -> SpacingOutcome {
        let geometry = self.resolve().map_err(|err| err.for_method(method))?;
        let k = self.soil.conductivity();

        match method {
            Method::Donnan => {
                let r = self.regime.recharge(method)?;
                donnan(&DonnanInput::new(k, r, &geometry))
            }
            Method::Hooghoudt => {
                let r = self.regime.recharge(method)?;
                hooghoudt(&HooghoudtInput::new(k, r, &geometry), config)
            }
            Method::Ernst => {
                let r = self.regime.recharge(method)?;
                ernst(&ErnstInput {
                    conductivity: k,
                    flow: ErnstFlow::new(r, &geometry),
                })
            }
            Method::ErnstTwoLayer => {
                let r = self.regime.recharge(method)?;
                let layers = self.soil.layers().ok_or_else(|| {
                    SpacingError::domain(method, "two-layer Ernst needs a two-layer soil profile")
                })?;
                ernst_two_layer(&ErnstTwoLayerInput {
                    layers: *layers,
                    flow: ErnstFlow::new(r, &geometry),
                })
            }
            Method::Dagan => {
                let r = self.regime.recharge(method)?;
                dagan(&DaganInput::new(k, r, &geometry))
            }
            Method::GloverDumm => {
                let transient = self.regime.transient(method)?;
                transient.validate(method)?;
                let input = GloverDummInput::new(k, transient, &self.depths, &geometry);
                glover_dumm(&input, config)
            }
        }
    }

    // Every applicable method side by side; failures become results carrying their status
    pub fn evaluate_all(&self, config: &SolverConfig) -> Vec<SpacingResult> {
        self.methods()
            .into_iter()
            .map(|method| {
                let result = match self.evaluate(method, config) {
                    Ok(result) => result,
                    Err(err) => SpacingResult::failed(method, &err),
                };
                log::info!("{result}");
                result
            })
            .collect()
    }
}
