mod config;
mod dagan;
mod design;
mod donnan;
mod error;
mod ernst;
mod geometry;
mod glover_dumm;
mod hooghoudt;
mod quadratic;
mod regime;
mod result;
mod soil;

pub use config::SolverConfig;
pub use dagan::{DaganInput, dagan};
pub use design::DrainageDesign;
pub use donnan::{DonnanInput, donnan};
pub use error::{ConfigError, SpacingError, SpacingOutcome};
pub use ernst::{ErnstFlow, ErnstInput, ErnstTwoLayerInput, ernst, ernst_two_layer};
pub use geometry::{DepthParams, DerivedGeometry, DrainGeometry, resolve};
pub use glover_dumm::{GloverDummInput, glover_dumm};
pub use hooghoudt::{HooghoudtInput, hooghoudt};
pub use quadratic::SpacingQuadratic;
pub use regime::{Regime, SteadyState, Transient};
pub use result::{Method, SpacingResult, Status};
pub use soil::{LayeredSoil, SoilCatalog, SoilProfile, SoilProperties};
