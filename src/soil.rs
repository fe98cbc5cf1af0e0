use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, SpacingError, require_positive};
use crate::result::Method;

const BUILTIN_CATALOG: &str = include_str!("../soil_parameters.toml");
const DEFAULT_TEXTURE: &str = "loam";

// Hydraulic properties of one soil texture
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SoilProperties {
    pub conductivity: f64,       // Saturated hydraulic conductivity K [m/day]
    pub drainable_porosity: f64, // Drainable porosity S [-]
}

// Named soil textures, keyed by lowercase name
#[derive(Clone, Debug, PartialEq)]
pub struct SoilCatalog {
    soils: BTreeMap<String, SoilProperties>,
}

impl SoilCatalog {
    // The table shipped in soil_parameters.toml
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let raw: BTreeMap<String, SoilProperties> = toml::from_str(toml_str)?;
        let mut soils = BTreeMap::new();
        for (name, props) in raw {
            for (field, value) in [
                ("conductivity", props.conductivity),
                ("drainable_porosity", props.drainable_porosity),
            ] {
                if !(value.is_finite() && value > 0.0) {
                    return Err(ConfigError::InvalidValue {
                        field,
                        value,
                        reason: "soil properties must be positive",
                    });
                }
            }
            soils.insert(name.to_lowercase(), props);
        }
        Ok(SoilCatalog { soils })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let toml_str = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&toml_str)
    }

    // Case-insensitive lookup; spaces match underscores and an empty name means loam
    pub fn get(&self, soil_name: &str) -> Result<SoilProperties, ConfigError> {
        let mut key = soil_name.trim().to_lowercase().replace(' ', "_");
        if key.is_empty() {
            key = DEFAULT_TEXTURE.to_string();
        }
        self.soils
            .get(&key)
            .copied()
            .ok_or_else(|| ConfigError::UnknownSoil(soil_name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.soils.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.soils.len()
    }

    pub fn is_empty(&self) -> bool {
        self.soils.is_empty()
    }
}

// Two soil layers, index 0 on top
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayeredSoil {
    conductivity: Vector2<f64>, // K1, K2 [m/day]
    thickness: Vector2<f64>,    // d1, d2 [m]
}

impl LayeredSoil {
    pub fn new(k1: f64, k2: f64, d1: f64, d2: f64) -> Self {
        LayeredSoil {
            conductivity: Vector2::new(k1, k2),
            thickness: Vector2::new(d1, d2),
        }
    }

    pub fn top_conductivity(&self) -> f64 {
        self.conductivity.x
    }

    pub fn bottom_conductivity(&self) -> f64 {
        self.conductivity.y
    }

    // Sum of K_i * d_i [m²/day]
    pub fn transmissivity(&self) -> f64 {
        self.conductivity.dot(&self.thickness)
    }

    // Thickness-weighted mean conductivity [m/day]
    pub fn effective_conductivity(&self) -> f64 {
        self.transmissivity() / self.thickness.sum()
    }

    pub(crate) fn validate(&self, method: Method) -> Result<(), SpacingError> {
        require_positive(method, "K1", self.conductivity.x)?;
        require_positive(method, "K2", self.conductivity.y)?;
        require_positive(method, "d1", self.thickness.x)?;
        require_positive(method, "d2", self.thickness.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SoilProfile {
    Uniform { conductivity: f64 },
    TwoLayer(LayeredSoil),
}

impl SoilProfile {
    pub fn uniform(conductivity: f64) -> Self {
        SoilProfile::Uniform { conductivity }
    }

    pub fn two_layer(k1: f64, k2: f64, d1: f64, d2: f64) -> Self {
        SoilProfile::TwoLayer(LayeredSoil::new(k1, k2, d1, d2))
    }

    // Uniform profile from a catalog texture
    pub fn from_catalog(catalog: &SoilCatalog, soil_name: &str) -> Result<Self, ConfigError> {
        Ok(SoilProfile::uniform(catalog.get(soil_name)?.conductivity))
    }

    // Single conductivity seen by the one-layer formulations
    pub fn conductivity(&self) -> f64 {
        match self {
            SoilProfile::Uniform { conductivity } => *conductivity,
            SoilProfile::TwoLayer(layers) => layers.effective_conductivity(),
        }
    }

    pub fn layers(&self) -> Option<&LayeredSoil> {
        match self {
            SoilProfile::Uniform { .. } => None,
            SoilProfile::TwoLayer(layers) => Some(layers),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn builtin_catalog_loads() {
        let catalog = SoilCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 7);
        let loam = catalog.get("loam").unwrap();
        assert_relative_eq!(loam.conductivity, 0.5);
        assert_relative_eq!(loam.drainable_porosity, 0.08);
    }

    #[test]
    fn lookup_is_forgiving() {
        let catalog = SoilCatalog::builtin().unwrap();
        assert_eq!(catalog.get("Sandy Loam").unwrap(), catalog.get("sandy_loam").unwrap());
        assert_eq!(catalog.get("").unwrap(), catalog.get("loam").unwrap());
    }

    #[test]
    fn unknown_soil() {
        let catalog = SoilCatalog::builtin().unwrap();
        let err = catalog.get("peat").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownSoil(name) if name == "peat"));
    }

    #[test]
    fn rejects_non_positive_properties() {
        let toml_str = "[mud]\nconductivity = 0.0\ndrainable_porosity = 0.1\n";
        assert!(matches!(
            SoilCatalog::from_toml_str(toml_str),
            Err(ConfigError::InvalidValue {
                field: "conductivity",
                ..
            })
        ));
    }

    #[test]
    fn custom_catalog_names_are_lowercased() {
        let toml_str = "[Peat]\nconductivity = 0.8\ndrainable_porosity = 0.3\n";
        let catalog = SoilCatalog::from_toml_str(toml_str).unwrap();
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["peat"]);
        let profile = SoilProfile::from_catalog(&catalog, "PEAT").unwrap();
        assert_relative_eq!(profile.conductivity(), 0.8);
    }

    #[test]
    fn layered_transmissivity() {
        let layers = LayeredSoil::new(0.8, 2.0, 1.0, 1.0);
        assert_relative_eq!(layers.transmissivity(), 2.8);
        assert_relative_eq!(layers.effective_conductivity(), 1.4);
        assert_relative_eq!(SoilProfile::TwoLayer(layers).conductivity(), 1.4);
    }

    #[test]
    fn equal_layers_match_uniform() {
        let profile = SoilProfile::two_layer(1.2, 1.2, 0.7, 2.3);
        assert_relative_eq!(profile.conductivity(), 1.2, epsilon = 1e-12);
    }

    #[test]
    fn layer_validation() {
        assert!(LayeredSoil::new(0.8, 2.0, 1.0, 1.0).validate(Method::ErnstTwoLayer).is_ok());
        assert!(LayeredSoil::new(0.8, 2.0, 0.0, 1.0).validate(Method::ErnstTwoLayer).is_err());
    }
}
