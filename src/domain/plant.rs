use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::Validate;

/// Generation technology of a power plant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlantKind {
    /// Combined-cycle gas plant
    GasFired,
    /// Kerosine-burning turbojet (peaker)
    TurboJet,
    /// Wind farm, output limited by current wind
    WindTurbine,
}

/// Energy carrier consumed by a plant kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Fuel {
    Gas,
    Kerosine,
    Wind,
}

impl PlantKind {
    pub fn fuel(&self) -> Fuel {
        match self {
            PlantKind::GasFired => Fuel::Gas,
            PlantKind::TurboJet => Fuel::Kerosine,
            PlantKind::WindTurbine => Fuel::Wind,
        }
    }

    /// Intermittent kinds have no fuel cost and a weather-dependent ceiling
    pub fn is_intermittent(&self) -> bool {
        matches!(self, PlantKind::WindTurbine)
    }
}

/// A generation unit as described in the request payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
pub struct PowerPlant {
    /// Unique within a request
    #[validate(length(min = 1, message = "plant name must not be empty"))]
    pub name: String,

    #[serde(rename = "type")]
    pub kind: PlantKind,

    /// Fuel-to-electricity conversion ratio, (0, 1] for thermal kinds
    #[serde(default)]
    #[validate(range(min = 0.0, max = 1.0))]
    pub efficiency: Option<f64>,

    /// Minimum stable generation (MW)
    #[validate(range(min = 0.0))]
    pub pmin: f64,

    /// Nameplate capacity (MW)
    #[validate(range(min = 0.0))]
    pub pmax: f64,
}

impl PowerPlant {
    pub fn new(name: impl Into<String>, kind: PlantKind, efficiency: f64, pmin: f64, pmax: f64) -> Self {
        Self {
            name: name.into(),
            kind,
            efficiency: Some(efficiency),
            pmin,
            pmax,
        }
    }
}
