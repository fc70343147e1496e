use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Fuel, PlantKind};

/// Carbon price used when neither the request nor the payload provides one (€/t)
pub const DEFAULT_CARBON_PRICE: f64 = 20.0;

/// CO2 emitted per MWh of electricity produced by a gas-fired plant (t/MWh)
pub const GAS_EMISSION_T_PER_MWH: f64 = 0.3;

/// Fuel and weather section of the request payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
pub struct Fuels {
    #[serde(rename = "gas(euro/MWh)")]
    #[validate(range(min = 0.0))]
    pub gas_euro_per_mwh: f64,

    #[serde(rename = "kerosine(euro/MWh)")]
    #[validate(range(min = 0.0))]
    pub kerosine_euro_per_mwh: f64,

    #[serde(rename = "co2(euro/ton)", default)]
    #[validate(range(min = 0.0))]
    pub co2_euro_per_ton: Option<f64>,

    /// Current wind as a percentage of nameplate output
    #[serde(rename = "wind(%)")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub wind_percent: f64,
}

/// Emission factors per thermal plant kind (t CO2 per MWh electrical)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactors {
    pub gasfired: f64,
    pub turbojet: f64,
}

impl Default for EmissionFactors {
    fn default() -> Self {
        Self {
            gasfired: GAS_EMISSION_T_PER_MWH,
            turbojet: GAS_EMISSION_T_PER_MWH,
        }
    }
}

impl EmissionFactors {
    pub fn for_kind(&self, kind: PlantKind) -> f64 {
        match kind {
            PlantKind::GasFired => self.gasfired,
            PlantKind::TurboJet => self.turbojet,
            PlantKind::WindTurbine => 0.0,
        }
    }
}

/// Economic context of a single planning request
///
/// Built once per request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSnapshot {
    pub gas_price: f64,
    pub kerosine_price: f64,
    /// €/t CO2
    pub carbon_price: f64,
    /// Wind availability as a fraction of nameplate, in [0, 1]
    pub wind_availability: f64,
    pub emissions: EmissionFactors,
}

impl MarketSnapshot {
    /// Build a snapshot from payload fuels.
    ///
    /// Carbon price precedence: explicit override, then the payload's
    /// `co2(euro/ton)`, then `default_carbon_price`.
    pub fn from_fuels(
        fuels: &Fuels,
        carbon_override: Option<f64>,
        default_carbon_price: f64,
        emissions: EmissionFactors,
    ) -> Self {
        let carbon_price = carbon_override
            .or(fuels.co2_euro_per_ton)
            .unwrap_or(default_carbon_price);

        Self {
            gas_price: fuels.gas_euro_per_mwh,
            kerosine_price: fuels.kerosine_euro_per_mwh,
            carbon_price,
            wind_availability: (fuels.wind_percent / 100.0).clamp(0.0, 1.0),
            emissions,
        }
    }

    /// Price per MWh of fuel energy
    pub fn fuel_price(&self, fuel: Fuel) -> f64 {
        match fuel {
            Fuel::Gas => self.gas_price,
            Fuel::Kerosine => self.kerosine_price,
            Fuel::Wind => 0.0,
        }
    }

    pub fn emission_factor(&self, kind: PlantKind) -> f64 {
        self.emissions.for_kind(kind)
    }

    /// Fraction of nameplate capacity usable for this kind right now
    pub fn availability(&self, kind: PlantKind) -> f64 {
        if kind.is_intermittent() {
            self.wind_availability
        } else {
            1.0
        }
    }
}
