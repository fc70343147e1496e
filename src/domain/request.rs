use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use validator::{Validate, ValidationError};

use super::{Fuels, PowerPlant};

/// Load, market and plant description for one planning request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[validate(schema(function = "unique_plant_names"))]
pub struct Payload {
    /// Total power to produce (MW)
    #[validate(range(min = 0.0))]
    pub load: f64,

    #[validate(nested)]
    pub fuels: Fuels,

    #[validate(length(min = 1, message = "at least one power plant is required"), nested)]
    pub powerplants: Vec<PowerPlant>,
}

/// Body of `POST /productionplan`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
pub struct ProductionPlanRequest {
    #[validate(nested)]
    pub payload: Payload,

    /// Carbon price override (€/t), takes precedence over `co2(euro/ton)`
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub carbon: Option<f64>,
}

fn unique_plant_names(payload: &Payload) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(payload.powerplants.len());
    for plant in &payload.powerplants {
        if !seen.insert(plant.name.as_str()) {
            let mut err = ValidationError::new("duplicate_plant_name");
            err.message = Some(format!("power plant name '{}' is used more than once", plant.name).into());
            return Err(err);
        }
    }
    Ok(())
}
