use super::{DispatchError, OperatingWindow};
use crate::domain::{MarketSnapshot, PowerPlant};

/// Effective `[pmin, max]` window of a plant for this request.
///
/// Intermittent plants are derated by the current availability; the result
/// may be empty (max below pmin), in which case the plant sits out.
pub fn operating_window(plant: &PowerPlant, market: &MarketSnapshot) -> Result<OperatingWindow, DispatchError> {
    if plant.pmin > plant.pmax {
        return Err(DispatchError::invalid_plant(
            &plant.name,
            format!("pmin ({}) exceeds pmax ({})", plant.pmin, plant.pmax),
        ));
    }

    let effective_max = (plant.pmax * market.availability(plant.kind)).max(0.0);
    Ok(OperatingWindow::new(plant.pmin, effective_max))
}
