//! Cost model: €/MWh of electrical output per plant.

use super::DispatchError;
use crate::domain::{MarketSnapshot, PowerPlant};

/// Marginal cost of one MWh produced by `plant` under `market`.
///
/// Thermal plants pay fuel divided by efficiency plus the carbon cost of
/// their emissions. Intermittent plants are free.
pub fn marginal_cost(plant: &PowerPlant, market: &MarketSnapshot) -> Result<f64, DispatchError> {
    if plant.kind.is_intermittent() {
        return Ok(0.0);
    }

    let efficiency = plant
        .efficiency
        .ok_or_else(|| DispatchError::invalid_plant(&plant.name, "efficiency is required for thermal plants"))?;
    if !efficiency.is_finite() || efficiency <= 0.0 {
        return Err(DispatchError::invalid_plant(
            &plant.name,
            format!("efficiency must be positive, got {}", efficiency),
        ));
    }

    let fuel = market.fuel_price(plant.kind.fuel()) / efficiency;
    let carbon = market.carbon_price * market.emission_factor(plant.kind);
    Ok(fuel + carbon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmissionFactors, PlantKind};
    use rstest::rstest;

    fn market() -> MarketSnapshot {
        MarketSnapshot {
            gas_price: 13.4,
            kerosine_price: 50.8,
            carbon_price: 20.0,
            wind_availability: 0.6,
            emissions: EmissionFactors::default(),
        }
    }

    #[rstest]
    #[case(PlantKind::GasFired, 0.53, 13.4 / 0.53 + 6.0)]
    #[case(PlantKind::GasFired, 0.37, 13.4 / 0.37 + 6.0)]
    #[case(PlantKind::TurboJet, 0.3, 50.8 / 0.3 + 6.0)]
    #[case(PlantKind::WindTurbine, 1.0, 0.0)]
    fn test_marginal_cost(#[case] kind: PlantKind, #[case] efficiency: f64, #[case] expected: f64) {
        let plant = PowerPlant::new("p", kind, efficiency, 0.0, 100.0);
        let cost = marginal_cost(&plant, &market()).unwrap();
        assert!((cost - expected).abs() < 1e-9, "{} != {}", cost, expected);
    }

    #[test]
    fn test_zero_efficiency_is_invalid() {
        let plant = PowerPlant::new("gasfiredbig1", PlantKind::GasFired, 0.0, 100.0, 460.0);
        let err = marginal_cost(&plant, &market()).unwrap_err();
        assert!(matches!(err, DispatchError::InvalidPlant { ref name, .. } if name == "gasfiredbig1"));
    }

    #[test]
    fn test_missing_efficiency_is_invalid_for_thermal() {
        let mut plant = PowerPlant::new("tj1", PlantKind::TurboJet, 0.3, 0.0, 16.0);
        plant.efficiency = None;
        assert!(marginal_cost(&plant, &market()).is_err());
    }

    #[test]
    fn test_wind_ignores_efficiency() {
        let mut plant = PowerPlant::new("windpark1", PlantKind::WindTurbine, 0.0, 0.0, 150.0);
        plant.efficiency = None;
        assert_eq!(marginal_cost(&plant, &market()).unwrap(), 0.0);
    }

    #[test]
    fn test_identical_plants_have_identical_cost() {
        let a = PowerPlant::new("a", PlantKind::GasFired, 0.53, 100.0, 460.0);
        let b = PowerPlant::new("b", PlantKind::GasFired, 0.53, 40.0, 210.0);
        assert_eq!(
            marginal_cost(&a, &market()).unwrap(),
            marginal_cost(&b, &market()).unwrap()
        );
    }
}
