use tracing::{debug, warn};

use super::{
    capacity::operating_window, cost::marginal_cost, merit::merit_order, Allocation, CommitmentSearch,
    DispatchError, DispatchSettings, DispatchUnit,
};
use crate::domain::{MarketSnapshot, PowerPlant};

/// Merit-order dispatch engine
///
/// Stateless apart from its settings: every call works on request-scoped
/// data only, so one engine can serve concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct DispatchEngine {
    settings: DispatchSettings,
}

impl DispatchEngine {
    pub fn new(settings: DispatchSettings) -> Self {
        Self { settings }
    }

    /// Run the cost model and capacity resolver over every plant.
    ///
    /// The returned units keep payload order (`unit.index == position`).
    /// The first inconsistent plant aborts the whole request.
    pub fn resolve_units(plants: &[PowerPlant], market: &MarketSnapshot) -> Result<Vec<DispatchUnit>, DispatchError> {
        plants
            .iter()
            .enumerate()
            .map(|(index, plant)| {
                let unit = DispatchUnit {
                    index,
                    name: plant.name.clone(),
                    marginal_cost: marginal_cost(plant, market)?,
                    window: operating_window(plant, market)?,
                };
                debug!(
                    plant = %unit.name,
                    kind = %plant.kind,
                    marginal_cost = unit.marginal_cost,
                    pmin = unit.window.min,
                    effective_max = unit.window.max,
                    "resolved plant"
                );
                Ok(unit)
            })
            .collect()
    }

    /// Allocate `load` over `units` at minimum cost.
    ///
    /// `units` must be in payload order, as produced by [`Self::resolve_units`].
    pub fn dispatch(&self, load: f64, units: &[DispatchUnit]) -> Result<Allocation, DispatchError> {
        let eps = self.settings.epsilon;

        if !load.is_finite() || load < 0.0 {
            return Err(DispatchError::Infeasible(format!(
                "load must be a non-negative number, got {}",
                load
            )));
        }

        let ranked = merit_order(units);
        let capacity: f64 = ranked.iter().map(|u| u.window.max).sum();
        if capacity + eps < load {
            return Err(DispatchError::Infeasible(format!(
                "insufficient capacity: {:.1} MW available for a load of {:.1} MW",
                capacity, load
            )));
        }

        let outcome = CommitmentSearch::new(&ranked, load, self.settings).run();
        if outcome.exhausted {
            warn!(
                visited = outcome.visited,
                found = outcome.best.is_some(),
                "commitment search budget exhausted, using best set found"
            );
        }

        let commitment = outcome.best.ok_or_else(|| {
            DispatchError::Infeasible(format!(
                "no combination of plants can produce exactly {:.1} MW within their minimum stable generation",
                load
            ))
        })?;

        if let Some(greedy_cost) = outcome.greedy_cost {
            if commitment.cost + eps < greedy_cost {
                debug!(greedy_cost, cost = commitment.cost, "backtracking improved on greedy commitment");
            }
        } else {
            debug!("greedy commitment infeasible, backtracked");
        }

        let mut outputs = vec![0.0; units.len()];
        for (&member, &output) in commitment.members.iter().zip(&commitment.outputs) {
            if let Some(slot) = outputs.get_mut(ranked[member].index) {
                *slot = output;
            }
        }

        let allocation = Allocation {
            committed: outputs.iter().filter(|p| **p > 0.0).count(),
            total_cost: commitment.cost,
            outputs,
        };
        self.verify(load, units, &allocation)?;

        Ok(allocation)
    }

    /// Final guard: never hand out an allocation that breaks an invariant
    fn verify(&self, load: f64, units: &[DispatchUnit], allocation: &Allocation) -> Result<(), DispatchError> {
        let tolerance = self.settings.epsilon * (units.len().max(1) as f64);

        let total = allocation.total_output();
        if (total - load).abs() > tolerance {
            return Err(DispatchError::Infeasible(format!(
                "allocation sums to {:.3} MW instead of {:.3} MW",
                total, load
            )));
        }

        for (unit, &p) in units.iter().zip(&allocation.outputs) {
            if p > 0.0 && !unit.window.contains(p, tolerance) {
                return Err(DispatchError::Infeasible(format!(
                    "plant '{}' assigned {:.3} MW outside its window [{:.3}, {:.3}]",
                    unit.name, p, unit.window.min, unit.window.max
                )));
            }
        }

        Ok(())
    }
}
