use std::sync::Arc;
use tracing::{info, info_span};
use uuid::Uuid;

use crate::config::{Config, MarketConfig};
use crate::domain::{MarketSnapshot, ProductionPlanRequest};
use crate::optimizer::{DispatchEngine, DispatchError};
use crate::plan::{format_plan, ProductionPlan};

#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<ProductionPlanner>,
}

impl AppState {
    pub fn new(cfg: &Config) -> Self {
        let planner = ProductionPlanner::new(cfg.market.clone(), DispatchEngine::new(cfg.dispatch));
        Self {
            planner: Arc::new(planner),
        }
    }
}

/// Turns a validated request into a production plan
///
/// Holds configuration only. Each call builds its own market snapshot and
/// plant list, so the planner is shared freely between request handlers.
#[derive(Debug, Clone)]
pub struct ProductionPlanner {
    market: MarketConfig,
    engine: DispatchEngine,
}

impl Default for ProductionPlanner {
    fn default() -> Self {
        Self::new(MarketConfig::default(), DispatchEngine::default())
    }
}

impl ProductionPlanner {
    pub fn new(market: MarketConfig, engine: DispatchEngine) -> Self {
        Self { market, engine }
    }

    pub fn market_snapshot(&self, request: &ProductionPlanRequest) -> MarketSnapshot {
        MarketSnapshot::from_fuels(
            &request.payload.fuels,
            request.carbon,
            self.market.default_carbon_price,
            self.market.emissions,
        )
    }

    pub fn plan(&self, request: &ProductionPlanRequest) -> Result<ProductionPlan, DispatchError> {
        let payload = &request.payload;
        let span = info_span!("production_plan", request_id = %Uuid::new_v4(), load = payload.load);
        let _guard = span.enter();

        let market = self.market_snapshot(request);
        info!(
            plants = payload.powerplants.len(),
            carbon_price = market.carbon_price,
            wind_availability = market.wind_availability,
            "planning production"
        );

        let units = DispatchEngine::resolve_units(&payload.powerplants, &market)?;
        let allocation = self.engine.dispatch(payload.load, &units)?;
        let plan = format_plan(payload.load, &units, &allocation);

        info!(
            committed = allocation.committed,
            total_cost = allocation.total_cost,
            "production plan ready"
        );

        Ok(plan)
    }
}
