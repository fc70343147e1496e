use utoipa::OpenApi;

use crate::api::error::ErrorResponse;
use crate::domain::{Fuels, Payload, PlantKind, PowerPlant, ProductionPlanRequest};
use crate::plan::PlanEntry;

#[derive(OpenApi)]
#[openapi(
    paths(crate::api::production_plan::production_plan),
    components(
        schemas(ProductionPlanRequest, Payload, Fuels, PowerPlant, PlantKind, PlanEntry, ErrorResponse)
    ),
    tags((name = "production-planner", description = "Merit-order production plan API"))
)]
pub struct ApiDoc;
