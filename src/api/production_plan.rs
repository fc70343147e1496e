use axum::{extract::rejection::JsonRejection, extract::State, Json};
use validator::Validate;

use crate::{
    api::error::ApiError,
    controller::AppState,
    domain::ProductionPlanRequest,
    plan::ProductionPlan,
};

/// POST /productionplan - Compute the production plan for a load
#[cfg_attr(
    feature = "swagger",
    utoipa::path(
        post,
        path = "/productionplan",
        request_body = ProductionPlanRequest,
        responses(
            (status = 200, description = "Output per plant, in payload order", body = [crate::plan::PlanEntry]),
            (status = 400, description = "Malformed or invalid payload", body = crate::api::error::ErrorResponse),
            (status = 422, description = "No feasible plan for this load", body = crate::api::error::ErrorResponse)
        )
    )
)]
pub async fn production_plan(
    State(st): State<AppState>,
    body: Result<Json<ProductionPlanRequest>, JsonRejection>,
) -> Result<Json<ProductionPlan>, ApiError> {
    let Json(request) = body?;
    request.validate()?;

    tracing::info!(
        load = request.payload.load,
        plants = request.payload.powerplants.len(),
        "production plan requested"
    );

    let plan = st.planner.plan(&request)?;
    Ok(Json(plan))
}
