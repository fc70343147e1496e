//! Load testing for the production planner
//!
//! The planner holds no per-request state, so concurrent requests must
//! produce exactly the plan a single request would.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use tokio::task::JoinSet;
use tower::ServiceExt;

use production_planner::api;
use production_planner::config::Config;
use production_planner::controller::{AppState, ProductionPlanner};
use production_planner::domain::ProductionPlanRequest;
use production_planner::plan::ProductionPlan;

fn request(load: f64, wind_percent: f64) -> ProductionPlanRequest {
    serde_json::from_value(serde_json::json!({
        "payload": {
            "load": load,
            "fuels": {
                "gas(euro/MWh)": 13.4,
                "kerosine(euro/MWh)": 50.8,
                "co2(euro/ton)": 20,
                "wind(%)": wind_percent
            },
            "powerplants": [
                {"name": "gasfiredbig1", "type": "gasfired", "efficiency": 0.53, "pmin": 100, "pmax": 460},
                {"name": "gasfiredbig2", "type": "gasfired", "efficiency": 0.53, "pmin": 100, "pmax": 460},
                {"name": "gasfiredsomewhatsmaller", "type": "gasfired", "efficiency": 0.37, "pmin": 40, "pmax": 210},
                {"name": "tj1", "type": "turbojet", "efficiency": 0.3, "pmin": 0, "pmax": 16},
                {"name": "windpark1", "type": "windturbine", "efficiency": 1, "pmin": 0, "pmax": 150},
                {"name": "windpark2", "type": "windturbine", "efficiency": 1, "pmin": 0, "pmax": 36}
            ]
        }
    }))
    .unwrap()
}

/// Test: Concurrent planning matches sequential planning
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_plans_are_identical() {
    let planner = Arc::new(ProductionPlanner::default());
    let expected: Vec<ProductionPlan> = [480.0, 910.0]
        .iter()
        .map(|&load| planner.plan(&request(load, 60.0)).unwrap())
        .collect();

    let mut tasks = JoinSet::new();
    for i in 0..64 {
        let planner = Arc::clone(&planner);
        tasks.spawn(async move {
            let which = i % 2;
            let load = if which == 0 { 480.0 } else { 910.0 };
            (which, planner.plan(&request(load, 60.0)).unwrap())
        });
    }

    while let Some(result) = tasks.join_next().await {
        let (which, plan) = result.expect("planning task should not panic");
        assert_eq!(plan, expected[which]);
    }
}

/// Test: Concurrent HTTP clients against one router
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore] // Ignore by default as this is a slow test
async fn test_concurrent_http_clients() {
    let cfg = Config::default();
    let app = api::router(AppState::new(&cfg), &cfg);
    let body = serde_json::json!({
        "payload": {
            "load": 910,
            "fuels": {"gas(euro/MWh)": 13.4, "kerosine(euro/MWh)": 50.8, "co2(euro/ton)": 20, "wind(%)": 60},
            "powerplants": [
                {"name": "gasfiredbig1", "type": "gasfired", "efficiency": 0.53, "pmin": 100, "pmax": 460},
                {"name": "windpark1", "type": "windturbine", "efficiency": 1, "pmin": 0, "pmax": 150},
                {"name": "tj1", "type": "turbojet", "efficiency": 0.3, "pmin": 0, "pmax": 400}
            ]
        }
    })
    .to_string();

    let mut clients = JoinSet::new();
    for _ in 0..50 {
        let app = app.clone();
        let body = body.clone();
        clients.spawn(async move {
            for _ in 0..20 {
                let response = app
                    .clone()
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/productionplan")
                            .header("content-type", "application/json")
                            .body(Body::from(body.clone()))
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                assert_eq!(response.status(), StatusCode::OK);
            }
        });
    }

    while let Some(result) = clients.join_next().await {
        result.expect("client should complete without panic");
    }
}

/// Benchmark: Throughput of the planner on a wide fleet
///
/// Forty thermal plants with binding minimums force the commitment search
/// to do real work on every request.
#[tokio::test]
#[ignore] // Ignore by default as this is a slow test
async fn test_throughput_benchmark() {
    let plants: Vec<serde_json::Value> = (0..40)
        .map(|i| {
            serde_json::json!({
                "name": format!("gas{i:02}"),
                "type": "gasfired",
                "efficiency": 0.35 + (i as f64) * 0.005,
                "pmin": 20 + (i % 7) * 5,
                "pmax": 80 + (i % 5) * 20
            })
        })
        .collect();
    let request: ProductionPlanRequest = serde_json::from_value(serde_json::json!({
        "payload": {
            "load": 1234.5,
            "fuels": {"gas(euro/MWh)": 13.4, "kerosine(euro/MWh)": 50.8, "co2(euro/ton)": 20, "wind(%)": 0},
            "powerplants": plants
        }
    }))
    .unwrap();

    let planner = ProductionPlanner::default();
    let start = Instant::now();
    let mut plans = 0u32;

    while start.elapsed() < Duration::from_secs(3) {
        let plan = planner.plan(&request).unwrap();
        assert!((plan.total() - 1234.5).abs() < 0.05);
        plans += 1;
    }

    let elapsed = start.elapsed();
    let per_second = plans as f64 / elapsed.as_secs_f64();
    println!("Throughput: {:.0} plans/second ({} plans in {:?})", per_second, plans, elapsed);

    assert!(per_second > 10.0, "Throughput too low: {:.0} plans/s", per_second);
}
