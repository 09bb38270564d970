//! Readiness endpoint

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use database::mongodb::check_health;
use serde_json::Value;

use crate::state::AppState;

type ReadyResponse = Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)>;

async fn ready(State(state): State<AppState>) -> ReadyResponse {
    let db = state.db.clone();
    let checks: Vec<(&str, HealthCheckFuture)> = vec![(
        "mongodb",
        Box::pin(async move {
            if check_health(&db).await {
                Ok(())
            } else {
                Err("ping failed".to_string())
            }
        }),
    )];

    run_health_checks(checks).await
}

/// Router serving `GET /ready`, outside `/api`
pub fn router(state: AppState) -> Router {
    Router::new().route("/ready", get(ready)).with_state(state)
}
