use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use super::{fuel, load, AppState};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/load/calculate", post(load::calculate))
        .route("/load/equipment", post(load::equipment))
        .route("/fuel/solid", post(fuel::solid))
        .route("/fuel/mazut", post(fuel::mazut))
        .route("/healthz", get(healthz))
        .with_state(state)
}

pub async fn healthz() -> impl IntoResponse {
    StatusCode::OK
}
