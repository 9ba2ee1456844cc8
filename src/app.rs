use axum::{extract::State, http::StatusCode, middleware, routing::get, Json, Router};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{
    app_state::AppState,
    middleware::tracing::observability_middleware,
    modules::{
        attendance::routes::attendance_routes, combined::routes::combined_routes,
        directory::routes::directory_routes, late_uploads::routes::late_upload_routes,
        meetings::routes::meeting_routes, reports::routes::report_routes,
        sheets::routes::sheet_routes,
    },
};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(late_upload_routes())
        .merge(sheet_routes())
        .merge(attendance_routes())
        .merge(report_routes())
        .merge(combined_routes())
        .merge(meeting_routes())
        .merge(directory_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(observability_middleware)),
        )
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let (status, store_status) = match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "healthy"),
        Err(e) => {
            tracing::warn!(error = %e, "Store health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
        }
    };

    (
        status,
        Json(json!({
            "status": if status == StatusCode::OK { "ok" } else { "degraded" },
            "timestamp": state.now(),
            "version": env!("CARGO_PKG_VERSION"),
            "services": {
                "store": store_status,
            }
        })),
    )
}
