use axum::{
    routing::{patch, post},
    Router,
};

use super::handlers::{create_late_request, decide_late_request, list_late_requests};
use crate::app_state::AppState;

pub fn late_upload_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/late-upload-requests",
            post(create_late_request).get(list_late_requests),
        )
        .route("/api/late-upload-requests/{id}", patch(decide_late_request))
}
