use axum::{routing::get, Router};

use super::handlers::combined_records;
use crate::app_state::AppState;

pub fn combined_routes() -> Router<AppState> {
    Router::new().route("/api/combined-records", get(combined_records))
}
