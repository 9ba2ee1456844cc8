use axum::{routing::post, Router};

use super::handlers::{file_report, list_reports};
use crate::app_state::AppState;

pub fn report_routes() -> Router<AppState> {
    Router::new().route("/api/daily-reports", post(file_report).get(list_reports))
}
