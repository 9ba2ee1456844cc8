use axum::{routing::post, Router};

use super::handlers::{list_attendance, mark_attendance};
use crate::app_state::AppState;

pub fn attendance_routes() -> Router<AppState> {
    Router::new().route("/api/attendance", post(mark_attendance).get(list_attendance))
}
