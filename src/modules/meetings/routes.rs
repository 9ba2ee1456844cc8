use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{list_meetings, meeting_analytics, record_click, schedule_meeting};
use crate::app_state::AppState;

pub fn meeting_routes() -> Router<AppState> {
    Router::new()
        .route("/api/meetings", post(schedule_meeting).get(list_meetings))
        .route("/api/meetings/analytics", get(meeting_analytics))
        .route("/api/meetings/{id}/clicks", post(record_click))
}
