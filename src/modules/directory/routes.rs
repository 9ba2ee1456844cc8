use axum::{routing::post, Router};

use super::handlers::{create_school, create_user, list_schools, list_users};
use crate::app_state::AppState;

pub fn directory_routes() -> Router<AppState> {
    Router::new()
        .route("/api/schools", post(create_school).get(list_schools))
        .route("/api/users", post(create_user).get(list_users))
}
