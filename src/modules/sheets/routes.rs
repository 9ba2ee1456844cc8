use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{list_sheets, register_sheet, upload_status};
use crate::app_state::AppState;

pub fn sheet_routes() -> Router<AppState> {
    Router::new()
        .route("/api/uploaded-sheets", post(register_sheet).get(list_sheets))
        .route("/api/uploaded-sheets/status", get(upload_status))
}
