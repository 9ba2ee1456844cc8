use axum::{
    extract::State,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use super::service;
use crate::app_state::AppState;
use crate::auth::CallerContext;
use crate::db::models::RecordQuery;
use crate::error::AppResult;
use crate::extract::ApiQuery;

pub async fn combined_records(
    State(state): State<AppState>,
    caller: CallerContext,
    ApiQuery(query): ApiQuery<RecordQuery>,
) -> AppResult<impl IntoResponse> {
    let records = service::combined_records(state.store.as_ref(), &caller, &query).await?;
    Ok(Json(json!({ "success": true, "records": records })))
}
