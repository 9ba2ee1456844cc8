use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use super::service;
use crate::app_state::AppState;
use crate::auth::CallerContext;
use crate::db::models::{NewAttendance, RecordQuery};
use crate::error::AppResult;
use crate::extract::{ApiJson, ApiQuery};

pub async fn mark_attendance(
    State(state): State<AppState>,
    caller: CallerContext,
    ApiJson(input): ApiJson<NewAttendance>,
) -> AppResult<impl IntoResponse> {
    let record =
        service::mark_attendance(state.store.as_ref(), &caller, input, state.now()).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "record": record })),
    ))
}

pub async fn list_attendance(
    State(state): State<AppState>,
    caller: CallerContext,
    ApiQuery(query): ApiQuery<RecordQuery>,
) -> AppResult<impl IntoResponse> {
    let records = service::list_attendance(state.store.as_ref(), &caller, &query).await?;
    Ok(Json(json!({ "success": true, "records": records })))
}
