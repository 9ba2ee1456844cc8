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
use crate::db::models::{NewUploadedSheet, UploadStatusQuery, UploadedSheetQuery};
use crate::error::AppResult;
use crate::extract::{ApiJson, ApiQuery};

pub async fn register_sheet(
    State(state): State<AppState>,
    caller: CallerContext,
    ApiJson(input): ApiJson<NewUploadedSheet>,
) -> AppResult<impl IntoResponse> {
    let sheet = service::register_sheet(
        state.store.as_ref(),
        &state.deadlines,
        &caller,
        input,
        state.now(),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "sheet": sheet })),
    ))
}

pub async fn list_sheets(
    State(state): State<AppState>,
    caller: CallerContext,
    ApiQuery(query): ApiQuery<UploadedSheetQuery>,
) -> AppResult<impl IntoResponse> {
    let sheets = service::list_sheets(state.store.as_ref(), &caller, &query).await?;
    Ok(Json(json!({ "success": true, "sheets": sheets })))
}

pub async fn upload_status(
    State(state): State<AppState>,
    caller: CallerContext,
    ApiQuery(query): ApiQuery<UploadStatusQuery>,
) -> AppResult<impl IntoResponse> {
    let status = service::upload_status(
        state.store.as_ref(),
        &state.deadlines,
        &caller,
        &query.month,
        state.now(),
    )
    .await?;
    Ok(Json(json!({ "success": true, "status": status })))
}
