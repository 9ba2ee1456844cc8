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
use crate::db::models::{NewDailyReport, RecordQuery};
use crate::error::AppResult;
use crate::extract::{ApiJson, ApiQuery};

pub async fn file_report(
    State(state): State<AppState>,
    caller: CallerContext,
    ApiJson(input): ApiJson<NewDailyReport>,
) -> AppResult<impl IntoResponse> {
    let report = service::file_report(state.store.as_ref(), &caller, input, state.now()).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "report": report })),
    ))
}

pub async fn list_reports(
    State(state): State<AppState>,
    caller: CallerContext,
    ApiQuery(query): ApiQuery<RecordQuery>,
) -> AppResult<impl IntoResponse> {
    let reports = service::list_reports(state.store.as_ref(), &caller, &query).await?;
    Ok(Json(json!({ "success": true, "reports": reports })))
}
