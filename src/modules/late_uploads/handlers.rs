use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use super::service;
use crate::app_state::AppState;
use crate::auth::CallerContext;
use crate::db::models::{LateUploadDecision, LateUploadQuery, NewLateUploadRequest};
use crate::error::AppResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery};

pub async fn create_late_request(
    State(state): State<AppState>,
    caller: CallerContext,
    ApiJson(input): ApiJson<NewLateUploadRequest>,
) -> AppResult<impl IntoResponse> {
    let request = service::submit_late_request(
        state.store.as_ref(),
        &state.deadlines,
        &caller,
        input,
        state.now(),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "request": request })),
    ))
}

pub async fn list_late_requests(
    State(state): State<AppState>,
    caller: CallerContext,
    ApiQuery(query): ApiQuery<LateUploadQuery>,
) -> AppResult<impl IntoResponse> {
    let requests = service::list_late_requests(state.store.as_ref(), &caller, &query).await?;
    Ok(Json(json!({ "success": true, "requests": requests })))
}

pub async fn decide_late_request(
    State(state): State<AppState>,
    caller: CallerContext,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(decision): ApiJson<LateUploadDecision>,
) -> AppResult<impl IntoResponse> {
    let request =
        service::decide_late_request(state.store.as_ref(), &caller, id, decision, state.now())
            .await?;
    Ok(Json(json!({ "success": true, "request": request })))
}
