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
use crate::db::models::NewMeeting;
use crate::error::AppResult;
use crate::extract::{ApiJson, ApiPath};

pub async fn schedule_meeting(
    State(state): State<AppState>,
    caller: CallerContext,
    ApiJson(input): ApiJson<NewMeeting>,
) -> AppResult<impl IntoResponse> {
    let meeting =
        service::schedule_meeting(state.store.as_ref(), &caller, input, state.now()).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "meeting": meeting })),
    ))
}

pub async fn list_meetings(
    State(state): State<AppState>,
    caller: CallerContext,
) -> AppResult<impl IntoResponse> {
    let meetings = service::list_meetings(state.store.as_ref(), &caller).await?;
    Ok(Json(json!({ "success": true, "meetings": meetings })))
}

pub async fn record_click(
    State(state): State<AppState>,
    caller: CallerContext,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<impl IntoResponse> {
    let meeting = service::record_click(state.store.as_ref(), &caller, id, state.now()).await?;
    Ok(Json(json!({ "success": true, "url": meeting.url })))
}

pub async fn meeting_analytics(
    State(state): State<AppState>,
    caller: CallerContext,
) -> AppResult<impl IntoResponse> {
    let analytics = service::meeting_analytics(state.store.as_ref(), &caller).await?;
    Ok(Json(json!({ "success": true, "analytics": analytics })))
}
