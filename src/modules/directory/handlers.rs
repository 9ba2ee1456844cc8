use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use super::service;
use crate::app_state::AppState;
use crate::auth::CallerContext;
use crate::db::models::{NewSchool, NewUser};
use crate::error::AppResult;
use crate::extract::ApiJson;

pub async fn create_school(
    State(state): State<AppState>,
    caller: CallerContext,
    ApiJson(input): ApiJson<NewSchool>,
) -> AppResult<impl IntoResponse> {
    let school = service::create_school(state.store.as_ref(), &caller, input, state.now()).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "school": school })),
    ))
}

pub async fn list_schools(
    State(state): State<AppState>,
    _caller: CallerContext,
) -> AppResult<impl IntoResponse> {
    let schools = service::list_schools(state.store.as_ref()).await?;
    Ok(Json(json!({ "success": true, "schools": schools })))
}

pub async fn create_user(
    State(state): State<AppState>,
    caller: CallerContext,
    ApiJson(input): ApiJson<NewUser>,
) -> AppResult<impl IntoResponse> {
    let user = service::create_user(state.store.as_ref(), &caller, input, state.now()).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "user": user })),
    ))
}

pub async fn list_users(
    State(state): State<AppState>,
    caller: CallerContext,
) -> AppResult<impl IntoResponse> {
    let users = service::list_users(state.store.as_ref(), &caller).await?;
    Ok(Json(json!({ "success": true, "users": users })))
}
