use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use uuid::Uuid;

use crate::app_state::AppState;
use crate::db::models::{User, UserRole};
use crate::error::{AppError, AppResult};

/// Identity of the caller, resolved once per request and passed explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct CallerContext {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub school_id: Option<Uuid>,
}

impl CallerContext {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            school_id: user.school_id,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn require_admin(&self) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Only administrators can perform this action".to_string(),
            ))
        }
    }

    pub fn require_trainer(&self) -> AppResult<()> {
        if self.role.is_trainer() {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Only trainers can perform this action".to_string(),
            ))
        }
    }

    pub fn require_school(&self) -> AppResult<Uuid> {
        self.school_id.ok_or_else(|| {
            AppError::BadRequest(
                "Your account is not linked to a school. Ask an administrator to assign one."
                    .to_string(),
            )
        })
    }
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

impl FromRequestParts<AppState> for CallerContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| AppError::Authentication("Missing bearer token".to_string()))?;

        state
            .sessions
            .resolve(token)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid or expired session".to_string()))
    }
}
