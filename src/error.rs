use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use std::borrow::Cow;
use std::collections::BTreeMap;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

use crate::db::StoreError;
use crate::policy::deadline::InvalidMonth;

/// Stable machine-readable codes for business-rule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleCode {
    BeforeDeadline,
    AlreadyPending,
    AlreadyApproved,
    AlreadyDecided,
    DeadlinePassed,
}

impl RuleCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleCode::BeforeDeadline => "BEFORE_DEADLINE",
            RuleCode::AlreadyPending => "ALREADY_PENDING",
            RuleCode::AlreadyApproved => "ALREADY_APPROVED",
            RuleCode::AlreadyDecided => "ALREADY_DECIDED",
            RuleCode::DeadlinePassed => "DEADLINE_PASSED",
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{message}")]
    BusinessRule { code: RuleCode, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn rule(code: RuleCode, message: impl Into<String>) -> Self {
        AppError::BusinessRule {
            code,
            message: message.into(),
        }
    }

    /// Validation failure on a single field, for checks the derive can't express.
    pub fn invalid_field(field: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(field, field_error(message));
        AppError::Validation(errors)
    }

    pub fn code(&self) -> Option<RuleCode> {
        match self {
            AppError::BusinessRule { code, .. } => Some(*code),
            _ => None,
        }
    }
}

pub fn field_error(message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut error = ValidationError::new("invalid");
    error.message = Some(message.into());
    error
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                AppError::invalid_field("body", rejection.body_text())
            }
            _ => AppError::BadRequest(rejection.body_text()),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::invalid_field("query", rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(_) => {
                AppError::invalid_field("path", rejection.body_text())
            }
            _ => AppError::InternalServerError(rejection.body_text()),
        }
    }
}

impl From<InvalidMonth> for AppError {
    fn from(err: InvalidMonth) -> Self {
        AppError::invalid_field("month", err.to_string())
    }
}

fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let messages = errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Store(err) => {
                tracing::error!(error = %err, "Store operation failed");
                let status = match err {
                    StoreError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (
                    status,
                    json!({ "success": false, "error": "An internal server error occurred" }),
                )
            }
            AppError::Authentication(message) => (
                StatusCode::UNAUTHORIZED,
                json!({ "success": false, "error": message }),
            ),
            AppError::Authorization(message) => (
                StatusCode::FORBIDDEN,
                json!({ "success": false, "error": message }),
            ),
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "success": false,
                    "error": "Validation failed",
                    "fields": field_messages(errors),
                }),
            ),
            AppError::BusinessRule { code, message } => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "error": message, "code": code }),
            ),
            AppError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                json!({ "success": false, "error": message }),
            ),
            AppError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "error": message }),
            ),
            AppError::InternalServerError(details) => {
                tracing::error!(details = %details, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "success": false, "error": "An internal server error occurred" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
