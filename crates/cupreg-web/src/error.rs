use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use cupreg_core::CoreError;

/// Request-boundary error type.
///
/// The admin surface answers with `{ "success": false, "error": … }`
/// bodies; the captain validation errors use the bare `{ "error": … }`
/// shape. Internal details are logged server-side and never reach the
/// client.
#[derive(Debug)]
pub enum AppError {
    /// Too many failed attempts from this identity on this surface.
    RateLimited { retry_after_secs: u64 },
    /// No administrator secret is configured (deployment fault, not the
    /// caller's).
    AdminSecretMissing,
    /// Wrong administrator password.
    InvalidAdminPassword,
    /// Blank email or password on the captain surface.
    MissingCredentials,
    /// Unknown email or wrong password, deliberately indistinguishable.
    InvalidCaptainCredentials,
    /// A registration field failed validation.
    Validation(String),
    /// The email is already registered to a team.
    EmailTaken,
    /// Unexpected fault; generic 500 to the client.
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::RateLimited { retry_after_secs } => {
                let body = Json(json!({
                    "success": false,
                    "error": "Too many attempts. Try again later."
                }));
                let mut response = (StatusCode::TOO_MANY_REQUESTS, body).into_response();
                response
                    .headers_mut()
                    .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));
                response
            }
            AppError::AdminSecretMissing => {
                tracing::error!("Admin login attempted but no administrator secret is configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": false, "error": "Server configuration error" })),
                )
                    .into_response()
            }
            AppError::InvalidAdminPassword => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "success": false, "error": "Feil passord" })),
            )
                .into_response(),
            AppError::MissingCredentials => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Email and password are required" })),
            )
                .into_response(),
            AppError::InvalidCaptainCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Incorrect email or password. Please try again." })),
            )
                .into_response(),
            AppError::Validation(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            AppError::EmailTaken => (
                StatusCode::CONFLICT,
                Json(json!({ "error": "A team with this email is already registered" })),
            )
                .into_response(),
            AppError::Internal(message) => {
                // Log the real error server-side, return a generic message.
                tracing::error!("Internal error: {message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

impl From<CoreError> for AppError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::AdminSecretMissing => AppError::AdminSecretMissing,
            CoreError::WeakPassword(reason) => AppError::Validation(reason),
            CoreError::EmailTaken(_) => AppError::EmailTaken,
            CoreError::Hash(msg) => AppError::Internal(format!("hash error: {msg}")),
            CoreError::Store(msg) => AppError::Internal(format!("store error: {msg}")),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Internal(format!("{e:#}"))
    }
}
