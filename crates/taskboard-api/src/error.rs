//! HTTP error response conversion
//!
//! **Preferred handler pattern:** Return `Result<impl IntoResponse,
//! HttpAppError>` and propagate repository failures with `?`; they render
//! through the classifier consistently (status, envelope, logging).
//!
//! The deployment environment is captured once at startup via
//! [`init_environment`]; emission never re-reads the process environment, and
//! an uninitialized emitter behaves as production so diagnostics cannot leak
//! by default.

use std::sync::OnceLock;

use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use taskboard_core::{normalize, AppError, Environment, LogLevel};

static ENVIRONMENT: OnceLock<Environment> = OnceLock::new();

/// Record the deployment environment for the emitter. Idempotent; only the
/// first call wins.
pub fn init_environment(environment: Environment) {
    let _ = ENVIRONMENT.set(environment);
}

fn current_environment() -> Environment {
    ENVIRONMENT
        .get()
        .copied()
        .unwrap_or(Environment::Production)
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from
/// taskboard-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(err.into())
    }
}

/// Convert JSON body deserialization failures into a 400 with the response
/// envelope instead of axum's plain-text rejection.
impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        HttpAppError(AppError::bad_request(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

/// JSON body extractor that reports deserialization failures through the
/// response envelope. Use instead of `Json<T>` in handlers.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;
        Ok(ValidatedJson(inner))
    }
}

/// Server-side record of the failure, written exactly once per
/// classification, with the raw store code/meta when present.
fn log_error(error: &AppError) {
    if let AppError::Persistence(err) = error {
        let code = err.kind.code();
        match error.log_level() {
            LogLevel::Warn => {
                tracing::warn!(code, meta = ?err.meta, message = %err.message, "Persistence error")
            }
            _ => {
                tracing::error!(code, meta = ?err.meta, message = %err.message, "Persistence error")
            }
        }
        return;
    }

    match error.log_level() {
        LogLevel::Debug => tracing::debug!(error = %error, "Error occurred"),
        LogLevel::Warn => tracing::warn!(error = %error, "Error occurred"),
        LogLevel::Error => tracing::error!(error = %error, "Error occurred"),
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        log_error(&self.0);

        let body = normalize(&self.0, current_environment());
        let status =
            StatusCode::from_u16(body.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(body)).into_response()
    }
}
