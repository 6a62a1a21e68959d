//! HTTP error mapping.
//!
//! Every handler returns `AppResult`; `AppError` renders as a JSON body
//! `{error, code}` with the status chosen from the underlying domain error.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use atelier_core::errors::{StorageError, StorefrontErrorCode, WorkflowError};
use atelier_core::StorefrontError;

const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
const UNAUTHORIZED: &str = "UNAUTHORIZED";
const BAD_REQUEST: &str = "BAD_REQUEST";

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Storefront(#[from] StorefrontError),

    #[error("admin session required")]
    Unauthorized,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("blocking task failed: {0}")]
    Blocking(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Storefront(e) => storefront_status(e),
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Blocking(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = if status.is_server_error() {
            error!(error = %self, "request failed");
            ErrorResponse {
                error: "Internal server error".to_string(),
                code: INTERNAL_ERROR,
            }
        } else {
            ErrorResponse {
                error: self.to_string(),
                code: self.code(),
            }
        };
        HttpResponse::build(status).json(body)
    }
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::Storefront(e) => e.error_code(),
            AppError::Unauthorized => UNAUTHORIZED,
            AppError::BadRequest(_) => BAD_REQUEST,
            AppError::Blocking(_) => INTERNAL_ERROR,
        }
    }
}

fn storefront_status(err: &StorefrontError) -> StatusCode {
    match err {
        StorefrontError::NotFound { .. } => StatusCode::NOT_FOUND,
        StorefrontError::Validation(_) => StatusCode::BAD_REQUEST,
        // Malformed action input rather than a state conflict.
        StorefrontError::Workflow(
            WorkflowError::MissingTrackingLink | WorkflowError::InvalidQuote { .. },
        ) => StatusCode::BAD_REQUEST,
        StorefrontError::Workflow(_) => StatusCode::CONFLICT,
        StorefrontError::Storage(StorageError::RowNotFound { .. }) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

/// JSON extractor config: unreadable bodies become `AppError::BadRequest`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024 * 1024)
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
            AppError::BadRequest(err.to_string()).into()
        })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        AppError::BadRequest(err.to_string()).into()
    })
}
