// service/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use shopcart::{PolicyViolation, ShopcartError, StoreError, ValidationError};

#[derive(Debug, Error)]
pub enum AppError {
  #[error("{0}")]
  Validation(#[from] ValidationError),

  #[error("{0}")]
  Policy(#[from] PolicyViolation),

  // Bodies that never reached the aggregate (e.g. malformed JSON).
  #[error("{0}")]
  BadRequest(String),

  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  MethodNotAllowed(String),

  #[error("{0}")]
  UnsupportedMediaType(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Storage Error: {0}")]
  Store(#[from] StoreError),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl From<ShopcartError> for AppError {
  fn from(err: ShopcartError) -> Self {
    match err {
      ShopcartError::Validation(e) => AppError::Validation(e),
      ShopcartError::Policy(e) => AppError::Policy(e),
      not_found @ ShopcartError::NotFound { .. } => AppError::NotFound(not_found.to_string()),
      ShopcartError::Store(e) => AppError::Store(e),
    }
  }
}

// Allow anyhow::Error to be converted into AppError for `?` on anyhow results.
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<sqlx::Error>() {
      Ok(sqlx_err) => AppError::Sqlx(sqlx_err),
      Err(other) => AppError::Internal(other.to_string()),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) | AppError::Policy(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
      AppError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
      AppError::Config(_) | AppError::Store(_) | AppError::Sqlx(_) | AppError::Internal(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let message = if status.is_server_error() {
      // Log the full error; the client only learns that something failed.
      tracing::error!(application_error = %self, "Responding with server error");
      "The server encountered an internal error and was unable to complete your request.".to_string()
    } else {
      tracing::warn!(application_error = %self, status = status.as_u16(), "Responding with client error");
      self.to_string()
    };

    HttpResponse::build(status).json(json!({
      "status": status.as_u16(),
      "error": status.canonical_reason().unwrap_or("Unknown Error"),
      "message": message,
    }))
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
