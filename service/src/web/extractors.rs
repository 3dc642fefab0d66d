// service/src/web/extractors.rs

use actix_web::http::header::CONTENT_TYPE;
use actix_web::{web, FromRequest, HttpRequest};
use serde_json::Value;
use tracing::warn;

use crate::errors::AppError;

pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Guard extractor: succeeds only when the request declares a JSON body.
///
/// A missing Content-Type and any media type other than `application/json`
/// are rejected with 415. Parameters such as `charset` are ignored.
#[derive(Debug)]
pub struct JsonContentType;

impl FromRequest for JsonContentType {
  type Error = AppError;
  type Future = futures_util::future::Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    futures_util::future::ready(check_content_type(req, JSON_MEDIA_TYPE).map(|_| JsonContentType))
  }
}

fn check_content_type(req: &HttpRequest, expected: &str) -> Result<(), AppError> {
  let Some(header) = req.headers().get(CONTENT_TYPE) else {
    warn!("No Content-Type specified.");
    return Err(AppError::UnsupportedMediaType(format!("Content-Type must be {}", expected)));
  };

  let essence = header
    .to_str()
    .ok()
    .and_then(|value| value.split(';').next())
    .map(str::trim)
    .unwrap_or_default();
  if essence.eq_ignore_ascii_case(expected) {
    return Ok(());
  }

  warn!(content_type = ?header, "Invalid Content-Type.");
  Err(AppError::UnsupportedMediaType(format!("Content-Type must be {}", expected)))
}

/// Parses a raw request body into a JSON value for the aggregate readers.
pub fn parse_json_body(body: &web::Bytes) -> Result<Value, AppError> {
  serde_json::from_slice(body).map_err(|e| AppError::BadRequest(format!("Request body is not valid JSON: {}", e)))
}
