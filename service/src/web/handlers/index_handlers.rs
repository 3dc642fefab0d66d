// service/src/web/handlers/index_handlers.rs

use actix_web::{HttpRequest, HttpResponse};
use serde_json::json;
use tracing::instrument;

use crate::errors::AppError;

/// Root URL response: what this service is and where the collection lives.
#[instrument(name = "handler::index", skip(req))]
pub async fn index_handler(req: HttpRequest) -> Result<HttpResponse, AppError> {
  let paths = req
    .url_for_static("shopcarts")
    .map_err(|e| AppError::Internal(format!("Cannot build collection URL: {}", e)))?;
  Ok(HttpResponse::Ok().json(json!({
    "name": "Shopcart REST API Service",
    "version": env!("CARGO_PKG_VERSION"),
    "paths": paths.to_string(),
  })))
}

pub async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(json!({ "status": "OK" }))
}

pub async fn not_found_handler(req: HttpRequest) -> Result<HttpResponse, AppError> {
  Err(AppError::NotFound(format!(
    "The requested URL {} was not found on the server.",
    req.path()
  )))
}

pub async fn method_not_allowed_handler(req: HttpRequest) -> Result<HttpResponse, AppError> {
  Err(AppError::MethodNotAllowed(format!(
    "The method {} is not allowed for the requested URL.",
    req.method()
  )))
}
