// service/src/web/handlers/shopcart_handlers.rs

use actix_web::http::header::LOCATION;
use actix_web::{web, HttpRequest, HttpResponse};
use futures_util::TryStreamExt;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};

use shopcart::Shopcart;

use super::fetch_shopcart;
use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::{parse_json_body, JsonContentType};

#[derive(Deserialize, Debug)]
pub struct ListShopcartsQuery {
  pub name: Option<String>,
}

#[instrument(name = "handler::list_shopcarts", skip(app_state))]
pub async fn list_shopcarts_handler(
  app_state: web::Data<AppState>,
  query_params: web::Query<ListShopcartsQuery>,
) -> Result<HttpResponse, AppError> {
  let shopcarts: Vec<Shopcart> = match query_params.name.as_deref() {
    Some(name) => {
      info!("Listing shopcarts named {:?}.", name);
      app_state.store.find_shopcarts_by_name(name).try_collect().await?
    }
    None => {
      info!("Listing all shopcarts.");
      app_state.store.all_shopcarts().await?
    }
  };

  info!("Returning {} shopcarts.", shopcarts.len());
  Ok(HttpResponse::Ok().json(shopcarts.iter().map(Shopcart::serialize).collect::<Vec<Value>>()))
}

#[instrument(name = "handler::create_shopcart", skip(app_state, req, body))]
pub async fn create_shopcart_handler(
  app_state: web::Data<AppState>,
  req: HttpRequest,
  _json: JsonContentType,
  body: web::Bytes,
) -> Result<HttpResponse, AppError> {
  info!("Request to create a shopcart.");
  let payload = parse_json_body(&body)?;

  let mut shopcart = Shopcart::from_record(&payload)?;
  shopcart.check_items()?;
  app_state.store.create_shopcart(&mut shopcart).await?;

  let id = shopcart
    .id
    .ok_or_else(|| AppError::Internal("Store did not assign a shopcart id.".to_string()))?;
  let location = req
    .url_for("shopcart", [id.to_string()])
    .map_err(|e| AppError::Internal(format!("Cannot build shopcart URL: {}", e)))?;

  info!(shopcart_id = id, "Shopcart created.");
  Ok(
    HttpResponse::Created()
      .insert_header((LOCATION, location.to_string()))
      .json(shopcart.serialize()),
  )
}

#[instrument(name = "handler::get_shopcart", skip(app_state, path), fields(shopcart_id = %path.as_ref()))]
pub async fn get_shopcart_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let shopcart_id = path.into_inner();
  let shopcart = fetch_shopcart(app_state.store.as_ref(), shopcart_id).await?;
  info!("Returning shopcart {}.", shopcart_id);
  Ok(HttpResponse::Ok().json(shopcart.serialize()))
}

#[instrument(name = "handler::update_shopcart", skip(app_state, path, body), fields(shopcart_id = %path.as_ref()))]
pub async fn update_shopcart_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  _json: JsonContentType,
  body: web::Bytes,
) -> Result<HttpResponse, AppError> {
  let shopcart_id = path.into_inner();
  let mut shopcart = fetch_shopcart(app_state.store.as_ref(), shopcart_id).await?;

  let payload = parse_json_body(&body)?;
  shopcart.deserialize(&payload)?;
  shopcart.check_items()?;
  app_state.store.update_shopcart(&shopcart).await?;

  // Only the name is written; report the items actually stored.
  shopcart.items = app_state.store.items_of(shopcart_id).await?;
  info!("Shopcart {} updated.", shopcart_id);
  Ok(HttpResponse::Ok().json(shopcart.serialize()))
}

#[instrument(name = "handler::delete_shopcart", skip(app_state, path), fields(shopcart_id = %path.as_ref()))]
pub async fn delete_shopcart_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let shopcart_id = path.into_inner();
  match app_state.store.get_shopcart(shopcart_id).await? {
    Some(shopcart) => {
      app_state.store.delete_shopcart(&shopcart).await?;
      info!("Shopcart {} deleted.", shopcart_id);
    }
    None => info!("Shopcart {} already absent.", shopcart_id),
  }
  Ok(HttpResponse::NoContent().finish())
}

#[instrument(name = "handler::clear_shopcart", skip(app_state, path), fields(shopcart_id = %path.as_ref()))]
pub async fn clear_shopcart_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let shopcart_id = path.into_inner();
  let mut shopcart = fetch_shopcart(app_state.store.as_ref(), shopcart_id).await?;
  app_state.store.clear_shopcart(&mut shopcart).await?;
  info!("Shopcart {} cleared.", shopcart_id);
  Ok(HttpResponse::Ok().json(shopcart.serialize()))
}
