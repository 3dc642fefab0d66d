// service/src/web/handlers/item_handlers.rs

use actix_web::http::header::LOCATION;
use actix_web::{web, HttpRequest, HttpResponse};
use futures_util::TryStreamExt;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

use shopcart::{Item, ItemPolicy, ShopcartError};

use super::fetch_shopcart;
use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::{parse_json_body, JsonContentType};

#[derive(Deserialize, Debug)]
pub struct ListItemsQuery {
  pub name: Option<String>,
}

/// Loads an item that belongs to `shopcart_id`; an item of another cart is
/// reported as not found.
async fn fetch_item(app_state: &AppState, shopcart_id: i64, item_id: i64) -> Result<Item, AppError> {
  match app_state.store.get_item(item_id).await? {
    Some(item) if item.shopcart_id == shopcart_id => Ok(item),
    Some(_) => {
      warn!("Item {} does not belong to shopcart {}.", item_id, shopcart_id);
      Err(ShopcartError::item_not_found(item_id).into())
    }
    None => Err(ShopcartError::item_not_found(item_id).into()),
  }
}

#[instrument(name = "handler::list_items", skip(app_state, path), fields(shopcart_id = %path.as_ref()))]
pub async fn list_items_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  query_params: web::Query<ListItemsQuery>,
) -> Result<HttpResponse, AppError> {
  let shopcart_id = path.into_inner();
  let shopcart = fetch_shopcart(app_state.store.as_ref(), shopcart_id).await?;

  let items: Vec<Item> = match query_params.name.as_deref() {
    Some(name) => {
      app_state
        .store
        .find_items_by_name(shopcart_id, name)
        .try_collect()
        .await?
    }
    None => shopcart.items,
  };

  info!("Returning {} items of shopcart {}.", items.len(), shopcart_id);
  Ok(HttpResponse::Ok().json(items.iter().map(Item::serialize).collect::<Vec<Value>>()))
}

#[instrument(name = "handler::create_item", skip(app_state, req, path, body), fields(shopcart_id = %path.as_ref()))]
pub async fn create_item_handler(
  app_state: web::Data<AppState>,
  req: HttpRequest,
  path: web::Path<i64>,
  _json: JsonContentType,
  body: web::Bytes,
) -> Result<HttpResponse, AppError> {
  let shopcart_id = path.into_inner();
  fetch_shopcart(app_state.store.as_ref(), shopcart_id).await?;

  let payload = parse_json_body(&body)?;
  let mut item = Item::from_record_in(shopcart_id, &payload)?;
  // The cart in the URL owns the new item.
  item.shopcart_id = shopcart_id;
  ItemPolicy::Create.check(&item)?;
  app_state.store.create_item(&mut item).await?;

  let item_id = item
    .id
    .ok_or_else(|| AppError::Internal("Store did not assign an item id.".to_string()))?;
  let location = req
    .url_for("item", [shopcart_id.to_string(), item_id.to_string()])
    .map_err(|e| AppError::Internal(format!("Cannot build item URL: {}", e)))?;

  info!(item_id, "Item added to shopcart {}.", shopcart_id);
  Ok(
    HttpResponse::Created()
      .insert_header((LOCATION, location.to_string()))
      .json(item.serialize()),
  )
}

#[instrument(name = "handler::get_item", skip(app_state, path))]
pub async fn get_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(i64, i64)>,
) -> Result<HttpResponse, AppError> {
  let (shopcart_id, item_id) = path.into_inner();
  fetch_shopcart(app_state.store.as_ref(), shopcart_id).await?;
  let item = fetch_item(&app_state, shopcart_id, item_id).await?;
  Ok(HttpResponse::Ok().json(item.serialize()))
}

#[instrument(name = "handler::update_item", skip(app_state, path, body))]
pub async fn update_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(i64, i64)>,
  _json: JsonContentType,
  body: web::Bytes,
) -> Result<HttpResponse, AppError> {
  let (shopcart_id, item_id) = path.into_inner();
  fetch_shopcart(app_state.store.as_ref(), shopcart_id).await?;
  let mut item = fetch_item(&app_state, shopcart_id, item_id).await?;

  let payload = parse_json_body(&body)?;
  item.deserialize_in_place(&payload)?;
  ItemPolicy::Update.check(&item)?;

  // The payload may re-parent the item; the new owner has to exist.
  if item.shopcart_id != shopcart_id {
    fetch_shopcart(app_state.store.as_ref(), item.shopcart_id).await?;
    info!("Moving item {} to shopcart {}.", item_id, item.shopcart_id);
  }
  app_state.store.update_item(&item).await?;

  info!("Item {} updated.", item_id);
  Ok(HttpResponse::Ok().json(item.serialize()))
}

#[instrument(name = "handler::delete_item", skip(app_state, path))]
pub async fn delete_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(i64, i64)>,
) -> Result<HttpResponse, AppError> {
  let (shopcart_id, item_id) = path.into_inner();
  match app_state.store.get_item(item_id).await? {
    Some(item) if item.shopcart_id == shopcart_id => {
      app_state.store.delete_item(&item).await?;
      info!("Item {} deleted from shopcart {}.", item_id, shopcart_id);
    }
    _ => info!("Item {} already absent from shopcart {}.", item_id, shopcart_id),
  }
  Ok(HttpResponse::NoContent().finish())
}
