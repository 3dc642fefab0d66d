// service/src/web/handlers/mod.rs

pub mod index_handlers;
pub mod item_handlers;
pub mod shopcart_handlers;

use shopcart::{Shopcart, ShopcartError, ShopcartStore};

use crate::errors::AppError;

/// Loads a cart or reports it as not found.
pub(crate) async fn fetch_shopcart(store: &dyn ShopcartStore, shopcart_id: i64) -> Result<Shopcart, AppError> {
  store
    .get_shopcart(shopcart_id)
    .await?
    .ok_or_else(|| ShopcartError::shopcart_not_found(shopcart_id).into())
}
