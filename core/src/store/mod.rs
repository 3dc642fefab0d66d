// core/src/store/mod.rs

//! The persistence contract consumed by the HTTP layer.
//!
//! Stores assign surrogate ids, own transactions and cascade deletes. The
//! aggregate code never reaches a store on its own; callers pass a handle
//! (usually `Arc<dyn ShopcartStore>`) to whatever needs one.

pub mod memory;

use async_trait::async_trait;
use futures_util::stream::BoxStream;

use crate::error::StoreResult;
use crate::model::{Item, Shopcart};

pub use memory::MemoryStore;

#[async_trait]
pub trait ShopcartStore: Send + Sync {
  /// Persists a new cart together with any attached items as one unit.
  /// Sets `id` on the cart and on each item, and each item's `shopcart_id`.
  async fn create_shopcart(&self, shopcart: &mut Shopcart) -> StoreResult<()>;

  /// Persists the cart's `name`. Items are managed through the item operations.
  async fn update_shopcart(&self, shopcart: &Shopcart) -> StoreResult<()>;

  /// Removes the cart and every item it owns. Absent carts are a no-op.
  async fn delete_shopcart(&self, shopcart: &Shopcart) -> StoreResult<()>;

  /// Removes every item of the cart but keeps the cart; empties `items`.
  async fn clear_shopcart(&self, shopcart: &mut Shopcart) -> StoreResult<()>;

  async fn get_shopcart(&self, id: i64) -> StoreResult<Option<Shopcart>>;

  async fn all_shopcarts(&self) -> StoreResult<Vec<Shopcart>>;

  /// Case-sensitive exact match on `name`, yielded lazily.
  fn find_shopcarts_by_name<'a>(&'a self, name: &'a str) -> BoxStream<'a, StoreResult<Shopcart>>;

  /// Inserts an item for `item.shopcart_id` and sets `item.id`.
  async fn create_item(&self, item: &mut Item) -> StoreResult<()>;

  async fn update_item(&self, item: &Item) -> StoreResult<()>;

  /// Absent items are a no-op.
  async fn delete_item(&self, item: &Item) -> StoreResult<()>;

  async fn get_item(&self, id: i64) -> StoreResult<Option<Item>>;

  /// Items of one cart in insertion order.
  async fn items_of(&self, shopcart_id: i64) -> StoreResult<Vec<Item>>;

  /// Case-sensitive exact match on item `name` within one cart, yielded lazily.
  fn find_items_by_name<'a>(&'a self, shopcart_id: i64, name: &'a str) -> BoxStream<'a, StoreResult<Item>>;
}
