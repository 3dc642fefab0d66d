// core/src/store/memory.rs

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::anyhow;
use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt};
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::model::{Item, Shopcart};
use crate::store::ShopcartStore;

#[derive(Debug, Default)]
struct Tables {
  last_shopcart_id: i64,
  last_item_id: i64,
  // id -> name
  shopcarts: BTreeMap<i64, String>,
  items: BTreeMap<i64, Item>,
}

impl Tables {
  fn assemble(&self, id: i64, name: &str) -> Shopcart {
    Shopcart {
      id: Some(id),
      name: name.to_string(),
      items: self.items_of(id),
    }
  }

  // BTreeMap order is id order, which is insertion order.
  fn items_of(&self, shopcart_id: i64) -> Vec<Item> {
    self
      .items
      .values()
      .filter(|item| item.shopcart_id == shopcart_id)
      .cloned()
      .collect()
  }

  fn ensure_shopcart(&self, shopcart_id: i64) -> StoreResult<()> {
    if self.shopcarts.contains_key(&shopcart_id) {
      Ok(())
    } else {
      Err(StoreError::from(anyhow!(
        "foreign key violation: shopcart {} does not exist",
        shopcart_id
      )))
    }
  }
}

/// In-process store backed by ordered maps behind a `parking_lot::RwLock`.
///
/// Each operation takes the lock once, so every call is atomic. Lock guards
/// never live across an `.await`.
#[derive(Debug, Default)]
pub struct MemoryStore {
  tables: RwLock<Tables>,
  offline: AtomicBool,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// While offline every operation fails with a backend error.
  pub fn set_offline(&self, offline: bool) {
    self.offline.store(offline, Ordering::SeqCst);
  }

  fn online(&self) -> StoreResult<()> {
    if self.offline.load(Ordering::SeqCst) {
      Err(StoreError::from(anyhow!("memory store is offline")))
    } else {
      Ok(())
    }
  }
}

#[async_trait]
impl ShopcartStore for MemoryStore {
  async fn create_shopcart(&self, shopcart: &mut Shopcart) -> StoreResult<()> {
    self.online()?;
    let mut tables = self.tables.write();
    tables.last_shopcart_id += 1;
    let id = tables.last_shopcart_id;
    tables.shopcarts.insert(id, shopcart.name.clone());
    for item in shopcart.items.iter_mut() {
      tables.last_item_id += 1;
      let item_id = tables.last_item_id;
      item.id = Some(item_id);
      item.shopcart_id = id;
      tables.items.insert(item_id, item.clone());
    }
    shopcart.id = Some(id);
    info!(shopcart_id = id, items = shopcart.items.len(), "Created shopcart.");
    Ok(())
  }

  async fn update_shopcart(&self, shopcart: &Shopcart) -> StoreResult<()> {
    self.online()?;
    let id = shopcart
      .id
      .ok_or_else(|| StoreError::from(anyhow!("cannot update a shopcart without an id")))?;
    let mut tables = self.tables.write();
    match tables.shopcarts.get_mut(&id) {
      Some(name) => {
        *name = shopcart.name.clone();
        info!(shopcart_id = id, "Updated shopcart.");
      }
      None => debug!(shopcart_id = id, "Update of absent shopcart ignored."),
    }
    Ok(())
  }

  async fn delete_shopcart(&self, shopcart: &Shopcart) -> StoreResult<()> {
    self.online()?;
    let Some(id) = shopcart.id else {
      return Ok(());
    };
    let mut tables = self.tables.write();
    tables.shopcarts.remove(&id);
    tables.items.retain(|_, item| item.shopcart_id != id);
    info!(shopcart_id = id, "Deleted shopcart and its items.");
    Ok(())
  }

  async fn clear_shopcart(&self, shopcart: &mut Shopcart) -> StoreResult<()> {
    self.online()?;
    if let Some(id) = shopcart.id {
      let mut tables = self.tables.write();
      tables.items.retain(|_, item| item.shopcart_id != id);
      info!(shopcart_id = id, "Cleared shopcart.");
    }
    shopcart.items.clear();
    Ok(())
  }

  async fn get_shopcart(&self, id: i64) -> StoreResult<Option<Shopcart>> {
    self.online()?;
    debug!(shopcart_id = id, "Looking up shopcart.");
    let tables = self.tables.read();
    Ok(tables.shopcarts.get(&id).map(|name| tables.assemble(id, name)))
  }

  async fn all_shopcarts(&self) -> StoreResult<Vec<Shopcart>> {
    self.online()?;
    let tables = self.tables.read();
    Ok(
      tables
        .shopcarts
        .iter()
        .map(|(id, name)| tables.assemble(*id, name))
        .collect(),
    )
  }

  fn find_shopcarts_by_name<'a>(&'a self, name: &'a str) -> BoxStream<'a, StoreResult<Shopcart>> {
    if let Err(e) = self.online() {
      return stream::once(async move { Err(e) }).boxed();
    }
    debug!(shopcart_name = name, "Querying shopcarts by name.");
    let ids: Vec<i64> = self
      .tables
      .read()
      .shopcarts
      .iter()
      .filter(|(_, stored)| stored.as_str() == name)
      .map(|(id, _)| *id)
      .collect();
    // Carts are assembled as the stream is polled.
    stream::iter(ids)
      .filter_map(move |id| async move {
        let tables = self.tables.read();
        tables.shopcarts.get(&id).map(|name| Ok(tables.assemble(id, name)))
      })
      .boxed()
  }

  async fn create_item(&self, item: &mut Item) -> StoreResult<()> {
    self.online()?;
    let mut tables = self.tables.write();
    tables.ensure_shopcart(item.shopcart_id)?;
    tables.last_item_id += 1;
    let id = tables.last_item_id;
    item.id = Some(id);
    tables.items.insert(id, item.clone());
    info!(item_id = id, shopcart_id = item.shopcart_id, "Created item.");
    Ok(())
  }

  async fn update_item(&self, item: &Item) -> StoreResult<()> {
    self.online()?;
    let id = item
      .id
      .ok_or_else(|| StoreError::from(anyhow!("cannot update an item without an id")))?;
    let mut tables = self.tables.write();
    tables.ensure_shopcart(item.shopcart_id)?;
    match tables.items.get_mut(&id) {
      Some(stored) => {
        *stored = item.clone();
        info!(item_id = id, "Updated item.");
      }
      None => debug!(item_id = id, "Update of absent item ignored."),
    }
    Ok(())
  }

  async fn delete_item(&self, item: &Item) -> StoreResult<()> {
    self.online()?;
    if let Some(id) = item.id {
      self.tables.write().items.remove(&id);
      info!(item_id = id, "Deleted item.");
    }
    Ok(())
  }

  async fn get_item(&self, id: i64) -> StoreResult<Option<Item>> {
    self.online()?;
    debug!(item_id = id, "Looking up item.");
    Ok(self.tables.read().items.get(&id).cloned())
  }

  async fn items_of(&self, shopcart_id: i64) -> StoreResult<Vec<Item>> {
    self.online()?;
    Ok(self.tables.read().items_of(shopcart_id))
  }

  fn find_items_by_name<'a>(&'a self, shopcart_id: i64, name: &'a str) -> BoxStream<'a, StoreResult<Item>> {
    if let Err(e) = self.online() {
      return stream::once(async move { Err(e) }).boxed();
    }
    debug!(shopcart_id, item_name = name, "Querying items by name.");
    let matches: Vec<Item> = self
      .tables
      .read()
      .items
      .values()
      .filter(|item| item.shopcart_id == shopcart_id && item.name == name)
      .cloned()
      .collect();
    stream::iter(matches.into_iter().map(Ok)).boxed()
  }
}
