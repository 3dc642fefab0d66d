// service/src/db/postgres.rs

use std::collections::HashMap;

use anyhow::anyhow;
use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt, TryStreamExt};
use sqlx::{FromRow, PgPool};
use tracing::{debug, error, info, instrument};

use shopcart::{Item, Shopcart, ShopcartStore, StoreError, StoreResult};

const SELECT_ITEM_COLUMNS: &str = "SELECT id, shopcart_id, name, quantity, price FROM items";

#[derive(Debug, FromRow)]
struct ShopcartRow {
  id: i64,
  name: String,
}

impl ShopcartRow {
  fn into_shopcart(self, items: Vec<Item>) -> Shopcart {
    Shopcart {
      id: Some(self.id),
      name: self.name,
      items,
    }
  }
}

#[derive(Debug, FromRow)]
struct ItemRow {
  id: i64,
  shopcart_id: i64,
  name: String,
  quantity: i64,
  price: f64,
}

impl From<ItemRow> for Item {
  fn from(row: ItemRow) -> Self {
    Item {
      id: Some(row.id),
      shopcart_id: row.shopcart_id,
      name: row.name,
      quantity: row.quantity,
      price: row.price,
    }
  }
}

fn backend(e: sqlx::Error) -> StoreError {
  error!("Database operation failed: {}", e);
  StoreError::from(anyhow::Error::from(e))
}

fn require_id(entity: &str, id: Option<i64>) -> StoreResult<i64> {
  id.ok_or_else(|| StoreError::from(anyhow!("cannot persist changes to a {} without an id", entity)))
}

/// `ShopcartStore` over a sqlx `PgPool`, using runtime-checked queries.
///
/// Writes touching more than one row run in a transaction.
#[derive(Debug, Clone)]
pub struct PgShopcartStore {
  pool: PgPool,
}

impl PgShopcartStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  pub fn pool(&self) -> &PgPool {
    &self.pool
  }

  async fn load_items(&self, shopcart_id: i64) -> StoreResult<Vec<Item>> {
    let rows: Vec<ItemRow> = sqlx::query_as(&format!("{} WHERE shopcart_id = $1 ORDER BY id", SELECT_ITEM_COLUMNS))
      .bind(shopcart_id)
      .fetch_all(&self.pool)
      .await
      .map_err(backend)?;
    Ok(rows.into_iter().map(Item::from).collect())
  }
}

#[async_trait]
impl ShopcartStore for PgShopcartStore {
  #[instrument(name = "pg::create_shopcart", skip_all, fields(items = shopcart.items.len()))]
  async fn create_shopcart(&self, shopcart: &mut Shopcart) -> StoreResult<()> {
    let mut tx = self.pool.begin().await.map_err(backend)?;

    let (id,): (i64,) = sqlx::query_as("INSERT INTO shopcarts (name) VALUES ($1) RETURNING id")
      .bind(&shopcart.name)
      .fetch_one(&mut *tx)
      .await
      .map_err(backend)?;

    let mut item_ids = Vec::with_capacity(shopcart.items.len());
    for item in &shopcart.items {
      let (item_id,): (i64,) = sqlx::query_as(
        "INSERT INTO items (shopcart_id, name, quantity, price) VALUES ($1, $2, $3, $4) RETURNING id",
      )
      .bind(id)
      .bind(&item.name)
      .bind(item.quantity)
      .bind(item.price)
      .fetch_one(&mut *tx)
      .await
      .map_err(backend)?;
      item_ids.push(item_id);
    }

    tx.commit().await.map_err(backend)?;

    // Ids are only handed out once the transaction has landed.
    shopcart.id = Some(id);
    for (item, item_id) in shopcart.items.iter_mut().zip(item_ids) {
      item.id = Some(item_id);
      item.shopcart_id = id;
    }
    info!(shopcart_id = id, "Created shopcart.");
    Ok(())
  }

  #[instrument(name = "pg::update_shopcart", skip_all, fields(shopcart_id = ?shopcart.id))]
  async fn update_shopcart(&self, shopcart: &Shopcart) -> StoreResult<()> {
    let id = require_id("shopcart", shopcart.id)?;
    sqlx::query("UPDATE shopcarts SET name = $1 WHERE id = $2")
      .bind(&shopcart.name)
      .bind(id)
      .execute(&self.pool)
      .await
      .map_err(backend)?;
    info!(shopcart_id = id, "Updated shopcart.");
    Ok(())
  }

  #[instrument(name = "pg::delete_shopcart", skip_all, fields(shopcart_id = ?shopcart.id))]
  async fn delete_shopcart(&self, shopcart: &Shopcart) -> StoreResult<()> {
    let Some(id) = shopcart.id else {
      return Ok(());
    };
    let mut tx = self.pool.begin().await.map_err(backend)?;
    let items = sqlx::query("DELETE FROM items WHERE shopcart_id = $1")
      .bind(id)
      .execute(&mut *tx)
      .await
      .map_err(backend)?;
    sqlx::query("DELETE FROM shopcarts WHERE id = $1")
      .bind(id)
      .execute(&mut *tx)
      .await
      .map_err(backend)?;
    tx.commit().await.map_err(backend)?;
    info!(shopcart_id = id, items_removed = items.rows_affected(), "Deleted shopcart.");
    Ok(())
  }

  #[instrument(name = "pg::clear_shopcart", skip_all, fields(shopcart_id = ?shopcart.id))]
  async fn clear_shopcart(&self, shopcart: &mut Shopcart) -> StoreResult<()> {
    if let Some(id) = shopcart.id {
      let removed = sqlx::query("DELETE FROM items WHERE shopcart_id = $1")
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(backend)?;
      info!(shopcart_id = id, items_removed = removed.rows_affected(), "Cleared shopcart.");
    }
    shopcart.items.clear();
    Ok(())
  }

  async fn get_shopcart(&self, id: i64) -> StoreResult<Option<Shopcart>> {
    debug!(shopcart_id = id, "Looking up shopcart.");
    let row: Option<ShopcartRow> = sqlx::query_as("SELECT id, name FROM shopcarts WHERE id = $1")
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(backend)?;
    match row {
      Some(row) => {
        let items = self.load_items(row.id).await?;
        Ok(Some(row.into_shopcart(items)))
      }
      None => Ok(None),
    }
  }

  async fn all_shopcarts(&self) -> StoreResult<Vec<Shopcart>> {
    let rows: Vec<ShopcartRow> = sqlx::query_as("SELECT id, name FROM shopcarts ORDER BY id")
      .fetch_all(&self.pool)
      .await
      .map_err(backend)?;
    let item_rows: Vec<ItemRow> = sqlx::query_as(&format!("{} ORDER BY id", SELECT_ITEM_COLUMNS))
      .fetch_all(&self.pool)
      .await
      .map_err(backend)?;

    let mut items_by_cart: HashMap<i64, Vec<Item>> = HashMap::new();
    for row in item_rows {
      items_by_cart.entry(row.shopcart_id).or_default().push(Item::from(row));
    }
    Ok(
      rows
        .into_iter()
        .map(|row| {
          let items = items_by_cart.remove(&row.id).unwrap_or_default();
          row.into_shopcart(items)
        })
        .collect(),
    )
  }

  fn find_shopcarts_by_name<'a>(&'a self, name: &'a str) -> BoxStream<'a, StoreResult<Shopcart>> {
    debug!(shopcart_name = name, "Querying shopcarts by name.");
    // The matching rows are read in full first so their connection is back
    // in the pool before any item query needs one.
    let rows = async move {
      sqlx::query_as::<_, ShopcartRow>("SELECT id, name FROM shopcarts WHERE name = $1 ORDER BY id")
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)
    };
    stream::once(rows)
      .map_ok(|rows| stream::iter(rows.into_iter().map(Ok::<_, StoreError>)))
      .try_flatten()
      .and_then(move |row| async move {
        let items = self.load_items(row.id).await?;
        Ok(row.into_shopcart(items))
      })
      .boxed()
  }

  #[instrument(name = "pg::create_item", skip_all, fields(shopcart_id = item.shopcart_id))]
  async fn create_item(&self, item: &mut Item) -> StoreResult<()> {
    let (id,): (i64,) = sqlx::query_as(
      "INSERT INTO items (shopcart_id, name, quantity, price) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(item.shopcart_id)
    .bind(&item.name)
    .bind(item.quantity)
    .bind(item.price)
    .fetch_one(&self.pool)
    .await
    .map_err(backend)?;
    item.id = Some(id);
    info!(item_id = id, "Created item.");
    Ok(())
  }

  #[instrument(name = "pg::update_item", skip_all, fields(item_id = ?item.id))]
  async fn update_item(&self, item: &Item) -> StoreResult<()> {
    let id = require_id("item", item.id)?;
    sqlx::query("UPDATE items SET shopcart_id = $1, name = $2, quantity = $3, price = $4 WHERE id = $5")
      .bind(item.shopcart_id)
      .bind(&item.name)
      .bind(item.quantity)
      .bind(item.price)
      .bind(id)
      .execute(&self.pool)
      .await
      .map_err(backend)?;
    info!(item_id = id, "Updated item.");
    Ok(())
  }

  #[instrument(name = "pg::delete_item", skip_all, fields(item_id = ?item.id))]
  async fn delete_item(&self, item: &Item) -> StoreResult<()> {
    if let Some(id) = item.id {
      sqlx::query("DELETE FROM items WHERE id = $1")
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(backend)?;
      info!(item_id = id, "Deleted item.");
    }
    Ok(())
  }

  async fn get_item(&self, id: i64) -> StoreResult<Option<Item>> {
    debug!(item_id = id, "Looking up item.");
    let row: Option<ItemRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_ITEM_COLUMNS))
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(backend)?;
    Ok(row.map(Item::from))
  }

  async fn items_of(&self, shopcart_id: i64) -> StoreResult<Vec<Item>> {
    self.load_items(shopcart_id).await
  }

  fn find_items_by_name<'a>(&'a self, shopcart_id: i64, name: &'a str) -> BoxStream<'a, StoreResult<Item>> {
    debug!(shopcart_id, item_name = name, "Querying items by name.");
    sqlx::query_as::<_, ItemRow>(
      "SELECT id, shopcart_id, name, quantity, price FROM items WHERE shopcart_id = $1 AND name = $2 ORDER BY id",
    )
    .bind(shopcart_id)
    .bind(name)
    .fetch(&self.pool)
    .map_ok(Item::from)
    .map_err(backend)
    .boxed()
  }
}
