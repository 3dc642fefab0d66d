// service/src/db/schema.rs

//! Table definitions for the PostgreSQL store.

use sqlx::PgPool;
use tracing::info;

const CREATE_SHOPCARTS: &str = r#"
CREATE TABLE IF NOT EXISTS shopcarts (
  id BIGSERIAL PRIMARY KEY,
  name VARCHAR(63) NOT NULL
)
"#;

// Items go away with their cart even if a row is removed outside this service.
const CREATE_ITEMS: &str = r#"
CREATE TABLE IF NOT EXISTS items (
  id BIGSERIAL PRIMARY KEY,
  shopcart_id BIGINT NOT NULL REFERENCES shopcarts(id) ON DELETE CASCADE,
  name VARCHAR(128) NOT NULL,
  quantity BIGINT NOT NULL DEFAULT 1,
  price DOUBLE PRECISION NOT NULL DEFAULT 0.0
)
"#;

const CREATE_ITEMS_INDEX: &str = "CREATE INDEX IF NOT EXISTS items_shopcart_id_idx ON items (shopcart_id)";

/// Creates the tables if they are missing. Safe to run on every start.
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
  let mut tx = pool.begin().await?;
  for statement in [CREATE_SHOPCARTS, CREATE_ITEMS, CREATE_ITEMS_INDEX] {
    sqlx::query(statement).execute(&mut *tx).await?;
  }
  tx.commit().await?;
  info!("Database schema is in place.");
  Ok(())
}
