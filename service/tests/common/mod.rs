// service/tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper

use once_cell::sync::Lazy;
use serde_json::{json, Value};
use shopcart::{MemoryStore, ShopcartStore};
use shopcart_service::{AppConfig, AppState};
use std::sync::Arc;
use tracing::Level;

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

/// A fresh in-memory store plus the state that shares it.
pub fn memory_state() -> (Arc<MemoryStore>, AppState) {
  let store = Arc::new(MemoryStore::new());
  let config = AppConfig::from_lookup(|name| match name {
    "STORAGE_BACKEND" => Some("memory".to_string()),
    _ => None,
  })
  .expect("default config");
  let shared: Arc<dyn ShopcartStore> = store.clone();
  (store, AppState::new(shared, Arc::new(config)))
}

/// Builds the full service around `$state` for `actix_web::test` calls.
#[macro_export]
macro_rules! init_app {
  ($state:expr) => {
    actix_web::test::init_service(
      actix_web::App::new()
        .app_data(actix_web::web::Data::new($state))
        .configure(shopcart_service::web::configure_app_routes),
    )
    .await
  };
}

/// An item payload as a client sends it; the URL decides the owning cart.
pub fn item_body(name: &str, quantity: Value, price: Value) -> Value {
  json!({
    "name": name,
    "quantity": quantity,
    "price": price,
  })
}
