// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper

use once_cell::sync::Lazy;
use serde_json::{json, Value};
use shopcart::{Item, Shopcart};
use tracing::Level;

// --- Helper for Tracing Setup (call once per test run if needed) ---
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

// --- Record builders ---
pub fn item_record(shopcart_id: i64, name: &str, quantity: i64, price: f64) -> Value {
  json!({
    "shopcart_id": shopcart_id,
    "name": name,
    "quantity": quantity,
    "price": price,
  })
}

pub fn sample_item(name: &str) -> Item {
  Item {
    id: None,
    shopcart_id: 0,
    name: name.to_string(),
    quantity: 1,
    price: 9.99,
  }
}

pub fn sample_shopcart(name: &str, item_names: &[&str]) -> Shopcart {
  Shopcart {
    id: None,
    name: name.to_string(),
    items: item_names.iter().map(|n| sample_item(n)).collect(),
  }
}
