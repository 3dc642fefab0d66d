// core/src/model/item.rs

use std::borrow::Cow;

use serde_json::{json, Value};

use crate::error::ValidationError;
use crate::model::record::{as_record, read_float, read_integer, read_name};

const ENTITY: &str = "Item";

/// A single line entry inside a shopcart.
///
/// `id` is `None` until a store has persisted the item.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Item {
  pub id: Option<i64>,
  pub shopcart_id: i64,
  pub name: String,
  pub quantity: i64,
  pub price: f64,
}

impl Item {
  /// Builds an unsaved item from a record.
  pub fn from_record(record: &Value) -> Result<Self, ValidationError> {
    let mut item = Item::default();
    item.deserialize(record)?;
    Ok(item)
  }

  /// Like [`Item::from_record`], but an absent or null `shopcart_id` is
  /// taken to be `shopcart_id`. A value present in the record still wins.
  pub fn from_record_in(shopcart_id: i64, record: &Value) -> Result<Self, ValidationError> {
    Item::from_record(&with_owner(shopcart_id, record))
  }

  /// `{id, shopcart_id, name, quantity, price}`
  pub fn serialize(&self) -> Value {
    json!({
      "id": self.id,
      "shopcart_id": self.shopcart_id,
      "name": self.name,
      "quantity": self.quantity,
      "price": self.price,
    })
  }

  /// Overwrites every field except `id` from `record`.
  ///
  /// Range rules (quantity of exactly one on create, non-negative price) are
  /// not checked here; see [`crate::policy::ItemPolicy`]. On error `self` is
  /// left untouched.
  pub fn deserialize(&mut self, record: &Value) -> Result<&mut Self, ValidationError> {
    let record = as_record(ENTITY, record)?;
    let shopcart_id = read_integer(ENTITY, record, "shopcart_id")?;
    let name = read_name(ENTITY, record, "name")?;
    let quantity = read_integer(ENTITY, record, "quantity")?;
    let price = read_float(ENTITY, record, "price")?;

    self.shopcart_id = shopcart_id;
    self.name = name;
    self.quantity = quantity;
    self.price = price;
    Ok(self)
  }

  /// [`Item::deserialize`] that keeps the current owner when the record
  /// names none.
  pub fn deserialize_in_place(&mut self, record: &Value) -> Result<&mut Self, ValidationError> {
    let record = with_owner(self.shopcart_id, record);
    self.deserialize(&record)
  }
}

fn with_owner(shopcart_id: i64, record: &Value) -> Cow<'_, Value> {
  match record {
    Value::Object(fields) if fields.get("shopcart_id").map_or(true, Value::is_null) => {
      let mut fields = fields.clone();
      fields.insert("shopcart_id".to_string(), json!(shopcart_id));
      Cow::Owned(Value::Object(fields))
    }
    _ => Cow::Borrowed(record),
  }
}
