// core/src/model/shopcart.rs

use serde_json::{json, Value};

use crate::error::{PolicyViolation, ValidationError};
use crate::model::item::Item;
use crate::model::record::{as_record, kind_of, read_name};
use crate::policy::ItemPolicy;

const ENTITY: &str = "Shopcart";

/// The cart aggregate root. Owns its items; deleting the cart deletes them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Shopcart {
  pub id: Option<i64>,
  pub name: String,
  pub items: Vec<Item>,
}

impl Shopcart {
  pub fn new(name: impl Into<String>) -> Self {
    Shopcart {
      id: None,
      name: name.into(),
      items: Vec::new(),
    }
  }

  pub fn from_record(record: &Value) -> Result<Self, ValidationError> {
    let mut shopcart = Shopcart::default();
    shopcart.deserialize(record)?;
    Ok(shopcart)
  }

  /// `{id, name, items: [...]}` with items in insertion order.
  pub fn serialize(&self) -> Value {
    json!({
      "id": self.id,
      "name": self.name,
      "items": self.items.iter().map(Item::serialize).collect::<Vec<_>>(),
    })
  }

  /// Reads `name` and the optional `items` array. `id` is never read.
  ///
  /// Nested items without a `shopcart_id` are attributed to this cart (`0`
  /// while unsaved; the store assigns the real id on create). The first
  /// failing item aborts the whole call and `self` keeps its previous
  /// contents.
  pub fn deserialize(&mut self, record: &Value) -> Result<&mut Self, ValidationError> {
    let record = as_record(ENTITY, record)?;
    let name = read_name(ENTITY, record, "name")?;
    let owner = self.id.unwrap_or_default();
    let items = match record.get("items") {
      None | Some(Value::Null) => Vec::new(),
      Some(Value::Array(entries)) => entries
        .iter()
        .map(|entry| Item::from_record_in(owner, entry))
        .collect::<Result<Vec<_>, _>>()?,
      Some(other) => {
        return Err(ValidationError::BadData {
          entity: ENTITY,
          detail: format!("items must be an array, found {}", kind_of(other)),
        })
      }
    };

    self.name = name;
    self.items = items;
    Ok(self)
  }

  /// Items attached at cart creation obey the same range rules as an update.
  pub fn check_items(&self) -> Result<(), PolicyViolation> {
    self.items.iter().try_for_each(|item| ItemPolicy::Update.check(item))
  }
}
