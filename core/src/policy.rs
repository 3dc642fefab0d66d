// core/src/policy.rs

//! Range rules applied after an item record has parsed.
//!
//! The same `Item::deserialize` serves both create and update, so the rules
//! that differ between the two live here instead.

use crate::error::PolicyViolation;
use crate::model::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemPolicy {
  /// Adding an item to a cart: quantity must be exactly 1.
  Create,
  /// Changing an existing item: any quantity of at least 1.
  Update,
}

impl ItemPolicy {
  /// Quantity is checked before price.
  pub fn check(self, item: &Item) -> Result<(), PolicyViolation> {
    match self {
      ItemPolicy::Create if item.quantity != 1 => {
        return Err(PolicyViolation::QuantityMustBeOne { actual: item.quantity });
      }
      ItemPolicy::Update if item.quantity < 1 => {
        return Err(PolicyViolation::QuantityBelowOne { actual: item.quantity });
      }
      _ => {}
    }
    if item.price < 0.0 {
      return Err(PolicyViolation::NegativePrice { actual: item.price });
    }
    Ok(())
  }
}
