// core/src/model/mod.rs

//! The Shopcart/Item aggregate and its record contracts.

pub mod item;
pub mod record;
pub mod shopcart;

pub use item::Item;
pub use record::Record;
pub use shopcart::Shopcart;
