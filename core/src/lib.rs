// src/lib.rs

//! Shopcart: the Shopcart/Item aggregate behind the shopcart REST service.
//!
//! This crate owns:
//!  - The `Shopcart` and `Item` entities and their record (JSON object) contracts.
//!  - Strict record validation: required keys, trimmed non-empty names,
//!    integral quantities, numeric prices, object-shaped payloads.
//!  - The create/update range rules for items (`ItemPolicy`).
//!  - The `ShopcartStore` persistence contract and an in-memory implementation.
//!
//! Model and policy code is synchronous and side-effect free. Anything that
//! needs storage receives a store handle explicitly.

pub mod error;
pub mod model;
pub mod policy;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::error::{PolicyViolation, ShopcartError, ShopcartResult, StoreError, StoreResult, ValidationError};
pub use crate::model::{Item, Record, Shopcart};
pub use crate::policy::ItemPolicy;
pub use crate::store::{MemoryStore, ShopcartStore};
