// core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Raised while turning a record into a `Shopcart` or `Item`.
///
/// `entity` is the aggregate being read ("Shopcart" or "Item") so messages
/// read the same way regardless of which record failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("Invalid {entity}: missing {field}")]
  MissingField { entity: &'static str, field: String },

  #[error("Invalid {entity}: {field} must not be empty")]
  EmptyName { entity: &'static str, field: String },

  #[error("Invalid {entity}: {field} {reason}")]
  InvalidField {
    entity: &'static str,
    field: String,
    reason: String,
  },

  #[error("Invalid {entity}: body of request contained bad or no data - Error message: {detail}")]
  BadData { entity: &'static str, detail: String },
}

impl ValidationError {
  /// Name of the offending field, when the error is tied to one.
  pub fn field(&self) -> Option<&str> {
    match self {
      ValidationError::MissingField { field, .. }
      | ValidationError::EmptyName { field, .. }
      | ValidationError::InvalidField { field, .. } => Some(field),
      ValidationError::BadData { .. } => None,
    }
  }
}

/// A well-typed value that is out of range for the operation being performed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolicyViolation {
  #[error("Invalid Item: quantity must be exactly 1 when adding an item, got {actual}")]
  QuantityMustBeOne { actual: i64 },

  #[error("Invalid Item: quantity must be at least 1, got {actual}")]
  QuantityBelowOne { actual: i64 },

  #[error("Invalid Item: price must not be negative, got {actual}")]
  NegativePrice { actual: f64 },
}

/// Failure reported by a `ShopcartStore` backend.
#[derive(Debug, Error)]
pub enum StoreError {
  #[error("Storage backend failure: {source}")]
  Backend {
    #[source]
    source: AnyhowError,
  },
}

impl From<AnyhowError> for StoreError {
  fn from(err: AnyhowError) -> Self {
    StoreError::Backend { source: err }
  }
}

#[derive(Debug, Error)]
pub enum ShopcartError {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error(transparent)]
  Policy(#[from] PolicyViolation),

  #[error("{entity} with id '{id}' could not be found.")]
  NotFound { entity: &'static str, id: i64 },

  #[error(transparent)]
  Store(#[from] StoreError),
}

impl ShopcartError {
  pub fn shopcart_not_found(id: i64) -> Self {
    ShopcartError::NotFound { entity: "Shopcart", id }
  }

  pub fn item_not_found(id: i64) -> Self {
    ShopcartError::NotFound { entity: "Item", id }
  }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

pub type ShopcartResult<T, E = ShopcartError> = std::result::Result<T, E>;
