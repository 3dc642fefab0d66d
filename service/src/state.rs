// service/src/state.rs
use crate::config::AppConfig;
use shopcart::ShopcartStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn ShopcartStore>,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  pub fn new(store: Arc<dyn ShopcartStore>, config: Arc<AppConfig>) -> Self {
    Self { store, config }
  }
}
