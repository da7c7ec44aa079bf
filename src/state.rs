use std::sync::Arc;

use crate::{config::Config, db::Store};

/// Application state shared across all handlers.
///
/// Cheap to clone: the store and config sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: Arc<Config>) -> Self {
        Self { store, config }
    }
}
