//! Application state for the web layer.

use std::sync::Arc;

use crate::service::StationService;
use crate::store::Store;

/// Shared application state.
pub struct AppState<S> {
    /// Station and price operations
    pub service: Arc<StationService<S>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

impl<S: Store> AppState<S> {
    /// Create a new app state.
    pub fn new(service: StationService<S>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
