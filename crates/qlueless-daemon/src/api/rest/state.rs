//! Application state for API handlers

use crate::content::StaticContent;
use crate::storage::{Storage, VentureStorage, WorkItemStorage};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Venture backend
    pub ventures: Arc<dyn VentureStorage>,

    /// Things and orders
    pub work_items: Arc<dyn WorkItemStorage>,

    /// Preloaded changelog and OpenAPI documents
    pub content: Arc<StaticContent>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        ventures: Arc<dyn VentureStorage>,
        work_items: Arc<dyn WorkItemStorage>,
        content: StaticContent,
    ) -> Self {
        Self {
            ventures,
            work_items,
            content: Arc::new(content),
        }
    }

    /// State backed by a single store for every resource
    pub fn with_storage<S: Storage + 'static>(storage: Arc<S>, content: StaticContent) -> Self {
        Self::new(storage.clone(), storage, content)
    }
}
