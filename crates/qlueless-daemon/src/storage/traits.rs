//! Storage trait definitions

use crate::error::StorageError;
use async_trait::async_trait;
use qlueless_types::{NewVenture, Venture, WorkItem, WorkItemKind};

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Combined storage trait
pub trait Storage: VentureStorage + WorkItemStorage + Send + Sync {}

impl<T> Storage for T where T: VentureStorage + WorkItemStorage + Send + Sync {}

/// Storage for ventures
///
/// Lookups by ID return dead ventures too so they can be revived; callers
/// presenting ventures to clients filter on `is_alive`.
#[async_trait]
pub trait VentureStorage: Send + Sync {
    /// Store a new venture, assigning its ID and modification time
    async fn insert_venture(&self, new: NewVenture) -> StorageResult<Venture>;

    /// Get a venture by ID
    async fn get_venture(&self, id: &str) -> StorageResult<Option<Venture>>;

    /// List every living venture ordered by ID
    async fn list_living_ventures(&self) -> StorageResult<Vec<Venture>>;

    /// List the ventures with the given IDs, skipping unknown ones
    async fn list_ventures(&self, ids: &[String]) -> StorageResult<Vec<Venture>>;

    /// Overwrite a stored venture and stamp its modification time
    async fn update_venture(&self, venture: Venture) -> StorageResult<Venture>;
}

/// Storage for things and orders
#[async_trait]
pub trait WorkItemStorage: Send + Sync {
    /// List all items of a kind ordered by ID
    async fn list_work_items(&self, kind: WorkItemKind) -> StorageResult<Vec<WorkItem>>;

    /// Get an item by ID
    async fn get_work_item(&self, kind: WorkItemKind, id: &str) -> StorageResult<Option<WorkItem>>;

    /// Store a new item, assigning its ID
    async fn insert_work_item(&self, kind: WorkItemKind, item: WorkItem) -> StorageResult<WorkItem>;
}

/// Unix time in milliseconds, the resolution of `last_modified`
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Parse a stored ID; non-numeric IDs never match a stored entity
pub(crate) fn parse_id(id: &str) -> Option<i64> {
    id.parse::<i64>().ok().filter(|id| *id > 0)
}
