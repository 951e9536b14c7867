//! In-memory storage implementation

use super::traits::*;
use crate::error::StorageError;
use async_trait::async_trait;
use qlueless_types::{NewVenture, Venture, WorkItem, WorkItemKind};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory storage for development and testing
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    ventures: Arc<RwLock<BTreeMap<i64, Venture>>>,
    work_items: Arc<RwLock<HashMap<WorkItemKind, BTreeMap<i64, WorkItem>>>>,
}

impl InMemoryStorage {
    /// Create a new in-memory storage
    pub fn new() -> Self {
        Self::default()
    }
}

fn next_id<V>(map: &BTreeMap<i64, V>) -> i64 {
    map.keys().next_back().map_or(1, |last| last + 1)
}

#[async_trait]
impl VentureStorage for InMemoryStorage {
    async fn insert_venture(&self, new: NewVenture) -> StorageResult<Venture> {
        let mut ventures = self.ventures.write().await;
        let id = next_id(&ventures);
        let venture = new.into_venture(id.to_string(), now_millis());
        ventures.insert(id, venture.clone());
        Ok(venture)
    }

    async fn get_venture(&self, id: &str) -> StorageResult<Option<Venture>> {
        let ventures = self.ventures.read().await;
        Ok(parse_id(id).and_then(|id| ventures.get(&id).cloned()))
    }

    async fn list_living_ventures(&self) -> StorageResult<Vec<Venture>> {
        let ventures = self.ventures.read().await;
        Ok(ventures.values().filter(|v| v.is_alive).cloned().collect())
    }

    async fn list_ventures(&self, ids: &[String]) -> StorageResult<Vec<Venture>> {
        let ventures = self.ventures.read().await;
        let mut wanted: Vec<i64> = ids.iter().filter_map(|id| parse_id(id)).collect();
        wanted.sort_unstable();
        wanted.dedup();
        Ok(wanted
            .into_iter()
            .filter_map(|id| ventures.get(&id).cloned())
            .collect())
    }

    async fn update_venture(&self, mut venture: Venture) -> StorageResult<Venture> {
        let mut ventures = self.ventures.write().await;
        let slot = parse_id(&venture.id)
            .and_then(|id| ventures.get_mut(&id))
            .ok_or_else(|| StorageError::NotFound(format!("Venture {}", venture.id)))?;
        venture.last_modified = now_millis();
        *slot = venture.clone();
        Ok(venture)
    }
}

#[async_trait]
impl WorkItemStorage for InMemoryStorage {
    async fn list_work_items(&self, kind: WorkItemKind) -> StorageResult<Vec<WorkItem>> {
        let items = self.work_items.read().await;
        Ok(items
            .get(&kind)
            .map(|items| items.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn get_work_item(&self, kind: WorkItemKind, id: &str) -> StorageResult<Option<WorkItem>> {
        let items = self.work_items.read().await;
        Ok(parse_id(id).and_then(|id| items.get(&kind)?.get(&id).cloned()))
    }

    async fn insert_work_item(&self, kind: WorkItemKind, mut item: WorkItem) -> StorageResult<WorkItem> {
        let mut all = self.work_items.write().await;
        let items = all.entry(kind).or_default();
        let id = next_id(items);
        item.id = id.to_string();
        items.insert(id, item.clone());
        Ok(item)
    }
}
