//! Storage layer for qlueless-daemon
//!
//! Ventures live in memory or SQLite; work items are always held in memory.

mod memory;
mod sqlite;
mod traits;

pub use memory::InMemoryStorage;
pub use sqlite::SqliteStorage;
pub use traits::{Storage, StorageResult, VentureStorage, WorkItemStorage};
