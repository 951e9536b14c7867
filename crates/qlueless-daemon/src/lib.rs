//! Qlueless Assembly API daemon
//!
//! This module provides the components of the `qserver` binary:
//! - REST resources for ventures, things and orders
//! - Reply presentation driven by the `wrap` and `wrap_with` parameters
//! - Storage backends
//! - Server lifecycle management

pub mod api;
pub mod config;
pub mod content;
pub mod error;
pub mod server;
pub mod storage;

pub use config::DaemonConfig;
pub use error::{ApiError, DaemonError, StorageError};
pub use server::Server;
pub use storage::{InMemoryStorage, SqliteStorage, Storage};
