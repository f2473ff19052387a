//! Local storage: the durable string key/value entries behind the session.
//!
//! This module is split into two submodules:
//! - `repo`: SQL-only functions over the `local_storage` table.
//! - `storage`: the `LocalStorage` seam with SQLite and in-memory backends.
//!
//! External modules should import from `dataflow_shell::db`; the repository
//! API and the storage types are re-exported here.

pub mod repo;
pub mod storage;

pub use repo::*;
pub use storage::{LocalStorage, MemoryStorage, SqliteStorage, StorageError};
