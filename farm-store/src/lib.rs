//! Record store access for the farm dashboard.
//!
//! This crate provides:
//! - [`RecordStore`]: the asynchronous `search_read` / `call` interface the
//!   dashboard consumes
//! - [`Domain`]: `[field, operator, value]` search predicates
//! - [`Database`]: an in-memory SQLite store loaded from CSV, implementing
//!   `RecordStore` with the same record shapes as the remote store
//! - `RpcStore` (feature `rpc`): a JSON-RPC client for a remote store
//! - [`fetch`]: the Data Fetcher that turns a [`farm_core::Filter`] into a
//!   typed [`farm_core::DashboardInputs`] bundle
//! - [`cards`]: summary card counts through the store's `search_count`
//!
//! # Usage
//!
//! ```rust
//! use farm_store::Database;
//!
//! let db = Database::new().unwrap();
//! db.load_farms("id,name,area\n1,North Farm,45\n").unwrap();
//! ```
//!
//! # Architecture
//!
//! `Rc<RefCell<Connection>>` wrapper for interior mutability on a
//! single-threaded executor. Queries run synchronously inside the async
//! trait methods; only a remote store actually suspends.

pub mod cards;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod fixtures;
mod loader;
mod queries;
#[cfg(feature = "rpc")]
pub mod rpc;
pub mod schema;
pub mod store;

pub use cards::fetch_summary_cards;
pub use domain::{Condition, Domain, Operator};
pub use error::StoreError;
pub use fetch::{fetch_dashboard_inputs, fetch_filter_options, project_domain, FilterOptions};
#[cfg(feature = "rpc")]
pub use rpc::RpcStore;
pub use store::{Record, RecordStore};

use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory SQLite database holding farm records.
///
/// This struct is cheaply cloneable (via `Rc`); clones share one connection.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    ///
    /// The database is empty after creation; use the `load_*` methods
    /// to populate it with CSV data.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Database;

    pub fn sample_database() -> Database {
        Database::with_sample_data().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use farm_core::entity;

    #[test]
    fn database_creates_successfully() {
        let db = Database::new();
        assert!(db.is_ok(), "Database should create without errors");
    }

    #[tokio::test]
    async fn database_is_cloneable() {
        let db = Database::new().unwrap();
        let db2 = db.clone();
        db.load_farms("id,name\n1,North Farm\n").unwrap();
        let farms = db2
            .search_read(entity::FARM, &Domain::new(), &["name"])
            .await
            .unwrap();
        assert_eq!(farms.len(), 1, "Clone should see same data via shared Rc");
    }

    #[tokio::test]
    async fn database_starts_empty() {
        let db = Database::new().unwrap();
        let projects = db
            .search_read(entity::PROJECT, &Domain::new(), &[])
            .await
            .unwrap();
        assert!(projects.is_empty(), "New database should have no projects");
    }

    #[test]
    fn sample_data_loads() {
        assert!(Database::with_sample_data().is_ok());
    }
}
