//! Persistence for the book catalog.
//!
//! [`BookStore`] is the data-access contract the web layer consumes. Two
//! backends ship with the crate: [`MemoryBookStore`] for tests and throwaway
//! runs, and [`SqliteBookStore`] for a file-backed catalog.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use bookshelf_kernel::settings::{DatabaseBackend, DatabaseSettings};
use bookshelf_kernel::Migration;

pub mod error;
pub mod memory;
pub mod models;
pub mod sqlite;

pub use error::StoreError;
pub use memory::MemoryBookStore;
pub use models::{unset_publication_date, Book, BookFields};
pub use sqlite::SqliteBookStore;

/// CRUD contract over book records.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Persist a new record and return its identifier.
    async fn insert(&self, fields: &BookFields) -> Result<i64, StoreError>;

    /// Overwrite the record `id`; returns the number of rows affected.
    async fn update(&self, id: i64, fields: &BookFields) -> Result<u64, StoreError>;

    /// Fetch one record, failing with [`StoreError::NotFound`] when absent.
    async fn fetch_by_id(&self, id: i64) -> Result<Book, StoreError>;

    async fn fetch_all(&self) -> Result<Vec<Book>, StoreError>;

    /// Remove the record `id`; returns the number of rows affected.
    async fn delete_by_id(&self, id: i64) -> Result<u64, StoreError>;

    /// Apply module migrations not yet recorded; returns how many ran.
    async fn migrate(&self, _migrations: &[(String, Migration)]) -> Result<usize, StoreError> {
        Ok(0)
    }
}

/// Open the store selected by the database settings.
pub fn connect(settings: &DatabaseSettings) -> anyhow::Result<Arc<dyn BookStore>> {
    match settings.backend {
        DatabaseBackend::Memory => {
            tracing::info!(target: "bookshelf-db", backend = "memory", "opening book store");
            Ok(Arc::new(MemoryBookStore::new()))
        }
        DatabaseBackend::Sqlite => {
            tracing::info!(
                target: "bookshelf-db",
                backend = "sqlite",
                path = %settings.path,
                "opening book store"
            );
            let store = SqliteBookStore::open(&settings.path)
                .with_context(|| format!("failed to open sqlite database '{}'", settings.path))?;
            Ok(Arc::new(store))
        }
    }
}
