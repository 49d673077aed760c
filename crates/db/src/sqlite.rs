use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bookshelf_kernel::Migration;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::{Book, BookFields, BookStore, StoreError};

/// DDL for the `books` table, contributed as a migration by the books module.
pub const CREATE_BOOKS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS books (
        id               INTEGER PRIMARY KEY AUTOINCREMENT,
        name             TEXT    NOT NULL,
        author           TEXT    NOT NULL,
        pages            INTEGER NOT NULL DEFAULT 0,
        publication_date TEXT    NOT NULL
    );
";

const CREATE_MIGRATIONS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS schema_migrations (
        module     TEXT NOT NULL,
        id         TEXT NOT NULL,
        applied_at TEXT NOT NULL,
        PRIMARY KEY (module, id)
    );
";

const SELECT_BOOK: &str = "SELECT id, name, author, pages, publication_date FROM books";

/// SQLite-backed store. Queries run on tokio's blocking pool, one at a time.
#[derive(Clone)]
pub struct SqliteBookStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteBookStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self::from_connection(Connection::open(path)?))
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Ok(Self::from_connection(Connection::open_in_memory()?))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn.lock().map_err(|_| StoreError::Poisoned)?;
            f(&mut guard)
        })
        .await?
    }
}

fn book_from_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        name: row.get(1)?,
        author: row.get(2)?,
        pages: row.get(3)?,
        publication_date: row.get(4)?,
    })
}

#[async_trait]
impl BookStore for SqliteBookStore {
    async fn insert(&self, fields: &BookFields) -> Result<i64, StoreError> {
        let fields = fields.clone();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO books (name, author, pages, publication_date) VALUES (?1, ?2, ?3, ?4)",
                params![
                    fields.name,
                    fields.author,
                    fields.pages,
                    fields.publication_date
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
    }

    async fn update(&self, id: i64, fields: &BookFields) -> Result<u64, StoreError> {
        let fields = fields.clone();
        self.with_conn(move |conn| {
            let rows = conn.execute(
                "UPDATE books SET name = ?1, author = ?2, pages = ?3, publication_date = ?4 WHERE id = ?5",
                params![
                    fields.name,
                    fields.author,
                    fields.pages,
                    fields.publication_date,
                    id
                ],
            )?;
            Ok(rows as u64)
        })
        .await
    }

    async fn fetch_by_id(&self, id: i64) -> Result<Book, StoreError> {
        self.with_conn(move |conn| {
            conn.query_row(
                &format!("{SELECT_BOOK} WHERE id = ?1"),
                params![id],
                book_from_row,
            )
            .optional()?
            .ok_or(StoreError::NotFound(id))
        })
        .await
    }

    async fn fetch_all(&self) -> Result<Vec<Book>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{SELECT_BOOK} ORDER BY id"))?;
            let books = stmt
                .query_map([], book_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(books)
        })
        .await
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, StoreError> {
        self.with_conn(move |conn| {
            let rows = conn.execute("DELETE FROM books WHERE id = ?1", params![id])?;
            Ok(rows as u64)
        })
        .await
    }

    async fn migrate(&self, migrations: &[(String, Migration)]) -> Result<usize, StoreError> {
        let migrations = migrations.to_vec();
        self.with_conn(move |conn| {
            conn.execute_batch(CREATE_MIGRATIONS_TABLE)?;

            let mut applied = 0;
            for (module, migration) in migrations {
                let seen: Option<i64> = conn
                    .query_row(
                        "SELECT 1 FROM schema_migrations WHERE module = ?1 AND id = ?2",
                        params![module, migration.id],
                        |row| row.get(0),
                    )
                    .optional()?;
                if seen.is_some() {
                    continue;
                }

                let tx = conn.transaction()?;
                tx.execute_batch(migration.up)
                    .map_err(|source| StoreError::Migration {
                        module: module.clone(),
                        id: migration.id.to_string(),
                        source,
                    })?;
                tx.execute(
                    "INSERT INTO schema_migrations (module, id, applied_at) VALUES (?1, ?2, ?3)",
                    params![module, migration.id, Utc::now()],
                )?;
                tx.commit()?;

                tracing::info!(
                    target: "bookshelf-db",
                    module = %module,
                    migration = migration.id,
                    "applied migration"
                );
                applied += 1;
            }

            Ok(applied)
        })
        .await
    }
}
