use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{Book, BookFields, BookStore, StoreError};

/// Process-local store; identifiers start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct MemoryBookStore {
    inner: RwLock<Shelf>,
}

#[derive(Debug, Default)]
struct Shelf {
    last_id: i64,
    books: BTreeMap<i64, Book>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn insert(&self, fields: &BookFields) -> Result<i64, StoreError> {
        let mut shelf = self.inner.write().await;
        shelf.last_id += 1;
        let id = shelf.last_id;
        shelf.books.insert(id, Book::from_fields(id, fields.clone()));
        Ok(id)
    }

    async fn update(&self, id: i64, fields: &BookFields) -> Result<u64, StoreError> {
        let mut shelf = self.inner.write().await;
        match shelf.books.get_mut(&id) {
            Some(book) => {
                *book = Book::from_fields(id, fields.clone());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn fetch_by_id(&self, id: i64) -> Result<Book, StoreError> {
        self.inner
            .read()
            .await
            .books
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn fetch_all(&self) -> Result<Vec<Book>, StoreError> {
        Ok(self.inner.read().await.books.values().cloned().collect())
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, StoreError> {
        let removed = self.inner.write().await.books.remove(&id);
        Ok(u64::from(removed.is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dune() -> BookFields {
        BookFields {
            name: "Dune".into(),
            author: "Herbert".into(),
            pages: 412,
            publication_date: NaiveDate::from_ymd_opt(1965, 8, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn insert_then_fetch_round_trips() {
        let store = MemoryBookStore::new();
        let id = store.insert(&dune()).await.unwrap();
        assert_eq!(id, 1);

        let book = store.fetch_by_id(id).await.unwrap();
        assert_eq!(book, Book::from_fields(id, dune()));
    }

    #[tokio::test]
    async fn identifiers_are_not_reused_after_delete() {
        let store = MemoryBookStore::new();
        let first = store.insert(&dune()).await.unwrap();
        assert_eq!(store.delete_by_id(first).await.unwrap(), 1);
        let second = store.insert(&dune()).await.unwrap();
        assert!(second > first);
    }

    #[tokio::test]
    async fn update_reports_affected_rows() {
        let store = MemoryBookStore::new();
        let id = store.insert(&dune()).await.unwrap();

        let mut changed = dune();
        changed.pages = 896;
        assert_eq!(store.update(id, &changed).await.unwrap(), 1);
        assert_eq!(store.update(id + 10, &changed).await.unwrap(), 0);
        assert_eq!(store.fetch_by_id(id).await.unwrap().pages, 896);
    }

    #[tokio::test]
    async fn missing_records_are_reported() {
        let store = MemoryBookStore::new();
        assert!(matches!(
            store.fetch_by_id(7).await,
            Err(StoreError::NotFound(7))
        ));
        assert_eq!(store.delete_by_id(7).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn fetch_all_lists_in_identifier_order() {
        let store = MemoryBookStore::new();
        for name in ["a", "b", "c"] {
            let mut fields = dune();
            fields.name = name.into();
            store.insert(&fields).await.unwrap();
        }
        let names: Vec<String> = store
            .fetch_all()
            .await
            .unwrap()
            .into_iter()
            .map(|book| book.name)
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }
}
