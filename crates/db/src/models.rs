use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date stored for books saved without a publication date.
pub fn unset_publication_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// A book record as persisted by a [`BookStore`](crate::BookStore).
///
/// An `id` of zero marks a record that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub name: String,
    pub author: String,
    pub pages: i64,
    pub publication_date: NaiveDate,
}

impl Book {
    /// Unsaved record used to pre-populate a "new book" form.
    pub fn blank(publication_date: NaiveDate) -> Self {
        Self {
            id: 0,
            name: String::new(),
            author: String::new(),
            pages: 0,
            publication_date,
        }
    }

    pub fn from_fields(id: i64, fields: BookFields) -> Self {
        Self {
            id,
            name: fields.name,
            author: fields.author,
            pages: fields.pages,
            publication_date: fields.publication_date,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id > 0
    }
}

/// Writable fields of a book, shared by insert and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookFields {
    pub name: String,
    pub author: String,
    pub pages: i64,
    pub publication_date: NaiveDate,
}

impl Default for BookFields {
    fn default() -> Self {
        Self {
            name: String::new(),
            author: String::new(),
            pages: 0,
            publication_date: unset_publication_date(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_book_is_not_persisted() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let book = Book::blank(today);
        assert!(!book.is_persisted());
        assert_eq!(book.publication_date, today);
        assert!(book.name.is_empty());
    }

    #[test]
    fn default_fields_use_unset_date() {
        let fields = BookFields::default();
        assert_eq!(fields.publication_date.to_string(), "0001-01-01");
        assert_eq!(fields.pages, 0);
    }

    #[test]
    fn publication_date_serializes_as_iso_date() {
        let book = Book {
            id: 3,
            name: "Dune".into(),
            author: "Herbert".into(),
            pages: 412,
            publication_date: NaiveDate::from_ymd_opt(1965, 8, 1).unwrap(),
        };
        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(value["publication_date"], "1965-08-01");
    }
}
