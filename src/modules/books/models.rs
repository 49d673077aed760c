use serde::{Deserialize, Serialize};

pub use bookshelf_db::{Book, BookFields};

/// Data bound to the listing template.
#[derive(Debug, Serialize)]
pub struct IndexPage {
    pub books: Vec<Book>,
}

/// Data bound to the single-book template.
#[derive(Debug, Serialize)]
pub struct BookPage {
    pub book: Book,
    /// False for the blank "new book" form.
    pub persisted: bool,
}

impl BookPage {
    pub fn new(book: Book) -> Self {
        let persisted = book.is_persisted();
        Self { book, persisted }
    }
}

/// Raw fields posted by the book form. Every field is optional text until
/// `SaveForm::into_request` types it.
#[derive(Debug, Default, Deserialize)]
pub struct SaveForm {
    pub id: Option<String>,
    pub name: Option<String>,
    pub author: Option<String>,
    pub pages: Option<String>,
    #[serde(rename = "publicationDate")]
    pub publication_date: Option<String>,
}

/// `?id=` query string accepted by the view and delete pages.
#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

/// A validated save, decided once from the posted identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveRequest {
    Create(BookFields),
    Update { id: i64, fields: BookFields },
}
