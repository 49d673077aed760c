use axum::http::StatusCode;
use bookshelf_db::StoreError;
use bookshelf_http::{PageError, TemplateError};
use thiserror::Error;

/// Everything that can go wrong while serving a book page.
#[derive(Debug, Error)]
pub enum BookError {
    #[error("invalid book id '{0}'")]
    InvalidIdentifier(String),

    #[error("invalid page count '{0}'")]
    InvalidPageCount(String),

    #[error("invalid publication date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error(transparent)]
    DataAccess(#[from] StoreError),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl PageError for BookError {
    fn status(&self) -> StatusCode {
        match self {
            BookError::InvalidIdentifier(_)
            | BookError::InvalidPageCount(_)
            | BookError::InvalidDate(_)
            | BookError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            BookError::DataAccess(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            BookError::DataAccess(_) | BookError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_are_client_errors() {
        for err in [
            BookError::InvalidIdentifier("x".into()),
            BookError::InvalidPageCount("x".into()),
            BookError::InvalidDate("x".into()),
        ] {
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn missing_book_is_not_found() {
        let err = BookError::from(StoreError::NotFound(9));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "book 9 not found");
    }

    #[test]
    fn storage_failures_are_server_errors() {
        let err = BookError::from(StoreError::Poisoned);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
