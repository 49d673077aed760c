//! Typing of raw form and query fields.
//!
//! Absent and empty fields are treated alike and fall back to defaults.

use chrono::NaiveDate;

use super::error::BookError;
use super::models::{BookFields, SaveForm, SaveRequest};
use bookshelf_db::unset_publication_date;

/// Wire format of publication dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn present(raw: Option<&str>) -> Option<&str> {
    raw.filter(|value| !value.is_empty())
}

/// Parse an optional identifier; `None` when absent or empty.
pub fn parse_id(raw: Option<&str>) -> Result<Option<i64>, BookError> {
    present(raw)
        .map(|value| {
            value
                .parse::<i64>()
                .map_err(|_| BookError::InvalidIdentifier(value.to_string()))
        })
        .transpose()
}

/// Parse an optional page count, defaulting to zero. Any integer is
/// accepted; range rules belong to the store.
pub fn parse_pages(raw: Option<&str>) -> Result<i64, BookError> {
    match present(raw) {
        Some(value) => value
            .parse::<i64>()
            .map_err(|_| BookError::InvalidPageCount(value.to_string())),
        None => Ok(0),
    }
}

/// Parse an optional `YYYY-MM-DD` date.
///
/// Only the exact zero-padded form is accepted: no signs, no surrounding
/// whitespace, no single-digit months or days.
pub fn parse_date(raw: Option<&str>) -> Result<Option<NaiveDate>, BookError> {
    present(raw)
        .map(|value| {
            let invalid = || BookError::InvalidDate(value.to_string());
            if value.len() != 10 || !value.is_ascii() {
                return Err(invalid());
            }
            let date = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())?;
            if date.format(DATE_FORMAT).to_string() != value {
                return Err(invalid());
            }
            Ok(date)
        })
        .transpose()
}

impl SaveForm {
    /// Validate every field and decide between create and update.
    ///
    /// A missing, empty, or zero identifier creates a new book.
    pub fn into_request(self) -> Result<SaveRequest, BookError> {
        let id = parse_id(self.id.as_deref())?.unwrap_or(0);
        let pages = parse_pages(self.pages.as_deref())?;
        let publication_date =
            parse_date(self.publication_date.as_deref())?.unwrap_or_else(unset_publication_date);

        let fields = BookFields {
            name: self.name.unwrap_or_default(),
            author: self.author.unwrap_or_default(),
            pages,
            publication_date,
        };

        Ok(match id {
            0 => SaveRequest::Create(fields),
            id => SaveRequest::Update { id, fields },
        })
    }
}
