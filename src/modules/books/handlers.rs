use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, rejection::QueryRejection, Query, State},
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
    Form,
};
use bookshelf_db::BookStore;
use bookshelf_http::{render_failure, Templates};
use chrono::Local;

use super::error::BookError;
use super::models::{Book, BookPage, IdQuery, IndexPage, SaveForm, SaveRequest};
use super::parser::parse_id;

pub const INDEX_TEMPLATE: &str = "index.html";
pub const BOOK_TEMPLATE: &str = "book.html";

/// Shared by every books handler.
#[derive(Clone)]
pub struct BooksState {
    pub store: Arc<dyn BookStore>,
    pub templates: Templates,
}

/// GET `/`
pub async fn list_books(State(state): State<BooksState>) -> Response {
    respond(&state, list(&state).await).await
}

/// POST `/save`
pub async fn save_book(
    State(state): State<BooksState>,
    form: Result<Form<SaveForm>, FormRejection>,
) -> Response {
    let result = match form {
        Ok(Form(form)) => save(&state, form).await,
        Err(rejection) => Err(BookError::MalformedRequest(rejection.body_text())),
    };
    respond(&state, result).await
}

/// GET `/book`
pub async fn view_book(
    State(state): State<BooksState>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> Response {
    let result = match query {
        Ok(Query(query)) => view(&state, query).await,
        Err(rejection) => Err(BookError::MalformedRequest(rejection.body_text())),
    };
    respond(&state, result).await
}

/// GET `/delete`
pub async fn delete_book(
    State(state): State<BooksState>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> Response {
    let result = match query {
        Ok(Query(query)) => delete(&state, query).await,
        Err(rejection) => Err(BookError::MalformedRequest(rejection.body_text())),
    };
    respond(&state, result).await
}

async fn list(state: &BooksState) -> Result<Response, BookError> {
    let books = state.store.fetch_all().await?;
    let page = IndexPage { books };
    Ok(state.templates.render(INDEX_TEMPLATE, &page).await?.into_response())
}

async fn save(state: &BooksState, form: SaveForm) -> Result<Response, BookError> {
    match form.into_request()? {
        SaveRequest::Create(fields) => {
            let id = state.store.insert(&fields).await?;
            tracing::info!(id, name = %fields.name, "book created");
        }
        SaveRequest::Update { id, fields } => {
            let rows = state.store.update(id, &fields).await?;
            tracing::info!(id, rows, "book updated");
        }
    }
    Ok(redirect_to_index())
}

async fn view(state: &BooksState, query: IdQuery) -> Result<Response, BookError> {
    let book = match parse_id(query.id.as_deref())? {
        Some(id) => state.store.fetch_by_id(id).await?,
        None => Book::blank(Local::now().date_naive()),
    };
    let page = BookPage::new(book);
    Ok(state.templates.render(BOOK_TEMPLATE, &page).await?.into_response())
}

async fn delete(state: &BooksState, query: IdQuery) -> Result<Response, BookError> {
    if let Some(id) = parse_id(query.id.as_deref())? {
        let rows = state.store.delete_by_id(id).await?;
        tracing::info!(id, rows, "rows removed");
    }
    Ok(redirect_to_index())
}

/// 302 back to the listing.
fn redirect_to_index() -> Response {
    (StatusCode::FOUND, [(LOCATION, "/")]).into_response()
}

async fn respond(state: &BooksState, result: Result<Response, BookError>) -> Response {
    match result {
        Ok(response) => response,
        Err(err) => render_failure(&state.templates, &err).await,
    }
}
