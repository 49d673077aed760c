pub mod error;
pub mod handlers;
pub mod models;
pub mod parser;


use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    routing::{get, post},
    Router,
};
use bookshelf_db::{sqlite::CREATE_BOOKS_TABLE, BookStore};
use bookshelf_http::Templates;
use bookshelf_kernel::{InitCtx, Migration, Module};

use handlers::{BooksState, BOOK_TEMPLATE, INDEX_TEMPLATE};

/// Book catalog pages: listing, single-book form, save and delete
pub struct BooksModule {
    state: BooksState,
}

impl BooksModule {
    pub fn new(store: Arc<dyn BookStore>, templates: Templates) -> Self {
        Self {
            state: BooksState { store, templates },
        }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let templates = &self.state.templates;
        for name in [INDEX_TEMPLATE, BOOK_TEMPLATE, bookshelf_http::error::ERROR_TEMPLATE] {
            let path = templates.dir().join(name);
            if !path.is_file() {
                tracing::warn!(
                    module = self.name(),
                    template = %path.display(),
                    "template missing; pages using it will fail"
                );
            }
        }

        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            templates = %templates.dir().display(),
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(handlers::list_books))
            .route("/save", post(handlers::save_book))
            .route("/book", get(handlers::view_book))
            .route("/delete", get(handlers::delete_book))
            .with_state(self.state.clone())
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_create_books",
            up: CREATE_BOOKS_TABLE,
        }]
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(store: Arc<dyn BookStore>, templates: Templates) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(store, templates))
}
