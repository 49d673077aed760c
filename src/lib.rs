//! Bookshelf application library
//!
//! Wires the book catalog module onto the kernel lifecycle, the store, and
//! the HTTP server.

pub mod modules;

use std::sync::Arc;

use anyhow::Context;
use bookshelf_db::BookStore;
use bookshelf_http::Templates;
use bookshelf_kernel::{InitCtx, ModuleRegistry, Settings};

/// Build the registry of application modules backed by `store`
pub fn build_registry(
    settings: &Settings,
    store: Arc<dyn BookStore>,
) -> anyhow::Result<ModuleRegistry> {
    let templates = Templates::new(&settings.templates.dir);
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, store, templates)?;
    Ok(registry)
}

/// Apply pending module migrations to the configured store
pub async fn migrate(settings: &Settings) -> anyhow::Result<usize> {
    let store = bookshelf_db::connect(&settings.database)?;
    let registry = build_registry(settings, store.clone())?;
    apply_migrations(&registry, store.as_ref()).await
}

async fn apply_migrations(registry: &ModuleRegistry, store: &dyn BookStore) -> anyhow::Result<usize> {
    let migrations = registry.collect_migrations();
    let applied = store
        .migrate(&migrations)
        .await
        .context("failed to apply migrations")?;
    tracing::info!(applied, known = migrations.len(), "migrations complete");
    Ok(applied)
}

/// Run the full lifecycle: init, migrate, start, serve, stop
pub async fn serve(settings: &Settings) -> anyhow::Result<()> {
    let store = bookshelf_db::connect(&settings.database)?;
    let registry = build_registry(settings, store.clone())?;
    let ctx = InitCtx { settings };

    registry.init_modules(&ctx).await?;
    apply_migrations(&registry, store.as_ref()).await?;
    registry.start_modules(&ctx).await?;

    let served = bookshelf_http::start_server(&registry, settings).await;

    registry.stop_modules().await?;
    served
}
