use async_trait::async_trait;
use axum::Router;

/// Loaded settings handed to every module at `init` and `start`.
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
}

/// One schema step, applied by the book store and recorded under `id` in
/// `schema_migrations` so it never runs twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    pub id: &'static str,
    pub up: &'static str,
}

/// A slice of the bookshelf app: its pages, its schema and its lifecycle.
///
/// The registry drives every module through `init`, migrations, `start`,
/// serving and `stop`. A module only overrides the hooks it needs.
#[async_trait]
pub trait Module: Sync + Send {
    /// Registry key; a second module with the same name is refused.
    fn name(&self) -> &'static str;

    /// Runs before any migration, so the store may still be empty.
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Page routes, merged at the site root next to `/check`.
    ///
    /// Paths are not prefixed: a module returning `/book` serves `/book`.
    /// The router must already carry its own state.
    fn routes(&self) -> Router {
        Router::new()
    }

    /// Schema steps for this module. The registry sorts all steps by module
    /// name, then id, before the store applies them.
    fn migrations(&self) -> Vec<Migration> {
        vec![]
    }

    /// Runs once the schema is current and before the listener binds.
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Runs after the server has drained, in reverse registration order.
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    struct Shelf;

    #[async_trait]
    impl Module for Shelf {
        fn name(&self) -> &'static str {
            "shelf"
        }
    }

    #[tokio::test]
    async fn hooks_default_to_no_ops() {
        let settings = Settings::default();
        let ctx = InitCtx {
            settings: &settings,
        };
        let module = Shelf;

        assert!(module.init(&ctx).await.is_ok());
        assert!(module.migrations().is_empty());
        assert!(module.start(&ctx).await.is_ok());
        assert!(module.stop().await.is_ok());
    }
}
