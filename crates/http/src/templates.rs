//! Page templates loaded from disk on every render.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::response::Html;
use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to load template '{name}': {source}")]
    Load {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to render template '{name}': {source}")]
    Render {
        name: String,
        #[source]
        source: tera::Error,
    },
}

/// Directory of HTML templates. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Templates {
    dir: Arc<PathBuf>,
}

impl Templates {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Arc::new(dir.into()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read the raw source of template `name`.
    pub async fn load(&self, name: &str) -> Result<String, TemplateError> {
        tokio::fs::read_to_string(self.dir.join(name))
            .await
            .map_err(|source| TemplateError::Load {
                name: name.to_string(),
                source,
            })
    }

    /// Load template `name` and render it with `page` as its context.
    /// Output is HTML-escaped.
    pub async fn render<T: Serialize>(
        &self,
        name: &str,
        page: &T,
    ) -> Result<Html<String>, TemplateError> {
        let source = self.load(name).await?;
        let render_err = |source| TemplateError::Render {
            name: name.to_string(),
            source,
        };

        let context = Context::from_serialize(page).map_err(render_err)?;
        let html = Tera::one_off(&source, &context, true).map_err(render_err)?;
        Ok(Html(html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Greeting {
        name: String,
    }

    fn templates_with(name: &str, body: &str) -> (tempfile::TempDir, Templates) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(name), body).unwrap();
        let templates = Templates::new(dir.path());
        (dir, templates)
    }

    #[tokio::test]
    async fn renders_context_with_escaping() {
        let (_dir, templates) = templates_with("hello.html", "<p>Hello {{ name }}</p>");
        let Html(html) = templates
            .render(
                "hello.html",
                &Greeting {
                    name: "<Ursula>".into(),
                },
            )
            .await
            .unwrap();
        assert_eq!(html, "<p>Hello &lt;Ursula&gt;</p>");
    }

    #[tokio::test]
    async fn missing_file_is_a_load_error() {
        let (_dir, templates) = templates_with("hello.html", "");
        let err = templates
            .render("absent.html", &Greeting { name: "x".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, TemplateError::Load { .. }));
        assert!(err.to_string().contains("absent.html"));
    }

    #[tokio::test]
    async fn broken_syntax_is_a_render_error() {
        let (_dir, templates) = templates_with("bad.html", "{% if %}");
        let err = templates
            .render("bad.html", &Greeting { name: "x".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, TemplateError::Render { .. }));
    }
}
