//! Failure-to-HTML rendering shared by every page handler

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use uuid::Uuid;

use crate::templates::Templates;

/// Template used for every failed request
pub const ERROR_TEMPLATE: &str = "error.html";

/// Data bound to the error template
#[derive(Debug, Serialize)]
pub struct ErrorPage {
    pub error_msg: String,
}

/// Errors that can be shown to the user as an error page
pub trait PageError: std::error::Error {
    /// HTTP status the error page is served with
    fn status(&self) -> StatusCode;
}

/// Render `err` through the error template.
pub async fn render_failure<E>(templates: &Templates, err: &E) -> Response
where
    E: PageError + ?Sized,
{
    render_error_page(templates, err.status(), &err.to_string()).await
}

/// Render the error template with `message`, served with `status`.
///
/// When the error template itself is unavailable the message is written
/// as plain text instead.
pub async fn render_error_page(templates: &Templates, status: StatusCode, message: &str) -> Response {
    let error_id = Uuid::new_v4();

    if status.is_server_error() {
        tracing::error!(
            error_id = %error_id,
            status_code = %status.as_u16(),
            error = %message,
            "Request error"
        );
    } else {
        tracing::warn!(
            error_id = %error_id,
            status_code = %status.as_u16(),
            error = %message,
            "Request rejected"
        );
    }

    let page = ErrorPage {
        error_msg: message.to_string(),
    };

    match templates.render(ERROR_TEMPLATE, &page).await {
        Ok(html) => (status, html).into_response(),
        Err(template_err) => {
            tracing::error!(
                error_id = %error_id,
                error = %template_err,
                "error page unavailable, falling back to plain text"
            );
            (status, format!("{}\n", message)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::CONTENT_TYPE;
    use http_body_util::BodyExt;

    #[derive(Debug, thiserror::Error)]
    #[error("pages must be a number")]
    struct BadPages;

    impl PageError for BadPages {
        fn status(&self) -> StatusCode {
            StatusCode::BAD_REQUEST
        }
    }

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_error_page_binds_message() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(ERROR_TEMPLATE),
            "<h1>Oops</h1><p>{{ error_msg }}</p>",
        )
        .unwrap();
        let templates = Templates::new(dir.path());

        let response = render_failure(&templates, &BadPages).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers()[CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        assert_eq!(
            body_text(response).await,
            "<h1>Oops</h1><p>pages must be a number</p>"
        );
    }

    #[tokio::test]
    async fn test_missing_error_template_falls_back_to_text() {
        let dir = tempfile::tempdir().unwrap();
        let templates = Templates::new(dir.path());

        let response =
            render_error_page(&templates, StatusCode::INTERNAL_SERVER_ERROR, "disk full").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers()[CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
        assert_eq!(body_text(response).await, "disk full\n");
    }
}
