//! Static fallback pages.
//!
//! # Responsibilities
//! - Not-found page for paths nobody handles
//! - Error page with a retry action for upstream failures
//!
//! # Design Decisions
//! - Markup is static; no request data is echoed back
//! - Retry reloads the current URL

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

fn page(title: &str, heading: &str, message: &str, action: &str, href: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Diviswap</title>
<style>
body {{ margin: 0; min-height: 100vh; display: flex; align-items: center; justify-content: center;
  font-family: system-ui, sans-serif; color: #f5f5f5;
  background: radial-gradient(circle at top, #3b0a1e 0%, #120309 70%); }}
main {{ text-align: center; padding: 2rem; }}
h1 {{ font-size: 3rem; margin: 0 0 0.5rem; }}
a {{ display: inline-block; margin-top: 1.5rem; padding: 0.75rem 1.5rem; border-radius: 9999px;
  background: #cd0124; color: #fff; text-decoration: none; }}
</style>
</head>
<body>
<main>
<h1>{heading}</h1>
<p>{message}</p>
<a href="{href}">{action}</a>
</main>
</body>
</html>
"#
    )
}

/// 404 page.
pub fn not_found_page() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(page(
            "Not found",
            "404",
            "The page you are looking for does not exist.",
            "Back to swap",
            "/",
        )),
    )
        .into_response()
}

/// Error page for `status`, offering to retry the current URL.
pub fn error_page(status: StatusCode) -> Response {
    (
        status,
        Html(page(
            "Error",
            "Something went wrong",
            "We could not load this page. Please try again.",
            "Try again",
            "",
        )),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        let res = not_found_page();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            res.headers()["content-type"],
            "text/html; charset=utf-8"
        );
    }

    #[test]
    fn test_error_page_offers_retry() {
        assert_eq!(
            error_page(StatusCode::BAD_GATEWAY).status(),
            StatusCode::BAD_GATEWAY
        );
        assert!(page("t", "h", "m", "Try again", "").contains(r#"<a href="">Try again</a>"#));
    }
}
