// src/page/fetch.rs
// =============================================================================
// This module downloads the awesome-list page we are going to scan.
//
// Strategy:
// - One GET request with the shared client
// - Anything but a 2xx answer is an error: no page, no links, no ranking
// - Remember the Content-Type so we can tell Markdown from HTML later
//
// Rust concepts:
// - async functions: For network I/O
// - Result with a typed error: the caller decides how fatal it is
// =============================================================================

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::error::PageFetchError;
use crate::extract::PageFormat;

// The page is a web page, not an API resource
const PAGE_ACCEPT: &str = "text/html,text/markdown;q=0.9,text/plain;q=0.8,*/*;q=0.5";

/// Which parser to use for the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum FormatChoice {
    /// Guess from the URL and the Content-Type header
    #[default]
    Auto,
    Html,
    Markdown,
}

/// A downloaded page
#[derive(Debug, Clone)]
pub struct Page {
    pub url: Url,
    pub body: String,
    pub content_type: Option<String>,
}

impl Page {
    // Decides how the body should be parsed
    //
    // Auto mode picks Markdown for:
    //   - a "text/markdown" Content-Type
    //   - a URL path ending in .md or .markdown (raw.githubusercontent.com
    //     serves README.md as text/plain)
    // and HTML for everything else.
    pub fn format(&self, choice: FormatChoice) -> PageFormat {
        match choice {
            FormatChoice::Html => PageFormat::Html,
            FormatChoice::Markdown => PageFormat::Markdown,
            FormatChoice::Auto => {
                let markdown_type = self
                    .content_type
                    .as_deref()
                    .is_some_and(|ct| ct.to_ascii_lowercase().contains("markdown"));
                let path = self.url.path().to_ascii_lowercase();
                let markdown_path = path.ends_with(".md") || path.ends_with(".markdown");

                if markdown_type || markdown_path {
                    PageFormat::Markdown
                } else {
                    PageFormat::Html
                }
            }
        }
    }
}

// Fetches the page at `url`
//
// Returns: the page body and its content type, or PageFetchError
pub async fn fetch_page(client: &Client, url: &Url) -> Result<Page, PageFetchError> {
    info!(url = %url, "Fetching page");

    let request_error = |source: reqwest::Error| PageFetchError::Request {
        url: url.to_string(),
        source,
    };

    let response = client
        .get(url.clone())
        .header(ACCEPT, PAGE_ACCEPT)
        .send()
        .await
        .map_err(request_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(PageFetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let body = response.text().await.map_err(request_error)?;
    debug!(url = %url, bytes = body.len(), content_type = ?content_type, "Page downloaded");

    Ok(Page {
        url: url.clone(),
        body,
        content_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn page(url: &str, content_type: Option<&str>) -> Page {
        Page {
            url: Url::parse(url).unwrap(),
            body: String::new(),
            content_type: content_type.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_fetch_page_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/awesome"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<a href=\"/a/b\">b</a>", "text/html; charset=utf-8"),
            )
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/awesome", server.uri())).unwrap();
        let page = fetch_page(&Client::new(), &url).await.unwrap();
        assert_eq!(page.body, "<a href=\"/a/b\">b</a>");
        assert_eq!(page.content_type.as_deref(), Some("text/html; charset=utf-8"));
        assert_eq!(page.format(FormatChoice::Auto), PageFormat::Html);
    }

    #[tokio::test]
    async fn test_fetch_page_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/missing", server.uri())).unwrap();
        let err = fetch_page(&Client::new(), &url).await.unwrap_err();
        assert!(matches!(err, PageFetchError::Status { status: 404, .. }));
        assert!(err.to_string().contains("/missing"));
    }

    #[tokio::test]
    async fn test_fetch_page_unreachable() {
        let url = Url::parse("http://127.0.0.1:1/awesome").unwrap();
        let err = fetch_page(&Client::new(), &url).await.unwrap_err();
        assert!(matches!(err, PageFetchError::Request { .. }));
    }

    #[test]
    fn test_auto_format_detection() {
        assert_eq!(
            page("https://raw.githubusercontent.com/a/b/main/README.md", Some("text/plain")).format(FormatChoice::Auto),
            PageFormat::Markdown
        );
        assert_eq!(
            page("https://example.com/list", Some("text/markdown; charset=UTF-8")).format(FormatChoice::Auto),
            PageFormat::Markdown
        );
        assert_eq!(
            page("https://github.com/rust-unofficial/awesome-rust", Some("text/html")).format(FormatChoice::Auto),
            PageFormat::Html
        );
        assert_eq!(page("https://example.com/", None).format(FormatChoice::Auto), PageFormat::Html);
    }

    #[test]
    fn test_explicit_format_wins() {
        let readme = page("https://example.com/README.md", None);
        assert_eq!(readme.format(FormatChoice::Html), PageFormat::Html);

        let html = page("https://example.com/index.html", Some("text/html"));
        assert_eq!(html.format(FormatChoice::Markdown), PageFormat::Markdown);
    }
}
