//! HTTP fetcher
//!
//! One GET per resource, single attempt, no retries. The client is built
//! with redirects disabled: on this site a redirect means the resource is
//! gone or was never downloadable, so a redirect status is reported as a
//! failure instead of being followed.

use reqwest::{redirect::Policy, Client, Response};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors raised by a single fetch attempt
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a redirect status
    #[error("redirect detected at {url}")]
    RedirectDetected { url: String },

    /// The server answered with a non-success status
    #[error("HTTP {code} for {url}")]
    HttpStatus { url: String, code: u16 },

    /// The request itself failed (connect error, timeout, bad body)
    #[error("network error for {url}: {source}")]
    Network {
        url: String,
        source: reqwest::Error,
    },
}

/// Builds the HTTP client used for every request of a run
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("tomeshelf/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::none()) // Redirects are failures, not hops
        .gzip(true)
        .brotli(true)
        .build()
}

/// Sends a GET and turns redirects and non-success statuses into errors
async fn checked_get(client: &Client, url: &Url) -> Result<Response, FetchError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| FetchError::Network {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if status.is_redirection() {
        return Err(FetchError::RedirectDetected {
            url: url.to_string(),
        });
    }
    if !status.is_success() {
        return Err(FetchError::HttpStatus {
            url: url.to_string(),
            code: status.as_u16(),
        });
    }

    Ok(response)
}

/// Fetches a page and decodes it using the response charset
///
/// The source site serves windows-1251; `Response::text` honors the
/// charset from the Content-Type header.
pub async fn fetch_text(client: &Client, url: &Url) -> Result<String, FetchError> {
    let response = checked_get(client, url).await?;
    response.text().await.map_err(|source| FetchError::Network {
        url: url.to_string(),
        source,
    })
}

/// Fetches a resource's raw body, for asset downloads
pub async fn fetch_bytes(client: &Client, url: &Url) -> Result<Vec<u8>, FetchError> {
    let response = checked_get(client, url).await?;
    let body = response
        .bytes()
        .await
        .map_err(|source| FetchError::Network {
            url: url.to_string(),
            source,
        })?;
    Ok(body.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client().is_ok());
    }

    #[tokio::test]
    async fn test_fetch_text_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
            .mount(&server)
            .await;

        let client = build_http_client().unwrap();
        let url = Url::parse(&format!("{}/page", server.uri())).unwrap();
        let body = fetch_text(&client, &url).await.unwrap();
        assert_eq!(body, "hello");
    }

    #[tokio::test]
    async fn test_redirect_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/moved"))
            .respond_with(ResponseTemplate::new(302).insert_header("Location", "/elsewhere"))
            .mount(&server)
            .await;
        // The target must never be requested
        Mock::given(method("GET"))
            .and(path("/elsewhere"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = build_http_client().unwrap();
        let url = Url::parse(&format!("{}/moved", server.uri())).unwrap();
        let err = fetch_text(&client, &url).await.unwrap_err();
        assert!(matches!(err, FetchError::RedirectDetected { .. }));
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = build_http_client().unwrap();
        let url = Url::parse(&format!("{}/missing", server.uri())).unwrap();
        let err = fetch_bytes(&client, &url).await.unwrap_err();
        assert!(matches!(err, FetchError::HttpStatus { code: 404, .. }));
    }

    #[tokio::test]
    async fn test_fetch_bytes_returns_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cover.gif"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x47, 0x49, 0x46]))
            .mount(&server)
            .await;

        let client = build_http_client().unwrap();
        let url = Url::parse(&format!("{}/cover.gif", server.uri())).unwrap();
        let body = fetch_bytes(&client, &url).await.unwrap();
        assert_eq!(body, vec![0x47, 0x49, 0x46]);
    }
}
