use crate::types::{FeedError, FetchConfig, FetchedPage, Result};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Single-shot HTTP client for the news listing page. Failures are reported
/// to the caller; there is no retry loop.
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let redirect = if config.follow_redirects {
            reqwest::redirect::Policy::limited(config.max_redirects)
        } else {
            reqwest::redirect::Policy::none()
        };

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(redirect)
            .build()
            .map_err(|e| FeedError::fetch("", None, format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub async fn fetch_page(&self, url: &str) -> Result<FetchedPage> {
        let start_time = Instant::now();
        debug!("Fetching page: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            error!("Request to {} failed: {}", url, e);
            transport_error(url, e)
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("Fetching {} returned HTTP {}", url, status);
            return Err(FeedError::fetch(
                url,
                Some(status.as_u16()),
                format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                ),
            ));
        }

        let limit_bytes = self.config.max_page_size_mb * 1024 * 1024;
        if let Some(content_length) = response.content_length() {
            if content_length as usize > limit_bytes {
                return Err(FeedError::fetch(
                    url,
                    Some(status.as_u16()),
                    format!("Page too large: {} bytes", content_length),
                ));
            }
        }

        let body = response.text().await.map_err(|e| transport_error(url, e))?;
        if body.len() > limit_bytes {
            return Err(FeedError::fetch(
                url,
                Some(status.as_u16()),
                format!("Page too large: {} bytes", body.len()),
            ));
        }

        let response_time_ms = start_time.elapsed().as_millis() as u64;
        info!(
            "Fetched {} ({} bytes in {} ms)",
            url,
            body.len(),
            response_time_ms
        );

        Ok(FetchedPage {
            url: url.to_string(),
            status: status.as_u16(),
            body,
            response_time_ms,
        })
    }
}

fn transport_error(url: &str, e: reqwest::Error) -> FeedError {
    let reason = if e.is_timeout() {
        format!("Request timed out: {}", e)
    } else {
        format!("Request failed: {}", e)
    };
    FeedError::fetch(url, e.status().map(|s| s.as_u16()), reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> FetchConfig {
        FetchConfig {
            user_agent: "news-feed-test/1.0".to_string(),
            timeout_seconds: 5,
            ..FetchConfig::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_sends_user_agent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/nyheter/")
            .match_header("user-agent", "news-feed-test/1.0")
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body("<html><body>Nyheter</body></html>")
            .create_async()
            .await;

        let fetcher = Fetcher::new(test_config()).unwrap();
        let page = fetcher
            .fetch_page(&format!("{}/nyheter/", server.url()))
            .await
            .unwrap();

        assert_eq!(page.status, 200);
        assert!(page.body.contains("Nyheter"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/nyheter/")
            .with_status(404)
            .create_async()
            .await;

        let fetcher = Fetcher::new(test_config()).unwrap();
        let err = fetcher
            .fetch_page(&format!("{}/nyheter/", server.url()))
            .await
            .unwrap_err();

        assert_eq!(err.http_status(), Some(404));
        assert!(err.to_string().contains("Not Found"));
    }

    #[tokio::test]
    async fn test_fetch_rejects_oversized_page() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/big")
            .with_status(200)
            .with_body("x".repeat(2 * 1024 * 1024))
            .create_async()
            .await;

        let config = FetchConfig {
            max_page_size_mb: 1,
            ..test_config()
        };
        let fetcher = Fetcher::new(config).unwrap();
        let err = fetcher
            .fetch_page(&format!("{}/big", server.url()))
            .await
            .unwrap_err();

        assert!(matches!(err, FeedError::Fetch { .. }));
        assert!(err.to_string().contains("too large"));
    }

    #[tokio::test]
    async fn test_fetch_timeout_is_fetch_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
        });

        let config = FetchConfig {
            timeout_seconds: 1,
            ..test_config()
        };
        let fetcher = Fetcher::new(config).unwrap();
        let err = fetcher
            .fetch_page(&format!("http://{}/nyheter/", addr))
            .await
            .unwrap_err();

        assert!(matches!(err, FeedError::Fetch { status: None, .. }));
        assert!(err.to_string().contains("timed out"));
        server.abort();
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let fetcher = Fetcher::new(test_config()).unwrap();
        let err = fetcher.fetch_page("http://127.0.0.1:1/").await.unwrap_err();
        assert!(matches!(err, FeedError::Fetch { status: None, .. }));
    }
}
