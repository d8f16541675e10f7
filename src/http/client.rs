//! Low-level HTTP client: `SpotHttp`.
//!
//! One method per upstream endpoint. Returns the raw response body; parsing
//! into domain types happens in `domain::price`. Every call is a single
//! attempt bounded by the configured timeout.

use crate::error::HttpError;
use crate::network::{PRICES_PATH, PRICE_RESOLUTION_MINUTES};

use reqwest::header::RETRY_AFTER;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

/// Low-level HTTP client for the pricing API.
#[derive(Debug, Clone)]
pub struct SpotHttp {
    base_url: String,
    client: Client,
}

impl SpotHttp {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Prices ───────────────────────────────────────────────────────────

    /// Fetch today's and tomorrow's hourly prices for `region`.
    pub async fn get_prices(&self, region: &str) -> Result<String, HttpError> {
        let url = format!(
            "{}{}?priceResolution={}&region={}",
            self.base_url,
            PRICES_PATH,
            PRICE_RESOLUTION_MINUTES,
            urlencoding::encode(region)
        );
        self.get_text(&url).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get_text(&self, url: &str) -> Result<String, HttpError> {
        tracing::debug!(url, "GET");

        let resp = self.client.get(url).send().await.map_err(map_transport)?;
        let status = resp.status();

        if status.is_success() {
            return resp.text().await.map_err(map_transport);
        }

        Err(status_error(status, resp).await)
    }
}

fn map_transport(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else {
        HttpError::Reqwest(e)
    }
}

async fn status_error(status: StatusCode, resp: Response) -> HttpError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after_ms = resp
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(|secs| secs.saturating_mul(1000));
        tracing::debug!(?retry_after_ms, "Rate limited by pricing API");
        return HttpError::RateLimited { retry_after_ms };
    }

    let body = resp.text().await.unwrap_or_default();
    HttpError::Status {
        status: status.as_u16(),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let http = SpotHttp::new("https://api.spot-hinta.fi/", Duration::from_secs(5)).unwrap();
        assert_eq!(http.base_url(), "https://api.spot-hinta.fi");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // Port 9 (discard) on localhost is never served in CI.
        let http = SpotHttp::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = http.get_prices("FI").await.unwrap_err();
        assert!(matches!(err, HttpError::Reqwest(_) | HttpError::Timeout));
    }
}
