//! High-level client: `SpotPriceClient`, its builder and the process-wide handle.

use crate::domain::price::client::Prices;
use crate::domain::price::schedule::RUN_THRESHOLD_CENTS;
use crate::domain::price::{SpotPrice, UpstreamSchema};
use crate::error::SpotError;
use crate::http::SpotHttp;
use crate::network::{DEFAULT_API_URL, DEFAULT_REGION, DEFAULT_TIMEOUT_SECS};
use crate::speech;

use std::sync::OnceLock;
use std::time::Duration;

pub use crate::domain::price::client::Prices as PricesClient;

/// Hours covered by the spoken outlook: the current one plus the next three.
pub const OUTLOOK_HOURS: usize = 4;

/// The primary entry point for fetching spot prices.
///
/// Holds no mutable state; one instance serves every invocation.
#[derive(Debug, Clone)]
pub struct SpotPriceClient {
    pub(crate) http: SpotHttp,
    pub(crate) region: String,
    pub(crate) schema: UpstreamSchema,
    pub(crate) run_threshold_cents: f64,
}

impl SpotPriceClient {
    pub fn builder() -> SpotPriceClientBuilder {
        SpotPriceClientBuilder::default()
    }

    pub fn prices(&self) -> Prices<'_> {
        Prices { client: self }
    }

    /// Fetch the price of the current hour. One upstream request, no retry.
    pub async fn fetch_current_price(&self) -> Result<SpotPrice, SpotError> {
        self.prices().current().await
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn run_threshold_cents(&self) -> f64 {
        self.run_threshold_cents
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct SpotPriceClientBuilder {
    base_url: String,
    region: String,
    timeout: Duration,
    schema: UpstreamSchema,
    run_threshold_cents: f64,
}

impl Default for SpotPriceClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            region: DEFAULT_REGION.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            schema: UpstreamSchema::default(),
            run_threshold_cents: RUN_THRESHOLD_CENTS,
        }
    }
}

impl SpotPriceClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn region(mut self, region: &str) -> Self {
        self.region = region.to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    pub fn schema(mut self, schema: UpstreamSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Price at or below which an hour counts as cheap for the run window.
    pub fn run_threshold_cents(mut self, cents: f64) -> Self {
        self.run_threshold_cents = cents;
        self
    }

    pub fn build(self) -> Result<SpotPriceClient, SpotError> {
        if self.region.trim().is_empty() {
            return Err(SpotError::Config("region cannot be empty".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(SpotError::Config("timeout must be positive".to_string()));
        }
        if !self.run_threshold_cents.is_finite() {
            return Err(SpotError::Config(format!(
                "run threshold must be finite, got {}",
                self.run_threshold_cents
            )));
        }

        let http = SpotHttp::new(&self.base_url, self.timeout)
            .map_err(|e| SpotError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(SpotPriceClient {
            http,
            region: self.region,
            schema: self.schema,
            run_threshold_cents: self.run_threshold_cents,
        })
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Process-wide client
// ═════════════════════════════════════════════════════════════════════════════

static GLOBAL: OnceLock<SpotPriceClient> = OnceLock::new();

/// Install the process-wide client. Call once at process start.
pub fn init_global(client: SpotPriceClient) -> Result<&'static SpotPriceClient, SpotError> {
    GLOBAL
        .set(client)
        .map_err(|_| SpotError::Config("global client already initialised".to_string()))?;
    global()
}

/// The process-wide client, built with defaults if none was installed.
pub fn global() -> Result<&'static SpotPriceClient, SpotError> {
    if let Some(client) = GLOBAL.get() {
        return Ok(client);
    }
    let _ = GLOBAL.set(SpotPriceClient::builder().build()?);
    GLOBAL
        .get()
        .ok_or_else(|| SpotError::Config("global client unavailable".to_string()))
}

/// Plain-text outlook for the current hour and the next three.
pub async fn spot_price_text() -> Result<String, SpotError> {
    let entries = global()?.prices().upcoming(OUTLOOK_HOURS).await?;
    speech::format_outlook_plain(&entries)
}

/// SSML outlook for the current hour and the next three.
pub async fn spot_price_ssml() -> Result<String, SpotError> {
    let entries = global()?.prices().upcoming(OUTLOOK_HOURS).await?;
    speech::format_outlook_speech(&entries)
}
