//! Signed HTTP transport for the Product Advertising API.

use crate::amazon::params::{Operation, Params};
use crate::amazon::regions::Region;
use crate::amazon::response::parse_http_error;
use crate::amazon::signing::{Credentials, RequestSigner, REQUEST_PATH};
use crate::config::Config;
use crate::error::{AmazonError, Result};
use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use wreq::Client;

/// Trait for executing API operations - enables mocking for tests.
#[async_trait]
pub trait ProductApi: Send + Sync {
    /// Sends one operation and returns the raw XML response body.
    async fn execute(&self, operation: Operation, params: &Params) -> Result<String>;

    /// Returns the marketplace requests go to.
    fn region(&self) -> Region;

    /// Returns the associate tag requests are signed with.
    fn associate_tag(&self) -> &str;
}

#[async_trait]
impl<T: ProductApi + ?Sized> ProductApi for &T {
    async fn execute(&self, operation: Operation, params: &Params) -> Result<String> {
        (**self).execute(operation, params).await
    }

    fn region(&self) -> Region {
        (**self).region()
    }

    fn associate_tag(&self) -> &str {
        (**self).associate_tag()
    }
}

/// Product Advertising API client with request signing and throttling.
pub struct AmazonClient {
    client: Client,
    signer: RequestSigner,
    region: Region,
    delay_ms: u64,
    delay_jitter_ms: u64,
    base_url: Option<String>,
    last_request: Mutex<Option<Instant>>,
}

impl AmazonClient {
    /// Creates a new client with the given configuration.
    pub async fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, None).await
    }

    /// Creates a new client with an optional custom base URL (for testing).
    ///
    /// Requests are still signed for the region's endpoint host.
    pub async fn with_base_url(config: &Config, base_url: Option<String>) -> Result<Self> {
        let credentials = config.credentials()?;

        let mut builder = Client::builder()
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url)
                .map_err(|e| AmazonError::Config(format!("invalid proxy '{}': {}", proxy_url, e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            signer: RequestSigner::new(credentials),
            region: config.region,
            delay_ms: config.delay_ms,
            delay_jitter_ms: config.delay_jitter_ms,
            base_url,
            last_request: Mutex::new(None),
        })
    }

    /// Creates a client from explicit credentials with default settings.
    pub async fn from_credentials(credentials: Credentials, region: Region) -> Result<Self> {
        let config = Config {
            access_key: credentials.access_key,
            secret_key: credentials.secret_key,
            associate_tag: credentials.associate_tag,
            region,
            ..Config::default()
        };
        Self::new(&config).await
    }

    /// Returns the base URL (custom for testing, or the region endpoint).
    fn base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| self.region.api_base_url())
    }

    /// Builds the signed request URL for an operation.
    pub fn request_url(&self, operation: Operation, params: &Params) -> Result<String> {
        let query = self.signer.signed_query(self.region.endpoint(), operation, params, Utc::now())?;
        Ok(format!("{}{}?{}", self.base_url(), REQUEST_PATH, query))
    }

    /// Waits until the configured interval since the previous request has passed.
    async fn throttle(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(previous) = *last {
            let interval = Duration::from_millis(self.delay_ms + self.jitter());
            let elapsed = previous.elapsed();
            if elapsed < interval {
                let wait = interval - elapsed;
                debug!("Throttling for {}ms", wait.as_millis());
                tokio::time::sleep(wait).await;
            }
        }

        *last = Some(Instant::now());
    }

    fn jitter(&self) -> u64 {
        if self.delay_jitter_ms > 0 {
            rand::rng().random_range(0..=self.delay_jitter_ms)
        } else {
            0
        }
    }

    /// Updates the delay settings.
    pub fn set_delay(&mut self, delay_ms: u64, jitter_ms: u64) {
        self.delay_ms = delay_ms;
        self.delay_jitter_ms = jitter_ms;
    }

    async fn get(&self, url: &str) -> Result<String> {
        self.throttle().await;

        let response = self.client.get(url).send().await?;

        let status = response.status();
        debug!("Response status: {}", status);

        if status.as_u16() == 503 {
            warn!("Throttled (503). Consider increasing the request delay.");
            return Err(AmazonError::Throttled);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let (code, message) = parse_http_error(&body).unwrap_or_else(|| {
                (
                    "HttpError".to_string(),
                    status.canonical_reason().unwrap_or("Unknown status").to_string(),
                )
            });
            return Err(AmazonError::Api { status: status.as_u16(), code, message });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl ProductApi for AmazonClient {
    async fn execute(&self, operation: Operation, params: &Params) -> Result<String> {
        info!("{} ({} parameters)", operation, params.len());
        let url = self.request_url(operation, params)?;
        self.get(&url).await
    }

    fn region(&self) -> Region {
        self.region
    }

    fn associate_tag(&self) -> &str {
        self.signer.associate_tag()
    }
}
