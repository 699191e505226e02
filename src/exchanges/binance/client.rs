//! HTTP client for the Binance public Spot API.

use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{Duration, Instant};

use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::MarketConfig;

/// Production Binance HTTP API endpoint.
const BASE_HTTP_API_URL: &str = "https://api.binance.com";

/// Default rate limit (requests per minute).
const DEFAULT_RATE_LIMIT: i64 = 60;

/// Default HTTP request timeout.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Length of the rate limiting window.
const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);

/// Binance API error.
#[derive(Debug, Error)]
#[error("binance api error {code}: {message}")]
pub struct ApiError {
    pub code: i32,
    pub message: String,
}

/// Client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("rate limit exceeded: {current}/{limit} per minute")]
    RateLimitExceeded { current: i64, limit: i64 },

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Configuration for creating a new Client.
pub struct ClientConfig {
    pub base_url: String,
    pub rate_limit: i64,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: Option<String>, rate_limit: i64, timeout: Duration) -> Self {
        Self {
            base_url: base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| BASE_HTTP_API_URL.to_string()),
            rate_limit: if rate_limit > 0 {
                rate_limit
            } else {
                DEFAULT_RATE_LIMIT
            },
            timeout: if timeout.is_zero() {
                DEFAULT_REQUEST_TIMEOUT
            } else {
                timeout
            },
        }
    }
}

struct RateLimitState {
    window_start: Instant,
}

/// HTTP client for public Binance market data endpoints.
/// Handles rate limiting and error responses.
pub struct Client {
    config: ClientConfig,
    http_client: HttpClient,
    request_count: AtomicI64,
    rate_limit_state: Mutex<RateLimitState>,
}

impl Client {
    /// Creates a new Binance API client.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http_client = HttpClient::builder().timeout(config.timeout).build()?;

        Ok(Self {
            config,
            http_client,
            request_count: AtomicI64::new(0),
            rate_limit_state: Mutex::new(RateLimitState {
                window_start: Instant::now(),
            }),
        })
    }

    /// Creates a new Binance API client from market config.
    pub fn from_config(market: &MarketConfig) -> Result<Self> {
        let config = ClientConfig::new(
            market.base_url.clone(),
            market.rate_limit.unwrap_or(DEFAULT_RATE_LIMIT),
            market.timeout,
        );
        Self::new(config)
    }

    /// Sends a GET request to a public endpoint and returns the raw body.
    pub async fn get(&self, endpoint: &str) -> Result<Vec<u8>> {
        self.check_rate_limit()?;

        let url = format!("{}{}", self.config.base_url, endpoint);
        debug!(endpoint = %endpoint, "sending request");

        let response = self.http_client.get(&url).send().await?;
        self.increment_request_count();

        let status = response.status();
        let body = response.bytes().await?;

        if status.is_client_error() || status.is_server_error() {
            return Err(self.parse_error_response(status, &body));
        }

        Ok(body.to_vec())
    }

    /// Verifies we haven't exceeded the rate limit.
    fn check_rate_limit(&self) -> Result<()> {
        let mut state = self
            .rate_limit_state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if state.window_start.elapsed() > RATE_LIMIT_WINDOW {
            self.request_count.store(0, Ordering::SeqCst);
            state.window_start = Instant::now();
        }

        let current = self.request_count.load(Ordering::SeqCst);
        if current >= self.config.rate_limit {
            return Err(ClientError::RateLimitExceeded {
                current,
                limit: self.config.rate_limit,
            });
        }

        Ok(())
    }

    /// Increments the request counter.
    fn increment_request_count(&self) {
        self.request_count.fetch_add(1, Ordering::SeqCst);
    }

    /// Creates a ClientError from an error response.
    fn parse_error_response(&self, status: StatusCode, body: &[u8]) -> ClientError {
        #[derive(Deserialize)]
        struct ErrorResponse {
            code: Option<i32>,
            msg: Option<String>,
        }

        let api_err = match serde_json::from_slice::<ErrorResponse>(body) {
            Ok(resp) => ApiError {
                code: resp.code.unwrap_or(status.as_u16() as i32),
                message: resp
                    .msg
                    .unwrap_or_else(|| String::from_utf8_lossy(body).to_string()),
            },
            Err(_) => ApiError {
                code: status.as_u16() as i32,
                message: String::from_utf8_lossy(body).to_string(),
            },
        };

        warn!(code = api_err.code, message = %api_err.message, "api error");

        ClientError::Api(api_err)
    }

    /// Returns the current request count in the window.
    pub fn request_count(&self) -> i64 {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Returns the maximum requests per minute.
    pub fn rate_limit(&self) -> i64 {
        self.config.rate_limit
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}
