// Live HTTP client
//
// Wraps `reqwest::Client` with endpoint URL construction, rate limiting,
// and status/timeout classification. Endpoint methods live in sibling
// modules as inherent impls to keep this file about transport mechanics.

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::RETRY_AFTER;
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use url::Url;

use crate::error::Error;
use crate::rate_limit::RateLimiter;
use crate::transport::TransportConfig;

/// Production backend root.
pub const DEFAULT_BASE_URL: &str = "https://bff.mangocity.md/events";

/// Retry hint used when a 429 arrives without a parseable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// HTTP client for the events backend.
///
/// Holds one long-lived `reqwest::Client` (and its connection pool) plus
/// the rate limiter every request passes through.
pub struct LiveClient {
    http: reqwest::Client,
    base_url: Url,
    limiter: Arc<RateLimiter>,
    timeout: Duration,
}

impl LiveClient {
    /// Create a live client from a `TransportConfig` with the default limiter.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            limiter: Arc::new(RateLimiter::default()),
            timeout: transport.timeout,
        })
    }

    /// Create a live client around a pre-built `reqwest::Client`.
    ///
    /// `timeout` must be the one `http` was built with; it is what
    /// [`Error::Timeout`] reports.
    pub fn with_client(http: reqwest::Client, base_url: Url, timeout: Duration) -> Self {
        Self {
            http,
            base_url,
            limiter: Arc::new(RateLimiter::default()),
            timeout,
        }
    }

    /// Replace the rate limiter.
    pub fn with_rate_limiter(mut self, limiter: RateLimiter) -> Self {
        self.limiter = Arc::new(limiter);
        self
    }

    /// The limiter shared by all requests of this client.
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Append path segments to the base URL: `{base}/{seg}/{seg}...`.
    ///
    /// Segments are percent-encoded, so ids can be passed through verbatim.
    pub(crate) fn endpoint_url(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::Unknown {
                message: format!("base URL cannot carry a path: {}", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Rate-limited GET returning a decoded JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        self.limiter.acquire().await;

        let url = self.endpoint_url(segments)?;
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url.clone())
            .query(query)
            .send()
            .await
            .map_err(|e| self.transport_error(&url, &e))?;

        let status = resp.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = resp
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            error!(retry_after_secs, "rate limit exceeded by backend");
            return Err(Error::RateLimited { retry_after_secs });
        }

        if !status.is_success() {
            error!(%url, status = status.as_u16(), "backend returned an error status");
            return Err(Error::Communication {
                message: format!("HTTP {status} from {url}"),
                status: Some(status.as_u16()),
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| self.transport_error(&url, &e))?;

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }

    fn transport_error(&self, url: &Url, err: &reqwest::Error) -> Error {
        let mapped = Error::from_transport(err, self.timeout.as_secs());
        error!(%url, error = %err, "error fetching data");
        mapped
    }
}
