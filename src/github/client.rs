// GitHub API HTTP client.
// Builds authenticated or anonymous requests, tracks rate limits, and checks response status.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};
use tracing::{debug, warn};

use crate::error::{PortoError, Result};

use super::types::RateLimit;

pub const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

/// GitHub API client with optional authentication and rate limit tracking.
///
/// Requests take `&self` so one client can serve every concurrent
/// per-repository pipeline of a refresh.
pub struct GitHubClient {
    client: Client,
    base_url: String,
    authenticated: bool,
    rate_limit: Mutex<RateLimit>,
    requests_sent: AtomicUsize,
}

impl GitHubClient {
    /// Create a client. Without a token requests go out anonymously and
    /// are subject to the stricter unauthenticated rate limit.
    pub fn new(token: Option<&str>) -> Result<Self> {
        Self::with_base_url(token, GITHUB_API_BASE)
    }

    /// Create a client against a non-default API root.
    pub fn with_base_url(token: Option<&str>, base_url: &str) -> Result<Self> {
        let headers = default_headers(token);
        let authenticated = headers.contains_key(AUTHORIZATION);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(PortoError::Api)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            authenticated,
            rate_limit: Mutex::new(RateLimit::default()),
            requests_sent: AtomicUsize::new(0),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Snapshot of the most recently observed rate limit headers.
    pub fn rate_limit(&self) -> RateLimit {
        self.rate_limit
            .lock()
            .map(|guard| *guard)
            .unwrap_or_default()
    }

    /// Number of HTTP requests issued so far.
    pub fn requests_sent(&self) -> usize {
        self.requests_sent.load(Ordering::Relaxed)
    }

    /// Make a GET request to the GitHub API.
    pub async fn get(&self, endpoint: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "GET");
        self.requests_sent.fetch_add(1, Ordering::Relaxed);
        let response = self.client.get(&url).send().await.map_err(PortoError::Api)?;

        let remaining = self.update_rate_limit(&response);
        self.check_response(response, remaining).await
    }

    /// Make a GET request with query parameters.
    pub async fn get_with_params<T: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        params: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "GET with query");
        self.requests_sent.fetch_add(1, Ordering::Relaxed);
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(PortoError::Api)?;

        let remaining = self.update_rate_limit(&response);
        self.check_response(response, remaining).await
    }

    /// Update rate limit from response headers.
    /// Returns the remaining-request count if this response carried one.
    fn update_rate_limit(&self, response: &Response) -> Option<u64> {
        let header = |name: &str| -> Option<u64> {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
        };

        let remaining = header("x-ratelimit-remaining");
        let Ok(mut rate_limit) = self.rate_limit.lock() else {
            return remaining;
        };
        if let Some(limit) = header("x-ratelimit-limit") {
            rate_limit.limit = limit;
        }
        if let Some(remaining) = remaining {
            rate_limit.remaining = remaining;
        }
        if let Some(reset) = header("x-ratelimit-reset") {
            rate_limit.reset = reset;
        }
        remaining
    }

    /// Check response status and convert errors.
    ///
    /// A 403/429 counts as rate limited only when this response reported
    /// zero remaining requests.
    async fn check_response(&self, response: Response, remaining: Option<u64>) -> Result<Response> {
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED => Err(PortoError::Unauthorized),
            StatusCode::NOT_FOUND => Err(PortoError::NotFound(response.url().to_string())),
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
                if remaining == Some(0) =>
            {
                let reset_at = chrono::DateTime::from_timestamp(self.rate_limit().reset as i64, 0)
                    .map(|dt| dt.format("%H:%M:%S").to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                Err(PortoError::RateLimited { reset_at })
            }
            status => Err(PortoError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            }),
        }
    }
}

/// Headers shared by every request; the credential is attached only when present and usable.
fn default_headers(token: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();

    if let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) {
        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(value) => {
                headers.insert(AUTHORIZATION, value);
            }
            Err(e) => warn!(error = %e, "GitHub token is not a valid header value, continuing anonymously"),
        }
    }
    headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));
    headers.insert(
        "X-GitHub-Api-Version",
        HeaderValue::from_static(GITHUB_API_VERSION),
    );
    headers.insert(USER_AGENT, HeaderValue::from_static("porto-sync"));

    headers
}
