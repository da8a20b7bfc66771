/*!
 * HTTP transport shared by every request an adapter instance makes.
 *
 * One long-lived reqwest client per adapter: pooled connections with a
 * one-hour idle keep-alive, generous batch-translation timeouts, and TCP
 * keep-alive probing. Cookie handling is deliberately simpler than a full
 * cookie jar: the most recent response cookies are kept per host and
 * attached wholesale to the next request for that host, which is all the
 * session affinity the remote service needs.
 */

use std::collections::HashMap;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{debug, trace};
use parking_lot::RwLock;
use reqwest::header::{COOKIE, HeaderMap, SET_COOKIE};
use reqwest::{Client, StatusCode};
use url::Url;

use crate::errors::AdapterError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(120);
const CALL_TIMEOUT: Duration = Duration::from_secs(120);
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(60 * 60);
const TCP_KEEPALIVE_INTERVAL: Duration = Duration::from_secs(30);

/// A single session cookie, attribute section dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
}

impl SessionCookie {
    /// Parse the name/value pair out of a Set-Cookie header value.
    ///
    /// Attributes after the first `;` (Path, HttpOnly, Expires, ...) are
    /// discarded; affinity is host-keyed, not cookie-scoped.
    pub fn parse(header_value: &str) -> Option<Self> {
        let pair = header_value.split(';').next()?;
        let (name, value) = pair.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            value: value.trim().to_string(),
        })
    }
}

/// Most recent response cookies per remote host, last writer wins
#[derive(Debug, Default)]
pub struct CookieAffinityStore {
    by_host: RwLock<HashMap<String, Vec<SessionCookie>>>,
}

impl CookieAffinityStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cookie set held for a host.
    ///
    /// Responses without cookies leave the stored set untouched; a response
    /// that carries any cookie replaces the whole set for its host.
    pub fn store(&self, host: &str, cookies: Vec<SessionCookie>) {
        if cookies.is_empty() {
            return;
        }
        self.by_host.write().insert(host.to_string(), cookies);
    }

    /// The cookies currently held for a host, empty if none
    pub fn cookies_for(&self, host: &str) -> Vec<SessionCookie> {
        self.by_host
            .read()
            .get(host)
            .cloned()
            .unwrap_or_default()
    }

    /// Render the held cookies as a Cookie request header value
    pub fn header_value(&self, host: &str) -> Option<String> {
        let cookies = self.cookies_for(host);
        if cookies.is_empty() {
            return None;
        }
        Some(
            cookies
                .iter()
                .map(|c| format!("{}={}", c.name, c.value))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

/// Status and body of a completed HTTP exchange
#[derive(Debug)]
pub struct HttpExchange {
    /// HTTP status of the response
    pub status: StatusCode,
    /// Response body, may be empty
    pub body: String,
}

/// Long-lived HTTP client with pooled connections and cookie affinity
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
    cookies: CookieAffinityStore,
}

impl HttpTransport {
    /// Build the transport with a pool bounded to the caller's concurrency
    pub fn new(max_connections: usize) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(CALL_TIMEOUT)
            .pool_idle_timeout(POOL_IDLE_TIMEOUT)
            .pool_max_idle_per_host(max_connections)
            .tcp_keepalive(TCP_KEEPALIVE_INTERVAL)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            cookies: CookieAffinityStore::new(),
        })
    }

    /// The cookie store shared by every exchange on this transport
    pub fn cookie_store(&self) -> &CookieAffinityStore {
        &self.cookies
    }

    /// POST a JSON body to the endpoint with the given fixed headers.
    ///
    /// Cookies held for the endpoint host ride along on the request; any
    /// cookies on the response replace the stored set for that host. Errors
    /// from this method are transport-level and therefore retryable.
    pub async fn post_json(
        &self,
        url: &Url,
        headers: HeaderMap,
        body: String,
    ) -> Result<HttpExchange, AdapterError> {
        let host = url.host_str().unwrap_or_default().to_string();
        let started = Instant::now();

        trace!("request headers: {}", redacted_headers(&headers));
        debug!("--> POST {} ({} bytes)", url, body.len());

        let mut request = self.client.post(url.clone()).headers(headers).body(body);
        if let Some(cookie_header) = self.cookies.header_value(&host) {
            request = request.header(COOKIE, cookie_header);
        }

        let response = request.send().await?;
        let status = response.status();

        let received: Vec<SessionCookie> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(SessionCookie::parse)
            .collect();
        self.cookies.store(&host, received);

        // A failure while draining the body is an I/O failure like any
        // other; it maps to a transient transport error.
        let body = response.text().await?;

        debug!(
            "<-- {} {} ({} bytes, {}ms)",
            status.as_u16(),
            url,
            body.len(),
            started.elapsed().as_millis()
        );

        Ok(HttpExchange { status, body })
    }
}

/// Header names whose values never reach the diagnostic log
const REDACTED_HEADERS: &[&str] = &["authorization", "apikey", "x-api-key", "proxy-authorization"];

fn redacted_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| {
            if REDACTED_HEADERS.contains(&name.as_str()) {
                format!("{}: ██", name)
            } else {
                format!("{}: {}", name, value.to_str().unwrap_or("<binary>"))
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
