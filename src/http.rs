use std::collections::BTreeMap;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::FetchError;

pub type Headers = BTreeMap<String, String>;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Status code and raw body of a finished request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// First `max_chars` characters of the body, for log lines.
    pub fn body_preview(&self, max_chars: usize) -> &str {
        match self.body.char_indices().nth(max_chars) {
            Some((idx, _)) => &self.body[..idx],
            None => &self.body,
        }
    }
}

/// Outbound GET used by the platforms.
pub trait HttpClient {
    fn get(&self, url: &str, headers: &Headers) -> Result<HttpResponse, FetchError>;
}

#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub timeout: Duration,
    /// Skips TLS certificate verification. Only for upstreams with broken certificates.
    pub accept_invalid_certs: bool,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            accept_invalid_certs: false,
        }
    }
}

/// `HttpClient` backed by `reqwest::blocking`.
pub struct BlockingClient {
    client: reqwest::blocking::Client,
}

impl BlockingClient {
    pub fn new(options: &HttpOptions) -> Result<Self, FetchError> {
        if options.accept_invalid_certs {
            log::warn!("[Http] TLS certificate verification is disabled");
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(options.timeout)
            .danger_accept_invalid_certs(options.accept_invalid_certs)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { client })
    }
}

impl HttpClient for BlockingClient {
    fn get(&self, url: &str, headers: &Headers) -> Result<HttpResponse, FetchError> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let resp = request.send().map_err(FetchError::Request)?;
        let status = resp.status().as_u16();
        let body = resp.text().map_err(FetchError::Request)?;

        Ok(HttpResponse { status, body })
    }
}
