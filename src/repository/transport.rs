// src/repository/transport.rs

//! Blocking HTTP transport
//!
//! The index client only needs a single GET returning status and body.
//! Keeping that behind [`Transport`] lets tests script responses without
//! a live server.

use crate::error::{Error, Result};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

/// Default timeout for HTTP requests (30 seconds)
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Status and body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// A blocking request/response call
///
/// Any status is returned as a response; only transport-level failures
/// (connection, TLS, timeout) are errors.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// reqwest-backed transport
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(concat!("pack/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::ClientInit(e.to_string()))?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        debug!("GET {}", url);
        let failed = |e: reqwest::Error| Error::RequestFailed {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let response = self.client.get(url).send().map_err(failed)?;
        let status = response.status().as_u16();
        let body = response.bytes().map_err(failed)?;

        debug!("{} -> HTTP {} ({} bytes)", url, status, body.len());
        Ok(HttpResponse::new(status, body.to_vec()))
    }
}
