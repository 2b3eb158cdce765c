// SPDX-License-Identifier: MIT

//! Fetch capability: the seam between gallery logic and the network.
//!
//! Admission and export both consume [`ImageFetcher`]; production code uses
//! the reqwest-backed [`HttpFetcher`], tests substitute in-memory stubs.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use url::Url;

/// Response body of a settled fetch. A non-success status is reported here
/// rather than as an `Err`, so callers can distinguish HTTP-level rejection
/// from transport faults while treating both as a failed entry.
#[derive(Clone, Debug)]
pub struct FetchedBody {
    pub status: u16,
    pub bytes: Vec<u8>,
}

impl FetchedBody {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Fetch-by-URL capability used for the admission loadability check and the
/// per-entry export downloads.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Fetch the resource at `url`. `Err` means a transport-level fault
    /// (bad URL, connection failure, read error); HTTP errors come back as
    /// an `Ok` body with a non-success status.
    async fn fetch(&self, url: &str) -> Result<FetchedBody>;
}

/// Production fetcher backed by a shared [`reqwest::Client`].
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("picpack/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ImageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedBody> {
        let url = Url::parse(url).with_context(|| format!("Invalid URL: {url}"))?;
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?;

        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read response body from {url}"))?;

        Ok(FetchedBody {
            status,
            bytes: bytes.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::FetchedBody;

    #[test]
    fn success_covers_only_2xx_statuses() {
        let body = |status| FetchedBody {
            status,
            bytes: Vec::new(),
        };

        assert!(body(200).is_success());
        assert!(body(204).is_success());
        assert!(!body(301).is_success());
        assert!(!body(404).is_success());
        assert!(!body(500).is_success());
    }
}
