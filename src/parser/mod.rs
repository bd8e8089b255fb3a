//! Track-file parsing seam.
//!
//! The rest of the service only sees the [`TrackParser`] trait: hand it a
//! URL, get back structured flight data. [`HttpTrackParser`] is the
//! production implementation (bounded fetch + IGC decode); the [`fixture`]
//! module provides a canned implementation for tests.

pub mod fixture;
pub mod igc;

use crate::core::config::IngestConfig;
use crate::core::{Result, TrackError, TrackPoint};
use chrono::NaiveDate;

/// Structured flight data extracted from one track file.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTrack {
    /// Flight date from the file's date header.
    pub date: NaiveDate,
    /// Pilot in charge, possibly empty.
    pub pilot: String,
    /// Glider type, possibly empty.
    pub glider: String,
    /// Glider registration, possibly empty.
    pub glider_id: String,
    /// Ordered position fixes.
    pub points: Vec<TrackPoint>,
}

/// Converts a track file reached by URL into structured flight data.
#[async_trait::async_trait]
pub trait TrackParser: Send + Sync {
    /// Fetch and parse the track file at `url`.
    async fn parse_url(&self, url: &str) -> Result<ParsedTrack>;
}

/// Production parser: fetches the file over HTTP with a bounded timeout and
/// size cap, then decodes it as IGC.
pub struct HttpTrackParser {
    client: reqwest::Client,
    max_body_bytes: usize,
}

impl HttpTrackParser {
    pub fn new(config: &IngestConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.fetch_timeout)
            .build()
            .map_err(|e| TrackError::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            max_body_bytes: config.max_body_bytes,
        })
    }
}

#[async_trait::async_trait]
impl TrackParser for HttpTrackParser {
    async fn parse_url(&self, url: &str) -> Result<ParsedTrack> {
        if url.is_empty() {
            return Err(TrackError::fetch("no track URL supplied"));
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TrackError::fetch(format!("failed to fetch {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TrackError::fetch(format!(
                "fetching {} returned {}",
                url, status
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TrackError::fetch(format!("failed to read {}: {}", url, e)))?;
        if body.len() > self.max_body_bytes {
            return Err(TrackError::fetch(format!(
                "track file at {} exceeds {} bytes",
                url, self.max_body_bytes
            )));
        }

        let content = std::str::from_utf8(&body)
            .map_err(|_| TrackError::parse(format!("track file at {} is not text", url)))?;

        igc::parse_igc(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_url_rejected_without_network() {
        let parser = HttpTrackParser::new(&IngestConfig::default()).unwrap();
        let err = parser.parse_url("").await.unwrap_err();
        assert!(matches!(err, TrackError::Fetch(_)));
    }
}
