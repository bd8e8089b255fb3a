//! Canned parser implementations for tests and local experimentation.

use super::{ParsedTrack, TrackParser};
use crate::core::{Result, TrackError, TrackPoint};
use chrono::NaiveDate;

/// A parser that ignores the URL and replies with a fixed outcome.
pub struct StaticParser {
    outcome: std::result::Result<ParsedTrack, String>,
}

impl StaticParser {
    /// Always parses successfully to the given track.
    pub fn ok(track: ParsedTrack) -> Self {
        Self { outcome: Ok(track) }
    }

    /// Always fails with a parse error.
    pub fn failing<S: Into<String>>(reason: S) -> Self {
        Self {
            outcome: Err(reason.into()),
        }
    }
}

#[async_trait::async_trait]
impl TrackParser for StaticParser {
    async fn parse_url(&self, _url: &str) -> Result<ParsedTrack> {
        match &self.outcome {
            Ok(track) => Ok(track.clone()),
            Err(reason) => Err(TrackError::parse(reason.clone())),
        }
    }
}

/// A plausible short flight for tests.
pub fn sample_track() -> ParsedTrack {
    ParsedTrack {
        date: NaiveDate::from_ymd_opt(2016, 2, 19).expect("valid fixture date"),
        pilot: "Per Morken".to_string(),
        glider: "LS-8".to_string(),
        glider_id: "LN-ABC".to_string(),
        points: vec![
            TrackPoint::new(61.1101, 9.2918),
            TrackPoint::new(61.1151, 9.3057),
            TrackPoint::new(61.1219, 9.3228),
            TrackPoint::new(61.1287, 9.3401),
        ],
    }
}
