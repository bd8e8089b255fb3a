//! Domain models for ingested flight tracks.

use crate::core::{Result, TrackError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One ingested flight track.
///
/// Records are immutable once stored. The identifier is assigned by
/// [`crate::core::IdGenerator`] before the record reaches the store; it is
/// the primary key, the insertion-order sort key, and the value behind the
/// `timestamp` wire tag (the original data model carried identifier and
/// timestamp as one interchangeable value, and that duality is kept as a
/// single field).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRecord {
    /// Dense identifier, strictly increasing from 0 per process lifetime.
    #[serde(rename = "timestamp")]
    pub id: i64,
    /// Flight date from the source file, not the ingestion date.
    #[serde(rename = "H_date")]
    pub h_date: NaiveDate,
    /// Pilot name, copied verbatim from the source file.
    pub pilot: String,
    /// Glider type, copied verbatim.
    pub glider: String,
    /// Glider registration, copied verbatim.
    pub glider_id: String,
    /// Cumulative track distance in km, formatted once at ingestion.
    pub track_length: String,
    /// The URL the caller submitted, retained for audit.
    pub track_src_url: String,
}

/// The fixed, case-insensitive vocabulary of single-field lookups.
///
/// Variants mirror the wire tags of [`TrackRecord`] one-to-one so the
/// vocabulary stays single-sourced with whole-record serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackField {
    Pilot,
    Glider,
    GliderId,
    HDate,
    Timestamp,
    TrackLength,
    TrackSrcUrl,
}

impl TrackField {
    /// The wire name of this field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pilot => "pilot",
            Self::Glider => "glider",
            Self::GliderId => "glider_id",
            Self::HDate => "H_date",
            Self::Timestamp => "timestamp",
            Self::TrackLength => "track_length",
            Self::TrackSrcUrl => "track_src_url",
        }
    }

    /// The string form of this field on a record, as served by the
    /// plain-text field endpoint.
    pub fn value_of(&self, record: &TrackRecord) -> String {
        match self {
            Self::Pilot => record.pilot.clone(),
            Self::Glider => record.glider.clone(),
            Self::GliderId => record.glider_id.clone(),
            Self::HDate => record.h_date.to_string(),
            Self::Timestamp => record.id.to_string(),
            Self::TrackLength => record.track_length.clone(),
            Self::TrackSrcUrl => record.track_src_url.clone(),
        }
    }
}

impl FromStr for TrackField {
    type Err = TrackError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pilot" => Ok(Self::Pilot),
            "glider" => Ok(Self::Glider),
            "glider_id" => Ok(Self::GliderId),
            "h_date" => Ok(Self::HDate),
            "timestamp" => Ok(Self::Timestamp),
            "track_length" => Ok(Self::TrackLength),
            "track_src_url" => Ok(Self::TrackSrcUrl),
            other => Err(TrackError::UnknownField(other.to_string())),
        }
    }
}

/// POST body for track ingestion. Partial or malformed bodies decode to the
/// default and fail downstream at the parser, never in the decoder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UrlRequest {
    #[serde(default)]
    pub url: String,
}

/// Static service metadata plus computed uptime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceMeta {
    pub uptime: String,
    pub info: String,
    pub version: String,
}

/// A bounded page of recent track identifiers with summary bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    /// Identifier of the most recently inserted record, 0 when empty.
    pub t_latest: i64,
    /// First identifier on this page, 0 when empty.
    pub t_start: i64,
    /// Last identifier on this page, 0 when empty.
    pub t_stop: i64,
    /// Identifiers on this page, ascending; at most [`Ticker::PAGE_SIZE`].
    pub tracks: Vec<i64>,
    /// Wall-clock milliseconds spent computing the page.
    pub processing: i64,
}

impl Ticker {
    /// Number of identifiers returned per ticker page.
    pub const PAGE_SIZE: usize = 5;
}
