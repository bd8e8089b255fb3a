//! Core domain models and leaf utilities.

pub mod clock;
pub mod config;
pub mod error;
pub mod geo;
pub mod types;

pub use clock::{format_uptime, millis_since_epoch, IdGenerator};
pub use config::{Config, ConfigBuilder};
pub use error::{Result, TrackError};
pub use geo::{total_distance, TrackPoint};
pub use types::{ServiceMeta, Ticker, TrackField, TrackRecord, UrlRequest};
