use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackError {
    #[error("track parse error: {0}")]
    Parse(String),

    #[error("fetch error: {0}")]
    Fetch(String),

    #[error("track not found: {0}")]
    NotFound(i64),

    #[error("invalid track id: {0}")]
    InvalidId(String),

    #[error("unknown track field: {0}")]
    UnknownField(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for tracklog operations
pub type Result<T> = std::result::Result<T, TrackError>;

impl TrackError {
    /// Creates a new parse error
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Self::Parse(msg.into())
    }

    /// Creates a new fetch error
    pub fn fetch<S: Into<String>>(msg: S) -> Self {
        Self::Fetch(msg.into())
    }

    /// Creates a new storage error
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        Self::Storage(msg.into())
    }

    /// Creates a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Returns true when the error was caused by the client's input rather
    /// than by this service or its collaborators.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Parse(_) | Self::Fetch(_) | Self::InvalidId(_) | Self::UnknownField(_)
        )
    }

    /// Returns the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Parse(_) | Self::Fetch(_) => "ingest",
            Self::NotFound(_) => "not_found",
            Self::InvalidId(_) | Self::UnknownField(_) => "validation",
            Self::Storage(_) => "storage",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
        }
    }
}
