use thiserror::Error;

/// Why a fetch cycle produced no forecast.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network unreachable, timeout, connection reset, unreadable body.
    #[error("Failed to send request to {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Forecast request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// Body arrived but does not match the forecast schema.
    #[error("Failed to decode forecast JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Coarse classification for reporting connectivity separately from schema drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Transport,
    Decode,
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Transport { .. } | FetchError::Status { .. } => FetchErrorKind::Transport,
            FetchError::Decode(_) => FetchErrorKind::Decode,
        }
    }

    pub fn is_decode(&self) -> bool {
        self.kind() == FetchErrorKind::Decode
    }
}
