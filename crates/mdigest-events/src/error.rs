use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventsError {
    #[error("HTTP client build error: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("failed to write {path}: {source}")]
    StateWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl EventsError {
    /// HTTP status code carried by the error, if the server answered at all.
    #[must_use]
    pub fn http_status(&self) -> Option<u16> {
        match self {
            EventsError::UnexpectedStatus { status, .. } => Some(*status),
            EventsError::Request { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
