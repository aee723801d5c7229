use thiserror::Error;

/// The single failure kind surfaced by the API client.
///
/// Status failures carry only the transport status text; 4xx and 5xx are
/// not told apart.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("API Error: {status_text}")]
    Status { status: u16, status_text: String },
    #[error("API Error: {0}")]
    Network(String),
    #[error("API Error: invalid response body: {0}")]
    Decode(String),
    #[error("API Error: invalid request url: {0}")]
    InvalidUrl(String),
}

impl RequestError {
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn from_status(status: reqwest::StatusCode) -> Self {
        let status_text = status
            .canonical_reason()
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| status.as_u16().to_string());
        RequestError::Status {
            status: status.as_u16(),
            status_text,
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return RequestError::Decode(err.to_string());
        }
        RequestError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for RequestError {
    fn from(err: serde_json::Error) -> Self {
        RequestError::Decode(err.to_string())
    }
}
