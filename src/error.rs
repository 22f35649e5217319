use http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DipError {
    #[error("RequestError: {status_code:?} {details:?}")]
    RequestError {
        details: String,
        status_code: StatusCode,
    },
    #[error("ConnectionClosed")]
    ConnectionClosed,
    #[error("IOError: {source:?}")]
    IOError {
        #[from]
        source: std::io::Error,
    },
    // from AcquireError
    #[error("AcquireError: {source:?}")]
    AcquireError {
        #[from]
        source: tokio::sync::AcquireError,
    },
    // from http::Error
    #[error("HttpError: {source:?}")]
    HttpError {
        #[from]
        source: http::Error,
    },
    // from http::header::InvalidHeaderValue
    #[error("InvalidHeaderValue: {source:?}")]
    InvalidHeaderValue {
        #[from]
        source: http::header::InvalidHeaderValue,
    },
    // from serde_json::Error
    #[error("JsonError: {source:?}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },
}

impl DipError {
    pub fn request(status_code: StatusCode, details: impl Into<String>) -> Self {
        DipError::RequestError {
            details: details.into(),
            status_code,
        }
    }

    /// Status to answer with when the error happened before a handler ran.
    pub fn status_code(&self) -> StatusCode {
        match self {
            DipError::RequestError { status_code, .. } => *status_code,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
