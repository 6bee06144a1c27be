use thiserror::Error;

/// Failure of a call to the hosted generative-AI service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("service answered with HTTP {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("response carried no text")]
    Empty,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("key-value storage is unavailable")]
    Unavailable,
    #[error("storage rejected write for key {key:?}")]
    Rejected { key: String },
    #[error("could not encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LinkError {
    #[error("unrecognised event date {0:?}")]
    Date(String),
    #[error("unrecognised event time {0:?}")]
    Time(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognised timestamp {0:?}, expected YYYY-MM-DDTHH:MM:SS")]
pub struct TimestampError(pub String);
