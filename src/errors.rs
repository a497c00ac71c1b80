use thiserror::Error;

/// Failure reported by a host-handle operation.
///
/// Host implementations map their own error values into this; the engine
/// passes it through unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("headers handle error: {0}")]
#[non_exhaustive]
pub struct HandleError(pub String);

impl HandleError {
    #[inline]
    pub fn new<S: Into<String>>(msg: S) -> Self {
        Self(msg.into())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HeadersError {
    #[error("empty header name")]
    EmptyHeaderName,
    #[error("invalid header name: {0}")]
    InvalidHeaderName(String),
    #[error("invalid header value for: {0}")]
    InvalidHeaderValue(String),
    #[error("failed to clone headers handle")]
    CloningFailed,
    #[error("invalid headers initializer: {0}")]
    InvalidInitializer(String),
    #[error(transparent)]
    Handle(#[from] HandleError),
}
