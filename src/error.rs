use thiserror::Error;

pub type Result<T> = std::result::Result<T, KatchError>;

/// Type-erased error returned by fallible response callables.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum KatchError {
    #[error("Scenario for [{exceptions}] has no response configured")]
    MissingResponder { exceptions: String },

    #[error("Invalid status code: {0}")]
    InvalidStatusCode(u16),

    #[error("Catcher is already attached to a host")]
    AlreadyAttached,

    #[error("Response payload is not valid JSON: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Response callable failed: {0}")]
    Callable(BoxError),
}
