#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{operation} failed: table or index not found")]
    ResourceNotFound { operation: &'static str },
    #[error("{operation} throttled: {reason}")]
    Throttled {
        operation: &'static str,
        reason: String,
    },
    #[error("{operation} failed: store internal server error")]
    InternalServerError { operation: &'static str },
    #[error("{operation} failed: {reason}")]
    RequestFailed {
        operation: &'static str,
        reason: String,
    },
    #[error("attribute '{0}' uses a type this adapter does not understand")]
    UnsupportedAttribute(String),
    #[error("continuation token is not usable as a start key: {0}")]
    InvalidContinuationToken(String),
    #[error("store still reported more results after {limit} pages")]
    PageLimitExceeded { limit: usize },
}
