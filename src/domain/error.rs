use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    /// No authenticated customer context. Raised before any platform or
    /// storage call is made.
    #[error("unauthorized: no customer context")]
    Unauthorized,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("record not found: {0}")]
    NotFound(String),

    /// The action runtime misbehaved: transport failure, non-success status,
    /// or a response we cannot make sense of.
    #[error("platform: {0}")]
    Platform(String),

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("webhook delivery: {0}")]
    Webhook(String),

    /// The cursor kept coming back after the configured page cap.
    #[error("page limit of {0} exceeded, cursor never terminated")]
    PageLimit(u32),

    #[error("import cancelled before completion")]
    Cancelled,
}
