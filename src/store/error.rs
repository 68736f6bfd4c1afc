use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by the recipe store.
pub enum StoreError {
    /// Could not open the database.
    #[error("failed to connect to recipe store at '{url}': {message}")]
    ConnectionFailed {
        /// Database URL.
        url: String,
        /// Error message.
        message: String,
    },

    /// Creating tables failed.
    #[error("failed to prepare recipe store schema: {message}")]
    SchemaFailed {
        /// Error message.
        message: String,
    },

    /// The aggregation (or another statement) failed.
    #[error("recipe store query failed: {message}")]
    QueryFailed {
        /// Error message.
        message: String,
    },

    /// The store refused to serve the request.
    #[error("recipe store unavailable: {message}")]
    Unavailable {
        /// Error message.
        message: String,
    },
}
