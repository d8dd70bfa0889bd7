use thiserror::Error;

/// Errors from [`crate::travel_time::TravelTimeProvider::get_travel_time_matrix`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TravelTimeError {
    /// No stops were provided.
    ///
    /// The provider requires at least one stop to compute a matrix. Callers
    /// should pre-filter input to avoid this condition.
    #[error("at least one stop is required")]
    EmptyInput,
    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("request to {url} failed with HTTP {status}: {message}")]
    HttpError {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error detail.
        message: String,
    },
    /// The request failed before a response was received.
    #[error("network error contacting {url}: {message}")]
    NetworkError {
        /// Requested URL.
        url: String,
        /// Error detail.
        message: String,
    },
    /// A visiting order named a stop that was not supplied.
    #[error("order references stop {index}, but only {stops} stops exist")]
    UnknownStop {
        /// Offending index.
        index: usize,
        /// Number of stops supplied.
        stops: usize,
    },
    /// The routing service reported an error code.
    #[error("routing service error {code}: {message}")]
    ServiceError {
        /// Service status code, e.g. `InvalidQuery`.
        code: String,
        /// Service message.
        message: String,
    },
    /// The response body could not be interpreted.
    #[error("failed to parse routing response: {message}")]
    ParseError {
        /// Error detail.
        message: String,
    },
}
