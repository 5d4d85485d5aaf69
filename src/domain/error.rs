//! Error types for the country browser.
//!
//! This module defines the centralized error type [`CountryError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented using the
//! `thiserror` crate for automatic `Error` trait implementation.
//!
//! Only the network-facing variants can escape the country store. Everything that
//! happens after the list is in memory (search, sort, filter) is infallible.

use thiserror::Error;

/// The main error type for country browser operations.
///
/// # Examples
///
/// ```
/// use poi_countries::CountryError;
///
/// let err = CountryError::Status(503);
/// assert!(err.is_network());
/// assert!(!CountryError::Cancelled.is_network());
/// ```
#[derive(Debug, Error)]
pub enum CountryError {
    /// The remote API could not be reached.
    ///
    /// Covers DNS failures, refused connections, TLS errors and timeouts. The string
    /// carries the transport error message.
    #[error("Network error: {0}")]
    Network(String),

    /// The remote API answered with a non-success HTTP status.
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    /// The response body did not match the expected country record shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The requesting context cancelled the fetch before it completed.
    #[error("Fetch cancelled")]
    Cancelled,

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations, mostly while reading
    /// configuration files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Communication with the background fetch worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// User input could not be interpreted (e.g. an unknown sort feature).
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CountryError {
    /// Returns `true` for the failures that count as a network error: transport
    /// failures and non-success HTTP statuses.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Status(_))
    }
}

impl From<reqwest::Error> for CountryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// A specialized `Result` type for country browser operations.
pub type Result<T> = std::result::Result<T, CountryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_kinds_are_grouped() {
        assert!(CountryError::Network("refused".into()).is_network());
        assert!(CountryError::Status(500).is_network());
        assert!(!CountryError::Decode("bad".into()).is_network());
        assert!(!CountryError::Config("x".into()).is_network());
    }

    #[test]
    fn display_includes_detail() {
        let err = CountryError::Status(404);
        assert_eq!(err.to_string(), "Unexpected HTTP status: 404");
    }
}
