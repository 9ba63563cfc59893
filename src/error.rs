//! Error taxonomy shared by the view engine and the record source.

use thiserror::Error;

/// Contract violation at the parameter-setting boundary.
///
/// Raised when text coming from the command line, the settings file or the
/// wire cannot be turned into a well-typed parameter. The engine itself never
/// produces these: its inputs are already typed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// A sort key or category id that is outside its domain.
    #[error("invalid {name}: {value:?}")]
    InvalidParameter {
        /// Which parameter was rejected (e.g. `sort key`).
        name: &'static str,
        /// The offending raw value.
        value: String,
    },
}

impl ViewError {
    /// What: Build an [`ViewError::InvalidParameter`] for `name` carrying `value`.
    pub(crate) fn invalid(name: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            value: value.into(),
        }
    }
}

/// Failure while retrieving the show catalog.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, TLS, timeout, connection reset).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("server responded with HTTP {0}")]
    Status(u16),
    /// The body was not a JSON array of shows.
    #[error("response is not a show list: {0}")]
    Decode(#[from] serde_json::Error),
    /// Every attempt failed; terminal for the session.
    #[error("gave up after {attempts} attempts: {last}")]
    Exhausted {
        /// Number of attempts made.
        attempts: u32,
        /// Error from the final attempt.
        #[source]
        last: Box<FetchError>,
    },
}
