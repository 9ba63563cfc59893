//! Record source: one-shot catalog retrieval with bounded retry.

pub mod retry;
pub mod shows;

pub use retry::{RetryPolicy, retry_with_backoff};
pub use shows::{
    DEFAULT_SOURCE_URL, SourceConfig, build_client, decode_records, fetch_once, fetch_records,
    fetch_with_retry,
};

use crate::error::FetchError;
use crate::state::{Record, ViewState};

/// What: Hand a finished fetch to the coordinator.
///
/// Inputs:
/// - `state`: Coordinator to update
/// - `outcome`: Result of [`fetch_records`]
///
/// Details:
/// - Success loads the records; failure puts the coordinator into its error state with
///   the error's display text, so no fetch error escapes as a panic or unhandled value.
pub fn deliver(state: &mut ViewState, outcome: Result<Vec<Record>, FetchError>) {
    match outcome {
        Ok(records) => state.load(records),
        Err(e) => state.fail(e.to_string()),
    }
}
