//! Show catalog retrieval and decoding.
use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::retry::{RetryPolicy, retry_with_backoff};
use crate::error::FetchError;
use crate::state::Record;

/// Public catalog the client targets when nothing else is configured.
pub const DEFAULT_SOURCE_URL: &str = "https://podcast-api.netlify.app";

/// Where and how to fetch the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceConfig {
    /// Endpoint returning a JSON array of shows.
    pub url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Retry bounds.
    pub retry: RetryPolicy,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            timeout: Duration::from_secs(20),
            retry: RetryPolicy::default(),
        }
    }
}

/// What: Build the HTTP client used for the catalog request.
///
/// # Errors
/// - `FetchError::Http` if the TLS backend cannot be initialized.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, FetchError> {
    let client = reqwest::Client::builder()
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .timeout(timeout)
        .user_agent(format!("showshelf/{}", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// What: Perform one GET against `url` and decode the body.
///
/// # Errors
/// - `Http` on transport failure, `Status` on non-2xx, `Decode` on a non-array body.
pub async fn fetch_once(client: &reqwest::Client, url: &str) -> Result<Vec<Record>, FetchError> {
    debug!(url, "requesting show catalog");
    let resp = client.get(url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }
    let body = resp.text().await?;
    decode_records(&body)
}

/// What: Decode a catalog body into records.
///
/// Inputs:
/// - `body`: JSON text expected to be an array of show objects
///
/// Output:
/// - Well-formed records in source order.
///
/// # Errors
/// - `Decode` when the body is not JSON or not an array.
///
/// Details:
/// - Individual entries that do not fit the record schema (e.g. no title) are skipped
///   and logged rather than failing the whole catalog.
/// - Later entries repeating an earlier id are dropped so ids stay unique.
pub fn decode_records(body: &str) -> Result<Vec<Record>, FetchError> {
    let entries: Vec<Value> = serde_json::from_str(body)?;
    let total = entries.len();
    let mut seen: HashSet<String> = HashSet::with_capacity(total);
    let mut out = Vec::with_capacity(total);
    for (pos, entry) in entries.iter().enumerate() {
        match Record::deserialize(entry) {
            Ok(record) => {
                if seen.insert(record.id.clone()) {
                    out.push(record);
                } else {
                    warn!(position = pos, id = %record.id, "duplicate show id skipped");
                }
            }
            Err(e) => warn!(position = pos, error = %e, "malformed show skipped"),
        }
    }
    if out.len() != total {
        info!(kept = out.len(), total, "catalog decoded with skipped entries");
    }
    Ok(out)
}

/// What: Run `operation` under `policy`, turning a final failure into `Exhausted`.
///
/// Inputs:
/// - `operation`: One fetch attempt
/// - `policy`: Retry bounds
///
/// # Errors
/// - `FetchError::Exhausted` carrying the last attempt's error.
pub async fn fetch_with_retry<F, Fut>(
    operation: F,
    policy: &RetryPolicy,
) -> Result<Vec<Record>, FetchError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<Vec<Record>, FetchError>>,
{
    retry_with_backoff(operation, policy)
        .await
        .map_err(|last| FetchError::Exhausted {
            attempts: policy.attempts(),
            last: Box::new(last),
        })
}

/// What: Fetch the full catalog described by `config`.
///
/// # Errors
/// - `Http` if the client cannot be built; `Exhausted` once every attempt failed.
pub async fn fetch_records(config: &SourceConfig) -> Result<Vec<Record>, FetchError> {
    let client = build_client(config.timeout)?;
    let client = &client;
    let url = config.url.as_str();
    fetch_with_retry(move || fetch_once(client, url), &config.retry).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Decoding keeps valid shows, skips malformed ones and duplicate ids
    ///
    /// - Input: Array with a valid show, one missing its title, one duplicate id, one with
    ///   string genres
    /// - Output: Two records in source order
    fn decode_skips_malformed_and_duplicates() {
        let body = r#"[
            {"id":"1","title":"A","description":"d","image":"i","genres":[1,2],"seasons":2,"updated":"2022-01-01T00:00:00.000Z"},
            {"id":"2","description":"no title","genres":[1],"seasons":1,"updated":"2022-01-01T00:00:00Z"},
            {"id":"1","title":"A again","genres":[],"seasons":1,"updated":"2022-01-01T00:00:00Z"},
            {"id":"3","title":"C","genres":["4"],"seasons":1,"updated":"2021-06-01T12:00:00Z"}
        ]"#;
        let records = decode_records(body).unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(records[1].category_ids[0].get(), 4);
    }

    #[test]
    /// What: A non-array body is a decode error
    fn decode_rejects_non_array() {
        assert!(matches!(
            decode_records(r#"{"shows": []}"#),
            Err(FetchError::Decode(_))
        ));
        assert!(matches!(decode_records("<html>"), Err(FetchError::Decode(_))));
    }

    #[tokio::test]
    /// What: Exhausted retries report the attempt count and the last status
    async fn fetch_with_retry_reports_exhaustion() {
        let policy = RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
            max_jitter: Duration::ZERO,
        };
        let mut calls = 0u16;
        let out = fetch_with_retry(
            || {
                calls += 1;
                let code = 500 + calls;
                async move { Err(FetchError::Status(code)) }
            },
            &policy,
        )
        .await;
        assert_eq!(calls, 3);
        match out {
            Err(FetchError::Exhausted { attempts, last }) => {
                assert_eq!(attempts, 3);
                assert!(matches!(*last, FetchError::Status(503)));
            }
            other => panic!("expected exhaustion, got {other:?}"),
        }
    }
}
