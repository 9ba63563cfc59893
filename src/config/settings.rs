use std::fs;
use std::path::Path;
use std::time::Duration;

use tracing::{debug, warn};

use super::parsing::{parse_key_value, skip_comment_or_empty};
use super::paths::resolve_settings_config_path;
use crate::logic::DEFAULT_PAGE_SIZE;
use crate::sources::{DEFAULT_SOURCE_URL, RetryPolicy, SourceConfig};
use crate::state::SortKey;

/// User-configurable application settings parsed from `settings.conf`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Catalog endpoint.
    pub source_url: String,
    /// Records per page.
    pub page_size: usize,
    /// Sort key the session starts with (and `reset` returns to).
    pub sort_key: SortKey,
    /// Total fetch attempts.
    pub fetch_attempts: u32,
    /// Delay before the first retry, in milliseconds.
    pub fetch_base_delay_ms: u64,
    /// Per-request timeout, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            sort_key: SortKey::default(),
            fetch_attempts: 3,
            fetch_base_delay_ms: 1000,
            request_timeout_secs: 20,
        }
    }
}

impl Settings {
    /// What: Source configuration derived from these settings.
    #[must_use]
    pub fn source_config(&self) -> SourceConfig {
        SourceConfig {
            url: self.source_url.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
            retry: RetryPolicy {
                max_attempts: self.fetch_attempts,
                base_delay: Duration::from_millis(self.fetch_base_delay_ms),
                ..RetryPolicy::default()
            },
        }
    }
}

/// What: Parse a strictly positive integer, logging rejects.
fn positive<T>(key: &str, val: &str) -> Option<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match val.parse::<T>() {
        Ok(v) if v > T::default() => Some(v),
        _ => {
            warn!(key, value = val, "ignoring setting: expected a positive integer");
            None
        }
    }
}

/// What: Apply settings from `settings.conf` content onto `settings`.
///
/// Inputs:
/// - `content`: File content
/// - `settings`: Values to update in place
///
/// Details:
/// - Unknown keys and invalid values are logged and leave the current value in place.
/// - Keys are case-insensitive; `.`, `-` and spaces in keys are treated as `_`.
pub fn parse_settings(content: &str, settings: &mut Settings) {
    for line in content.lines() {
        if skip_comment_or_empty(line) {
            continue;
        }
        let Some((key, val)) = parse_key_value(line) else {
            continue;
        };
        match key.as_str() {
            "source_url" | "url" | "catalog_url" => {
                if val.is_empty() {
                    warn!(key, "ignoring empty source url");
                } else {
                    settings.source_url = val;
                }
            }
            "page_size" | "per_page" => {
                if let Some(v) = positive::<usize>(&key, &val) {
                    settings.page_size = v;
                }
            }
            "sort_key" | "default_sort" | "sort" => match SortKey::from_config_key(&val) {
                Some(k) => settings.sort_key = k,
                None => warn!(key, value = %val, "ignoring unknown sort key"),
            },
            "fetch_attempts" | "max_attempts" => {
                if let Some(v) = positive::<u32>(&key, &val) {
                    settings.fetch_attempts = v;
                }
            }
            "fetch_base_delay_ms" | "backoff_ms" => match val.parse::<u64>() {
                Ok(v) => settings.fetch_base_delay_ms = v,
                Err(_) => warn!(key, value = %val, "ignoring setting: expected milliseconds"),
            },
            "request_timeout_secs" | "timeout_secs" => {
                if let Some(v) = positive::<u64>(&key, &val) {
                    settings.request_timeout_secs = v;
                }
            }
            _ => debug!(key, "unknown setting ignored"),
        }
    }
}

/// What: Load settings from an explicit file.
///
/// Output:
/// - Parsed settings; defaults when the file is missing or unreadable.
#[must_use]
pub fn load_settings_from(path: &Path) -> Settings {
    let mut out = Settings::default();
    match fs::read_to_string(path) {
        Ok(content) => {
            parse_settings(&content, &mut out);
            debug!(path = %path.display(), "settings loaded");
        }
        Err(e) => debug!(
            path = %path.display(),
            error = %e,
            "settings file not read; using defaults"
        ),
    }
    out
}

/// What: Load user settings from `settings.conf` under HOME/XDG.
///
/// Output:
/// - A `Settings` value; falls back to `Settings::default()` when missing.
#[must_use]
pub fn settings() -> Settings {
    resolve_settings_config_path().map_or_else(Settings::default, |p| load_settings_from(&p))
}
