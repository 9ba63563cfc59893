//! Core value types used by the view engine.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ViewError;
use crate::index::CategoryId;

/// One catalog entry (a show).
///
/// Records are immutable once decoded; every pipeline stage works on shared
/// references into the source set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Opaque unique identifier (numeric ids on the wire are kept as text).
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    /// Show title.
    pub title: String,
    /// Long description; empty when the source omits it.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Cover image URI; empty when the source omits it.
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    /// Category ids in source order. May be empty.
    #[serde(default, alias = "genres", deserialize_with = "null_as_default")]
    pub category_ids: Vec<CategoryId>,
    /// Number of seasons.
    #[serde(default, alias = "seasons", deserialize_with = "null_as_default")]
    pub season_count: u32,
    /// Last modification time.
    #[serde(alias = "updated")]
    pub last_updated: DateTime<Utc>,
}

/// What: Deserialize `null` (or a missing field, via `#[serde(default)]`) as `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// What: Accept string or numeric ids and keep them as text.
fn opaque_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

/// Ordering policy for the results list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Most recently updated first.
    #[default]
    Newest,
    /// Least recently updated first.
    Oldest,
    /// Title A to Z, case-insensitive.
    TitleAsc,
    /// Title Z to A, case-insensitive.
    TitleDesc,
}

impl SortKey {
    /// Every key, in the order the UI cycles through them.
    pub const ALL: [Self; 4] = [Self::Newest, Self::Oldest, Self::TitleAsc, Self::TitleDesc];

    /// What: Return the string key used in settings files and on the command line.
    #[must_use]
    pub const fn as_config_key(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::TitleAsc => "title_asc",
            Self::TitleDesc => "title_desc",
        }
    }

    /// What: Parse a sort key from its config key or an alias used by other catalog clients.
    ///
    /// Inputs: `s` config string (case-insensitive, `-`/space treated as `_`).
    ///
    /// Output: `Some(SortKey)` on recognized value; `None` otherwise.
    #[must_use]
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "newest" | "updated_desc" | "recent" | "latest" => Some(Self::Newest),
            "oldest" | "updated_asc" => Some(Self::Oldest),
            "title_asc" | "title" | "a_z" | "az" => Some(Self::TitleAsc),
            "title_desc" | "z_a" | "za" => Some(Self::TitleDesc),
            _ => None,
        }
    }

    /// Short label for the header.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest",
            Self::Oldest => "Oldest",
            Self::TitleAsc => "Title A-Z",
            Self::TitleDesc => "Title Z-A",
        }
    }

    /// Next key in [`SortKey::ALL`], wrapping.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Newest => Self::Oldest,
            Self::Oldest => Self::TitleAsc,
            Self::TitleAsc => Self::TitleDesc,
            Self::TitleDesc => Self::Newest,
        }
    }
}

impl FromStr for SortKey {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_config_key(s).ok_or_else(|| ViewError::invalid("sort key", s))
    }
}

/// User-controlled inputs that determine the derived view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewParameters {
    /// Free-text query; empty matches everything.
    pub query: String,
    /// Selected category; `None` means all categories.
    pub category: Option<CategoryId>,
    /// Active ordering.
    pub sort_key: SortKey,
    /// One-based page number.
    pub page_index: usize,
}

impl Default for ViewParameters {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: None,
            sort_key: SortKey::default(),
            page_index: 1,
        }
    }
}

/// The filtered, sorted and paginated result at one instant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DerivedView {
    /// Records on the current page, in display order.
    pub items: Vec<Record>,
    /// Records matching the filters across all pages.
    pub total_matched: usize,
    /// Page count; `0` when nothing matched.
    pub total_pages: usize,
}

/// What the renderer should draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewStatus<'a> {
    /// The initial fetch is still outstanding.
    Loading,
    /// The fetch failed terminally.
    Error(&'a str),
    /// Data is loaded but nothing matches the current parameters.
    Empty,
    /// At least one record matches.
    Ready(&'a DerivedView),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    /// What: `SortKey` config key mapping roundtrip and alias handling
    ///
    /// - Input: Known keys and aliases; unknown key
    /// - Output: Correct mapping to enum variants; `None` for unknown
    fn sortkey_config_roundtrip_and_aliases() {
        for key in SortKey::ALL {
            assert_eq!(SortKey::from_config_key(key.as_config_key()), Some(key));
        }
        assert_eq!(SortKey::from_config_key("updated_desc"), Some(SortKey::Newest));
        assert_eq!(SortKey::from_config_key("Updated-Asc"), Some(SortKey::Oldest));
        assert_eq!(SortKey::from_config_key("a-z"), Some(SortKey::TitleAsc));
        assert_eq!(SortKey::from_config_key("Z-A"), Some(SortKey::TitleDesc));
        assert_eq!(SortKey::from_config_key("loudest"), None);
    }

    #[test]
    /// What: Parsing an unknown sort key reports an invalid parameter
    fn sortkey_from_str_rejects_unknown() {
        assert_eq!("oldest".parse::<SortKey>(), Ok(SortKey::Oldest));
        assert!(matches!(
            "popularity".parse::<SortKey>(),
            Err(ViewError::InvalidParameter { name: "sort key", .. })
        ));
    }

    #[test]
    /// What: `next` visits every key once before wrapping
    fn sortkey_next_cycles() {
        let mut k = SortKey::Newest;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(k);
            k = k.next();
        }
        assert_eq!(seen, SortKey::ALL.to_vec());
        assert_eq!(k, SortKey::Newest);
    }

    #[test]
    /// What: Records decode from the camelCase schema
    ///
    /// - Input: Object with `categoryIds` mixing numbers and numeric strings
    /// - Output: Normalized ids and parsed timestamp
    fn record_decodes_camel_case_schema() {
        let r: Record = serde_json::from_value(json!({
            "id": "10716",
            "title": "Something True",
            "description": "A podcast",
            "image": "https://example.test/a.jpg",
            "categoryIds": [1, "2"],
            "seasonCount": 3,
            "lastUpdated": "2022-11-03T07:00:00.000Z"
        }))
        .unwrap();
        assert_eq!(r.id, "10716");
        assert_eq!(
            r.category_ids,
            vec![CategoryId::new(1).unwrap(), CategoryId::new(2).unwrap()]
        );
        assert_eq!(r.season_count, 3);
        assert_eq!(r.last_updated.to_rfc3339(), "2022-11-03T07:00:00+00:00");
    }

    #[test]
    /// What: Records decode from the short field names and tolerate missing/null optionals
    ///
    /// - Input: Numeric id, `genres: null`, `seasons`, `updated`, no description or image
    /// - Output: Defaults for optionals; empty category list
    fn record_decodes_aliases_and_null_guards() {
        let r: Record = serde_json::from_value(json!({
            "id": 7,
            "title": "Bare",
            "genres": null,
            "seasons": 1,
            "updated": "2020-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(r.id, "7");
        assert!(r.description.is_empty());
        assert!(r.image.is_empty());
        assert!(r.category_ids.is_empty());
        assert_eq!(r.season_count, 1);
    }

    #[test]
    /// What: Default parameters match the documented defaults
    fn view_parameters_defaults() {
        let p = ViewParameters::default();
        assert!(p.query.is_empty());
        assert_eq!(p.category, None);
        assert_eq!(p.sort_key, SortKey::Newest);
        assert_eq!(p.page_index, 1);
    }
}
