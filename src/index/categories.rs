//! Static category (genre) index and category id normalization.
//!
//! Shows carry category ids as small positive integers; the display names live
//! in a separate, immutable lookup table. Ids reach us from JSON numbers, JSON
//! strings, CLI flags and settings values, so every entry point funnels
//! through [`CategoryId`]'s parsers and the rest of the crate only ever
//! compares one numeric representation.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ViewError;

/// Normalized category identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CategoryId(u32);

impl CategoryId {
    /// What: Wrap a raw id, rejecting zero.
    ///
    /// Output: `None` for `0`, which no catalog uses and which would otherwise
    /// alias the "all categories" selection in some clients.
    #[must_use]
    pub const fn new(raw: u32) -> Option<Self> {
        if raw == 0 { None } else { Some(Self(raw)) }
    }

    /// Numeric value of the id.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// What: Accept an `f64` only when it is a whole number in `1..=u32::MAX`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from_whole_f64(f: f64) -> Option<Self> {
        if f.is_finite() && f.fract() == 0.0 && f >= 1.0 && f <= f64::from(u32::MAX) {
            Self::new(f as u32)
        } else {
            None
        }
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CategoryId {
    type Err = ViewError;

    /// What: Parse textual ids such as `"4"`, `" 4 "` or `"4.0"`.
    ///
    /// # Errors
    /// - `InvalidParameter` for empty, negative, fractional, zero or non-numeric text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let parsed = t.parse::<u32>().ok().and_then(Self::new).or_else(|| {
            t.parse::<f64>()
                .ok()
                .and_then(Self::from_whole_f64)
        });
        parsed.ok_or_else(|| ViewError::invalid("category id", s))
    }
}

impl TryFrom<&Value> for CategoryId {
    type Error = ViewError;

    fn try_from(v: &Value) -> Result<Self, Self::Error> {
        let parsed = match v {
            Value::Number(n) => n
                .as_u64()
                .and_then(|u| u32::try_from(u).ok())
                .and_then(Self::new)
                .or_else(|| n.as_f64().and_then(Self::from_whole_f64)),
            Value::String(s) => return s.parse(),
            _ => None,
        };
        parsed.ok_or_else(|| ViewError::invalid("category id", v.to_string()))
    }
}

impl<'de> Deserialize<'de> for CategoryId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = Value::deserialize(deserializer)?;
        Self::try_from(&v).map_err(serde::de::Error::custom)
    }
}

/// One labelled category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    /// Identifier used on records.
    pub id: CategoryId,
    /// Human-readable name.
    pub name: String,
}

/// Immutable bidirectional id <-> name table.
#[derive(Clone, Debug, Default)]
pub struct CategoryIndex {
    /// Names keyed by id, iterated in id order.
    by_id: BTreeMap<CategoryId, String>,
    /// Ids keyed by lowercased name.
    by_name: HashMap<String, CategoryId>,
}

/// Genres published by the public show catalog this client targets.
const STANDARD_GENRES: [(u32, &str); 9] = [
    (1, "Personal Growth"),
    (2, "Investigative Journalism"),
    (3, "History"),
    (4, "Comedy"),
    (5, "Entertainment"),
    (6, "Business"),
    (7, "Fiction"),
    (8, "News"),
    (9, "Kids and Family"),
];

static STANDARD: LazyLock<CategoryIndex> = LazyLock::new(|| {
    CategoryIndex::from_entries(
        STANDARD_GENRES
            .iter()
            .filter_map(|(id, name)| CategoryId::new(*id).map(|id| (id, *name))),
    )
});

impl CategoryIndex {
    /// What: Build an index from `(id, name)` pairs.
    ///
    /// Details:
    /// - Later duplicates of an id replace earlier ones.
    /// - Name lookups are case-insensitive.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (CategoryId, S)>,
        S: Into<String>,
    {
        let mut out = Self::default();
        for (id, name) in entries {
            let name = name.into();
            out.by_name.insert(name.to_lowercase(), id);
            out.by_id.insert(id, name);
        }
        out
    }

    /// The process-wide genre table.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Display name for `id`, if known.
    #[must_use]
    pub fn name(&self, id: CategoryId) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }

    /// Id for a display name (case-insensitive), if known.
    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<CategoryId> {
        self.by_name.get(&name.trim().to_lowercase()).copied()
    }

    /// Number of categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// All categories in id order.
    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        self.by_id.iter().map(|(id, name)| Category {
            id: *id,
            name: name.clone(),
        })
    }

    /// What: Resolve user text to a category id.
    ///
    /// Inputs:
    /// - `raw`: Either a numeric id (any representation [`CategoryId::from_str`] accepts)
    ///   or a display name.
    ///
    /// Output:
    /// - The normalized id. Numeric ids are accepted even when absent from the table so
    ///   catalogs with newer genres still filter correctly.
    ///
    /// # Errors
    /// - `InvalidParameter` when `raw` is neither numeric nor a known name.
    pub fn resolve(&self, raw: &str) -> Result<CategoryId, ViewError> {
        raw.parse::<CategoryId>()
            .or_else(|e| self.id_of(raw).ok_or(e))
    }

    /// What: Resolve a category choice where empty text or `all` (any case) means no filter.
    ///
    /// # Errors
    /// - `InvalidParameter` when the text is not `all`, a numeric id, or a known name.
    pub fn resolve_choice(&self, raw: &str) -> Result<Option<CategoryId>, ViewError> {
        let t = raw.trim();
        if t.is_empty() || t.eq_ignore_ascii_case("all") {
            Ok(None)
        } else {
            self.resolve(t).map(Some)
        }
    }

    /// What: Labels for a record's ids, in record order.
    ///
    /// Details:
    /// - Unknown ids render as `#<id>` rather than being dropped.
    #[must_use]
    pub fn labels(&self, ids: &[CategoryId]) -> Vec<String> {
        ids.iter()
            .map(|id| {
                self.name(*id)
                    .map_or_else(|| format!("#{id}"), ToString::to_string)
            })
            .collect()
    }

    /// What: Step through the selection cycle `None -> first id -> ... -> last id -> None`.
    ///
    /// Inputs:
    /// - `current`: Present selection.
    /// - `forward`: Direction of travel.
    #[must_use]
    pub fn cycle(&self, current: Option<CategoryId>, forward: bool) -> Option<CategoryId> {
        let ids: Vec<CategoryId> = self.by_id.keys().copied().collect();
        let pos = current.and_then(|c| ids.iter().position(|id| *id == c));
        match (pos, forward) {
            (None, true) => ids.first().copied(),
            (None, false) => ids.last().copied(),
            (Some(i), true) => ids.get(i + 1).copied(),
            (Some(i), false) => i.checked_sub(1).and_then(|j| ids.get(j).copied()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn id(n: u32) -> CategoryId {
        CategoryId::new(n).unwrap()
    }

    #[test]
    /// What: Textual ids of different shapes normalize to the same numeric id
    ///
    /// - Input: "4", " 4 ", "4.0", "+4"
    /// - Output: All equal `CategoryId(4)`
    fn text_ids_normalize_to_one_representation() {
        for raw in ["4", " 4 ", "4.0", "+4"] {
            assert_eq!(raw.parse::<CategoryId>(), Ok(id(4)), "raw={raw:?}");
        }
    }

    #[test]
    /// What: Non-numeric, fractional, zero and negative ids are rejected at the boundary
    fn bad_text_ids_are_invalid_parameters() {
        for raw in ["", "comedy", "4.5", "0", "-3", "NaN"] {
            assert!(
                matches!(
                    raw.parse::<CategoryId>(),
                    Err(ViewError::InvalidParameter { name: "category id", .. })
                ),
                "raw={raw:?}"
            );
        }
    }

    #[test]
    /// What: JSON numbers, floats and strings all decode to the same id
    ///
    /// - Input: `[4, 4.0, "4"]`
    /// - Output: Three equal ids, so a string-typed selection still matches numeric data
    fn json_ids_normalize() {
        let ids: Vec<CategoryId> = serde_json::from_value(json!([4, 4.0, "4"])).unwrap();
        assert_eq!(ids, vec![id(4), id(4), id(4)]);
        assert!(serde_json::from_value::<CategoryId>(json!(true)).is_err());
        assert!(serde_json::from_value::<CategoryId>(json!(-1)).is_err());
    }

    #[test]
    /// What: Standard genre table maps both ways
    fn standard_index_is_bidirectional() {
        let idx = CategoryIndex::standard();
        assert_eq!(idx.len(), 9);
        assert_eq!(idx.name(id(4)), Some("Comedy"));
        assert_eq!(idx.id_of("comedy"), Some(id(4)));
        assert_eq!(idx.id_of("Kids and Family"), Some(id(9)));
        assert_eq!(idx.name(id(42)), None);
    }

    #[test]
    /// What: `resolve` accepts numbers first, then names
    fn resolve_numbers_and_names() {
        let idx = CategoryIndex::standard();
        assert_eq!(idx.resolve("3"), Ok(id(3)));
        assert_eq!(idx.resolve("History"), Ok(id(3)));
        assert_eq!(idx.resolve("42"), Ok(id(42)));
        assert!(idx.resolve("Polka").is_err());
    }

    #[test]
    /// What: Empty text and `all` in any case mean no filter; names still resolve
    fn resolve_choice_treats_all_as_none() {
        let idx = CategoryIndex::standard();
        for raw in ["", "  ", "all", "All", " ALL "] {
            assert_eq!(idx.resolve_choice(raw).unwrap(), None);
        }
        assert_eq!(idx.resolve_choice("comedy").unwrap(), Some(id(4)));
        assert!(idx.resolve_choice("allsorts").is_err());
    }

    #[test]
    /// What: Labels keep record order and mark unknown ids
    fn labels_mark_unknown_ids() {
        let idx = CategoryIndex::standard();
        assert_eq!(
            idx.labels(&[id(8), id(1), id(77)]),
            vec!["News".to_string(), "Personal Growth".to_string(), "#77".to_string()]
        );
        assert!(idx.labels(&[]).is_empty());
    }

    #[test]
    /// What: Cycling walks all ids and wraps through "all categories"
    fn cycle_wraps_through_none() {
        let idx = CategoryIndex::from_entries([(id(2), "B"), (id(1), "A")]);
        assert_eq!(idx.cycle(None, true), Some(id(1)));
        assert_eq!(idx.cycle(Some(id(1)), true), Some(id(2)));
        assert_eq!(idx.cycle(Some(id(2)), true), None);
        assert_eq!(idx.cycle(None, false), Some(id(2)));
        assert_eq!(idx.cycle(Some(id(1)), false), None);
    }
}
