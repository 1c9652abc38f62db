//! Null-safe access into untyped fixture JSON.
//!
//! Every normalizer reads fixtures through these helpers so that a missing
//! key, an explicit `null`, or a value of the wrong shape degrades to a typed
//! default instead of an error.
//!
//! Paths are dot-separated. A segment selects an object key or, on arrays, a
//! numeric index. A trailing `length` segment yields the length of an array or
//! string, so `images.0.packages.length` behaves like the dashboard's own
//! expressions.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;

const LENGTH_SEGMENT: &str = "length";

/// Walks `path` from `root` and returns the value it names, if any.
///
/// `null` is treated the same as an absent key at every depth. The empty path
/// names the root itself.
pub fn node<'a>(root: Option<&'a Value>, path: &str) -> Option<&'a Value> {
    let mut current = root.filter(|v| !v.is_null())?;
    if path.is_empty() {
        return Some(current);
    }

    for segment in path.split('.') {
        let next = match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };
        current = next.filter(|v| !v.is_null())?;
    }

    Some(current)
}

/// Like [`node`], but also resolves a trailing `length` segment on arrays and
/// strings. Object keys named `length` take precedence.
pub fn lookup<'a>(root: Option<&'a Value>, path: &str) -> Option<Cow<'a, Value>> {
    if let Some(found) = node(root, path) {
        return Some(Cow::Borrowed(found));
    }

    let (parent, last) = path.rsplit_once('.').unwrap_or(("", path));
    if last != LENGTH_SEGMENT {
        return None;
    }

    match node(root, parent)? {
        Value::Array(items) => Some(Cow::Owned(Value::from(items.len()))),
        Value::String(text) => Some(Cow::Owned(Value::from(text.chars().count()))),
        _ => None,
    }
}

/// Returns the value at `path` deserialized as `T`, or `default` when the path
/// is absent, `null`, or holds something that does not fit `T`.
pub fn safe_get<T: DeserializeOwned>(root: Option<&Value>, path: &str, default: T) -> T {
    lookup(root, path)
        .and_then(|value| T::deserialize(value.as_ref()).ok())
        .unwrap_or(default)
}

/// Non-negative count at `path`. Fractional numbers are truncated; negative,
/// non-numeric or absent values count as zero.
pub fn safe_count(root: Option<&Value>, path: &str) -> u64 {
    match lookup(root, path).as_deref() {
        Some(Value::Number(number)) => number.as_u64().unwrap_or_else(|| {
            number
                .as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.trunc() as u64)
                .unwrap_or(0)
        }),
        _ => 0,
    }
}

/// Number of entries in the array or object at `path`; zero for anything else.
pub fn safe_len(root: Option<&Value>, path: &str) -> usize {
    match node(root, path) {
        Some(Value::Array(items)) => items.len(),
        Some(Value::Object(map)) => map.len(),
        _ => 0,
    }
}

/// String at `path`, or `default`.
pub fn safe_str(root: Option<&Value>, path: &str, default: &str) -> String {
    match node(root, path) {
        Some(Value::String(text)) => text.clone(),
        _ => default.to_string(),
    }
}

/// Elements of the array at `path` that deserialize as `T`.
///
/// Malformed elements are skipped individually so that one bad record does not
/// empty a whole table.
pub fn safe_list<T: DeserializeOwned>(root: Option<&Value>, path: &str) -> Vec<T> {
    match node(root, path) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| T::deserialize(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}

/// Entries of the object at `path` whose values deserialize as `T`.
pub fn safe_map<T: DeserializeOwned>(root: Option<&Value>, path: &str) -> BTreeMap<String, T> {
    match node(root, path) {
        Some(Value::Object(map)) => map
            .iter()
            .filter_map(|(key, value)| {
                T::deserialize(value)
                    .ok()
                    .map(|parsed| (key.clone(), parsed))
            })
            .collect(),
        _ => BTreeMap::new(),
    }
}

/// First candidate that is present and not `null`.
pub fn coalesce<'a, I>(candidates: I) -> Option<&'a Value>
where
    I: IntoIterator<Item = Option<&'a Value>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.is_null())
}

/// Serde helper: `null` becomes `T::default()` instead of a type error.
///
/// Use with `#[serde(default, deserialize_with = "null_as_default")]` on
/// fixture record fields.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Serde helper: accepts a string, number or bool and renders it as text.
/// Anything else becomes the empty string.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => String::new(),
    })
}

/// Serde helper: numeric field that tolerates strings, `null` and garbage.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) => text.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

/// Serde helper: list field whose malformed elements are dropped one by one.
pub fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(safe_list(Some(&value), ""))
}

/// Serde helper: optional text; `null`, `""`, bools and containers are `None`.
pub fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) if !text.is_empty() => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

/// Serde helper: optional nested record; a value of the wrong shape is `None`.
pub fn lenient_opt<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Serde helper: truthiness of a JSON flag (`true`, non-zero numbers, non-empty strings).
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(flag) => flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
        Value::Null => false,
    })
}

/// Serde helper: non-negative count that tolerates floats, `null` and garbage.
pub fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(safe_count(Some(&value), ""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixture() -> Value {
        json!({
            "services": {
                "services": [{"name": "auth"}, {"name": "billing"}],
                "owner": null
            },
            "summary": {"total_commits": 250, "ratio": 2.9, "negative": -4},
            "title": "inventory",
            "images": [
                {"name": "api", "packages": ["openssl", "zlib"]},
                {"name": "worker"}
            ],
            "meta": {"length": 99}
        })
    }

    #[test]
    fn test_safe_get_present_value() {
        let data = fixture();
        let name: String = safe_get(Some(&data), "services.services.1.name", String::new());
        assert_eq!(name, "billing");
    }

    #[test]
    fn test_safe_get_absent_at_every_depth_returns_default() {
        let data = fixture();
        for path in [
            "missing",
            "services.missing",
            "services.services.9",
            "services.services.0.missing",
            "summary.total_commits.deeper",
        ] {
            let value: u64 = safe_get(Some(&data), path, 7);
            assert_eq!(value, 7, "path {}", path);
        }
    }

    #[test]
    fn test_safe_get_null_is_treated_as_absent() {
        let data = fixture();
        let owner: String = safe_get(Some(&data), "services.owner", "nobody".to_string());
        assert_eq!(owner, "nobody");
    }

    #[test]
    fn test_safe_get_none_root_returns_default() {
        let value: Vec<String> = safe_get(None, "services.services", vec!["x".to_string()]);
        assert_eq!(value, vec!["x".to_string()]);
    }

    #[test]
    fn test_safe_get_type_mismatch_returns_default() {
        let data = fixture();
        let value: u64 = safe_get(Some(&data), "title", 3);
        assert_eq!(value, 3);
    }

    #[test]
    fn test_safe_get_is_idempotent() {
        let data = fixture();
        let first: u64 = safe_get(Some(&data), "summary.total_commits", 0);
        let second: u64 = safe_get(Some(&data), "summary.total_commits", 0);
        assert_eq!(first, second);
        assert_eq!(data, fixture());
    }

    #[test]
    fn test_lookup_length_of_array_and_string() {
        let data = fixture();
        assert_eq!(safe_count(Some(&data), "images.0.packages.length"), 2);
        assert_eq!(safe_count(Some(&data), "images.1.packages.length"), 0);
        assert_eq!(safe_count(Some(&data), "title.length"), 9);
    }

    #[test]
    fn test_lookup_object_key_named_length_wins() {
        let data = fixture();
        assert_eq!(safe_count(Some(&data), "meta.length"), 99);
    }

    #[test]
    fn test_safe_count_truncates_and_clamps() {
        let data = fixture();
        assert_eq!(safe_count(Some(&data), "summary.ratio"), 2);
        assert_eq!(safe_count(Some(&data), "summary.negative"), 0);
        assert_eq!(safe_count(Some(&data), "title"), 0);
    }

    #[test]
    fn test_safe_len_counts_arrays_and_objects() {
        let data = fixture();
        assert_eq!(safe_len(Some(&data), "services.services"), 2);
        assert_eq!(safe_len(Some(&data), "summary"), 3);
        assert_eq!(safe_len(Some(&data), "title"), 0);
    }

    #[test]
    fn test_safe_list_skips_malformed_elements() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Named {
            name: String,
        }

        let data = json!({"items": [{"name": "a"}, 42, {"name": "b"}, {"other": true}]});
        let items: Vec<Named> = safe_list(Some(&data), "items");
        assert_eq!(
            items,
            vec![
                Named {
                    name: "a".to_string()
                },
                Named {
                    name: "b".to_string()
                }
            ]
        );
    }

    #[test]
    fn test_safe_map_skips_malformed_entries() {
        let data = json!({"dist": {"MIT": 4, "Apache-2.0": "many", "BSD": 1}});
        let dist: BTreeMap<String, u64> = safe_map(Some(&data), "dist");
        assert_eq!(dist.len(), 2);
        assert_eq!(dist["MIT"], 4);
    }

    #[test]
    fn test_coalesce_skips_null_and_absent() {
        let null = Value::Null;
        let found = json!({"a": 1});
        assert_eq!(coalesce([None, Some(&null), Some(&found)]), Some(&found));
        assert_eq!(coalesce([None, Some(&null)]), None);
    }

    #[test]
    fn test_lenient_helpers() {
        #[derive(Deserialize)]
        struct Record {
            #[serde(default, deserialize_with = "lenient_string")]
            id: String,
            #[serde(default, deserialize_with = "lenient_f64")]
            score: f64,
            #[serde(default, deserialize_with = "lenient_count")]
            total: u64,
            #[serde(default, deserialize_with = "null_as_default")]
            tags: Vec<String>,
            #[serde(default, deserialize_with = "lenient_opt")]
            owner: Option<BTreeMap<String, String>>,
        }

        let record: Record = serde_json::from_value(
            json!({"id": 42, "score": "7.5", "total": 3.8, "tags": null, "owner": "team-a"}),
        )
        .unwrap();
        assert_eq!(record.id, "42");
        assert_eq!(record.score, 7.5);
        assert_eq!(record.total, 3);
        assert!(record.tags.is_empty());
        assert!(record.owner.is_none());
    }
}
