use std::collections::{BTreeMap, HashSet};

/// Counts `items` by the key `key_of` returns. Items without a key are skipped.
pub fn group_count<'a, T, F>(items: &'a [T], key_of: F) -> BTreeMap<String, u64>
where
    F: Fn(&'a T) -> Option<&'a str>,
{
    let mut counts = BTreeMap::new();
    for key in items.iter().filter_map(&key_of) {
        *counts.entry(key.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Distinct non-empty keys in first-seen order, prefixed with `"all"`.
pub fn facet_options<'a, T, F>(items: &'a [T], key_of: F) -> Vec<String>
where
    F: Fn(&'a T) -> &'a str,
{
    let mut seen = HashSet::new();
    let mut options = vec![FACET_ALL.to_string()];
    for key in items.iter().map(key_of) {
        if !key.is_empty() && seen.insert(key) {
            options.push(key.to_string());
        }
    }
    options
}

/// Facet value that disables a filter.
pub const FACET_ALL: &str = "all";

/// Count map as `(key, count)` pairs, highest count first. Ties keep key order.
pub fn sorted_by_count_desc(counts: &BTreeMap<String, u64>) -> Vec<(String, u64)> {
    let mut entries: Vec<(String, u64)> = counts
        .iter()
        .map(|(key, count)| (key.clone(), *count))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_count() {
        let items = vec!["npm", "pip", "npm", ""];
        let counts = group_count(&items, |s| Some(*s).filter(|s| !s.is_empty()));
        assert_eq!(counts.get("npm"), Some(&2));
        assert_eq!(counts.get("pip"), Some(&1));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_facet_options_first_seen_order() {
        let items = vec!["Transitive", "Direct", "Transitive", "Dev"];
        assert_eq!(
            facet_options(&items, |s| *s),
            vec!["all", "Transitive", "Direct", "Dev"]
        );
    }

    #[test]
    fn test_facet_options_empty() {
        let items: Vec<&str> = Vec::new();
        assert_eq!(facet_options(&items, |s| *s), vec!["all"]);
    }

    #[test]
    fn test_sorted_by_count_desc_is_stable_on_ties() {
        let counts = BTreeMap::from([
            ("b".to_string(), 2),
            ("a".to_string(), 2),
            ("c".to_string(), 5),
        ]);
        assert_eq!(
            sorted_by_count_desc(&counts),
            vec![
                ("c".to_string(), 5),
                ("a".to_string(), 2),
                ("b".to_string(), 2)
            ]
        );
    }
}
