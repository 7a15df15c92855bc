//! # Ranking Engine
//!
//! Pure ordering functions. Nothing here touches storage; the
//! [`OrderStore`](crate::store::OrderStore) decides *when* a computed
//! ranking is used instead of a manual order.
//!
//! All sorts are stable. Items that tie keep the relative order they had
//! in the input, which for catalog items is the data source order, so ties
//! never shuffle between reloads.

use crate::catalog::Ranked;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How a link list is ordered when the user has not arranged it by hand
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkFallback {
    /// Declared weight, descending
    #[default]
    Weight,
    /// Click count descending, then declared weight descending
    Usage,
}

/// Sort items by declared weight, highest first.
pub fn rank_by_weight<T: Ranked>(items: &[T]) -> Vec<&T> {
    let mut ranked: Vec<&T> = items.iter().collect();
    sort_by_weight(&mut ranked);
    ranked
}

/// In-place stable weight sort over already-borrowed items.
pub fn sort_by_weight<T: Ranked>(items: &mut [&T]) {
    items.sort_by(|a, b| b.weight().cmp(&a.weight()));
}

/// Sort items by usage count, falling back to weight on equal counts.
///
/// Items without a count are treated as zero.
pub fn rank_by_usage<'a, T: Ranked>(items: &'a [T], counts: &HashMap<&str, u64>) -> Vec<&'a T> {
    let count = |item: &T| counts.get(item.key()).copied().unwrap_or(0);
    let mut ranked: Vec<&T> = items.iter().collect();
    ranked.sort_by(|a, b| {
        count(*b)
            .cmp(&count(*a))
            .then_with(|| b.weight().cmp(&a.weight()))
    });
    ranked
}

/// Apply a link fallback policy.
pub fn rank_links<'a, T: Ranked>(
    items: &'a [T],
    policy: LinkFallback,
    counts: &HashMap<&str, u64>,
) -> Vec<&'a T> {
    match policy {
        LinkFallback::Weight => rank_by_weight(items),
        LinkFallback::Usage => rank_by_usage(items, counts),
    }
}

/// Top `limit` keys by count, descending.
///
/// `entries` must be in first-recorded order; equal counts keep that order.
pub fn top_by_count<'a, I>(entries: I, limit: usize) -> Vec<&'a str>
where
    I: IntoIterator<Item = (&'a str, u64)>,
{
    let mut ranked: Vec<(&str, u64)> = entries.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.into_iter().take(limit).map(|(key, _)| key).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item(&'static str, i64);

    impl Ranked for Item {
        fn key(&self) -> &str {
            self.0
        }
        fn weight(&self) -> i64 {
            self.1
        }
    }

    fn keys<T: Ranked>(items: &[&T]) -> Vec<String> {
        items.iter().map(|i| i.key().to_string()).collect()
    }

    #[test]
    fn test_rank_by_weight_descending() {
        let items = vec![Item("a", 1), Item("b", 5), Item("c", 3)];
        assert_eq!(keys(&rank_by_weight(&items)), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_rank_by_weight_is_stable_on_ties() {
        let items = vec![
            Item("a", 0),
            Item("b", 2),
            Item("c", 0),
            Item("d", 2),
            Item("e", 0),
        ];
        assert_eq!(keys(&rank_by_weight(&items)), vec!["b", "d", "a", "c", "e"]);
    }

    #[test]
    fn test_rank_by_weight_is_permutation_and_idempotent() {
        let items = vec![Item("x", -1), Item("y", 0), Item("z", 7), Item("w", 0)];
        let first = keys(&rank_by_weight(&items));
        let second = keys(&rank_by_weight(&items));
        assert_eq!(first, second);

        let mut sorted = first.clone();
        sorted.sort();
        assert_eq!(sorted, vec!["w", "x", "y", "z"]);
    }

    #[test]
    fn test_rank_by_weight_empty() {
        let items: Vec<Item> = Vec::new();
        assert!(rank_by_weight(&items).is_empty());
    }

    #[test]
    fn test_rank_by_usage_then_weight() {
        let items = vec![Item("a", 9), Item("b", 0), Item("c", 1), Item("d", 0)];
        let counts = HashMap::from([("b", 4), ("d", 4), ("c", 1)]);
        assert_eq!(
            keys(&rank_by_usage(&items, &counts)),
            vec!["b", "d", "c", "a"]
        );
    }

    #[test]
    fn test_rank_links_policy() {
        let items = vec![Item("a", 2), Item("b", 1)];
        let counts = HashMap::from([("b", 3)]);
        assert_eq!(
            keys(&rank_links(&items, LinkFallback::Weight, &counts)),
            vec!["a", "b"]
        );
        assert_eq!(
            keys(&rank_links(&items, LinkFallback::Usage, &counts)),
            vec!["b", "a"]
        );
    }

    #[test]
    fn test_top_by_count_keeps_first_recorded_order_on_ties() {
        let entries = vec![("a", 5), ("b", 5), ("c", 1)];
        assert_eq!(top_by_count(entries.clone(), 2), vec!["a", "b"]);
        assert_eq!(top_by_count(entries, 10), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_top_by_count_limit_zero() {
        assert!(top_by_count(vec![("a", 1)], 0).is_empty());
    }

    #[test]
    fn test_link_fallback_serde() {
        let policy: LinkFallback = serde_json::from_str("\"usage\"").unwrap();
        assert_eq!(policy, LinkFallback::Usage);
        assert_eq!(serde_json::to_string(&LinkFallback::Weight).unwrap(), "\"weight\"");
    }
}
