//! # Usage Storage
//!
//! In-memory click counts plus the tracker that keeps them in step with the
//! `clickStats` slot.

use crate::error::Result;
use crate::ranking;
use crate::store::{OrderStore, SlotStore};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use tracing::{info, warn};

/// Maximum number of frequently used sites to display
pub const MAX_FREQUENT_SITES: usize = 10;

/// Click count for a single URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageEntry {
    pub url: String,
    pub count: u64,
}

/// Click counts keyed by URL, kept in first-click order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageStats {
    entries: Vec<UsageEntry>,
}

impl UsageStats {
    /// Record one click, returning the new count.
    pub fn record(&mut self, url: &str) -> u64 {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.url == url) {
            entry.count = entry.count.saturating_add(1);
            return entry.count;
        }

        self.entries.push(UsageEntry {
            url: url.to_string(),
            count: 1,
        });
        1
    }

    pub fn count(&self, url: &str) -> u64 {
        self.entries
            .iter()
            .find(|e| e.url == url)
            .map_or(0, |e| e.count)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.url.as_str())
    }

    /// Counts as a lookup table for the ranking functions.
    pub fn counts(&self) -> HashMap<&str, u64> {
        self.entries
            .iter()
            .map(|e| (e.url.as_str(), e.count))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Up to `limit` URLs by descending count, restricted to URLs for which
    /// `is_known` holds. Equal counts keep first-click order.
    pub fn top_n<F>(&self, limit: usize, is_known: F) -> Vec<&str>
    where
        F: Fn(&str) -> bool,
    {
        let known = self
            .entries
            .iter()
            .filter(|e| is_known(e.url.as_str()))
            .map(|e| (e.url.as_str(), e.count));
        ranking::top_by_count(known, limit)
    }
}

impl Serialize for UsageStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.url, &entry.count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for UsageStats {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct StatsVisitor;

        impl<'de> Visitor<'de> for StatsVisitor {
            type Value = UsageStats;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of URL to click count")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<UsageStats, A::Error> {
                let mut stats = UsageStats::default();
                while let Some((url, count)) = access.next_entry::<String, u64>()? {
                    // A repeated key overwrites in place, like a JSON object would
                    match stats.entries.iter_mut().find(|e| e.url == url) {
                        Some(entry) => entry.count = count,
                        None => stats.entries.push(UsageEntry { url, count }),
                    }
                }
                Ok(stats)
            }
        }

        deserializer.deserialize_map(StatsVisitor)
    }
}

/// Keeps click counts in memory and writes them through on every change
#[derive(Debug, Default)]
pub struct UsageTracker {
    stats: UsageStats,
}

impl UsageTracker {
    /// Load persisted counts. An unreadable slot starts an empty tracker.
    pub fn load<S: SlotStore>(store: &OrderStore<S>) -> Self {
        let stats = store.load_usage_stats().unwrap_or_else(|e| {
            warn!(error = %e, "starting with empty usage stats");
            UsageStats::default()
        });
        Self { stats }
    }

    /// Record a click and save to the store
    pub fn record<S: SlotStore>(&mut self, url: &str, store: &mut OrderStore<S>) -> Result<u64> {
        let count = self.stats.record(url);
        store.save_usage_stats(&self.stats)?;
        Ok(count)
    }

    /// Forget every count and save the empty map
    pub fn clear<S: SlotStore>(&mut self, store: &mut OrderStore<S>) -> Result<()> {
        self.stats.clear();
        store.save_usage_stats(&self.stats)?;
        info!("cleared usage stats");
        Ok(())
    }

    pub fn top_n<F>(&self, limit: usize, is_known: F) -> Vec<&str>
    where
        F: Fn(&str) -> bool,
    {
        self.stats.top_n(limit, is_known)
    }

    pub fn stats(&self) -> &UsageStats {
        &self.stats
    }

    /// Check if there are any recorded usages
    pub fn has_usage_data(&self) -> bool {
        !self.stats.is_empty()
    }
}
