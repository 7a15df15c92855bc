//! # Order Store
//!
//! Persists manual orders and usage counts, and reconciles persisted orders
//! against the current catalog every time a scope is rendered.
//!
//! ## Reconciliation
//!
//! Categories and links follow different policies:
//!
//! - **Categories**: a persisted order whose length differs from the current
//!   category count is discarded and the whole list is weight-ranked.
//! - **Links**: the persisted URLs are walked in order, each one pulling its
//!   link out of the current set. Unknown URLs are dropped and links that
//!   were never arranged are appended, weight-sorted, after the matched ones.
//!
//! Either way the result is a permutation of the current item set.

use super::slot::{Slot, SlotStore};
use crate::catalog::{Category, Link, Ranked};
use crate::error::{Result, StartPageError};
use crate::ranking::{self, LinkFallback};
use crate::usage::UsageStats;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::{debug, warn};

/// Literal scope name for the category list
pub const CATEGORIES_SCOPE: &str = "categories";

/// A unit of ordering
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// The category list as a whole
    Categories,
    /// The links of one category, by category name
    Links(String),
}

impl Scope {
    pub fn links(category: impl Into<String>) -> Self {
        Scope::Links(category.into())
    }
}

impl From<&str> for Scope {
    fn from(name: &str) -> Self {
        if name == CATEGORIES_SCOPE {
            Scope::Categories
        } else {
            Scope::Links(name.to_string())
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Categories => f.write_str(CATEGORIES_SCOPE),
            Scope::Links(name) => f.write_str(name),
        }
    }
}

/// Drop repeated keys, keeping the first occurrence.
pub fn dedup_keys(keys: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    keys.iter()
        .filter(|k| seen.insert(k.as_str()))
        .cloned()
        .collect()
}

/// Merge a persisted key sequence with the current items.
///
/// Items are taken in persisted order; unknown keys are skipped and the
/// leftover items follow, sorted by weight.
pub fn reconcile<'a, T: Ranked>(persisted: &[String], items: &'a [T]) -> Vec<&'a T> {
    let mut remaining: Vec<&T> = items.iter().collect();
    let mut ordered = Vec::with_capacity(items.len());

    for key in persisted {
        if let Some(pos) = remaining.iter().position(|item| item.key() == key) {
            ordered.push(remaining.remove(pos));
        }
    }

    ranking::sort_by_weight(&mut remaining);
    ordered.extend(remaining);
    ordered
}

/// Category policy: the persisted order only applies when its length
/// matches the current category count.
pub fn reconcile_categories<'a>(
    persisted: Option<&[String]>,
    categories: &'a [Category],
) -> Vec<&'a Category> {
    match persisted {
        Some(order) if order.len() == categories.len() => reconcile(order, categories),
        Some(order) => {
            debug!(
                saved = order.len(),
                current = categories.len(),
                "category count changed, discarding saved order"
            );
            ranking::rank_by_weight(categories)
        }
        None => ranking::rank_by_weight(categories),
    }
}

/// Link policy: merge when a persisted order exists, otherwise rank.
pub fn reconcile_links<'a>(
    persisted: Option<&[String]>,
    links: &'a [Link],
    fallback: LinkFallback,
    counts: &HashMap<&str, u64>,
) -> Vec<&'a Link> {
    match persisted {
        Some(order) => reconcile(order, links),
        None => ranking::rank_links(links, fallback, counts),
    }
}

/// Persistence for manual orders, usage counts and the panel flag.
#[derive(Debug)]
pub struct OrderStore<S: SlotStore> {
    store: S,
}

impl<S: SlotStore> OrderStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Saved order for a scope, if any.
    pub fn load_manual_order(&self, scope: &Scope) -> Result<Option<Vec<String>>> {
        match scope {
            Scope::Categories => self.store.get(Slot::CategoriesOrder),
            Scope::Links(category) => {
                let Some(orders) = self.load_link_orders()? else {
                    return Ok(None);
                };
                match orders.get(category) {
                    None => Ok(None),
                    Some(value) => Vec::<String>::deserialize(value)
                        .map(Some)
                        .map_err(|source| StartPageError::CorruptSlot {
                            slot: Slot::CustomOrder,
                            source,
                        }),
                }
            }
        }
    }

    /// Persist a manual order. Repeated keys are collapsed.
    pub fn save_manual_order(&mut self, scope: &Scope, keys: &[String]) -> Result<()> {
        let keys = dedup_keys(keys);
        match scope {
            Scope::Categories => self.store.set(Slot::CategoriesOrder, &keys),
            Scope::Links(category) => {
                let mut orders = self.load_link_orders_or_empty();
                orders.insert(category.clone(), Value::from(keys));
                self.store.set(Slot::CustomOrder, &orders)
            }
        }
    }

    /// Forget the manual order of one scope, leaving every other scope as is.
    pub fn reset_manual_order(&mut self, scope: &Scope) -> Result<()> {
        match scope {
            Scope::Categories => self.store.remove(Slot::CategoriesOrder),
            Scope::Links(category) => {
                let mut orders = self.load_link_orders_or_empty();
                orders.remove(category);
                self.store.set(Slot::CustomOrder, &orders)
            }
        }
    }

    pub fn load_usage_stats(&self) -> Result<UsageStats> {
        Ok(self.store.get(Slot::ClickStats)?.unwrap_or_default())
    }

    pub fn save_usage_stats(&mut self, stats: &UsageStats) -> Result<()> {
        self.store.set(Slot::ClickStats, stats)
    }

    /// Panel visibility; shown unless explicitly hidden.
    pub fn frequent_sites_visible(&self) -> bool {
        match self.store.get(Slot::FrequentSitesVisible) {
            Ok(visible) => visible.unwrap_or(true),
            Err(e) => {
                warn!(error = %e, "ignoring unreadable panel visibility");
                true
            }
        }
    }

    pub fn set_frequent_sites_visible(&mut self, visible: bool) -> Result<()> {
        self.store.set(Slot::FrequentSitesVisible, &visible)
    }

    /// Current category order after reconciliation.
    pub fn ordered_categories<'a>(&self, categories: &'a [Category]) -> Vec<&'a Category> {
        let saved = self.manual_order_or_absent(&Scope::Categories);
        reconcile_categories(saved.as_deref(), categories)
    }

    /// Current link order of one category after reconciliation.
    pub fn ordered_links<'a>(
        &self,
        category: &'a Category,
        fallback: LinkFallback,
        counts: &HashMap<&str, u64>,
    ) -> Vec<&'a Link> {
        let saved = self.manual_order_or_absent(&Scope::links(category.name.as_str()));
        reconcile_links(saved.as_deref(), &category.links, fallback, counts)
    }

    /// Rendering path: an unreadable order counts as no order.
    fn manual_order_or_absent(&self, scope: &Scope) -> Option<Vec<String>> {
        match self.load_manual_order(scope) {
            Ok(order) => order,
            Err(e) => {
                warn!(scope = %scope, error = %e, "falling back to ranked order");
                None
            }
        }
    }

    fn load_link_orders(&self) -> Result<Option<Map<String, Value>>> {
        self.store.get(Slot::CustomOrder)
    }

    fn load_link_orders_or_empty(&self) -> Map<String, Value> {
        match self.load_link_orders() {
            Ok(orders) => orders.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "replacing unreadable link orders");
                Map::new()
            }
        }
    }
}
