//! # Start Page
//!
//! [`StartPage`] ties the catalog, the persisted orders and the usage
//! counts together and exposes the calls a front end makes:
//!
//! | Call | Effect |
//! |------|--------|
//! | [`ordered_categories`](StartPage::ordered_categories) / [`ordered_links`](StartPage::ordered_links) | Reconciled order for rendering |
//! | [`frequent_links`](StartPage::frequent_links) | Top links by clicks |
//! | [`record_usage`](StartPage::record_usage) | Count a click |
//! | [`request_reorder`](StartPage::request_reorder) | Save a manual order from a drag |
//! | [`request_reset`](StartPage::request_reset) | Drop a scope's manual order |
//!
//! Mutating calls persist before returning. Front ends re-read the ordered
//! views afterwards; there are no change notifications.

use crate::catalog::{Catalog, Category, Link, Ranked};
use crate::error::{Result, StartPageError};
use crate::ranking::LinkFallback;
use crate::store::{dedup_keys, reconcile, OrderStore, Scope, SlotStore};
use crate::usage::UsageTracker;
use std::collections::HashSet;
use tracing::{debug, info, warn};

pub struct StartPage<S: SlotStore> {
    catalog: Catalog,
    store: OrderStore<S>,
    usage: UsageTracker,
    link_fallback: LinkFallback,
}

impl<S: SlotStore> StartPage<S> {
    /// Build a page over a freshly loaded catalog, loading usage counts from
    /// the store.
    pub fn new(catalog: Catalog, store: S) -> Self {
        let store = OrderStore::new(store);
        let usage = UsageTracker::load(&store);
        Self {
            catalog,
            store,
            usage,
            link_fallback: LinkFallback::default(),
        }
    }

    pub fn with_link_fallback(mut self, link_fallback: LinkFallback) -> Self {
        self.link_fallback = link_fallback;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &OrderStore<S> {
        &self.store
    }

    pub fn usage(&self) -> &UsageTracker {
        &self.usage
    }

    pub fn ordered_categories(&self) -> Vec<&Category> {
        self.store.ordered_categories(&self.catalog.categories)
    }

    pub fn ordered_links(&self, category: &str) -> Result<Vec<&Link>> {
        let category = self.require_category(category)?;
        let counts = self.usage.stats().counts();
        Ok(self
            .store
            .ordered_links(category, self.link_fallback, &counts))
    }

    /// Reconciled keys for a scope: category names or link URLs.
    pub fn ordered_keys(&self, scope: &Scope) -> Result<Vec<String>> {
        match scope {
            Scope::Categories => Ok(keys_of(&self.ordered_categories())),
            Scope::Links(category) => Ok(keys_of(&self.ordered_links(category)?)),
        }
    }

    /// Most clicked links still present in the catalog.
    pub fn frequent_links(&self, limit: usize) -> Vec<&Link> {
        self.usage
            .top_n(limit, |url| self.catalog.contains_link(url))
            .into_iter()
            .filter_map(|url| self.catalog.find_link(url))
            .collect()
    }

    /// Count a click on `url` and persist. Returns the new count.
    pub fn record_usage(&mut self, url: &str) -> Result<u64> {
        if !self.catalog.contains_link(url) {
            debug!(url, "recording usage for a link outside the catalog");
        }
        self.usage.record(url, &mut self.store)
    }

    pub fn clear_usage(&mut self) -> Result<()> {
        self.usage.clear(&mut self.store)
    }

    /// Save a new manual order for a scope.
    ///
    /// Repeated keys keep their first position; keys that are not part of
    /// the scope are dropped. A category order is completed with the
    /// categories it leaves out, so its length always matches the catalog.
    pub fn request_reorder(&mut self, scope: &Scope, keys: &[String]) -> Result<()> {
        let known: HashSet<&str> = match scope {
            Scope::Categories => self.catalog.categories.iter().map(Ranked::key).collect(),
            Scope::Links(category) => self
                .require_category(category)?
                .links
                .iter()
                .map(Ranked::key)
                .collect(),
        };

        let (accepted, dropped): (Vec<String>, Vec<String>) = dedup_keys(keys)
            .into_iter()
            .partition(|k| known.contains(k.as_str()));
        if !dropped.is_empty() {
            warn!(scope = %scope, ?dropped, "ignoring keys outside the scope");
        }

        let accepted = match scope {
            Scope::Categories => keys_of(&reconcile(&accepted, &self.catalog.categories)),
            Scope::Links(_) => accepted,
        };

        self.store.save_manual_order(scope, &accepted)?;
        info!(scope = %scope, items = accepted.len(), "saved manual order");
        Ok(())
    }

    /// Drop the manual order of one scope.
    pub fn request_reset(&mut self, scope: &Scope) -> Result<()> {
        if let Scope::Links(category) = scope {
            self.require_category(category)?;
        }
        self.store.reset_manual_order(scope)?;
        info!(scope = %scope, "reset manual order");
        Ok(())
    }

    pub fn frequent_sites_visible(&self) -> bool {
        self.store.frequent_sites_visible()
    }

    pub fn set_frequent_sites_visible(&mut self, visible: bool) -> Result<()> {
        self.store.set_frequent_sites_visible(visible)
    }

    /// Flip panel visibility, returning the new state.
    pub fn toggle_frequent_sites(&mut self) -> Result<bool> {
        let visible = !self.frequent_sites_visible();
        self.set_frequent_sites_visible(visible)?;
        Ok(visible)
    }

    fn require_category(&self, name: &str) -> Result<&Category> {
        self.catalog
            .category(name)
            .ok_or_else(|| StartPageError::UnknownScope(name.to_string()))
    }
}

fn keys_of<T: Ranked>(items: &[&T]) -> Vec<String> {
    items.iter().map(|i| i.key().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn link(url: &str, weight: i64) -> Link {
        Link {
            url: url.to_string(),
            name: url.to_string(),
            description: String::new(),
            weight,
        }
    }

    fn page() -> StartPage<MemoryStore> {
        let catalog = Catalog::new(vec![
            Category {
                name: "Dev".to_string(),
                weight: 1,
                links: vec![link("gh", 0), link("docs", 2), link("crates", 1)],
            },
            Category {
                name: "News".to_string(),
                weight: 5,
                links: vec![link("hn", 0)],
            },
        ]);
        StartPage::new(catalog, MemoryStore::new())
    }

    fn strings(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_default_orders_use_weight() {
        let page = page();
        assert_eq!(
            page.ordered_keys(&Scope::Categories).unwrap(),
            strings(&["News", "Dev"])
        );
        assert_eq!(
            page.ordered_keys(&Scope::links("Dev")).unwrap(),
            strings(&["docs", "crates", "gh"])
        );
    }

    #[test]
    fn test_reorder_round_trip() {
        let mut page = page();
        let order = strings(&["gh", "crates", "docs"]);
        page.request_reorder(&Scope::links("Dev"), &order).unwrap();
        assert_eq!(page.ordered_keys(&Scope::links("Dev")).unwrap(), order);
    }

    #[test]
    fn test_reorder_drops_foreign_and_repeated_keys() {
        let mut page = page();
        page.request_reorder(&Scope::links("Dev"), &strings(&["gh", "hn", "gh"]))
            .unwrap();
        assert_eq!(
            page.store().load_manual_order(&Scope::links("Dev")).unwrap(),
            Some(strings(&["gh"]))
        );
        assert_eq!(
            page.ordered_keys(&Scope::links("Dev")).unwrap(),
            strings(&["gh", "docs", "crates"])
        );
    }

    #[test]
    fn test_mistyped_category_reorder_still_applies() {
        let mut page = page();
        page.request_reorder(&Scope::Categories, &strings(&["Dev", "Nwes"]))
            .unwrap();

        assert_eq!(
            page.store().load_manual_order(&Scope::Categories).unwrap(),
            Some(strings(&["Dev", "News"]))
        );
        assert_eq!(
            page.ordered_keys(&Scope::Categories).unwrap(),
            strings(&["Dev", "News"])
        );
    }

    #[test]
    fn test_unknown_category_scope() {
        let mut page = page();
        assert!(matches!(
            page.ordered_links("Missing"),
            Err(StartPageError::UnknownScope(_))
        ));
        assert!(page
            .request_reorder(&Scope::links("Missing"), &strings(&["x"]))
            .is_err());
        assert!(page.request_reset(&Scope::links("Missing")).is_err());
    }

    #[test]
    fn test_usage_fallback_policy() {
        let mut page = page().with_link_fallback(LinkFallback::Usage);
        page.record_usage("gh").unwrap();
        assert_eq!(
            page.ordered_keys(&Scope::links("Dev")).unwrap(),
            strings(&["gh", "docs", "crates"])
        );
    }

    #[test]
    fn test_frequent_links_resolve_against_catalog() {
        let mut page = page();
        for _ in 0..3 {
            page.record_usage("removed-link").unwrap();
        }
        page.record_usage("hn").unwrap();
        page.record_usage("docs").unwrap();
        page.record_usage("docs").unwrap();

        let frequent: Vec<_> = page
            .frequent_links(10)
            .iter()
            .map(|l| l.url.clone())
            .collect();
        assert_eq!(frequent, strings(&["docs", "hn"]));
        assert_eq!(page.usage().stats().count("removed-link"), 3);
    }

    #[test]
    fn test_toggle_frequent_sites() {
        let mut page = page();
        assert!(page.frequent_sites_visible());
        assert!(!page.toggle_frequent_sites().unwrap());
        assert!(!page.frequent_sites_visible());
        assert!(page.toggle_frequent_sites().unwrap());
    }
}
