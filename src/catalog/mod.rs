//! # Catalog Module
//!
//! The authoritative item set: categories of links as declared by the data
//! source. The catalog is read-only for the rest of the session; every
//! ordering decision is reconciled against it.
//!
//! ## Data Format
//!
//! ```json
//! {
//!   "categories": [
//!     {
//!       "name": "Dev",
//!       "weight": 10,
//!       "links": [
//!         { "url": "https://github.com", "name": "GitHub", "description": "Code", "weight": 5 }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! `weight` is optional everywhere; a missing or `null` weight counts as `0`.

mod source;

pub use source::{load_catalog, parse_catalog};

use serde::{Deserialize, Deserializer, Serialize};

/// Anything that takes part in ordering: has a stable key and a declared weight.
pub trait Ranked {
    /// Stable identity (category name or link URL).
    fn key(&self) -> &str;
    /// Static priority; higher sorts first.
    fn weight(&self) -> i64;
}

/// A single link inside a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "weight_or_zero")]
    pub weight: i64,
}

impl Link {
    /// Hostname without a leading `www.`, or `"default"` when the URL does
    /// not parse.
    pub fn domain(&self) -> String {
        domain_of(&self.url)
    }
}

impl Ranked for Link {
    fn key(&self) -> &str {
        &self.url
    }

    fn weight(&self) -> i64 {
        self.weight
    }
}

/// A named group of links
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default, deserialize_with = "weight_or_zero")]
    pub weight: i64,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Ranked for Category {
    fn key(&self) -> &str {
        &self.name
    }

    fn weight(&self) -> i64 {
        self.weight
    }
}

fn weight_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(0))
}

/// The full data source as fetched at startup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Catalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// First link with this URL, searching categories in source order.
    pub fn find_link(&self, url: &str) -> Option<&Link> {
        self.categories
            .iter()
            .flat_map(|c| c.links.iter())
            .find(|l| l.url == url)
    }

    pub fn contains_link(&self, url: &str) -> bool {
        self.find_link(url).is_some()
    }
}

/// Extract a display domain from a URL
///
/// Examples:
///   - `https://www.example.com/path` -> `example.com`
///   - `https://docs.rs` -> `docs.rs`
///   - `not a url` -> `default`
pub fn domain_of(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.replacen("www.", "", 1)))
        .unwrap_or_else(|| "default".to_string())
}
