//! # Search Engines
//!
//! Builds query URLs for the search box.
//!
//! ## Built-in Engines
//!
//! - **Bing** (default)
//! - **Google**
//! - **Baidu**
//! - **Translate** - Baidu Translate, auto-detect to Chinese
//!
//! The query is trimmed and percent-encoded, then appended to the engine's
//! base URL. An empty query produces no URL.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchEngine {
    #[default]
    Bing,
    Google,
    Baidu,
    Translate,
}

impl SearchEngine {
    /// All engines in display order.
    pub fn all() -> &'static [SearchEngine] {
        &[
            SearchEngine::Bing,
            SearchEngine::Google,
            SearchEngine::Baidu,
            SearchEngine::Translate,
        ]
    }

    /// Find an engine by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<SearchEngine> {
        Self::all()
            .iter()
            .copied()
            .find(|e| e.name().eq_ignore_ascii_case(name))
    }

    pub fn name(self) -> &'static str {
        match self {
            SearchEngine::Bing => "bing",
            SearchEngine::Google => "google",
            SearchEngine::Baidu => "baidu",
            SearchEngine::Translate => "translate",
        }
    }

    pub fn base_url(self) -> &'static str {
        match self {
            SearchEngine::Bing => "https://www.bing.com/search?q=",
            SearchEngine::Google => "https://www.google.com/search?q=",
            SearchEngine::Baidu => "https://www.baidu.com/s?wd=",
            SearchEngine::Translate => "https://fanyi.baidu.com/#auto/zh/",
        }
    }

    /// Human-readable label for the engine picker.
    pub fn label(self) -> &'static str {
        match self {
            SearchEngine::Bing => "Bing Search",
            SearchEngine::Google => "Google Search",
            SearchEngine::Baidu => "Baidu Search",
            SearchEngine::Translate => "Baidu Translate",
        }
    }

    /// Placeholder text for the search input.
    pub fn placeholder(self) -> &'static str {
        match self {
            SearchEngine::Translate => "Enter text to translate...",
            _ => "Search...",
        }
    }

    /// Query URL, or `None` if the query is blank.
    pub fn search_url(self, query: &str) -> Option<String> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        Some(format!("{}{}", self.base_url(), urlencoding::encode(query)))
    }
}

impl fmt::Display for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchEngine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::by_name(s).ok_or_else(|| {
            let known: Vec<_> = Self::all().iter().map(|e| e.name()).collect();
            format!("unknown search engine '{}' (expected one of: {})", s, known.join(", "))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_encodes_query() {
        assert_eq!(
            SearchEngine::Google.search_url("rust lang & co").as_deref(),
            Some("https://www.google.com/search?q=rust%20lang%20%26%20co")
        );
        assert_eq!(
            SearchEngine::Translate.search_url("  hello ").as_deref(),
            Some("https://fanyi.baidu.com/#auto/zh/hello")
        );
    }

    #[test]
    fn test_blank_query_has_no_url() {
        assert_eq!(SearchEngine::Bing.search_url("   "), None);
        assert_eq!(SearchEngine::Bing.search_url(""), None);
    }

    #[test]
    fn test_by_name_is_case_insensitive() {
        assert_eq!(SearchEngine::by_name("BAIDU"), Some(SearchEngine::Baidu));
        assert_eq!(SearchEngine::by_name("duckduckgo"), None);
        assert!("yahoo".parse::<SearchEngine>().is_err());
        assert_eq!("google".parse::<SearchEngine>(), Ok(SearchEngine::Google));
    }

    #[test]
    fn test_default_engine() {
        assert_eq!(SearchEngine::default(), SearchEngine::Bing);
        assert_eq!(SearchEngine::Bing.placeholder(), "Search...");
        assert_ne!(SearchEngine::Translate.placeholder(), "Search...");
    }
}
