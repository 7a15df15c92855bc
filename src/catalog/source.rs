//! Loading the data source.
//!
//! The only asynchronous step in a session: the catalog is read once before
//! any ordering happens.

use super::Catalog;
use crate::error::{Result, StartPageError};
use std::path::Path;
use tracing::{debug, error};

/// Read and parse the data source file.
///
/// Any failure is reported as [`StartPageError::SourceUnavailable`]; the
/// persisted state is never touched on this path.
pub async fn load_catalog(path: &Path) -> Result<Catalog> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        error!(path = %path.display(), error = %e, "failed to read data source");
        StartPageError::SourceUnavailable(format!("{}: {}", path.display(), e))
    })?;

    let catalog = parse_catalog(&content).map_err(|e| {
        error!(path = %path.display(), error = %e, "failed to parse data source");
        e
    })?;

    debug!(
        path = %path.display(),
        categories = catalog.categories.len(),
        "loaded data source"
    );
    Ok(catalog)
}

/// Parse data source JSON.
pub fn parse_catalog(content: &str) -> Result<Catalog> {
    serde_json::from_str(content).map_err(|e| StartPageError::SourceUnavailable(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog() {
        let json = r#"{
            "categories": [
                {
                    "name": "Dev",
                    "weight": 3,
                    "links": [
                        {"url": "https://github.com", "name": "GitHub", "description": "Code hosting"},
                        {"url": "https://crates.io", "name": "crates.io", "description": "Registry", "weight": 2}
                    ]
                },
                {"name": "News", "links": []}
            ]
        }"#;

        let catalog = parse_catalog(json).unwrap();
        assert_eq!(catalog.categories.len(), 2);
        assert_eq!(catalog.categories[0].weight, 3);
        assert_eq!(catalog.categories[0].links[1].weight, 2);
        assert_eq!(catalog.categories[1].weight, 0);
    }

    #[test]
    fn test_parse_catalog_missing_categories_is_empty() {
        let catalog = parse_catalog("{}").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_parse_catalog_ignores_unknown_fields() {
        let json = r#"{"title": "Home", "categories": [{"name": "A", "icon": "star", "links": []}]}"#;
        let catalog = parse_catalog(json).unwrap();
        assert_eq!(catalog.categories[0].name, "A");
    }

    #[test]
    fn test_parse_catalog_invalid_json() {
        let result = parse_catalog("not json");
        assert!(matches!(result, Err(StartPageError::SourceUnavailable(_))));
    }

    #[tokio::test]
    async fn test_load_catalog_missing_file() {
        let result = load_catalog(Path::new("/nonexistent/data.json")).await;
        assert!(matches!(result, Err(StartPageError::SourceUnavailable(_))));
    }
}
