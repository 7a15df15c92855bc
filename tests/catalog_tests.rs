//! Data source loading tests
//!
//! Tests for reading the catalog from disk and for keeping persisted state
//! untouched when the data source is unavailable.

use startpage::catalog::load_catalog;
use startpage::store::{FileStore, Scope, Slot, SlotStore};
use startpage::{StartPage, StartPageError};
use std::fs;
use tempfile::TempDir;

#[tokio::test]
async fn test_load_catalog_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let data_path = temp_dir.path().join("data.json");
    fs::write(
        &data_path,
        r#"{"categories": [{"name": "Dev", "weight": 2, "links": [{"url": "https://github.com", "name": "GitHub", "description": "Code"}]}]}"#,
    )
    .unwrap();

    let catalog = load_catalog(&data_path).await.unwrap();
    assert_eq!(catalog.categories.len(), 1);
    assert_eq!(catalog.categories[0].links[0].domain(), "github.com");
}

#[tokio::test]
async fn test_load_catalog_invalid_json() {
    let temp_dir = TempDir::new().unwrap();
    let data_path = temp_dir.path().join("data.json");
    fs::write(&data_path, "<html>404</html>").unwrap();

    let result = load_catalog(&data_path).await;
    assert!(matches!(result, Err(StartPageError::SourceUnavailable(_))));
}

#[tokio::test]
async fn test_missing_source_leaves_state_alone() {
    let temp_dir = TempDir::new().unwrap();
    let state_dir = temp_dir.path().join("state");
    let data_path = temp_dir.path().join("data.json");
    fs::write(
        &data_path,
        r#"{"categories": [{"name": "A", "links": []}, {"name": "B", "links": []}]}"#,
    )
    .unwrap();

    {
        let catalog = load_catalog(&data_path).await.unwrap();
        let mut page = StartPage::new(catalog, FileStore::open(&state_dir).unwrap());
        page.request_reorder(&Scope::Categories, &["B".to_string(), "A".to_string()])
            .unwrap();
    }

    fs::remove_file(&data_path).unwrap();
    assert!(load_catalog(&data_path).await.is_err());

    let store = FileStore::open(&state_dir).unwrap();
    let saved: Option<Vec<String>> = store.get(Slot::CategoriesOrder).unwrap();
    assert_eq!(saved, Some(vec!["B".to_string(), "A".to_string()]));
}

#[tokio::test]
async fn test_empty_catalog_renders_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let data_path = temp_dir.path().join("data.json");
    fs::write(&data_path, r#"{"categories": []}"#).unwrap();

    let catalog = load_catalog(&data_path).await.unwrap();
    let page = StartPage::new(catalog, FileStore::open(temp_dir.path()).unwrap());
    assert!(page.ordered_categories().is_empty());
    assert!(page.frequent_links(10).is_empty());
}
