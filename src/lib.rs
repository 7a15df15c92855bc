//! Startpage - ordering and ranking core for a personal start page
//!
//! This library decides in which order link categories and links appear,
//! merges manual drag-and-drop orders with weight and click-frequency
//! rankings, and keeps that state in a small slot-based store.

pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod page;
pub mod ranking;
pub mod search;
pub mod store;
pub mod usage;

pub use error::{Result, StartPageError};
pub use page::StartPage;
