//! # Usage Tracking Module
//!
//! This module counts link clicks and surfaces the most frequently used
//! sites.
//!
//! ## Overview
//!
//! Every click on a link increments a per-URL counter which is persisted
//! immediately. The "frequent sites" panel shows the top
//! [`MAX_FREQUENT_SITES`] URLs by count that still exist in the catalog.
//! Counts for links that have since been removed stay in storage and are
//! simply skipped, so they come back if the link reappears.
//!
//! ## Data Format
//!
//! Stored in the `clickStats` slot as a JSON object in first-click order:
//!
//! ```json
//! {
//!   "https://github.com": 42,
//!   "https://docs.rs": 7
//! }
//! ```
//!
//! The object order matters: equal counts rank in the order the URLs were
//! first clicked.

mod tracker;

pub use tracker::{UsageEntry, UsageStats, UsageTracker, MAX_FREQUENT_SITES};
