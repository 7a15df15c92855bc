//! # Store Module
//!
//! Persisted state for the start page, addressed by named [`Slot`]s.
//!
//! ## Layers
//!
//! - [`SlotStore`] - raw string storage per slot, with typed `get`/`set`
//! - [`MemoryStore`] / [`FileStore`] - the two backends
//! - [`OrderStore`] - manual orders, usage counts and reconciliation against
//!   the current catalog

mod file;
mod order;
mod slot;

pub use file::{default_state_dir, FileStore};
pub use order::{
    dedup_keys, reconcile, reconcile_categories, reconcile_links, OrderStore, Scope,
    CATEGORIES_SCOPE,
};
pub use slot::{MemoryStore, Slot, SlotStore};
