//! Named slots and the key-value interface behind them.

use crate::error::{Result, StartPageError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// A named piece of persisted state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// URL -> click count
    ClickStats,
    /// Manual category order (list of names)
    CategoriesOrder,
    /// Category name -> manual link order (list of URLs)
    CustomOrder,
    /// Whether the frequent-sites panel is shown
    FrequentSitesVisible,
}

impl Slot {
    pub const ALL: [Slot; 4] = [
        Slot::ClickStats,
        Slot::CategoriesOrder,
        Slot::CustomOrder,
        Slot::FrequentSitesVisible,
    ];

    /// Storage key, compatible with the browser page's local storage keys.
    pub fn key(self) -> &'static str {
        match self {
            Slot::ClickStats => "clickStats",
            Slot::CategoriesOrder => "categoriesOrder",
            Slot::CustomOrder => "customOrder",
            Slot::FrequentSitesVisible => "frequentSitesVisible",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Raw string storage addressed by [`Slot`].
///
/// Implementations only move strings around; typed access and parse
/// failures are handled by [`get`](SlotStore::get) and
/// [`set`](SlotStore::set).
pub trait SlotStore {
    fn read(&self, slot: Slot) -> Result<Option<String>>;
    fn write(&mut self, slot: Slot, value: String) -> Result<()>;
    fn remove(&mut self, slot: Slot) -> Result<()>;

    /// Read and parse a slot. A value that does not parse yields
    /// [`StartPageError::CorruptSlot`].
    fn get<T: DeserializeOwned>(&self, slot: Slot) -> Result<Option<T>>
    where
        Self: Sized,
    {
        match self.read(slot)? {
            None => Ok(None),
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StartPageError::CorruptSlot { slot, source }),
        }
    }

    /// Serialize and write a slot.
    fn set<T: Serialize + ?Sized>(&mut self, slot: Slot, value: &T) -> Result<()>
    where
        Self: Sized,
    {
        let raw = serde_json::to_string(value)
            .map_err(|source| StartPageError::Serialize { slot, source })?;
        self.write(slot, raw)
    }
}

/// In-process store, used by tests and as a scratch backend.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<Slot, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotStore for MemoryStore {
    fn read(&self, slot: Slot) -> Result<Option<String>> {
        Ok(self.values.get(&slot).cloned())
    }

    fn write(&mut self, slot: Slot, value: String) -> Result<()> {
        self.values.insert(slot, value);
        Ok(())
    }

    fn remove(&mut self, slot: Slot) -> Result<()> {
        self.values.remove(&slot);
        Ok(())
    }
}
