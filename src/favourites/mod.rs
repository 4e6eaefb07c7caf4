pub mod store;

pub use store::{FavouritesStore, LocalStorageFile, MemoryStore, StoreError, FAVOURITES_KEY};

use crate::models::{Property, PropertyId};
use std::collections::HashSet;
use tracing::{debug, error, info, warn};

/// The user's saved properties, unique by id, in the order they were added.
///
/// Every change is written through to the backing store. A failed write is
/// logged and the in-memory list stays authoritative.
#[derive(Debug)]
pub struct Favourites<S: FavouritesStore> {
    items: Vec<Property>,
    store: S,
}

impl<S: FavouritesStore> Favourites<S> {
    /// Restore the saved list from `store`.
    ///
    /// Missing or unreadable data gives an empty list.
    pub fn load(store: S) -> Self {
        let items = match store.load() {
            Ok(Some(saved)) => dedup_by_id(saved),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Could not load favourites, starting empty: {}", e);
                Vec::new()
            }
        };
        info!("Loaded {} favourites", items.len());

        Self { items, store }
    }

    /// Add `property` unless one with the same id is already saved.
    ///
    /// Returns `true` if the list changed.
    pub fn add(&mut self, property: Property) -> bool {
        if self.contains(&property.id) {
            debug!("Property {} is already a favourite", property.id);
            return false;
        }
        debug!("Adding property {} to favourites", property.id);
        self.items.push(property);
        self.persist();
        true
    }

    /// Remove the property with `id`. Unknown ids are ignored.
    ///
    /// Returns `true` if the list changed.
    pub fn remove(&mut self, id: &PropertyId) -> bool {
        let before = self.items.len();
        self.items.retain(|p| &p.id != id);
        if self.items.len() == before {
            debug!("Property {} is not a favourite", id);
            return false;
        }
        debug!("Removed property {} from favourites", id);
        self.persist();
        true
    }

    /// Empty the list.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
        info!("Cleared favourites");
    }

    pub fn contains(&self, id: &PropertyId) -> bool {
        self.items.iter().any(|p| &p.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Property> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Property] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.items) {
            error!("Failed to save favourites: {}", e);
        }
    }
}

impl<'a, S: FavouritesStore> IntoIterator for &'a Favourites<S> {
    type Item = &'a Property;
    type IntoIter = std::slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Keep the first occurrence of each id.
fn dedup_by_id(saved: Vec<Property>) -> Vec<Property> {
    let mut seen = HashSet::new();
    let total = saved.len();
    let unique: Vec<Property> = saved
        .into_iter()
        .filter(|p| seen.insert(p.id.clone()))
        .collect();
    if unique.len() != total {
        warn!("Dropped {} duplicate saved favourites", total - unique.len());
    }
    unique
}
