//! Browsing session state: the catalogue, the current criteria and the
//! favourites, wired together the way the view layer drives them.

use crate::catalogue::Catalogue;
use crate::favourites::{Favourites, FavouritesStore};
use crate::models::{Property, PropertyId};
use crate::search::{filter_properties, SearchCriteria};
use tracing::{debug, warn};

pub struct Session<S: FavouritesStore> {
    catalogue: Catalogue,
    criteria: SearchCriteria,
    results: Vec<Property>,
    favourites: Favourites<S>,
}

impl<S: FavouritesStore> Session<S> {
    /// Start a session with empty criteria and favourites restored from `store`.
    pub fn new(catalogue: Catalogue, store: S) -> Self {
        let favourites = Favourites::load(store);
        let results = catalogue.properties().to_vec();
        Self {
            catalogue,
            criteria: SearchCriteria::default(),
            results,
            favourites,
        }
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    /// Replace the criteria and recompute the visible listings before returning.
    pub fn set_criteria(&mut self, criteria: SearchCriteria) -> &[Property] {
        self.criteria = criteria;
        self.refresh()
    }

    /// Back to all-empty criteria and the full catalogue.
    pub fn reset_criteria(&mut self) -> &[Property] {
        self.criteria.reset();
        self.refresh()
    }

    /// Listings matching the current criteria, in catalogue order
    pub fn results(&self) -> &[Property] {
        &self.results
    }

    /// Full record for the details view.
    pub fn view(&self, id: &PropertyId) -> Option<&Property> {
        self.catalogue.get(id)
    }

    pub fn favourites(&self) -> &Favourites<S> {
        &self.favourites
    }

    /// Save the catalogue entry with `id`. Unknown ids are ignored.
    pub fn add_favourite(&mut self, id: &PropertyId) -> bool {
        match self.catalogue.get(id) {
            Some(property) => self.favourites.add(property.clone()),
            None => {
                warn!("Cannot favourite unknown property {}", id);
                false
            }
        }
    }

    pub fn remove_favourite(&mut self, id: &PropertyId) -> bool {
        self.favourites.remove(id)
    }

    pub fn clear_favourites(&mut self) {
        self.favourites.clear();
    }

    pub fn is_favourite(&self, id: &PropertyId) -> bool {
        self.favourites.contains(id)
    }

    fn refresh(&mut self) -> &[Property] {
        // Dates are structured and skip sanitizing; see SearchCriteria::sanitized.
        let criteria = self.criteria.sanitized();
        self.results = filter_properties(self.catalogue.properties(), &criteria);
        debug!("{} of {} properties match", self.results.len(), self.catalogue.len());
        &self.results
    }
}
