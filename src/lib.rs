//! Estate agent catalogue: property search, sorting, statistics and a
//! persisted favourites list.

pub mod catalogue;
pub mod config;
pub mod favourites;
pub mod models;
pub mod search;
pub mod security;
pub mod session;

pub use catalogue::{Catalogue, CatalogueSource};
pub use config::Config;
pub use favourites::{Favourites, FavouritesStore};
pub use models::{Property, PropertyId};
pub use search::{filter_properties, property_stats, sort_by_date, sort_by_price, SearchCriteria, SortOrder};
pub use security::sanitize_input;
pub use session::Session;
