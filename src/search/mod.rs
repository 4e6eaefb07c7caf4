mod form;
pub mod parse;
pub mod sort;
pub mod stats;

pub use sort::{sort_by_date, sort_by_price, SortOrder};
pub use stats::{property_stats, PropertyStats};

use crate::models::Property;
use crate::security::Sanitize;
use chrono::NaiveDate;
use parse::{parse_integer_prefix, parse_number_prefix};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Search criteria as entered by the user.
///
/// Text fields hold raw form input; an empty string means the dimension is
/// unconstrained. Date bounds are already structured values. Deserializing is
/// lenient: numbers are read as text, and blank or unreadable dates are unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchCriteria {
    /// Exact property type, e.g. "house"
    #[serde(rename = "type", deserialize_with = "form::text")]
    pub property_type: String,
    #[serde(deserialize_with = "form::text")]
    pub min_price: String,
    #[serde(deserialize_with = "form::text")]
    pub max_price: String,
    #[serde(deserialize_with = "form::text")]
    pub min_bedrooms: String,
    #[serde(deserialize_with = "form::text")]
    pub max_bedrooms: String,
    /// Inclusive lower bound on the listing date
    #[serde(deserialize_with = "form::date")]
    pub date_added_from: Option<NaiveDate>,
    /// Inclusive upper bound on the listing date
    #[serde(deserialize_with = "form::date")]
    pub date_added_to: Option<NaiveDate>,
    /// Prefix of the outward code, e.g. "BR" or "BR1"
    #[serde(deserialize_with = "form::text")]
    pub postcode: String,
}

impl SearchCriteria {
    /// Clear every field back to "no constraint".
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether any field is set.
    pub fn has_active_filters(&self) -> bool {
        !self.property_type.is_empty()
            || !self.min_price.is_empty()
            || !self.max_price.is_empty()
            || !self.min_bedrooms.is_empty()
            || !self.max_bedrooms.is_empty()
            || self.date_added_from.is_some()
            || self.date_added_to.is_some()
            || !self.postcode.is_empty()
    }

    /// Copy with every text field HTML-encoded. Date bounds are structured
    /// values and are passed through untouched.
    pub fn sanitized(&self) -> SearchCriteria {
        SearchCriteria {
            property_type: self.property_type.clone().sanitize(),
            min_price: self.min_price.clone().sanitize(),
            max_price: self.max_price.clone().sanitize(),
            min_bedrooms: self.min_bedrooms.clone().sanitize(),
            max_bedrooms: self.max_bedrooms.clone().sanitize(),
            date_added_from: self.date_added_from.sanitize(),
            date_added_to: self.date_added_to.sanitize(),
            postcode: self.postcode.clone().sanitize(),
        }
    }

    fn constraints(&self) -> Constraints<'_> {
        let postcode = if self.postcode.is_empty() {
            None
        } else {
            Some(self.postcode.trim().to_uppercase())
        };

        Constraints {
            property_type: Some(self.property_type.as_str()).filter(|t| !t.is_empty()),
            min_price: parse_number_prefix(&self.min_price),
            max_price: parse_number_prefix(&self.max_price),
            min_bedrooms: parse_integer_prefix(&self.min_bedrooms),
            max_bedrooms: parse_integer_prefix(&self.max_bedrooms),
            date_from: self.date_added_from,
            date_to: self.date_added_to,
            postcode,
        }
    }
}

/// Criteria after parsing. `None` means the constraint is not applied.
#[derive(Debug)]
struct Constraints<'a> {
    property_type: Option<&'a str>,
    min_price: Option<f64>,
    max_price: Option<f64>,
    min_bedrooms: Option<i64>,
    max_bedrooms: Option<i64>,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
    postcode: Option<String>,
}

impl Constraints<'_> {
    fn matches(&self, property: &Property) -> bool {
        if let Some(t) = self.property_type {
            if property.property_type != t {
                return false;
            }
        }

        if let Some(min) = self.min_price {
            if property.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if property.price > max {
                return false;
            }
        }

        let bedrooms = i64::from(property.bedrooms);
        if let Some(min) = self.min_bedrooms {
            if bedrooms < min {
                return false;
            }
        }
        if let Some(max) = self.max_bedrooms {
            if bedrooms > max {
                return false;
            }
        }

        // A listing date that does not parse cannot violate a bound.
        if self.date_from.is_some() || self.date_to.is_some() {
            if let Some(added) = property.date_added() {
                if self.date_from.is_some_and(|from| added < from) {
                    return false;
                }
                if self.date_to.is_some_and(|to| added > to) {
                    return false;
                }
            }
        }

        if let Some(prefix) = &self.postcode {
            if !property.outward_code().starts_with(prefix.as_str()) {
                return false;
            }
        }

        true
    }
}

/// Keep the properties that satisfy every active constraint in `criteria`.
///
/// Catalogue order is preserved and neither argument is modified.
pub fn filter_properties(properties: &[Property], criteria: &SearchCriteria) -> Vec<Property> {
    let constraints = criteria.constraints();
    debug!("Filtering {} properties with {:?}", properties.len(), constraints);

    properties
        .iter()
        .filter(|p| constraints.matches(p))
        .cloned()
        .collect()
}
