use crate::models::Property;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Direction of a listing sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Cheapest first
    pub const PRICE_DEFAULT: SortOrder = SortOrder::Asc;
    /// Newest first
    pub const DATE_DEFAULT: SortOrder = SortOrder::Desc;

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            other => anyhow::bail!("Unknown sort order '{}' (expected asc or desc)", other),
        }
    }
}

/// Stable sort by price into a new vector.
pub fn sort_by_price(properties: &[Property], order: SortOrder) -> Vec<Property> {
    let mut sorted = properties.to_vec();
    sorted.sort_by(|a, b| order.apply(a.price.total_cmp(&b.price)));
    sorted
}

/// Stable sort by listing date into a new vector.
///
/// Records whose date does not parse go last in either direction.
pub fn sort_by_date(properties: &[Property], order: SortOrder) -> Vec<Property> {
    let mut keyed: Vec<_> = properties.iter().map(|p| (p.date_added(), p)).collect();
    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => order.apply(a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    keyed.into_iter().map(|(_, p)| p.clone()).collect()
}
