use crate::models::Property;
use serde::{Deserialize, Serialize};

/// Summary figures for a list of properties
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyStats {
    pub count: usize,
    pub average_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub average_bedrooms: f64,
}

/// Count, price range and averages. Every figure is zero for an empty list.
pub fn property_stats(properties: &[Property]) -> PropertyStats {
    if properties.is_empty() {
        return PropertyStats::default();
    }

    let count = properties.len();
    let total_price: f64 = properties.iter().map(|p| p.price).sum();
    let total_bedrooms: f64 = properties.iter().map(|p| f64::from(p.bedrooms)).sum();
    let min_price = properties.iter().map(|p| p.price).fold(f64::INFINITY, f64::min);
    let max_price = properties.iter().map(|p| p.price).fold(f64::NEG_INFINITY, f64::max);

    PropertyStats {
        count,
        average_price: total_price / count as f64,
        min_price,
        max_price,
        average_bedrooms: total_bedrooms / count as f64,
    }
}
