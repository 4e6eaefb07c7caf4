use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a catalogue record.
///
/// The bundled catalogue uses integers, but string keys are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyId {
    Number(u64),
    Text(String),
}

impl PropertyId {
    /// Parse an id typed by a user: digits become `Number`, anything else `Text`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.parse::<u64>() {
            Ok(n) => PropertyId::Number(n),
            Err(_) => PropertyId::Text(raw.to_string()),
        }
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyId::Number(n) => write!(f, "{}", n),
            PropertyId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for PropertyId {
    fn from(n: u64) -> Self {
        PropertyId::Number(n)
    }
}

impl From<&str> for PropertyId {
    fn from(s: &str) -> Self {
        PropertyId::Text(s.to_string())
    }
}

/// Core property data model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: PropertyId,
    /// house, flat, apartment, bungalow, ...
    #[serde(rename = "type")]
    pub property_type: String,
    pub price: f64,
    pub bedrooms: u32,
    #[serde(default)]
    pub bathrooms: u32,
    /// Floor area in square feet
    #[serde(default)]
    pub size: f64,
    #[serde(default)]
    pub location: String,
    pub postcode: String,
    /// Calendar date as stored in the catalogue, see [`Property::date_added`]
    #[serde(default)]
    pub date_added: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub full_description: String,
    #[serde(default)]
    pub floor_plan: String,
}

impl Property {
    /// Area part of the postcode ("BR1" for "BR1 3QD"), upper-cased.
    pub fn outward_code(&self) -> String {
        outward_code(&self.postcode)
    }

    /// The listing date, if it parses as `YYYY-MM-DD` or an RFC 3339 timestamp.
    pub fn date_added(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.date_added)
    }

    /// Address text handed to the map collaborator.
    pub fn map_address(&self) -> String {
        format!("{}, {}", self.location, self.postcode)
    }
}

/// Text before the first space of a postcode, upper-cased.
pub fn outward_code(postcode: &str) -> String {
    postcode
        .split(' ')
        .next()
        .unwrap_or_default()
        .to_uppercase()
}

/// Lenient calendar-date parse used for both catalogue dates and criteria input.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}
