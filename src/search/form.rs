//! Lenient deserializers for criteria that arrive straight from a search form.
//!
//! Form widgets send blanks as `""` and number inputs as either strings or
//! numbers. None of that is an error: blanks and unreadable dates mean the
//! constraint is unset.

use crate::models::parse_calendar_date;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A text field given as a string, a number, or null.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

/// A calendar date; blanks, nulls and anything unparsable leave it unset.
pub(crate) fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => parse_calendar_date(&s),
        _ => None,
    })
}
