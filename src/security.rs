//! Input sanitizing and form validators.
//!
//! [`sanitize_input`] HTML-encodes free text before it is used anywhere that
//! may end up in rendered markup. It does not validate; the validators below
//! are separate checks for form fields.

use crate::search::parse::{parse_integer_prefix, parse_number_prefix};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static POSTCODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Z]{1,2}[0-9]{1,2}[A-Z]?\s?[0-9][A-Z]{2}$").expect("valid postcode regex")
});

static HTML_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

fn entity(c: char) -> Option<&'static str> {
    match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#x27;"),
        '/' => Some("&#x2F;"),
        _ => None,
    }
}

/// Replace `& < > " ' /` with HTML entities in one pass over `input`.
pub fn sanitize_input(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match entity(c) {
            Some(e) => out.push_str(e),
            None => out.push(c),
        }
    }
    out
}

/// Values that can pass through the sanitizer.
///
/// Text is encoded; structured values come back unchanged.
pub trait Sanitize {
    fn sanitize(self) -> Self;
}

impl Sanitize for String {
    fn sanitize(self) -> Self {
        if self.chars().any(|c| entity(c).is_some()) {
            sanitize_input(&self)
        } else {
            self
        }
    }
}

impl Sanitize for NaiveDate {
    fn sanitize(self) -> Self {
        self
    }
}

impl<T: Sanitize> Sanitize for Option<T> {
    fn sanitize(self) -> Self {
        self.map(Sanitize::sanitize)
    }
}

impl Sanitize for Value {
    /// Only top-level strings are encoded; numbers, arrays and objects pass through.
    fn sanitize(self) -> Self {
        match self {
            Value::String(s) => Value::String(s.sanitize()),
            other => other,
        }
    }
}

pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Loose UK postcode shape, e.g. "BR1 3QD", "sw1a1aa".
pub fn validate_postcode(postcode: &str) -> bool {
    POSTCODE_RE.is_match(postcode)
}

/// Non-negative finite number.
pub fn validate_price(price: &str) -> bool {
    parse_number_prefix(price).is_some_and(|p| p >= 0.0)
}

/// Whole number of bedrooms between 1 and 20.
pub fn validate_bedrooms(bedrooms: &str) -> bool {
    parse_integer_prefix(bedrooms).is_some_and(|n| (1..=20).contains(&n))
}

pub fn strip_html_tags(html: &str) -> String {
    HTML_TAG_RE.replace_all(html, "").into_owned()
}

/// Backslash-escape regex metacharacters so `input` matches literally.
pub fn escape_regex(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(
            c,
            '.' | '*' | '+' | '?' | '^' | '$' | '{' | '}' | '(' | ')' | '|' | '[' | ']' | '\\'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
