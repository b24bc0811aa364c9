//! Document structures shared by the parse pipeline

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A run of text with uniform font size on one line, in reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    pub text: String,
    pub font_size: f32,
    /// Distance from the top of the first page. Only recorded by layout-aware extraction.
    pub vertical_position: Option<f32>,
    pub page_index: usize,
    pub x_position: f32,
    pub uppercase_ratio: f32,
}

impl TextSpan {
    pub fn new(text: impl Into<String>, font_size: f32, page_index: usize) -> Self {
        let text = text.into();
        let uppercase_ratio = uppercase_ratio(&text);
        Self {
            text,
            font_size,
            vertical_position: None,
            page_index,
            x_position: 0.0,
            uppercase_ratio,
        }
    }

    pub fn at(mut self, x_position: f32, vertical_position: f32) -> Self {
        self.x_position = x_position;
        self.vertical_position = Some(vertical_position);
        self
    }
}

/// Share of alphabetic characters that are uppercase; 0.0 when there are none.
pub fn uppercase_ratio(text: &str) -> f32 {
    let (upper, alpha) = text
        .chars()
        .filter(|c| c.is_alphabetic())
        .fold((0usize, 0usize), |(upper, alpha), c| {
            (upper + usize::from(c.is_uppercase()), alpha + 1)
        });

    if alpha == 0 {
        0.0
    } else {
        upper as f32 / alpha as f32
    }
}

/// Decoded document: full text plus positioned spans.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutDocument {
    pub full_text: String,
    pub spans: Vec<TextSpan>,
}

impl LayoutDocument {
    pub fn max_font_size(&self) -> Option<f32> {
        self.spans
            .iter()
            .filter(|s| !s.text.trim().is_empty())
            .map(|s| s.font_size)
            .reduce(f32::max)
    }

    pub fn min_font_size(&self) -> Option<f32> {
        self.spans
            .iter()
            .filter(|s| !s.text.trim().is_empty())
            .map(|s| s.font_size)
            .reduce(f32::min)
    }
}

/// Fields pulled out of a document by one strategy. Every field defaults to "".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawExtraction {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub zip: String,
    pub dob: String,
    pub gender: String,
    pub portfolio: String,
}

/// Validated candidate profile handed to form pre-fill consumers.
///
/// Every key in [`CANONICAL_FIELDS`] is always present and always a string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanonicalCandidateRecord {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub zip: String,
    pub dob: String,
    pub gender: String,
    pub portfolio: String,
}

/// Per-field length limits, in characters.
pub mod limits {
    pub const FULL_NAME: usize = 100;
    pub const EMAIL: usize = 254;
    pub const PHONE: usize = 15;
    pub const ADDRESS: usize = 255;
    pub const LOCATION: usize = 100;
    pub const ZIP: usize = 10;
    pub const DOB: usize = 10;
    pub const PORTFOLIO: usize = 200;
}

pub const CANONICAL_FIELDS: [&str; 11] = [
    "full_name",
    "email",
    "phone",
    "address",
    "country",
    "state",
    "city",
    "zip",
    "dob",
    "gender",
    "portfolio",
];

impl CanonicalCandidateRecord {
    /// The record shown for manual entry when parsing fails entirely.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> [(&'static str, &str); 11] {
        [
            ("full_name", self.full_name.as_str()),
            ("email", self.email.as_str()),
            ("phone", self.phone.as_str()),
            ("address", self.address.as_str()),
            ("country", self.country.as_str()),
            ("state", self.state.as_str()),
            ("city", self.city.as_str()),
            ("zip", self.zip.as_str()),
            ("dob", self.dob.as_str()),
            ("gender", self.gender.as_str()),
            ("portfolio", self.portfolio.as_str()),
        ]
    }

    pub fn to_form_map(&self) -> BTreeMap<String, String> {
        self.fields()
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    pub fn filled_count(&self) -> usize {
        self.fields().iter().filter(|(_, v)| !v.is_empty()).count()
    }
}
