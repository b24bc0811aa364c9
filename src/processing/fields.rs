//! Field heuristics over decoded text and spans
//!
//! Every helper returns an empty string when nothing qualifies; extraction
//! never fails. Tie-break rules differ per field: the name, contact and date
//! fields take the first match, while country and state keep the last match
//! seen anywhere in the document.

use crate::processing::dates::normalize_date;
use crate::processing::document::{limits, LayoutDocument, RawExtraction, TextSpan};
use crate::processing::patterns::{
    cap_chars, digit_count, looks_like_contact, ADDRESS_LABEL_RE, DATE_RE, EMAIL_RE, GENDER_RE,
    PHONE_RELAXED_RE, PHONE_STRICT_RE, PROFESSIONAL_PROFILE_RE, URL_RE, ZIP_RE,
};
use crate::processing::reference_data::{is_location, lookup_country, lookup_state};

/// Spans within this many points of the largest font count as "at max size".
const NAME_FONT_TOLERANCE: f32 = 1.0;
const NAME_MAX_SPANS: usize = 3;
/// Layout units from the top of the first page a name span may start at.
const NAME_TOP_BAND: f32 = 200.0;
/// Below this spread every span looks the same size and font size says nothing.
const MIN_FONT_SPREAD: f32 = 0.5;
const UPPERCASE_NAME_RATIO: f32 = 0.6;
const MAX_CITY_LINE_CHARS: usize = 100;
const SEGMENT_SEPARATORS: [char; 3] = [',', ';', '|'];
const PORTFOLIO_HINTS: [&str; 4] = ["linkedin", "github", "portfolio", "personal"];

pub fn extract_fields_basic(doc: &LayoutDocument) -> RawExtraction {
    let text = doc.full_text.as_str();
    let (country, state) = scan_locations(text);

    RawExtraction {
        full_name: basic_name(doc),
        email: first_email(text),
        phone: first_phone(text),
        address: basic_address(&doc.spans),
        country,
        state,
        city: String::new(),
        zip: first_zip(text),
        dob: first_dob(text),
        gender: first_gender(text),
        portfolio: String::new(),
    }
}

pub fn extract_fields_layout_aware(doc: &LayoutDocument) -> RawExtraction {
    let text = doc.full_text.as_str();
    let (country, state) = scan_locations(text);
    let city = find_city(text, &state, &country);

    RawExtraction {
        full_name: layout_aware_name(doc),
        email: first_email(text),
        phone: first_phone(text),
        address: labelled_address(text),
        country,
        state,
        city,
        zip: first_zip(text),
        dob: first_dob(text),
        gender: first_gender(text),
        portfolio: find_portfolio(text),
    }
}

fn join_name_spans<'a>(spans: impl Iterator<Item = &'a TextSpan>) -> String {
    let parts: Vec<&str> = spans
        .map(|s| s.text.trim())
        .filter(|t| !t.is_empty())
        .take(NAME_MAX_SPANS)
        .collect();
    cap_chars(&parts.join(" "), limits::FULL_NAME).trim_end().to_string()
}

/// Largest-font spans in reading order. When every span shares one size,
/// falls back to the first mostly-uppercase line.
pub fn basic_name(doc: &LayoutDocument) -> String {
    let (Some(min), Some(max)) = (doc.min_font_size(), doc.max_font_size()) else {
        return String::new();
    };
    let spans = &doc.spans;

    if max - min < MIN_FONT_SPREAD {
        return spans
            .iter()
            .find(|s| {
                s.uppercase_ratio >= UPPERCASE_NAME_RATIO
                    && s.text.chars().filter(|c| c.is_alphabetic()).count() >= 2
            })
            .map(|s| cap_chars(s.text.trim(), limits::FULL_NAME))
            .unwrap_or_default();
    }

    join_name_spans(
        spans
            .iter()
            .filter(|s| s.font_size >= max - NAME_FONT_TOLERANCE),
    )
}

/// Largest-font spans near the top of the first page that are not contact details.
pub fn layout_aware_name(doc: &LayoutDocument) -> String {
    let Some(max) = doc.max_font_size() else {
        return String::new();
    };

    join_name_spans(doc.spans.iter().filter(|s| {
        s.font_size >= max - NAME_FONT_TOLERANCE
            && s.vertical_position.is_some_and(|y| y <= NAME_TOP_BAND)
            && !looks_like_contact(&s.text)
    }))
}

pub fn first_email(text: &str) -> String {
    EMAIL_RE
        .find(text)
        .map(|m| cap_chars(m.as_str(), limits::EMAIL))
        .unwrap_or_default()
}

/// Strict pattern first; otherwise the first relaxed run carrying at least ten digits.
pub fn first_phone(text: &str) -> String {
    let found = PHONE_STRICT_RE.find(text).map(|m| m.as_str()).or_else(|| {
        PHONE_RELAXED_RE
            .find_iter(text)
            .map(|m| m.as_str())
            .find(|candidate| digit_count(candidate) >= 10)
    });

    found
        .map(|phone| cap_chars(phone.trim(), limits::PHONE).trim_end().to_string())
        .unwrap_or_default()
}

pub fn first_dob(text: &str) -> String {
    DATE_RE
        .find(text)
        .map(|m| normalize_date(m.as_str()))
        .unwrap_or_default()
}

pub fn first_zip(text: &str) -> String {
    ZIP_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

pub fn first_gender(text: &str) -> String {
    GENDER_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn segments(line: &str) -> impl Iterator<Item = &str> {
    line.split(SEGMENT_SEPARATORS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Scan every segment and word for countries and states.
///
/// Each hit overwrites the previous one, so the last location mentioned in the
/// document wins for both fields.
pub fn scan_locations(text: &str) -> (String, String) {
    let mut country = String::new();
    let mut state = String::new();

    for line in text.lines() {
        for segment in segments(line) {
            let whole_country = lookup_country(segment);
            let whole_state = lookup_state(segment);

            if whole_country.is_none() && whole_state.is_none() {
                if let Some(found) = leading_location(segment, lookup_country) {
                    country = found.to_string();
                }
                if let Some(found) = leading_location(segment, lookup_state) {
                    state = found.to_string();
                }
                for word in segment.split_whitespace() {
                    if let Some(found) = lookup_country(word) {
                        country = found.to_string();
                    }
                    if let Some(found) = lookup_state(word) {
                        state = found.to_string();
                    }
                }
                continue;
            }

            if let Some(found) = whole_country {
                country = found.to_string();
            }
            if let Some(found) = whole_state {
                state = found.to_string();
            }
        }
    }

    (country, state)
}

fn matches_location(candidate: &str, target: &str) -> bool {
    lookup_state(candidate) == Some(target) || lookup_country(candidate) == Some(target)
}

/// Longest multi-word prefix of `segment` that `lookup` resolves, as in
/// "New Jersey 07102".
fn leading_location(
    segment: &str,
    lookup: fn(&str) -> Option<&'static str>,
) -> Option<&'static str> {
    let words: Vec<&str> = segment.split_whitespace().collect();
    (2..words.len())
        .rev()
        .find_map(|n| lookup(&words[..n].join(" ")))
}

fn starts_with_location(segment: &str, target: &str) -> bool {
    let words: Vec<&str> = segment.split_whitespace().collect();
    (2..words.len()).any(|n| matches_location(&words[..n].join(" "), target))
}

fn city_candidate(raw: &str) -> Option<String> {
    let raw = raw.rsplit(':').next().unwrap_or(raw).trim();
    let plausible = !raw.is_empty()
        && !is_location(raw)
        && !raw.contains('@')
        && !raw.chars().any(|c| c.is_ascii_digit());
    plausible.then(|| raw.to_string())
}

fn city_before(line: &str, target: &str) -> Option<String> {
    let parts: Vec<&str> = segments(line).collect();

    for (idx, segment) in parts.iter().enumerate() {
        if matches_location(segment, target) || starts_with_location(segment, target) {
            return idx.checked_sub(1).and_then(|prev| city_candidate(parts[prev]));
        }

        let words: Vec<&str> = segment.split_whitespace().collect();
        if let Some(pos) = words.iter().position(|w| matches_location(w, target)) {
            if pos > 0 {
                return city_candidate(&words[..pos].join(" "));
            }
            return idx.checked_sub(1).and_then(|prev| city_candidate(parts[prev]));
        }
    }

    None
}

/// The token just before the extracted state (or country) on the first short
/// line that mentions it.
pub fn find_city(text: &str, state: &str, country: &str) -> String {
    [state, country]
        .into_iter()
        .filter(|target| !target.is_empty())
        .find_map(|target| {
            text.lines()
                .filter(|line| line.chars().count() < MAX_CITY_LINE_CHARS)
                .find(|line| {
                    segments(line).any(|s| {
                        matches_location(s, target)
                            || starts_with_location(s, target)
                            || s.split_whitespace().any(|w| matches_location(w, target))
                    })
                })
                .and_then(|line| city_before(line, target))
        })
        .map(|city| cap_chars(&city, limits::LOCATION))
        .unwrap_or_default()
}

/// First span mentioning "address", with the label stripped.
pub fn basic_address(spans: &[TextSpan]) -> String {
    spans
        .iter()
        .find(|s| s.text.to_lowercase().contains("address"))
        .map(|s| {
            let stripped = ADDRESS_LABEL_RE.replace(s.text.trim(), "");
            cap_chars(stripped.trim(), limits::ADDRESS).trim_end().to_string()
        })
        .unwrap_or_default()
}

/// Text after an "address:" label, or the following line when the label stands alone.
pub fn labelled_address(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();

    for (idx, line) in lines.iter().enumerate() {
        // ASCII folding keeps byte offsets aligned with `line`.
        let lower = line.to_ascii_lowercase();
        let Some(start) = lower.find("address:") else {
            continue;
        };

        let after = line
            .get(start + "address:".len()..)
            .unwrap_or_default()
            .trim();
        let value = if after.is_empty() {
            lines[idx + 1..]
                .iter()
                .map(|l| l.trim())
                .find(|l| !l.is_empty())
                .unwrap_or_default()
        } else {
            after
        };

        return cap_chars(value, limits::ADDRESS).trim_end().to_string();
    }

    String::new()
}

/// Profile links beat hinted links, which beat any other link.
pub fn find_portfolio(text: &str) -> String {
    let urls: Vec<&str> = URL_RE
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ';', ':', ')']))
        .collect();

    let chosen = urls
        .iter()
        .find(|url| PROFESSIONAL_PROFILE_RE.is_match(url))
        .or_else(|| {
            urls.iter().find(|url| {
                let lower = url.to_lowercase();
                PORTFOLIO_HINTS.iter().any(|hint| lower.contains(hint))
            })
        })
        .or_else(|| urls.first());

    chosen
        .map(|url| cap_chars(url, limits::PORTFOLIO))
        .unwrap_or_default()
}
