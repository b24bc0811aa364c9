//! Reference lists for location matching

use std::collections::HashMap;
use std::sync::LazyLock;

pub const COUNTRIES: &[&str] = &[
    "Afghanistan", "Albania", "Algeria", "Argentina", "Armenia", "Australia", "Austria",
    "Azerbaijan", "Bahrain", "Bangladesh", "Belarus", "Belgium", "Bhutan", "Bolivia",
    "Bosnia and Herzegovina", "Botswana", "Brazil", "Bulgaria", "Cambodia", "Cameroon",
    "Canada", "Chile", "China", "Colombia", "Costa Rica", "Croatia", "Cuba", "Cyprus",
    "Czech Republic", "Denmark", "Dominican Republic", "Ecuador", "Egypt", "El Salvador",
    "Estonia", "Ethiopia", "Fiji", "Finland", "France", "Georgia", "Germany", "Ghana",
    "Greece", "Guatemala", "Honduras", "Hong Kong", "Hungary", "Iceland", "India",
    "Indonesia", "Iran", "Iraq", "Ireland", "Israel", "Italy", "Jamaica", "Japan", "Jordan",
    "Kazakhstan", "Kenya", "Kuwait", "Latvia", "Lebanon", "Lithuania", "Luxembourg",
    "Malaysia", "Maldives", "Malta", "Mauritius", "Mexico", "Moldova", "Mongolia",
    "Morocco", "Mozambique", "Myanmar", "Namibia", "Nepal", "Netherlands", "New Zealand",
    "Nigeria", "North Macedonia", "Norway", "Oman", "Pakistan", "Panama", "Paraguay",
    "Peru", "Philippines", "Poland", "Portugal", "Qatar", "Romania", "Russia", "Rwanda",
    "Saudi Arabia", "Senegal", "Serbia", "Singapore", "Slovakia", "Slovenia",
    "South Africa", "South Korea", "Spain", "Sri Lanka", "Sweden", "Switzerland", "Taiwan",
    "Tanzania", "Thailand", "Tunisia", "Turkey", "Uganda", "Ukraine",
    "United Arab Emirates", "United Kingdom", "United States", "Uruguay", "Uzbekistan",
    "Venezuela", "Vietnam", "Zambia", "Zimbabwe",
];

pub const STATES: &[&str] = &[
    // United States
    "Alabama", "Alaska", "Arizona", "Arkansas", "California", "Colorado", "Connecticut",
    "Delaware", "Florida", "Hawaii", "Idaho", "Illinois", "Indiana", "Iowa", "Kansas",
    "Kentucky", "Louisiana", "Maine", "Maryland", "Massachusetts", "Michigan", "Minnesota",
    "Mississippi", "Missouri", "Montana", "Nebraska", "Nevada", "New Hampshire",
    "New Jersey", "New Mexico", "New York", "North Carolina", "North Dakota", "Ohio",
    "Oklahoma", "Oregon", "Pennsylvania", "Rhode Island", "South Carolina", "South Dakota",
    "Tennessee", "Texas", "Utah", "Vermont", "Virginia", "Washington", "West Virginia",
    "Wisconsin", "Wyoming",
    // India
    "Andhra Pradesh", "Arunachal Pradesh", "Assam", "Bihar", "Chhattisgarh", "Goa",
    "Gujarat", "Haryana", "Himachal Pradesh", "Jharkhand", "Karnataka", "Kerala",
    "Madhya Pradesh", "Maharashtra", "Manipur", "Meghalaya", "Mizoram", "Nagaland",
    "Odisha", "Punjab", "Rajasthan", "Sikkim", "Tamil Nadu", "Telangana", "Tripura",
    "Uttar Pradesh", "Uttarakhand", "West Bengal", "Delhi", "Jammu and Kashmir",
    "Puducherry", "Chandigarh", "Ladakh",
    // Canada
    "Alberta", "British Columbia", "Manitoba", "New Brunswick",
    "Newfoundland and Labrador", "Nova Scotia", "Ontario", "Prince Edward Island",
    "Quebec", "Saskatchewan",
    // Australia
    "New South Wales", "Queensland", "South Australia", "Tasmania", "Victoria",
    "Western Australia",
    // United Kingdom
    "England", "Scotland", "Wales", "Northern Ireland",
];

/// Common short forms that resolve to a canonical country name.
pub const COUNTRY_ALIASES: &[(&str, &str)] = &[
    ("usa", "United States"),
    ("u.s.", "United States"),
    ("u.s.a.", "United States"),
    ("united states of america", "United States"),
    ("uk", "United Kingdom"),
    ("u.k.", "United Kingdom"),
    ("great britain", "United Kingdom"),
    ("britain", "United Kingdom"),
    ("uae", "United Arab Emirates"),
    ("bharat", "India"),
    ("republic of korea", "South Korea"),
    ("korea", "South Korea"),
    ("holland", "Netherlands"),
    ("czechia", "Czech Republic"),
];

static COUNTRY_INDEX: LazyLock<HashMap<String, &'static str>> = LazyLock::new(|| {
    COUNTRIES
        .iter()
        .map(|name| (name.to_lowercase(), *name))
        .chain(COUNTRY_ALIASES.iter().map(|(alias, name)| (alias.to_string(), *name)))
        .collect()
});

static STATE_INDEX: LazyLock<HashMap<String, &'static str>> = LazyLock::new(|| {
    STATES
        .iter()
        .map(|name| (name.to_lowercase(), *name))
        .collect()
});

fn lookup_key(token: &str) -> String {
    token
        .trim()
        .trim_matches(|c: char| !c.is_alphanumeric() && c != '.')
        .trim_end_matches('.')
        .to_lowercase()
}

/// Canonical country for a name or alias, case-insensitively.
pub fn lookup_country(token: &str) -> Option<&'static str> {
    let key = lookup_key(token);
    if key.is_empty() {
        return None;
    }
    COUNTRY_INDEX
        .get(&key)
        .or_else(|| COUNTRY_INDEX.get(&format!("{}.", key)))
        .copied()
}

/// Canonical state or province name, case-insensitively.
pub fn lookup_state(token: &str) -> Option<&'static str> {
    let key = lookup_key(token);
    if key.is_empty() {
        return None;
    }
    STATE_INDEX.get(&key).copied()
}

pub fn is_location(token: &str) -> bool {
    lookup_country(token).is_some() || lookup_state(token).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_lookup_is_case_insensitive() {
        assert_eq!(lookup_country("india"), Some("India"));
        assert_eq!(lookup_country(" INDIA "), Some("India"));
        assert_eq!(lookup_country("Atlantis"), None);
    }

    #[test]
    fn test_country_aliases() {
        assert_eq!(lookup_country("USA"), Some("United States"));
        assert_eq!(lookup_country("uk"), Some("United Kingdom"));
        assert_eq!(lookup_country("U.S.A."), Some("United States"));
    }

    #[test]
    fn test_state_lookup_handles_multi_word_names() {
        assert_eq!(lookup_state("tamil nadu"), Some("Tamil Nadu"));
        assert_eq!(lookup_state("Karnataka."), Some("Karnataka"));
        assert_eq!(lookup_state("Bangalore"), None);
    }

    #[test]
    fn test_reference_lists_have_no_case_duplicates() {
        assert_eq!(COUNTRY_INDEX.len(), COUNTRIES.len() + COUNTRY_ALIASES.len());
        assert_eq!(STATE_INDEX.len(), STATES.len());
    }
}
