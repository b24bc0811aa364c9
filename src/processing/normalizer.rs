//! Maps raw extractions onto the canonical candidate record

use crate::processing::dates::normalize_date;
use crate::processing::document::{limits, CanonicalCandidateRecord, RawExtraction};
use crate::processing::patterns::{cap_chars, WHITESPACE_RE};
use crate::processing::reference_data::{lookup_country, lookup_state};

pub const ALLOWED_GENDERS: [&str; 3] = ["male", "female", "other"];

/// Trim, cap to `max_chars`, then drop whitespace the cut exposed.
fn clean(value: &str, max_chars: usize) -> String {
    cap_chars(value.trim(), max_chars).trim_end().to_string()
}

fn clean_name(value: &str) -> String {
    clean(&WHITESPACE_RE.replace_all(value, " "), limits::FULL_NAME)
}

fn clean_phone(value: &str) -> String {
    let stripped: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '.' | '(' | ')'))
        .collect();
    cap_chars(&stripped, limits::PHONE)
}

fn clean_gender(value: &str) -> String {
    let lowered = value.trim().to_lowercase();
    if ALLOWED_GENDERS.contains(&lowered.as_str()) {
        lowered
    } else {
        String::new()
    }
}

fn clean_location(value: &str, lookup: fn(&str) -> Option<&'static str>) -> String {
    let cleaned = clean(value, limits::LOCATION);
    match lookup(&cleaned) {
        Some(canonical) => canonical.to_string(),
        None => cleaned,
    }
}

fn clean_dob(value: &str) -> String {
    clean(&normalize_date(value), limits::DOB)
}

/// Build a canonical record from whatever a strategy produced.
///
/// Never fails: unknown values pass through trimmed and capped. Applying it to
/// its own output yields the same record.
pub fn normalize(raw: &RawExtraction) -> CanonicalCandidateRecord {
    CanonicalCandidateRecord {
        full_name: clean_name(&raw.full_name),
        email: clean(&raw.email, limits::EMAIL),
        phone: clean_phone(&raw.phone),
        address: clean(&raw.address, limits::ADDRESS),
        country: clean_location(&raw.country, lookup_country),
        state: clean_location(&raw.state, lookup_state),
        city: clean(&raw.city, limits::LOCATION),
        zip: clean(&raw.zip, limits::ZIP),
        dob: clean_dob(&raw.dob),
        gender: clean_gender(&raw.gender),
        portfolio: clean(&raw.portfolio, limits::PORTFOLIO),
    }
}

impl From<&CanonicalCandidateRecord> for RawExtraction {
    fn from(record: &CanonicalCandidateRecord) -> Self {
        RawExtraction {
            full_name: record.full_name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            address: record.address.clone(),
            country: record.country.clone(),
            state: record.state.clone(),
            city: record.city.clone(),
            zip: record.zip.clone(),
            dob: record.dob.clone(),
            gender: record.gender.clone(),
            portfolio: record.portfolio.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::dates::is_iso_date;

    fn messy() -> RawExtraction {
        RawExtraction {
            full_name: "  JANE   DOE \n".to_string(),
            email: " jane.doe@example.com ".to_string(),
            phone: "+1 (555) 000-1234".to_string(),
            address: format!("  {}  ", "12 MG Road ".repeat(40)),
            country: "usa".to_string(),
            state: "karnataka".to_string(),
            city: " Bangalore ".to_string(),
            zip: "560001".to_string(),
            dob: "12/05/1990".to_string(),
            gender: "Female".to_string(),
            portfolio: "https://linkedin.com/in/janedoe".to_string(),
        }
    }

    #[test]
    fn test_normalizes_every_field() {
        let record = normalize(&messy());

        assert_eq!(record.full_name, "JANE DOE");
        assert_eq!(record.email, "jane.doe@example.com");
        assert_eq!(record.phone, "+15550001234");
        assert!(record.address.chars().count() <= limits::ADDRESS);
        assert!(!record.address.ends_with(' '));
        assert_eq!(record.country, "United States");
        assert_eq!(record.state, "Karnataka");
        assert_eq!(record.city, "Bangalore");
        assert_eq!(record.dob, "1990-05-12");
        assert_eq!(record.gender, "female");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = vec![
            messy(),
            RawExtraction::default(),
            RawExtraction {
                full_name: "é".repeat(300),
                phone: "98450 12345 ext 99".to_string(),
                dob: "sometime in 1990".to_string(),
                gender: "unknown".to_string(),
                country: "Atlantis ".to_string(),
                zip: "78701-1234 ".to_string(),
                ..Default::default()
            },
        ];

        for raw in inputs {
            let once = normalize(&raw);
            let twice = normalize(&RawExtraction::from(&once));
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_recognized_dob_becomes_iso() {
        for dob in ["1990-05-12", "12.05.1990", "5/12/90"] {
            let record = normalize(&RawExtraction {
                dob: dob.to_string(),
                ..Default::default()
            });
            assert!(is_iso_date(&record.dob), "{} -> {}", dob, record.dob);
        }
    }

    #[test]
    fn test_month_first_two_digit_year_keeps_century() {
        let record = normalize(&RawExtraction {
            dob: "12-25-85".to_string(),
            ..Default::default()
        });
        assert_eq!(record.dob, "1985-12-25");
    }

    #[test]
    fn test_gender_outside_allowed_set_is_dropped() {
        for (raw, expected) in [("MALE", "male"), (" other ", "other"), ("f", ""), ("", "")] {
            let record = normalize(&RawExtraction {
                gender: raw.to_string(),
                ..Default::default()
            });
            assert_eq!(record.gender, expected);
        }
    }

    #[test]
    fn test_unresolved_locations_pass_through_capped() {
        let record = normalize(&RawExtraction {
            country: " Atlantis ".to_string(),
            state: "S".repeat(150),
            ..Default::default()
        });
        assert_eq!(record.country, "Atlantis");
        assert_eq!(record.state.chars().count(), limits::LOCATION);
    }

    #[test]
    fn test_phone_is_stripped_and_capped() {
        let record = normalize(&RawExtraction {
            phone: "+44 (020) 7946.0958 1234 5678".to_string(),
            ..Default::default()
        });
        assert_eq!(record.phone, "+44020794609581");
    }
}
