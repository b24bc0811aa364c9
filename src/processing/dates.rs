//! Date-of-birth parsing against a fixed, ordered format list

use chrono::NaiveDate;

/// Tried in order; the first format that parses wins.
///
/// Two-digit-year formats come first because `%Y` also accepts two digits
/// and would read "85" as year 85. Day-first formats precede month-first ones.
pub const DOB_FORMATS: &[&str] = &[
    "%d/%m/%y",
    "%d-%m-%y",
    "%d.%m.%y",
    "%m/%d/%y",
    "%m-%d-%y",
    "%m.%d.%y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%m.%d.%Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
];

pub const ISO_FORMAT: &str = "%Y-%m-%d";

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DOB_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

/// ISO `YYYY-MM-DD` when `raw` matches a known format, otherwise its first 10 characters.
///
/// A truncated value that itself parses is returned in ISO form, so the
/// function is stable when applied to its own output.
pub fn normalize_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    if let Some(date) = parse_date(raw) {
        return date.format(ISO_FORMAT).to_string();
    }

    let head = raw.chars().take(10).collect::<String>().trim_end().to_string();
    match parse_date(&head) {
        Some(date) => date.format(ISO_FORMAT).to_string(),
        None => head,
    }
}

pub fn is_iso_date(value: &str) -> bool {
    value.len() == 10 && NaiveDate::parse_from_str(value, ISO_FORMAT).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_first_wins_when_ambiguous() {
        assert_eq!(normalize_date("03/04/1990"), "1990-04-03");
    }

    #[test]
    fn test_month_first_when_day_first_is_invalid() {
        assert_eq!(normalize_date("12/25/1990"), "1990-12-25");
    }

    #[test]
    fn test_year_first_and_separators() {
        assert_eq!(normalize_date("1990-05-12"), "1990-05-12");
        assert_eq!(normalize_date("1990/5/2"), "1990-05-02");
        assert_eq!(normalize_date("12.05.1990"), "1990-05-12");
    }

    #[test]
    fn test_two_digit_years() {
        assert_eq!(normalize_date("12/05/85"), "1985-05-12");
    }

    #[test]
    fn test_two_digit_years_month_first() {
        assert_eq!(normalize_date("12-25-85"), "1985-12-25");
        assert_eq!(normalize_date("12/31/99"), "1999-12-31");
        assert_eq!(normalize_date("10.13.01"), "2001-10-13");
    }

    #[test]
    fn test_unparsable_keeps_first_ten_chars() {
        assert_eq!(normalize_date("31/02/2020"), "31/02/2020");
        assert_eq!(normalize_date("sometime in spring 1990"), "sometime i");
        assert_eq!(normalize_date(""), "");
    }

    #[test]
    fn test_truncated_head_that_parses_is_iso() {
        assert_eq!(normalize_date("01/02/2003 (approx)"), "2003-02-01");
    }

    #[test]
    fn test_iso_output_is_stable() {
        for raw in ["1/2/2000", "2000.12.31", "7-8-99"] {
            let once = normalize_date(raw);
            assert!(is_iso_date(&once), "{} -> {}", raw, once);
            assert_eq!(normalize_date(&once), once);
        }
    }
}
