//! Compiled patterns shared by every parse call

use regex::Regex;
use std::sync::LazyLock;

pub static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}\b").expect("Invalid email regex")
});

/// International or North-American style number with grouped digits.
pub static PHONE_STRICT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+\d{1,3}[\s.-]?)?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}\b")
        .expect("Invalid phone regex")
});

/// Anything digit-like between 10 and 20 characters; callers check the digit count.
pub static PHONE_RELAXED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\+?[\d(][\d\s().-]{8,18}\d").expect("Invalid relaxed phone regex")
});

/// Day/month/year or year/month/day with `-`, `/` or `.` separators.
pub static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:\d{4}[-/.]\d{1,2}[-/.]\d{1,2}|\d{1,2}[-/.]\d{1,2}[-/.](?:\d{4}|\d{2}))\b")
        .expect("Invalid date regex")
});

pub static ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{5,6}(?:-\d{4})?\b").expect("Invalid zip regex"));

pub static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:https?://|www\.)[^\s,;<>()]+|\b(?:linkedin\.com|github\.com|gitlab\.com|behance\.net)/[^\s,;<>()]+",
    )
    .expect("Invalid URL regex")
});

pub static PROFESSIONAL_PROFILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)linkedin\.com/in/").expect("Invalid profile regex"));

pub static GENDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(male|female|other)\b").expect("Invalid gender regex"));

/// Leading "address" label with an optional separator.
pub static ADDRESS_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^.*?\baddress\b\s*[:\-]?\s*").expect("Invalid address label regex")
});

pub static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

pub static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("Invalid word regex"));

pub fn digit_count(text: &str) -> usize {
    text.chars().filter(|c| c.is_ascii_digit()).count()
}

pub fn looks_like_contact(text: &str) -> bool {
    EMAIL_RE.is_match(text)
        || PHONE_STRICT_RE.is_match(text)
        || PHONE_RELAXED_RE
            .find_iter(text)
            .any(|m| digit_count(m.as_str()) >= 10)
}

/// Truncate to at most `max_chars` characters, never splitting a code point.
pub fn cap_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_case_insensitive() {
        let m = EMAIL_RE.find("Mail: Jane.Doe@Example.COM today").unwrap();
        assert_eq!(m.as_str(), "Jane.Doe@Example.COM");
    }

    #[test]
    fn test_strict_phone_with_country_code() {
        let m = PHONE_STRICT_RE.find("call +1 555 000 1234 now").unwrap();
        assert_eq!(m.as_str(), "+1 555 000 1234");
    }

    #[test]
    fn test_date_shapes() {
        assert_eq!(DATE_RE.find("born 12/05/1990").unwrap().as_str(), "12/05/1990");
        assert_eq!(DATE_RE.find("on 1990-05-12.").unwrap().as_str(), "1990-05-12");
        assert_eq!(DATE_RE.find("dob 3.4.85").unwrap().as_str(), "3.4.85");
        assert!(DATE_RE.find("2015 - 2019").is_none());
    }

    #[test]
    fn test_gender_respects_word_boundaries() {
        let m = GENDER_RE.find("Gender: Female").unwrap();
        assert_eq!(m.as_str(), "Female");
        assert!(GENDER_RE.find("females, maleficent").is_none());
    }

    #[test]
    fn test_cap_chars_counts_code_points() {
        assert_eq!(cap_chars("héllo", 2), "hé");
        assert_eq!(cap_chars("abc", 10), "abc");
    }

    #[test]
    fn test_contact_detection() {
        assert!(looks_like_contact("jane@x.io"));
        assert!(looks_like_contact("(555) 123-4567"));
        assert!(!looks_like_contact("JANE DOE"));
    }
}
