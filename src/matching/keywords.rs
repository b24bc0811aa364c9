//! Skill keyword matching over case-folded word lists

use aho_corasick::{AhoCorasick, MatchKind};
use log::warn;
use std::collections::BTreeSet;

/// Counts which job skills occur as whole words in a résumé.
pub struct SkillMatcher {
    matcher: Option<AhoCorasick>,
    skills: Vec<String>,
}

impl SkillMatcher {
    /// Skills are trimmed, lowercased and deduplicated, keeping first-seen order.
    pub fn new<S: AsRef<str>>(skills: &[S]) -> Self {
        let mut seen = BTreeSet::new();
        let skills: Vec<String> = skills
            .iter()
            .map(|s| s.as_ref().split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase())
            .filter(|s| !s.is_empty() && seen.insert(s.clone()))
            .collect();

        let matcher = if skills.is_empty() {
            None
        } else {
            // Overlapping search so "sql" still counts when "sql server" also matches.
            match AhoCorasick::builder()
                .ascii_case_insensitive(true)
                .match_kind(MatchKind::Standard)
                .build(&skills)
            {
                Ok(matcher) => Some(matcher),
                Err(e) => {
                    warn!("Failed to build skill matcher, keyword scores will be zero: {}", e);
                    None
                }
            }
        };

        Self { matcher, skills }
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    /// Distinct skills present in `words`, in skill-list order.
    pub fn matched_skills(&self, words: &[String]) -> Vec<String> {
        let Some(matcher) = &self.matcher else {
            return Vec::new();
        };
        if words.is_empty() {
            return Vec::new();
        }

        let haystack = words.join(" ");
        let bytes = haystack.as_bytes();
        let mut found = BTreeSet::new();

        for mat in matcher.find_overlapping_iter(&haystack) {
            let starts_word = mat.start() == 0 || bytes[mat.start() - 1] == b' ';
            let ends_word = mat.end() == bytes.len() || bytes[mat.end()] == b' ';
            if starts_word && ends_word {
                found.insert(mat.pattern().as_usize());
            }
        }

        found.into_iter().map(|idx| self.skills[idx].clone()).collect()
    }

    pub fn count_matches(&self, words: &[String]) -> usize {
        self.matched_skills(words).len()
    }
}
