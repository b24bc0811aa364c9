//! Job-to-résumé and candidate-to-candidate ranking

use crate::config::ScoringConfig;
use crate::matching::keywords::SkillMatcher;
use crate::matching::text_processor::TextProcessor;
use crate::matching::tfidf;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_SEMANTIC_WEIGHT: f32 = 0.7;

/// Job metadata used to build the query text. Blank parts are skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobDescriptor {
    pub title: String,
    pub position_label: String,
    pub skill_list: Vec<String>,
    pub description_text: String,
    /// Text or markdown file loaded into `description_text` when that is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_file: Option<PathBuf>,
}

impl JobDescriptor {
    /// Title, position label, comma-joined skills and description, in that order.
    pub fn to_text(&self) -> String {
        let skills = self
            .skill_list
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        [
            self.title.trim(),
            self.position_label.trim(),
            skills.as_str(),
            self.description_text.trim(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub subject_id: String,
    pub text: String,
}

impl ResumeDocument {
    pub fn new(subject_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub subject_id: String,
    pub keyword_score: usize,
    pub semantic_score: f32,
    pub combined_score: f32,
    /// No words could be read; usually a scanned document.
    pub is_unreadable: bool,
    pub matched_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub subject_id: String,
    pub score: f32,
}

/// Stable descending sort; equal scores keep their input order.
fn sort_descending<T>(items: &mut [T], key: impl Fn(&T) -> f32) {
    items.sort_by(|a, b| key(b).total_cmp(&key(a)));
}

pub struct SimilarityScorer {
    semantic_weight: f32,
    processor: TextProcessor,
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::new(DEFAULT_SEMANTIC_WEIGHT)
    }
}

impl SimilarityScorer {
    /// `semantic_weight` is clamped into [0, 1].
    pub fn new(semantic_weight: f32) -> Self {
        let semantic_weight = if semantic_weight.is_finite() {
            semantic_weight.clamp(0.0, 1.0)
        } else {
            DEFAULT_SEMANTIC_WEIGHT
        };
        Self {
            semantic_weight,
            processor: TextProcessor::new(),
        }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(config.semantic_weight)
    }

    pub fn semantic_weight(&self) -> f32 {
        self.semantic_weight
    }

    /// TF-IDF cosine similarity of `query_text` to each candidate, in order.
    pub fn score<S: AsRef<str>>(&self, query_text: &str, candidate_texts: &[S]) -> Vec<f32> {
        tfidf::score(query_text, candidate_texts)
    }

    /// Score every résumé against `job`.
    ///
    /// With `top_k` the results are sorted by combined score and truncated;
    /// without it they stay in input order. Unreadable résumés are kept.
    pub fn score_against_job(
        &self,
        job: &JobDescriptor,
        resumes: &[ResumeDocument],
        top_k: Option<usize>,
    ) -> Vec<SimilarityResult> {
        if resumes.is_empty() {
            return Vec::new();
        }

        let job_text = job.to_text();
        let matcher = SkillMatcher::new(&job.skill_list);

        let word_lists: Vec<Vec<String>> = resumes
            .iter()
            .map(|resume| self.processor.word_list(&resume.text))
            .collect();
        let candidate_texts: Vec<String> = word_lists.iter().map(|words| words.join(" ")).collect();
        let semantic_scores = self.score(&job_text, &candidate_texts);

        let matched: Vec<Vec<String>> = word_lists
            .iter()
            .map(|words| matcher.matched_skills(words))
            .collect();
        let max_keyword_score = matched.iter().map(Vec::len).max().unwrap_or(0);

        let mut results: Vec<SimilarityResult> = resumes
            .iter()
            .zip(word_lists.iter())
            .zip(semantic_scores)
            .zip(matched)
            .map(|(((resume, words), semantic_score), matched_skills)| {
                let keyword_score = matched_skills.len();
                let keyword_term = if max_keyword_score == 0 {
                    0.0
                } else {
                    keyword_score as f32 / max_keyword_score as f32
                };
                let combined_score = (self.semantic_weight * semantic_score
                    + (1.0 - self.semantic_weight) * keyword_term)
                    .clamp(0.0, 1.0);

                if words.is_empty() {
                    debug!("Resume '{}' has no readable words", resume.subject_id);
                }

                SimilarityResult {
                    subject_id: resume.subject_id.clone(),
                    keyword_score,
                    semantic_score,
                    combined_score,
                    is_unreadable: words.is_empty(),
                    matched_skills,
                }
            })
            .collect();

        if let Some(k) = top_k {
            sort_descending(&mut results, |r| r.combined_score);
            results.truncate(k);
        }

        debug!(
            "Scored {} resumes against '{}' (max keyword score {})",
            resumes.len(),
            job.title,
            max_keyword_score
        );
        results
    }

    /// Rank `pool` by similarity to `reference`, highest first.
    ///
    /// With `exclude_reference`, pool entries sharing the reference's subject
    /// id are dropped before scoring.
    pub fn rank_candidates_by_similarity(
        &self,
        reference: &ResumeDocument,
        pool: &[ResumeDocument],
        top_k: Option<usize>,
        exclude_reference: bool,
    ) -> Vec<RankedCandidate> {
        let pool: Vec<&ResumeDocument> = pool
            .iter()
            .filter(|candidate| {
                !(exclude_reference && candidate.subject_id == reference.subject_id)
            })
            .collect();

        let texts: Vec<&str> = pool.iter().map(|candidate| candidate.text.as_str()).collect();
        let scores = self.score(&reference.text, &texts);

        let mut ranked: Vec<RankedCandidate> = pool
            .into_iter()
            .zip(scores)
            .map(|(candidate, score)| RankedCandidate {
                subject_id: candidate.subject_id.clone(),
                score,
            })
            .collect();

        sort_descending(&mut ranked, |r| r.score);
        if let Some(k) = top_k {
            ranked.truncate(k);
        }
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> JobDescriptor {
        JobDescriptor {
            title: "Backend Engineer".to_string(),
            position_label: "Engineering".to_string(),
            skill_list: vec!["Python".to_string(), "Django".to_string(), "SQL".to_string()],
            description_text: "Build REST services in Python and Django on top of SQL databases."
                .to_string(),
            description_file: None,
        }
    }

    #[test]
    fn test_job_text_skips_missing_parts() {
        let job = JobDescriptor {
            title: "Data Analyst".to_string(),
            skill_list: vec!["SQL".to_string(), " ".to_string(), "Excel".to_string()],
            ..Default::default()
        };
        assert_eq!(job.to_text(), "Data Analyst SQL, Excel");
        assert_eq!(JobDescriptor::default().to_text(), "");
    }

    #[test]
    fn test_keyword_score_counts_job_skills() {
        let scorer = SimilarityScorer::default();
        let results = scorer.score_against_job(
            &job(),
            &[ResumeDocument::new("r1", "python sql")],
            None,
        );
        assert_eq!(results[0].keyword_score, 2);
        assert_eq!(results[0].matched_skills, vec!["python", "sql"]);
    }

    #[test]
    fn test_unreadable_resume_is_kept_with_zero_scores() {
        let scorer = SimilarityScorer::default();
        let resumes = vec![
            ResumeDocument::new("scanned", ""),
            ResumeDocument::new("good", "Python Django developer with SQL experience"),
        ];
        let results = scorer.score_against_job(&job(), &resumes, Some(10));

        assert_eq!(results.len(), 2);
        let scanned = results.iter().find(|r| r.subject_id == "scanned").unwrap();
        assert!(scanned.is_unreadable);
        assert_eq!(scanned.keyword_score, 0);
        assert_eq!(scanned.semantic_score, 0.0);
        assert_eq!(scanned.combined_score, 0.0);
        assert_eq!(results[0].subject_id, "good");
    }

    #[test]
    fn test_identical_resumes_score_identically() {
        let scorer = SimilarityScorer::default();
        let text = "Python engineer, Django and SQL, five years";
        let resumes = vec![
            ResumeDocument::new("a", text),
            ResumeDocument::new("b", "Graphic designer"),
            ResumeDocument::new("c", text),
        ];
        let results = scorer.score_against_job(&job(), &resumes, None);

        assert_eq!(
            results[0].combined_score.to_bits(),
            results[2].combined_score.to_bits()
        );
        assert_eq!(
            results.iter().map(|r| r.subject_id.as_str()).collect::<Vec<_>>(),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn test_combined_score_blends_keyword_share() {
        let scorer = SimilarityScorer::new(0.0);
        let resumes = vec![
            ResumeDocument::new("all", "python django sql"),
            ResumeDocument::new("one", "python"),
            ResumeDocument::new("none", "cooking"),
        ];
        let results = scorer.score_against_job(&job(), &resumes, None);

        assert_eq!(results[0].combined_score, 1.0);
        assert!((results[1].combined_score - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!(results[2].combined_score, 0.0);
    }

    #[test]
    fn test_no_skill_hits_anywhere_uses_semantic_only() {
        let scorer = SimilarityScorer::new(0.5);
        let resumes = vec![ResumeDocument::new("x", "backend engineer services")];
        let results = scorer.score_against_job(&job(), &resumes, None);

        assert_eq!(results[0].keyword_score, 0);
        assert!((results[0].combined_score - 0.5 * results[0].semantic_score).abs() < 1e-6);
    }

    #[test]
    fn test_top_k_sorts_and_truncates() {
        let scorer = SimilarityScorer::default();
        let resumes = vec![
            ResumeDocument::new("weak", "retail sales associate"),
            ResumeDocument::new("strong", "Backend engineer: Python, Django, SQL services"),
            ResumeDocument::new("medium", "Python scripting"),
        ];
        let results = scorer.score_against_job(&job(), &resumes, Some(2));

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].subject_id, "strong");
        assert_eq!(results[1].subject_id, "medium");
        assert!(results[0].combined_score >= results[1].combined_score);
    }

    #[test]
    fn test_empty_resume_list() {
        let scorer = SimilarityScorer::default();
        assert!(scorer.score_against_job(&job(), &[], Some(3)).is_empty());
    }

    #[test]
    fn test_rank_candidates_excludes_reference_when_asked() {
        let scorer = SimilarityScorer::default();
        let reference = ResumeDocument::new("me", "rust tokio async services");
        let pool = vec![
            ResumeDocument::new("me", "rust tokio async services"),
            ResumeDocument::new("close", "rust async services"),
            ResumeDocument::new("far", "watercolor painting"),
        ];

        let ranked = scorer.rank_candidates_by_similarity(&reference, &pool, None, true);
        assert_eq!(
            ranked.iter().map(|r| r.subject_id.as_str()).collect::<Vec<_>>(),
            vec!["close", "far"]
        );

        let with_self = scorer.rank_candidates_by_similarity(&reference, &pool, Some(1), false);
        assert_eq!(with_self.len(), 1);
        assert_eq!(with_self[0].subject_id, "me");
        assert!((with_self[0].score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_weight_is_clamped() {
        assert_eq!(SimilarityScorer::new(3.0).semantic_weight(), 1.0);
        assert_eq!(SimilarityScorer::new(f32::NAN).semantic_weight(), DEFAULT_SEMANTIC_WEIGHT);
    }
}
