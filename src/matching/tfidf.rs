//! TF-IDF vectors and cosine similarity over a per-call corpus

use crate::processing::patterns::WORD_RE;
use std::collections::{BTreeMap, BTreeSet};

type TermVector = BTreeMap<String, f64>;

/// Word-character runs, lowercased.
pub fn tokenize(text: &str) -> Vec<String> {
    WORD_RE
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Smoothed inverse document frequency: ln((N + 1) / (df + 1)) + 1.
pub fn idf(corpus_size: usize, document_frequency: usize) -> f64 {
    ((corpus_size as f64 + 1.0) / (document_frequency as f64 + 1.0)).ln() + 1.0
}

fn document_frequencies(documents: &[Vec<String>]) -> BTreeMap<&str, usize> {
    let mut frequencies = BTreeMap::new();
    for tokens in documents {
        let distinct: BTreeSet<&str> = tokens.iter().map(String::as_str).collect();
        for term in distinct {
            *frequencies.entry(term).or_insert(0) += 1;
        }
    }
    frequencies
}

fn vectorize(
    tokens: &[String],
    frequencies: &BTreeMap<&str, usize>,
    corpus_size: usize,
) -> TermVector {
    if tokens.is_empty() {
        return TermVector::new();
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }

    let length = tokens.len() as f64;
    counts
        .into_iter()
        .map(|(term, count)| {
            let df = frequencies.get(term).copied().unwrap_or(0);
            (term.to_string(), count as f64 / length * idf(corpus_size, df))
        })
        .collect()
}

fn norm(vector: &TermVector) -> f64 {
    vector.values().map(|w| w * w).sum::<f64>().sqrt()
}

pub fn cosine_similarity(a: &TermVector, b: &TermVector) -> f64 {
    let denominator = norm(a) * norm(b);
    if denominator == 0.0 {
        return 0.0;
    }

    let dot: f64 = a
        .iter()
        .filter_map(|(term, weight)| b.get(term).map(|other| weight * other))
        .sum();

    (dot / denominator).clamp(0.0, 1.0)
}

/// Similarity of `query` to each candidate, in candidate order.
///
/// Document frequencies are computed over the query plus all candidates, so
/// scores are only comparable within one call.
pub fn score<S: AsRef<str>>(query: &str, candidates: &[S]) -> Vec<f32> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let query_tokens = tokenize(query);
    if query_tokens.is_empty() {
        return vec![0.0; candidates.len()];
    }

    let documents: Vec<Vec<String>> = std::iter::once(query_tokens)
        .chain(candidates.iter().map(|c| tokenize(c.as_ref())))
        .collect();
    let frequencies = document_frequencies(&documents);
    let corpus_size = documents.len();

    let query_vector = vectorize(&documents[0], &frequencies, corpus_size);
    documents[1..]
        .iter()
        .map(|tokens| {
            let candidate_vector = vectorize(tokens, &frequencies, corpus_size);
            cosine_similarity(&query_vector, &candidate_vector) as f32
        })
        .collect()
}
