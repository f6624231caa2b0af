//! Candidate ranking.
//!
//! Scores search results against the query with a deterministic heuristic
//! tuned for olympiad problem lookups ("IMO 2024 problem 5"): keyword hits,
//! a problem number, a year, a short title and plain token overlap.

use crate::search::Candidate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Phrases that mark a video as olympiad content.
const KEYWORDS: [&str; 2] = ["imo", "international mathematical olympiad"];

/// Weights for each scoring signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Keyword phrase found in the title.
    pub keyword_title: f64,
    /// Keyword phrase found in the description.
    pub keyword_description: f64,
    /// "problem N" found in the title.
    pub problem_phrase: f64,
    /// N found as a standalone token in the title.
    pub problem_number: f64,
    /// "pN" found in the title.
    pub problem_short: f64,
    /// "#N" found in the title.
    pub problem_hash: f64,
    /// Query year found in the title.
    pub year_title: f64,
    /// Query year found in the description.
    pub year_description: f64,
    /// Bonus for a zero-length title; decays linearly to zero.
    pub brevity_max: f64,
    /// Title length (in characters) that costs one point of brevity bonus.
    pub brevity_chars_per_point: f64,
    /// Per distinct query token found in the title.
    pub token_overlap: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            keyword_title: 4.0,
            keyword_description: 1.0,
            problem_phrase: 4.0,
            problem_number: 1.0,
            problem_short: 1.0,
            problem_hash: 1.0,
            year_title: 3.0,
            year_description: 1.0,
            brevity_max: 3.0,
            brevity_chars_per_point: 50.0,
            token_overlap: 0.3,
        }
    }
}

/// A candidate paired with its score. Only lives inside a ranking pass.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub score: f64,
}

/// Scores and orders search candidates.
pub struct Ranker {
    weights: ScoringWeights,
    problem_regex: Regex,
    year_regex: Regex,
    token_regex: Regex,
}

impl Ranker {
    /// Create a ranker with the default weights.
    pub fn new() -> Self {
        Self::with_weights(ScoringWeights::default())
    }

    /// Create a ranker with custom weights.
    pub fn with_weights(weights: ScoringWeights) -> Self {
        Self {
            weights,
            problem_regex: Regex::new(r"problem\s*(\d+)").expect("Invalid regex"),
            year_regex: Regex::new(r"(19|20)\d{2}").expect("Invalid regex"),
            token_regex: Regex::new(r"[a-z0-9]+").expect("Invalid regex"),
        }
    }

    /// The weights this ranker scores with.
    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score one candidate's title and description against the query. Higher is better.
    pub fn score(&self, title: &str, description: &str, query: &str) -> f64 {
        let w = &self.weights;
        let t = title.to_lowercase();
        let d = description.to_lowercase();
        let q = query.to_lowercase();
        let mut score = 0.0;

        for kw in KEYWORDS {
            if t.contains(kw) {
                score += w.keyword_title;
            }
            if d.contains(kw) {
                score += w.keyword_description;
            }
        }

        if let Some(p) = self.problem_regex.captures(&q).and_then(|c| c.get(1)) {
            let p = p.as_str();
            if t.contains(&format!("problem {}", p)) {
                score += w.problem_phrase;
            }
            if contains_word(&t, p) {
                score += w.problem_number;
            }
            if t.contains(&format!("p{}", p)) {
                score += w.problem_short;
            }
            if t.contains(&format!("#{}", p)) {
                score += w.problem_hash;
            }
        }

        if let Some(year) = self.year_regex.find(&q) {
            let year = year.as_str();
            if t.contains(year) {
                score += w.year_title;
            }
            if d.contains(year) {
                score += w.year_description;
            }
        }

        let title_len = title.chars().count() as f64;
        score += (w.brevity_max - title_len / w.brevity_chars_per_point).max(0.0);

        let tokens: BTreeSet<&str> = self.token_regex.find_iter(&q).map(|m| m.as_str()).collect();
        for token in tokens {
            if t.contains(token) {
                score += w.token_overlap;
            }
        }

        score
    }

    /// Score every candidate, keeping source order.
    pub fn score_all(&self, candidates: &[Candidate], query: &str) -> Vec<ScoredCandidate> {
        candidates
            .iter()
            .map(|c| ScoredCandidate {
                candidate: c.clone(),
                score: self.score(&c.title, &c.description, query),
            })
            .collect()
    }

    /// Order candidates by descending score. Equal scores keep their source order.
    pub fn rank(&self, candidates: &[Candidate], query: &str) -> Vec<Candidate> {
        let mut scored = self.score_all(candidates, query);
        // sort_by is stable
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.into_iter().map(|s| s.candidate).collect()
    }

    /// The highest-scoring candidate, or `None` when there are no candidates.
    pub fn pick_best(&self, candidates: &[Candidate], query: &str) -> Option<Candidate> {
        self.rank(candidates, query).into_iter().next()
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `word` occurs in `text` with no word character on either side.
fn contains_word(text: &str, word: &str) -> bool {
    let is_word_char = |c: char| c.is_alphanumeric() || c == '_';

    text.match_indices(word).any(|(start, matched)| {
        let before = text[..start].chars().next_back();
        let after = text[start + matched.len()..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}
