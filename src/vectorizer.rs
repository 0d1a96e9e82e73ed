//! Tokenizer/vectorizer collaborator
//!
//! Turns text into a term-count matrix: rows are input strings, columns are
//! the distinct vocabulary terms left after stopword filtering. The engine
//! only depends on the [`Vectorizer`] trait; [`CountVectorizer`] is the
//! default implementation injected by the CLI.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::VectorizeError;

/// Tokens are runs of two or more word characters, lower-cased.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("valid token regex"));

/// Common English words excluded from every vocabulary.
const ENGLISH_STOPWORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are", "aren",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "cannot", "could", "couldn", "did", "didn", "do", "does", "doesn", "doing",
    "don", "down", "during", "each", "few", "for", "from", "further", "had", "hadn", "has",
    "hasn", "have", "haven", "having", "he", "her", "here", "hers", "herself", "him", "himself",
    "his", "how", "if", "in", "into", "is", "isn", "it", "its", "itself", "just", "me", "more",
    "most", "mustn", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once",
    "only", "or", "other", "ought", "our", "ours", "ourselves", "out", "over", "own", "re",
    "same", "shan", "she", "should", "shouldn", "so", "some", "such", "than", "that", "the",
    "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this", "those",
    "through", "to", "too", "under", "until", "up", "very", "was", "wasn", "we", "were", "weren",
    "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with", "won",
    "would", "wouldn", "you", "your", "yours", "yourself", "yourselves",
];

/// Term-count matrix over a batch of input strings.
///
/// Rows follow the input order; columns are the sorted vocabulary. The
/// engine mostly consumes column totals, since train calls vectorize one
/// string at a time.
#[derive(Debug, Clone)]
pub struct TermMatrix {
    terms: Vec<String>,
    counts: Vec<Vec<u64>>,
}

impl TermMatrix {
    /// The column vocabulary, in sorted order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    pub fn vocabulary_len(&self) -> usize {
        self.terms.len()
    }

    /// Total occurrences of `term` across all rows; 0 for unknown terms.
    pub fn total(&self, term: &str) -> u64 {
        match self.terms.binary_search_by(|t| t.as_str().cmp(term)) {
            Ok(col) => self.counts.iter().map(|row| row[col]).sum(),
            Err(_) => 0,
        }
    }
}

/// Capability to turn text into a term-count matrix.
pub trait Vectorizer {
    /// Build the vocabulary over `docs` and count term occurrences.
    /// Fails with [`VectorizeError::EmptyVocabulary`] when no usable terms
    /// remain after filtering.
    fn fit_transform(&self, docs: &[&str]) -> Result<TermMatrix, VectorizeError>;
}

/// Default vectorizer: lower-cases, tokenizes on word boundaries, drops
/// English stopwords and too-short tokens, counts occurrences.
pub struct CountVectorizer {
    stopwords: HashSet<String>,
    min_token_len: usize,
}

impl CountVectorizer {
    pub fn new() -> Self {
        Self {
            stopwords: ENGLISH_STOPWORDS.iter().map(|w| w.to_string()).collect(),
            min_token_len: 2,
        }
    }

    /// Extend the stopword set and adjust the minimum token length.
    pub fn with_options(extra_stopwords: &[String], min_token_len: usize) -> Self {
        let mut vectorizer = Self::new();
        vectorizer.min_token_len = min_token_len.max(2);
        vectorizer
            .stopwords
            .extend(extra_stopwords.iter().map(|w| w.to_lowercase()));
        vectorizer
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        TOKEN_RE
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .filter(|t| t.len() >= self.min_token_len && !self.stopwords.contains(t))
            .collect()
    }
}

impl Default for CountVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Vectorizer for CountVectorizer {
    fn fit_transform(&self, docs: &[&str]) -> Result<TermMatrix, VectorizeError> {
        let tokenized: Vec<Vec<String>> = docs.iter().map(|doc| self.tokenize(doc)).collect();

        // Sorted vocabulary over all rows; per-term counts per row.
        let vocabulary: BTreeSet<&str> = tokenized.iter().flatten().map(String::as_str).collect();
        if vocabulary.is_empty() {
            return Err(VectorizeError::EmptyVocabulary);
        }

        let terms: Vec<String> = vocabulary.iter().map(|t| t.to_string()).collect();
        let col: BTreeMap<&str, usize> = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.as_str(), i))
            .collect();

        let mut counts = vec![vec![0u64; terms.len()]; docs.len()];
        for (row, tokens) in tokenized.iter().enumerate() {
            for token in tokens {
                counts[row][col[token.as_str()]] += 1;
            }
        }

        Ok(TermMatrix { terms, counts })
    }
}
