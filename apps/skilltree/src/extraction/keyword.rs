//! Keyword Matcher: pure-Rust lexicon scan used when the AI path is unavailable
//! or leaves a category uncovered.
//!
//! Algorithm:
//! 1. Normalize the document (case-fold, collapse whitespace).
//! 2. For every lexicon entry, count the distinct variants that occur at a word boundary.
//! 3. confidence = base + per_extra_variant × (distinct − 1), capped at 1.0.
//!
//! One record per (category, skill); deterministic for identical text and lexicon.

use std::sync::Arc;

use async_trait::async_trait;

use crate::extraction::coordinator::{Extraction, SkillExtractor};
use crate::extraction::lexicon::Lexicon;
use crate::extraction::models::{normalize, Category, ExtractionError, SkillRecord, Source};

/// Tunable keyword confidence constants. Only the monotonicity matters:
/// more distinct variants never lowers a skill's confidence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchScoring {
    pub base: f64,
    pub per_extra_variant: f64,
}

impl Default for MatchScoring {
    fn default() -> Self {
        Self {
            base: 0.4,
            per_extra_variant: 0.15,
        }
    }
}

impl MatchScoring {
    pub fn confidence(&self, distinct_variants: usize) -> f64 {
        if distinct_variants == 0 {
            return 0.0;
        }
        let extra = (distinct_variants - 1) as f64;
        (self.base + self.per_extra_variant * extra).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    lexicon: Arc<Lexicon>,
    scoring: MatchScoring,
}

impl KeywordMatcher {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self {
            lexicon,
            scoring: MatchScoring::default(),
        }
    }

    pub fn with_scoring(mut self, scoring: MatchScoring) -> Self {
        self.scoring = scoring;
        self
    }

    /// Scans every category.
    pub fn scan(&self, text: &str) -> Result<Vec<SkillRecord>, ExtractionError> {
        self.scan_categories(text, &Category::ALL)
    }

    /// Scans only the given categories. Output order follows the lexicon.
    pub fn scan_categories(
        &self,
        text: &str,
        categories: &[Category],
    ) -> Result<Vec<SkillRecord>, ExtractionError> {
        if text.trim().is_empty() {
            return Err(ExtractionError::EmptyInput);
        }
        let haystack = normalize(text);

        let records = self
            .lexicon
            .iter()
            .filter(|(category, _)| categories.contains(category))
            .filter_map(|(category, entry)| {
                let mut matched: Vec<&str> = entry
                    .variants
                    .iter()
                    .map(String::as_str)
                    .filter(|variant| contains_word(&haystack, variant))
                    .collect();
                if matched.is_empty() {
                    return None;
                }
                matched.sort_unstable();

                let confidence = self.scoring.confidence(matched.len());
                Some(
                    SkillRecord::new(category, &entry.name, confidence, Source::Keyword)
                        .with_evidence(matched)
                        .with_group(entry.group.clone()),
                )
            })
            .collect();

        Ok(records)
    }
}

#[async_trait]
impl SkillExtractor for KeywordMatcher {
    async fn extract(&self, text: &str) -> Result<Extraction, ExtractionError> {
        let records = self.scan(text)?;
        Ok(Extraction {
            records,
            covered: Category::ALL.into_iter().collect(),
        })
    }
}

/// True when `needle` occurs in `haystack` with no alphanumeric character
/// directly on either side. Occurrences may overlap a rejected one.
fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    let mut from = 0;
    while let Some(offset) = haystack[from..].find(needle) {
        let start = from + offset;
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        if !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric) {
            return true;
        }
        // Resume one character in so a self-overlapping variant is not skipped.
        from = start + haystack[start..].chars().next().map_or(1, char::len_utf8);
    }
    false
}
