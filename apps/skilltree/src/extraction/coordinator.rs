#![allow(dead_code)]
//! Extraction Coordinator: picks the extraction strategy once per run and
//! turns every AI failure into the keyword fallback.
//!
//! Sources may differ across categories (AI-covered vs keyword-filled) but
//! never within one category.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::extraction::keyword::KeywordMatcher;
use crate::extraction::models::{Category, ExtractionError, SkillRecord};

/// Output of one extraction strategy.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub records: Vec<SkillRecord>,
    /// Categories the strategy spoke for, including ones where it found nothing.
    pub covered: BTreeSet<Category>,
}

/// The extraction capability shared by the AI adapter and the keyword matcher.
#[async_trait]
pub trait SkillExtractor: Send + Sync {
    async fn extract(&self, text: &str) -> Result<Extraction, ExtractionError>;
}

/// Strategy chosen for a run. Evaluated once, before any extraction happens.
#[derive(Clone)]
pub enum ExtractionStrategy {
    Ai(Arc<dyn SkillExtractor>),
    Keyword,
}

impl ExtractionStrategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            ExtractionStrategy::Ai(_) => StrategyKind::Ai,
            ExtractionStrategy::Keyword => StrategyKind::Keyword,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Ai,
    Keyword,
}

/// Records plus how they were obtained.
#[derive(Debug, Clone)]
pub struct ExtractionReport {
    pub records: Vec<SkillRecord>,
    /// The strategy whose output was used. `Keyword` after a discarded AI attempt.
    pub strategy: StrategyKind,
    /// Why the AI attempt was discarded, if it was.
    pub fallback: Option<ExtractionError>,
}

pub struct ExtractionCoordinator {
    keyword: KeywordMatcher,
    ai: Option<Arc<dyn SkillExtractor>>,
}

impl ExtractionCoordinator {
    /// `ai` is `None` when no credential is configured.
    pub fn new(keyword: KeywordMatcher, ai: Option<Arc<dyn SkillExtractor>>) -> Self {
        Self { keyword, ai }
    }

    pub fn select_strategy(&self) -> ExtractionStrategy {
        match &self.ai {
            Some(extractor) => ExtractionStrategy::Ai(Arc::clone(extractor)),
            None => ExtractionStrategy::Keyword,
        }
    }

    pub async fn run(&self, text: &str) -> Result<Vec<SkillRecord>, ExtractionError> {
        self.run_detailed(text).await.map(|report| report.records)
    }

    /// Fails only with `EmptyInput`; every other error becomes the keyword fallback.
    pub async fn run_detailed(&self, text: &str) -> Result<ExtractionReport, ExtractionError> {
        if text.trim().is_empty() {
            return Err(ExtractionError::EmptyInput);
        }

        let strategy = self.select_strategy();
        debug!("Extraction strategy: {:?}", strategy.kind());

        let extractor = match strategy {
            ExtractionStrategy::Keyword => {
                return self.keyword_only(text, None);
            }
            ExtractionStrategy::Ai(extractor) => extractor,
        };

        match extractor.extract(text).await {
            Ok(extraction) => self.fill_uncovered(text, extraction),
            Err(ExtractionError::EmptyInput) => Err(ExtractionError::EmptyInput),
            Err(err) => {
                if err == ExtractionError::Unavailable {
                    info!("{err}; using keyword matching");
                } else {
                    warn!("{err}; falling back to keyword matching");
                }
                self.keyword_only(text, Some(err))
            }
        }
    }

    fn keyword_only(
        &self,
        text: &str,
        fallback: Option<ExtractionError>,
    ) -> Result<ExtractionReport, ExtractionError> {
        Ok(ExtractionReport {
            records: self.keyword.scan(text)?,
            strategy: StrategyKind::Keyword,
            fallback,
        })
    }

    /// Keeps AI output for every category it covered and keyword-scans the rest.
    fn fill_uncovered(
        &self,
        text: &str,
        extraction: Extraction,
    ) -> Result<ExtractionReport, ExtractionError> {
        let Extraction {
            mut records,
            mut covered,
        } = extraction;
        covered.extend(records.iter().map(|r| r.category));

        let uncovered: Vec<Category> = Category::ALL
            .into_iter()
            .filter(|c| !covered.contains(c))
            .collect();

        if !uncovered.is_empty() {
            let names: Vec<&str> = uncovered.iter().map(|c| c.display_name()).collect();
            warn!(
                "AI response did not cover [{}]; filling with keyword matching",
                names.join(", ")
            );
            records.extend(self.keyword.scan_categories(text, &uncovered)?);
        }

        Ok(ExtractionReport {
            records,
            strategy: StrategyKind::Ai,
            fallback: None,
        })
    }
}
