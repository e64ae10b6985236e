use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The closed set of top-level skill categories, in display order.
///
/// `Ord` follows display order, so a `BTreeMap<Category, _>` iterates the
/// categories the way the tree renders them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Technical,
    #[serde(rename = "Soft Skills")]
    SoftSkills,
    Domains,
    Certifications,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Technical,
        Category::SoftSkills,
        Category::Domains,
        Category::Certifications,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Technical => "Technical",
            Category::SoftSkills => "Soft Skills",
            Category::Domains => "Domains",
            Category::Certifications => "Certifications",
        }
    }

    /// Stable identifier used as the category node id and as the prefix of skill ids.
    pub fn slug(self) -> &'static str {
        match self {
            Category::Technical => "technical",
            Category::SoftSkills => "soft-skills",
            Category::Domains => "domains",
            Category::Certifications => "certifications",
        }
    }

    /// Resolves a loosely-written category key (`soft_skills`, `Soft Skills`,
    /// `softskills`) to a category. Returns `None` for anything outside the set.
    pub fn from_key(key: &str) -> Option<Category> {
        let squashed: String = key
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match squashed.as_str() {
            "technical" | "technicalskills" => Some(Category::Technical),
            "softskills" => Some(Category::SoftSkills),
            "domains" | "domainexpertise" => Some(Category::Domains),
            "certifications" => Some(Category::Certifications),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Which extraction strategy produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Ai,
    Keyword,
}

/// Self-reported proficiency attached by the AI path when the response carries one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Proficiency {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Proficiency {
    pub fn parse(raw: &str) -> Option<Proficiency> {
        match raw.trim().to_lowercase().as_str() {
            "beginner" => Some(Proficiency::Beginner),
            "intermediate" => Some(Proficiency::Intermediate),
            "advanced" => Some(Proficiency::Advanced),
            "expert" => Some(Proficiency::Expert),
            _ => None,
        }
    }
}

/// One extracted skill, before deduplication.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillRecord {
    pub category: Category,
    /// Display label: trimmed, whitespace collapsed, original casing.
    pub name: String,
    /// Always within [0, 1].
    pub confidence: f64,
    pub evidence: Vec<String>,
    pub source: Source,
    pub group: Option<String>,
    pub level: Option<Proficiency>,
}

impl SkillRecord {
    pub fn new(category: Category, name: &str, confidence: f64, source: Source) -> Self {
        Self {
            category,
            name: collapse_whitespace(name),
            confidence: clamp_confidence(confidence),
            evidence: Vec::new(),
            source,
            group: None,
            level: None,
        }
    }

    pub fn with_evidence<I, S>(mut self, evidence: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.evidence = evidence.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_group(mut self, group: Option<String>) -> Self {
        self.group = group;
        self
    }

    /// Case-folded comparison key.
    pub fn normalized_name(&self) -> String {
        normalize(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractionError {
    #[error("AI extraction unavailable: no credential configured")]
    Unavailable,

    #[error("AI transport failed: {0}")]
    Transport(String),

    #[error("AI response malformed: {0}")]
    MalformedResponse(String),

    #[error("no usable text to extract skills from")]
    EmptyInput,
}

/// Trims and collapses internal whitespace runs to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Comparison form of a label or document: case-folded with whitespace collapsed.
pub fn normalize(text: &str) -> String {
    collapse_whitespace(&text.to_lowercase())
}

/// Clamps to [0, 1]; NaN becomes 0.
pub fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
