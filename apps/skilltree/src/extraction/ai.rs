//! AI Extractor Adapter: builds the extraction prompt, hands it to a
//! `ChatTransport`, and validates the JSON that comes back.
//!
//! The adapter never talks HTTP itself. Failures are classified into
//! `ExtractionError` so the coordinator can route to the keyword fallback.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::extraction::coordinator::{Extraction, SkillExtractor};
use crate::extraction::models::{
    normalize, Category, ExtractionError, Proficiency, SkillRecord, Source,
};
use crate::extraction::prompts::{SKILL_EXTRACT_PROMPT_TEMPLATE, SKILL_EXTRACT_SYSTEM};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{strip_json_fences, ChatTransport, LlmError};

/// Confidence for AI records that do not report their own.
const DEFAULT_AI_CONFIDENCE: f64 = 1.0;

pub struct AiExtractor {
    /// `None` when no credential is configured.
    transport: Option<Arc<dyn ChatTransport>>,
    deadline: Duration,
}

impl AiExtractor {
    pub fn new(transport: Option<Arc<dyn ChatTransport>>, deadline: Duration) -> Self {
        Self {
            transport,
            deadline,
        }
    }

    pub fn is_available(&self) -> bool {
        self.transport.is_some()
    }
}

#[async_trait]
impl SkillExtractor for AiExtractor {
    async fn extract(&self, text: &str) -> Result<Extraction, ExtractionError> {
        let transport = self.transport.as_ref().ok_or(ExtractionError::Unavailable)?;
        if text.trim().is_empty() {
            return Err(ExtractionError::EmptyInput);
        }

        let system = format!("{SKILL_EXTRACT_SYSTEM} {JSON_ONLY_SYSTEM}");
        let prompt = build_prompt(text);

        let body = match tokio::time::timeout(self.deadline, transport.complete(&system, &prompt)).await
        {
            Ok(result) => result.map_err(classify)?,
            Err(_) => return Err(classify(LlmError::Timeout(self.deadline))),
        };

        let extraction = parse_response(&body)?;
        debug!(
            "AI extraction produced {} records covering {} categories",
            extraction.records.len(),
            extraction.covered.len()
        );
        Ok(extraction)
    }
}

pub fn build_prompt(text: &str) -> String {
    SKILL_EXTRACT_PROMPT_TEMPLATE.replace("{resume_text}", text.trim())
}

fn classify(err: LlmError) -> ExtractionError {
    match err {
        LlmError::EmptyContent => ExtractionError::MalformedResponse(err.to_string()),
        LlmError::Http(_)
        | LlmError::Api { .. }
        | LlmError::RateLimited { .. }
        | LlmError::Timeout(_) => ExtractionError::Transport(err.to_string()),
    }
}

/// Parses the model's JSON into records.
///
/// A body that is not JSON, or has no `skills` object, fails as a whole.
/// A single category with an invalid shape is left uncovered instead, but a
/// response that covers no category at all is malformed.
pub fn parse_response(body: &str) -> Result<Extraction, ExtractionError> {
    let root: Value = serde_json::from_str(strip_json_fences(body))
        .map_err(|e| ExtractionError::MalformedResponse(format!("response is not JSON: {e}")))?;

    let skills = root
        .get("skills")
        .and_then(Value::as_object)
        .ok_or_else(|| {
            ExtractionError::MalformedResponse("response has no `skills` object".to_string())
        })?;

    let levels = parse_levels(root.get("experience_levels"));

    let mut extraction = Extraction::default();
    let mut rejected = BTreeSet::new();

    for (key, value) in skills {
        let Some(category) = Category::from_key(key) else {
            warn!("Dropping unrecognized AI skill category '{key}'");
            continue;
        };
        match parse_category(category, value, &levels) {
            Ok(records) => {
                extraction.covered.insert(category);
                extraction.records.extend(records);
            }
            Err(reason) => {
                warn!("AI output for {category} is malformed ({reason}); leaving it uncovered");
                rejected.insert(category);
            }
        }
    }

    if extraction.covered.is_empty() {
        let reason = if rejected.is_empty() {
            "response names no known skill category"
        } else {
            "no skill category could be parsed"
        };
        return Err(ExtractionError::MalformedResponse(reason.to_string()));
    }

    Ok(extraction)
}

fn parse_levels(value: Option<&Value>) -> HashMap<String, Proficiency> {
    value
        .and_then(Value::as_object)
        .map(|levels| {
            levels
                .iter()
                .filter_map(|(skill, level)| {
                    let level = Proficiency::parse(level.as_str()?)?;
                    Some((normalize(skill), level))
                })
                .collect()
        })
        .unwrap_or_default()
}

fn parse_category(
    category: Category,
    value: &Value,
    levels: &HashMap<String, Proficiency>,
) -> Result<Vec<SkillRecord>, String> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => parse_items(category, None, items, levels),
        Value::Object(groups) => parse_groups(category, groups, levels),
        other => Err(format!("expected a list or an object of lists, got {}", kind(other))),
    }
}

fn parse_groups(
    category: Category,
    groups: &Map<String, Value>,
    levels: &HashMap<String, Proficiency>,
) -> Result<Vec<SkillRecord>, String> {
    let mut records = Vec::new();
    for (group_key, value) in groups {
        let items = match value {
            Value::Array(items) => items,
            Value::Null => continue,
            other => return Err(format!("group '{group_key}' is {}, not a list", kind(other))),
        };
        let group = humanize(group_key);
        records.extend(parse_items(category, Some(group), items, levels)?);
    }
    Ok(records)
}

fn parse_items(
    category: Category,
    group: Option<String>,
    items: &[Value],
    levels: &HashMap<String, Proficiency>,
) -> Result<Vec<SkillRecord>, String> {
    let mut records = Vec::with_capacity(items.len());
    for item in items {
        let (name, confidence) = match item {
            Value::String(name) => (name.as_str(), None),
            Value::Object(fields) => {
                let name = fields
                    .get("name")
                    .and_then(Value::as_str)
                    .ok_or("skill object without a string `name`")?;
                let confidence = fields
                    .get("confidence")
                    .and_then(Value::as_f64)
                    .filter(|c| c.is_finite());
                (name, confidence)
            }
            other => return Err(format!("skill item is {}", kind(other))),
        };
        if name.trim().is_empty() {
            continue;
        }

        let mut record = SkillRecord::new(
            category,
            name,
            confidence.unwrap_or(DEFAULT_AI_CONFIDENCE),
            Source::Ai,
        )
        .with_group(group.clone());
        record.evidence = vec![record.name.clone()];
        record.level = levels.get(&record.normalized_name()).copied();
        records.push(record);
    }
    Ok(records)
}

/// `programming_languages` → `Programming Languages`
fn humanize(key: &str) -> String {
    key.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
