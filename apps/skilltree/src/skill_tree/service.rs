//! Pipeline glue: text → coordinator → taxonomy builder → response.
//! Each call is independent; nothing is shared between runs except the
//! read-only lexicon inside the coordinator.

use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::{ExtractionCoordinator, StrategyKind};
use crate::taxonomy::{self, SkillTree};

#[derive(Debug, Serialize)]
pub struct SkillTreeResponse {
    pub tree: SkillTree,
    pub strategy: StrategyKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

pub async fn generate_skill_tree(
    coordinator: &ExtractionCoordinator,
    text: &str,
) -> Result<SkillTreeResponse, AppError> {
    let report = coordinator.run_detailed(text).await?;
    let tree = taxonomy::build(report.records);

    info!(
        "Built skill tree: {} categories, {} skills (strategy: {:?})",
        tree.categories.len(),
        tree.skill_count(),
        report.strategy
    );

    Ok(SkillTreeResponse {
        tree,
        strategy: report.strategy,
        fallback_reason: report.fallback.map(|e| e.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::extraction::models::{Category, Source};
    use crate::extraction::{AiExtractor, KeywordMatcher, Lexicon, SkillExtractor};
    use crate::llm_client::{ChatTransport, LlmError};

    const RESUME: &str = "Led Python and Go microservices; mentored 3 engineers; AWS certified.";

    struct FixedReply(Result<&'static str, u16>);

    #[async_trait]
    impl ChatTransport for FixedReply {
        async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, LlmError> {
            match self.0 {
                Ok(body) => Ok(body.to_string()),
                Err(status) => Err(LlmError::Api {
                    status,
                    message: "upstream unavailable".to_string(),
                }),
            }
        }
    }

    fn keyword() -> KeywordMatcher {
        KeywordMatcher::new(Arc::new(Lexicon::builtin()))
    }

    fn coordinator_with(reply: Option<FixedReply>) -> ExtractionCoordinator {
        let ai = reply.map(|r| {
            Arc::new(AiExtractor::new(Some(Arc::new(r)), Duration::from_secs(30)))
                as Arc<dyn SkillExtractor>
        });
        ExtractionCoordinator::new(keyword(), ai)
    }

    #[tokio::test]
    async fn test_keyword_only_tree_for_resume_example() {
        let response = generate_skill_tree(&coordinator_with(None), RESUME)
            .await
            .unwrap();

        assert_eq!(response.strategy, StrategyKind::Keyword);
        assert!(response.fallback_reason.is_none());

        let tree = &response.tree;
        let technical = tree.category(Category::Technical).unwrap();
        let labels: Vec<&str> = technical.children.iter().map(|n| n.label.as_str()).collect();
        for expected in ["Python", "Go", "AWS"] {
            assert!(labels.contains(&expected), "missing {expected} in {labels:?}");
        }
        assert!(tree.category(Category::SoftSkills).is_some());
        assert!(tree.category(Category::Certifications).is_some());

        for category in &tree.categories {
            let weights: Vec<f64> = category.children.iter().map(|n| n.weight).collect();
            assert!(weights.windows(2).all(|w| w[0] >= w[1]));
        }
    }

    #[tokio::test]
    async fn test_ai_missing_certifications_fills_them_from_keywords() {
        let reply = FixedReply(Ok(r#"{"skills": {
            "technical": {"programming_languages": ["Python", "Go"], "cloud_platforms": ["AWS"]},
            "soft_skills": ["Mentoring", "Leadership"],
            "domains": ["Distributed Systems"]
        }}"#));
        let response = generate_skill_tree(&coordinator_with(Some(reply)), RESUME)
            .await
            .unwrap();

        assert_eq!(response.strategy, StrategyKind::Ai);
        let tree = &response.tree;
        let certs = tree.category(Category::Certifications).unwrap();
        assert!(certs.children.iter().all(|n| n.source == Source::Keyword));
        for category in [Category::Technical, Category::SoftSkills, Category::Domains] {
            let node = tree.category(category).unwrap();
            assert!(node.children.iter().all(|n| n.source == Source::Ai));
        }
    }

    #[tokio::test]
    async fn test_failing_ai_matches_keyword_only_tree() {
        let fallback = generate_skill_tree(&coordinator_with(Some(FixedReply(Err(503)))), RESUME)
            .await
            .unwrap();
        let keyword_only = generate_skill_tree(&coordinator_with(None), RESUME)
            .await
            .unwrap();

        assert_eq!(fallback.tree, keyword_only.tree);
        assert_eq!(fallback.strategy, StrategyKind::Keyword);
        assert!(fallback.fallback_reason.unwrap().contains("503"));
    }

    #[tokio::test]
    async fn test_empty_ai_skills_reports_keyword_fallback() {
        let reply = FixedReply(Ok(r#"{"skills": {}}"#));
        let response = generate_skill_tree(&coordinator_with(Some(reply)), RESUME)
            .await
            .unwrap();
        let keyword_only = generate_skill_tree(&coordinator_with(None), RESUME)
            .await
            .unwrap();

        assert_eq!(response.strategy, StrategyKind::Keyword);
        assert!(response.fallback_reason.is_some());
        assert_eq!(response.tree, keyword_only.tree);
    }

    #[tokio::test]
    async fn test_identical_ai_responses_serialize_identically() {
        let body = r#"{"skills": {"technical": ["Rust", "rust", "Tokio"], "soft_skills": [],
            "domains": [], "certifications": []}}"#;
        let first = generate_skill_tree(&coordinator_with(Some(FixedReply(Ok(body)))), "Rust dev")
            .await
            .unwrap();
        let second = generate_skill_tree(&coordinator_with(Some(FixedReply(Ok(body)))), "Rust dev")
            .await
            .unwrap();

        assert_eq!(
            serde_json::to_string(&first.tree).unwrap(),
            serde_json::to_string(&second.tree).unwrap()
        );
        assert_eq!(first.tree.skill_count(), 2);
        assert_eq!(first.tree.categories.len(), 1);
    }

    #[tokio::test]
    async fn test_blank_text_is_rejected() {
        let err = generate_skill_tree(&coordinator_with(None), "   ").await.unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }

    #[tokio::test]
    async fn test_response_json_shape() {
        let response = generate_skill_tree(&coordinator_with(None), RESUME)
            .await
            .unwrap();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["strategy"], "keyword");
        assert!(json.get("fallback_reason").is_none());
        assert_eq!(json["tree"]["categories"][0]["name"], "Technical");
    }
}
