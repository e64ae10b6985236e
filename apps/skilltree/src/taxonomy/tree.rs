#![allow(dead_code)]
use serde::Serialize;
use uuid::Uuid;

use crate::extraction::models::{Category, Proficiency, Source};

/// Namespace for v5 skill ids. Changing it changes every id ever emitted.
const SKILL_ID_NAMESPACE: Uuid = Uuid::from_u128(0x6d1f_0b7e_52c4_4f0a_9a38_3c5e_d2a1_7b90);

/// Root of the generated tree. The engine's only output.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SkillTree {
    /// Populated categories only, in `Category` order.
    pub categories: Vec<CategoryNode>,
}

impl SkillTree {
    pub fn category(&self, category: Category) -> Option<&CategoryNode> {
        self.categories.iter().find(|node| node.name == category)
    }

    pub fn skill_count(&self) -> usize {
        self.categories.iter().map(|node| node.children.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Top-level node: one per populated category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryNode {
    pub id: String,
    pub name: Category,
    pub children: Vec<SkillNode>,
}

impl CategoryNode {
    pub fn new(category: Category, children: Vec<SkillNode>) -> Self {
        Self {
            id: category.slug().to_string(),
            name: category,
            children,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillNode {
    pub id: String,
    pub label: String,
    #[serde(skip)]
    pub category: Category,
    pub weight: f64,
    pub source: Source,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<Proficiency>,
    /// Audit trail only; never rendered.
    #[serde(skip)]
    pub evidence: Vec<String>,
    /// Always empty here. Deeper nesting is the visualizer's business.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SkillNode>,
}

/// `<category slug>:<uuid v5 of "<slug>/<normalized name>">`.
pub fn skill_id(category: Category, normalized_name: &str) -> String {
    let key = format!("{}/{}", category.slug(), normalized_name);
    let uuid = Uuid::new_v5(&SKILL_ID_NAMESPACE, key.as_bytes());
    format!("{}:{}", category.slug(), uuid)
}
