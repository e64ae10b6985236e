#![allow(dead_code)]
//! Lexicon: category → skill → keyword variants used by the keyword matcher.
//!
//! Loaded once in `main` (built-in table or a JSON override) and shared as
//! `Arc<Lexicon>`. Nothing mutates it after construction.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::extraction::models::{collapse_whitespace, normalize, Category};

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read lexicon file: {0}")]
    Io(#[from] std::io::Error),

    #[error("lexicon JSON is invalid: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown lexicon category '{0}'")]
    UnknownCategory(String),

    #[error("blank skill name in category '{0}'")]
    BlankSkill(Category),
}

/// One skill and every normalized keyword that counts as a mention of it.
#[derive(Debug, Clone, PartialEq)]
pub struct LexiconEntry {
    pub name: String,
    pub group: Option<String>,
    /// Normalized, de-duplicated, in first-seen order. The skill's own name is first.
    pub variants: Vec<String>,
}

impl LexiconEntry {
    fn new<'a>(name: &str, group: Option<&str>, variants: impl IntoIterator<Item = &'a str>) -> Self {
        let mut seen = BTreeSet::new();
        let variants = std::iter::once(normalize(name))
            .chain(variants.into_iter().map(normalize))
            .filter(|v| !v.is_empty() && seen.insert(v.clone()))
            .collect();
        Self {
            name: collapse_whitespace(name),
            group: group.map(collapse_whitespace).filter(|g| !g.is_empty()),
            variants,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: BTreeMap<Category, Vec<LexiconEntry>>,
}

impl Lexicon {
    /// The built-in lexicon shipped with the service.
    pub fn builtin() -> Self {
        let mut entries = BTreeMap::new();
        for (category, table) in [
            (Category::Technical, TECHNICAL),
            (Category::SoftSkills, SOFT_SKILLS),
            (Category::Domains, DOMAINS),
            (Category::Certifications, CERTIFICATIONS),
        ] {
            let list = table
                .iter()
                .map(|(name, group, variants)| LexiconEntry::new(name, *group, variants.iter().copied()))
                .collect();
            entries.insert(category, list);
        }
        Self { entries }
    }

    pub fn from_path(path: &Path) -> Result<Self, LexiconError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Parses `{"<Category>": {"<Skill>": ["variant", ...] | {"group": .., "variants": [..]}}}`.
    pub fn from_json_str(raw: &str) -> Result<Self, LexiconError> {
        let parsed: BTreeMap<String, BTreeMap<String, RawEntry>> = serde_json::from_str(raw)?;

        let mut entries: BTreeMap<Category, Vec<LexiconEntry>> = BTreeMap::new();
        for (category_key, skills) in parsed {
            let category = Category::from_key(&category_key)
                .ok_or_else(|| LexiconError::UnknownCategory(category_key.clone()))?;
            let list = entries.entry(category).or_default();
            for (name, raw_entry) in skills {
                if name.trim().is_empty() {
                    return Err(LexiconError::BlankSkill(category));
                }
                let (group, variants) = match raw_entry {
                    RawEntry::Variants(variants) => (None, variants),
                    RawEntry::Detailed { group, variants } => (group, variants),
                };
                list.push(LexiconEntry::new(
                    &name,
                    group.as_deref(),
                    variants.iter().map(String::as_str),
                ));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self, category: Category) -> &[LexiconEntry] {
        self.entries.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every entry, categories in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &LexiconEntry)> {
        self.entries
            .iter()
            .flat_map(|(category, list)| list.iter().map(move |entry| (*category, entry)))
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Variants(Vec<String>),
    Detailed {
        #[serde(default)]
        group: Option<String>,
        #[serde(default)]
        variants: Vec<String>,
    },
}

type Table = &'static [(&'static str, Option<&'static str>, &'static [&'static str])];

const LANGUAGES: Option<&str> = Some("Programming Languages");
const FRAMEWORKS: Option<&str> = Some("Frameworks");
const TOOLS: Option<&str> = Some("Tools");
const DATABASES: Option<&str> = Some("Databases");
const CLOUD: Option<&str> = Some("Cloud Platforms");

const TECHNICAL: Table = &[
    ("Python", LANGUAGES, &["python3"]),
    ("JavaScript", LANGUAGES, &["ecmascript"]),
    ("TypeScript", LANGUAGES, &[]),
    ("Java", LANGUAGES, &[]),
    ("C++", LANGUAGES, &["cpp"]),
    ("C#", LANGUAGES, &["csharp", "c sharp"]),
    ("Go", LANGUAGES, &["golang"]),
    ("Rust", LANGUAGES, &[]),
    ("SQL", LANGUAGES, &[]),
    ("Swift", LANGUAGES, &[]),
    ("Kotlin", LANGUAGES, &[]),
    ("Ruby", LANGUAGES, &[]),
    ("PHP", LANGUAGES, &[]),
    ("Scala", LANGUAGES, &[]),
    ("React", FRAMEWORKS, &["react.js", "reactjs"]),
    ("Vue", FRAMEWORKS, &["vue.js", "vuejs"]),
    ("Angular", FRAMEWORKS, &["angularjs"]),
    ("Django", FRAMEWORKS, &[]),
    ("Flask", FRAMEWORKS, &[]),
    ("FastAPI", FRAMEWORKS, &[]),
    ("Spring", FRAMEWORKS, &["spring boot", "springboot"]),
    ("Node.js", FRAMEWORKS, &["nodejs", "node"]),
    ("Express", FRAMEWORKS, &["express.js", "expressjs"]),
    ("TensorFlow", FRAMEWORKS, &[]),
    ("PyTorch", FRAMEWORKS, &[]),
    ("Git", TOOLS, &["github", "gitlab"]),
    ("Docker", TOOLS, &["containers", "containerization"]),
    ("Kubernetes", TOOLS, &["k8s"]),
    ("Jenkins", TOOLS, &[]),
    ("CI/CD", TOOLS, &["continuous integration", "continuous delivery", "cicd"]),
    ("Linux", TOOLS, &["unix"]),
    ("Terraform", TOOLS, &["infrastructure as code"]),
    ("PostgreSQL", DATABASES, &["postgres"]),
    ("MySQL", DATABASES, &[]),
    ("MongoDB", DATABASES, &["mongo"]),
    ("Redis", DATABASES, &[]),
    ("AWS", CLOUD, &["amazon web services"]),
    ("Azure", CLOUD, &["microsoft azure"]),
    ("GCP", CLOUD, &["google cloud", "google cloud platform"]),
];

const SOFT_SKILLS: Table = &[
    ("Leadership", None, &["led", "lead", "leading", "team lead"]),
    ("Mentoring", None, &["mentored", "mentor", "mentorship", "coached"]),
    ("Communication", None, &["communicated", "presented", "written communication"]),
    ("Collaboration", None, &["teamwork", "collaborated", "cross-functional"]),
    ("Problem Solving", None, &["problem-solving", "troubleshooting", "debugging"]),
    ("Project Management", None, &["managed projects", "project planning", "roadmap"]),
    ("Public Speaking", None, &["conference talk", "speaker", "keynote"]),
    ("Time Management", None, &["prioritization", "deadlines"]),
    ("Critical Thinking", None, &["analytical"]),
    ("Adaptability", None, &["adaptable", "fast-paced"]),
    ("Stakeholder Management", None, &["stakeholders", "client relations"]),
];

const DOMAINS: Table = &[
    ("Machine Learning", None, &["ml", "deep learning", "neural networks"]),
    ("Natural Language Processing", None, &["nlp", "language models", "llm"]),
    ("Computer Vision", None, &["image recognition", "object detection"]),
    ("Data Science", None, &["data analysis", "statistics", "analytics"]),
    ("Data Engineering", None, &["etl", "data pipelines", "data warehouse"]),
    ("Web Development", None, &["frontend", "backend", "full stack", "full-stack"]),
    ("Mobile Development", None, &["ios", "android", "mobile apps"]),
    ("Distributed Systems", None, &["microservices", "distributed computing"]),
    ("DevOps", None, &["site reliability", "sre", "platform engineering"]),
    ("Cybersecurity", None, &["security", "penetration testing", "infosec"]),
    ("Embedded Systems", None, &["firmware", "embedded"]),
    ("FinTech", None, &["payments", "banking", "financial services"]),
    ("Healthcare", None, &["healthtech", "clinical", "hipaa"]),
    ("E-commerce", None, &["ecommerce", "online retail"]),
];

const CERTIFICATIONS: Table = &[
    (
        "AWS Certified",
        None,
        &["aws certification", "aws certified solutions architect", "aws certified developer"],
    ),
    ("Azure Certified", None, &["microsoft certified", "azure certification", "az-900"]),
    ("Google Cloud Certified", None, &["google cloud certification", "professional cloud architect"]),
    ("Certified Kubernetes Administrator", None, &["cka", "ckad"]),
    ("PMP", None, &["project management professional"]),
    ("Certified ScrumMaster", None, &["csm", "scrum master certified", "professional scrum master"]),
    ("CISSP", None, &[]),
    ("CompTIA Security+", None, &["security+", "comptia"]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_every_category() {
        let lexicon = Lexicon::builtin();
        for category in Category::ALL {
            assert!(
                !lexicon.entries(category).is_empty(),
                "no entries for {category}"
            );
        }
    }

    #[test]
    fn test_entry_name_is_first_variant_and_normalized() {
        let entry = LexiconEntry::new("Node.js", Some("Frameworks"), ["NodeJS", "  node  ", "nodejs"]);
        assert_eq!(entry.name, "Node.js");
        assert_eq!(entry.variants, vec!["node.js", "nodejs", "node"]);
        assert_eq!(entry.group.as_deref(), Some("Frameworks"));
    }

    #[test]
    fn test_blank_variants_are_dropped() {
        let entry = LexiconEntry::new("Rust", None, ["", "   "]);
        assert_eq!(entry.variants, vec!["rust"]);
    }

    #[test]
    fn test_from_json_accepts_both_entry_shapes() {
        let raw = r#"{
            "Technical": {
                "Zig": ["ziglang"],
                "Elixir": {"group": "Programming Languages", "variants": ["elixir-lang"]}
            },
            "soft_skills": {"Negotiation": []}
        }"#;
        let lexicon = Lexicon::from_json_str(raw).unwrap();
        assert_eq!(lexicon.len(), 3);

        let technical = lexicon.entries(Category::Technical);
        // BTreeMap key order
        assert_eq!(technical[0].name, "Elixir");
        assert_eq!(technical[0].group.as_deref(), Some("Programming Languages"));
        assert_eq!(technical[1].variants, vec!["zig", "ziglang"]);
        assert_eq!(lexicon.entries(Category::SoftSkills)[0].variants, vec!["negotiation"]);
        assert!(lexicon.entries(Category::Domains).is_empty());
    }

    #[test]
    fn test_from_json_rejects_unknown_category() {
        let err = Lexicon::from_json_str(r#"{"Hobbies": {"Chess": []}}"#).unwrap_err();
        assert!(matches!(err, LexiconError::UnknownCategory(ref c) if c == "Hobbies"));
    }

    #[test]
    fn test_from_json_rejects_blank_skill() {
        let err = Lexicon::from_json_str(r#"{"Domains": {"  ": ["x"]}}"#).unwrap_err();
        assert!(matches!(err, LexiconError::BlankSkill(Category::Domains)));
    }

    #[test]
    fn test_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.json");
        std::fs::write(&path, r#"{"Certifications": {"CKA": ["certified kubernetes administrator"]}}"#)
            .unwrap();

        let lexicon = Lexicon::from_path(&path).unwrap();
        assert_eq!(lexicon.entries(Category::Certifications)[0].name, "CKA");
    }

    #[test]
    fn test_from_path_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Lexicon::from_path(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, LexiconError::Io(_)));
    }

    #[test]
    fn test_iter_follows_category_order() {
        let lexicon = Lexicon::builtin();
        let categories: Vec<Category> = lexicon.iter().map(|(c, _)| c).collect();
        let mut sorted = categories.clone();
        sorted.sort();
        assert_eq!(categories, sorted);
        assert_eq!(categories.len(), lexicon.len());
    }
}
