// Skill extraction: lexicon, keyword matcher, AI adapter, and the coordinator
// that routes between them. All AI calls go through llm_client.

pub mod ai;
pub mod coordinator;
pub mod keyword;
pub mod lexicon;
pub mod models;
pub mod prompts;

pub use ai::AiExtractor;
pub use coordinator::{ExtractionCoordinator, SkillExtractor, StrategyKind};
pub use keyword::{KeywordMatcher, MatchScoring};
pub use lexicon::Lexicon;
pub use models::ExtractionError;
