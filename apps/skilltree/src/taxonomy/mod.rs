// Taxonomy: turns flat extraction records into the category/skill tree.

pub mod builder;
pub mod tree;

pub use builder::build;
pub use tree::SkillTree;
