// Skill tree API: runs the extraction pipeline on request text or an uploaded
// PDF and returns the tree as JSON or as an interactive page.

pub mod handlers;
pub mod service;
