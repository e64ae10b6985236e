use std::sync::Arc;

use crate::config::Config;
use crate::extraction::{ExtractionCoordinator, Lexicon};

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Loaded once in `main`; the coordinator's keyword matcher holds the same `Arc`.
    pub lexicon: Arc<Lexicon>,
    pub coordinator: Arc<ExtractionCoordinator>,
}
