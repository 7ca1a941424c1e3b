use std::sync::Arc;

use crate::analysis::analyzer::GapAnalyzer;
use crate::config::Config;
use crate::store::SkillStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable storage. Default: PgSkillStore; tests use MemorySkillStore.
    pub store: Arc<dyn SkillStore>,
    pub analyzer: GapAnalyzer,
}

impl AppState {
    pub fn new(store: Arc<dyn SkillStore>, config: &Config) -> Self {
        Self {
            store,
            analyzer: GapAnalyzer::new(config.resources_per_gap),
        }
    }
}
