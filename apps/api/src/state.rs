use std::sync::Arc;

use crate::config::Config;
use crate::courses::CourseCatalog;
use crate::skills::SkillVocabulary;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup, so no locking is needed.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub vocabulary: Arc<SkillVocabulary>,
    /// Coursera (primary) and Udemy (secondary) course tables.
    pub catalog: Arc<CourseCatalog>,
}
