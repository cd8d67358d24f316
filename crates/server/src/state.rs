use std::sync::Arc;

use peekr_metadata::cache::CachePolicy;
use peekr_metadata::TitleProvider;

use crate::config::RenderConfig;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn TitleProvider>,
    pub cache_policy: CachePolicy,
    pub render: Arc<RenderConfig>,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn TitleProvider>,
        cache_policy: CachePolicy,
        render: RenderConfig,
    ) -> Self {
        Self {
            provider,
            cache_policy,
            render: Arc::new(render),
        }
    }
}
