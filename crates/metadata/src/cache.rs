use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use peekr_core::types::TitleQuery;
use tracing::debug;

use crate::TitleRecord;
use crate::provider::TitleProvider;

/// Whether successful provider responses may be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Reuse a record until it is older than the given age.
    RevalidateAfter(Duration),
    /// Always re-fetch.
    Never,
}

impl CachePolicy {
    pub const DEFAULT_REVALIDATE: Duration = Duration::from_secs(86_400);

    /// Build a policy from a seconds count where `0` disables reuse.
    pub fn from_secs(secs: u64) -> Self {
        if secs == 0 {
            Self::Never
        } else {
            Self::RevalidateAfter(Duration::from_secs(secs))
        }
    }

    pub fn max_age(self) -> Option<Duration> {
        match self {
            Self::RevalidateAfter(age) => Some(age),
            Self::Never => None,
        }
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::RevalidateAfter(Self::DEFAULT_REVALIDATE)
    }
}

/// Wraps a provider with a bounded in-process cache keyed by `(type, id)`.
///
/// Only successful lookups are stored; a missing record always goes back to
/// the inner provider on the next request. Past `max_entries` the cache
/// evicts instead of growing.
#[derive(Clone)]
pub struct CachingProvider {
    inner: Arc<dyn TitleProvider>,
    entries: Option<Cache<TitleQuery, TitleRecord>>,
}

impl CachingProvider {
    pub const DEFAULT_MAX_ENTRIES: u64 = 10_000;

    pub fn new(inner: Arc<dyn TitleProvider>, policy: CachePolicy, max_entries: u64) -> Self {
        let entries = policy
            .max_age()
            .filter(|age| !age.is_zero())
            .map(|age| {
                Cache::builder()
                    .max_capacity(max_entries)
                    .time_to_live(age)
                    .build()
            });

        Self { inner, entries }
    }
}

#[async_trait::async_trait]
impl TitleProvider for CachingProvider {
    async fn fetch_record(&self, query: &TitleQuery) -> Option<TitleRecord> {
        let Some(entries) = &self.entries else {
            return self.inner.fetch_record(query).await;
        };

        if let Some(record) = entries.get(query).await {
            debug!(title = %query, "cache hit");
            return Some(record);
        }

        let record = self.inner.fetch_record(query).await?;
        entries.insert(query.clone(), record.clone()).await;
        Some(record)
    }
}
