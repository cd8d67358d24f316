use peekr_core::types::TitleQuery;

use crate::TitleRecord;

/// Source of title records.
///
/// A missing record is an ordinary outcome: implementations return `None`
/// for unknown titles, provider failures and timeouts alike.
#[async_trait::async_trait]
pub trait TitleProvider: Send + Sync {
    /// Fetch the record for a single title.
    async fn fetch_record(&self, query: &TitleQuery) -> Option<TitleRecord>;
}
