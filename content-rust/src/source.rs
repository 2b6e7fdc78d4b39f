use crate::{ContentEntry, ContentResult, ContentType, EntryCollection, QueryOptions};

/// A read-only source of CMS entries.
///
/// All operations are single-attempt and idempotent; retry policy belongs to
/// the caller.
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    fn provider(&self) -> &'static str;
    /// List every content type declared in the space.
    async fn content_types(&self) -> ContentResult<Vec<ContentType>>;
    /// Query entries of `content_type`, applying `options`.
    async fn entries(
        &self,
        content_type: &str,
        options: &QueryOptions,
    ) -> ContentResult<EntryCollection>;
    /// Fetch a single entry by id.
    async fn entry(&self, id: &str) -> ContentResult<ContentEntry>;
}
