use std::{collections::VecDeque, sync::Mutex};

use crate::{
    ContentEntry, ContentError, ContentResult, ContentSource, ContentType, EntryCollection,
    QueryOptions,
};

/// Result for a mocked `content_types` call.
pub enum MockContentTypesResult {
    Types(Vec<ContentType>),
    Error(ContentError),
}

impl From<Vec<ContentType>> for MockContentTypesResult {
    fn from(types: Vec<ContentType>) -> Self {
        Self::Types(types)
    }
}

impl From<ContentError> for MockContentTypesResult {
    fn from(error: ContentError) -> Self {
        Self::Error(error)
    }
}

/// Result for a mocked `entries` call.
pub enum MockEntriesResult {
    Collection(EntryCollection),
    Error(ContentError),
}

impl From<EntryCollection> for MockEntriesResult {
    fn from(collection: EntryCollection) -> Self {
        Self::Collection(collection)
    }
}

impl From<ContentError> for MockEntriesResult {
    fn from(error: ContentError) -> Self {
        Self::Error(error)
    }
}

/// Result for a mocked `entry` call.
pub enum MockEntryResult {
    Entry(ContentEntry),
    Error(ContentError),
}

impl From<ContentEntry> for MockEntryResult {
    fn from(entry: ContentEntry) -> Self {
        Self::Entry(entry)
    }
}

impl From<ContentError> for MockEntryResult {
    fn from(error: ContentError) -> Self {
        Self::Error(error)
    }
}

#[derive(Default)]
struct MockContentSourceState {
    mocked_content_types: VecDeque<MockContentTypesResult>,
    mocked_entries: VecDeque<MockEntriesResult>,
    mocked_entry: VecDeque<MockEntryResult>,
    tracked_content_types_calls: usize,
    tracked_entries_queries: Vec<(String, QueryOptions)>,
    tracked_entry_ids: Vec<String>,
}

/// A mock content source for testing that tracks queries and yields
/// predefined results.
#[derive(Default)]
pub struct MockContentSource {
    state: Mutex<MockContentSourceState>,
}

impl MockContentSource {
    /// Construct a new mock content source instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a mocked `content_types` result.
    pub fn enqueue_content_types<R>(&self, result: R) -> &Self
    where
        R: Into<MockContentTypesResult>,
    {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.mocked_content_types.push_back(result.into());
        drop(state);
        self
    }

    /// Enqueue a mocked `entries` result.
    pub fn enqueue_entries<R>(&self, result: R) -> &Self
    where
        R: Into<MockEntriesResult>,
    {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.mocked_entries.push_back(result.into());
        drop(state);
        self
    }

    /// Enqueue a mocked `entry` result.
    pub fn enqueue_entry<R>(&self, result: R) -> &Self
    where
        R: Into<MockEntryResult>,
    {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.mocked_entry.push_back(result.into());
        drop(state);
        self
    }

    /// Number of `content_types` calls received so far.
    #[must_use]
    pub fn content_types_call_count(&self) -> usize {
        let state = self.state.lock().expect("mock state poisoned");
        state.tracked_content_types_calls
    }

    /// The `(content type, options)` pairs received by `entries` so far.
    #[must_use]
    pub fn tracked_entries_queries(&self) -> Vec<(String, QueryOptions)> {
        let state = self.state.lock().expect("mock state poisoned");
        state.tracked_entries_queries.clone()
    }

    /// Number of `entries` calls received so far.
    #[must_use]
    pub fn entries_call_count(&self) -> usize {
        let state = self.state.lock().expect("mock state poisoned");
        state.tracked_entries_queries.len()
    }

    /// Reset tracked queries without touching enqueued results.
    pub fn reset(&self) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.tracked_content_types_calls = 0;
        state.tracked_entries_queries.clear();
        state.tracked_entry_ids.clear();
    }
}

#[async_trait::async_trait]
impl ContentSource for MockContentSource {
    fn provider(&self) -> &'static str {
        "mock"
    }

    async fn content_types(&self) -> ContentResult<Vec<ContentType>> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.tracked_content_types_calls += 1;

        let result = state.mocked_content_types.pop_front().ok_or_else(|| {
            ContentError::Invariant("mock", "no mocked content_types results available".into())
        })?;

        match result {
            MockContentTypesResult::Types(types) => Ok(types),
            MockContentTypesResult::Error(error) => Err(error),
        }
    }

    async fn entries(
        &self,
        content_type: &str,
        options: &QueryOptions,
    ) -> ContentResult<EntryCollection> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state
            .tracked_entries_queries
            .push((content_type.to_string(), options.clone()));

        let result = state.mocked_entries.pop_front().ok_or_else(|| {
            ContentError::Invariant("mock", "no mocked entries results available".into())
        })?;

        match result {
            MockEntriesResult::Collection(collection) => Ok(collection),
            MockEntriesResult::Error(error) => Err(error),
        }
    }

    async fn entry(&self, id: &str) -> ContentResult<ContentEntry> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.tracked_entry_ids.push(id.to_string());

        let result = state.mocked_entry.pop_front().ok_or_else(|| {
            ContentError::Invariant("mock", "no mocked entry results available".into())
        })?;

        match result {
            MockEntryResult::Entry(entry) => Ok(entry),
            MockEntryResult::Error(error) => Err(error),
        }
    }
}
