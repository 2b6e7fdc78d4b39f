//! Deterministic test doubles for the content layer.

pub mod fixtures;
mod source;

pub use fixtures::ManualClock;
pub use source::{
    MockContentSource, MockContentTypesResult, MockEntriesResult, MockEntryResult,
};
