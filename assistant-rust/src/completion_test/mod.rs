//! Deterministic test doubles for the completion layer.

mod model;

pub use model::{MockCompleteResult, MockCompletionModel};
