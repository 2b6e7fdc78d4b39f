use crate::{CompletionError, CompletionModel, CompletionRequest, CompletionResult};
use futures::channel::oneshot;
use std::{collections::VecDeque, sync::Mutex};

/// Result for a mocked `complete` call.
pub enum MockCompleteResult {
    Reply(String),
    Error(CompletionError),
    /// Signals `ready` once the call is in flight, then blocks until `gate`
    /// fires before yielding the reply. Used to hold a request open while a
    /// test probes concurrent behavior.
    Gated {
        reply: String,
        ready: oneshot::Sender<()>,
        gate: oneshot::Receiver<()>,
    },
}

impl MockCompleteResult {
    /// Construct a result that yields the provided reply.
    #[must_use]
    pub fn reply(reply: impl Into<String>) -> Self {
        Self::Reply(reply.into())
    }

    /// Construct a result that yields the provided error.
    #[must_use]
    pub fn error(error: CompletionError) -> Self {
        Self::Error(error)
    }

    /// Construct a gated result together with its control handles.
    #[must_use]
    pub fn gated(reply: impl Into<String>) -> (Self, oneshot::Receiver<()>, oneshot::Sender<()>) {
        let (ready_tx, ready_rx) = oneshot::channel();
        let (gate_tx, gate_rx) = oneshot::channel();
        (
            Self::Gated {
                reply: reply.into(),
                ready: ready_tx,
                gate: gate_rx,
            },
            ready_rx,
            gate_tx,
        )
    }
}

impl From<&str> for MockCompleteResult {
    fn from(reply: &str) -> Self {
        Self::reply(reply)
    }
}

impl From<CompletionError> for MockCompleteResult {
    fn from(error: CompletionError) -> Self {
        Self::Error(error)
    }
}

#[derive(Default)]
struct MockCompletionModelState {
    mocked_complete_results: VecDeque<MockCompleteResult>,
    tracked_requests: Vec<CompletionRequest>,
}

/// A mock completion model for testing that tracks requests and yields
/// predefined replies.
#[derive(Default)]
pub struct MockCompletionModel {
    state: Mutex<MockCompletionModelState>,
}

impl MockCompletionModel {
    /// Construct a new mock completion model instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a mocked complete result.
    pub fn enqueue_complete<R>(&self, result: R) -> &Self
    where
        R: Into<MockCompleteResult>,
    {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.mocked_complete_results.push_back(result.into());
        drop(state);
        self
    }

    /// Retrieve the tracked requests accumulated so far.
    #[must_use]
    pub fn tracked_requests(&self) -> Vec<CompletionRequest> {
        let state = self.state.lock().expect("mock state poisoned");
        state.tracked_requests.clone()
    }

    /// Number of `complete` calls received so far.
    #[must_use]
    pub fn complete_call_count(&self) -> usize {
        let state = self.state.lock().expect("mock state poisoned");
        state.tracked_requests.len()
    }
}

#[async_trait::async_trait]
impl CompletionModel for MockCompletionModel {
    fn provider(&self) -> &'static str {
        "mock"
    }

    async fn complete(&self, request: CompletionRequest) -> CompletionResult<String> {
        let result = {
            let mut state = self.state.lock().expect("mock state poisoned");
            state.tracked_requests.push(request);
            state.mocked_complete_results.pop_front().ok_or_else(|| {
                CompletionError::Invariant("mock", "no mocked complete results available".into())
            })?
        };

        match result {
            MockCompleteResult::Reply(reply) => Ok(reply),
            MockCompleteResult::Error(error) => Err(error),
            MockCompleteResult::Gated { reply, ready, gate } => {
                let _ = ready.send(());
                let _ = gate.await;
                Ok(reply)
            }
        }
    }
}
