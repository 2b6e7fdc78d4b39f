use crate::{
    build_context, fallback_response, ChatError, CompletionModel, CompletionParams,
    CompletionRequest, CompletionTurn, PortfolioService,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Number of prior turns replayed to the completion API alongside the
/// system context and the message being sent.
const HISTORY_WINDOW: usize = 6;

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One message in the session transcript. The transcript is append-only and
/// not persisted beyond the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

struct SessionState {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl SessionState {
    fn push(&mut self, sender: Sender, text: String) -> ChatMessage {
        let message = ChatMessage {
            id: self.next_id,
            text,
            sender,
            timestamp: Utc::now(),
        };
        self.next_id += 1;
        self.messages.push(message.clone());
        message
    }
}

/// Releases the busy flag when a send completes or its future is dropped.
struct BusyFlagReset<'a>(&'a AtomicBool);

impl Drop for BusyFlagReset<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// One visitor's conversation with the assistant.
///
/// The session is idle or awaiting exactly one response; a second send
/// while a request is outstanding is rejected with [`ChatError::Busy`]
/// rather than queued, so at most one completion is in flight per session.
/// Dropping the future returned by [`ChatSession::send`] cancels the
/// request and releases the session.
pub struct ChatSession {
    service: Arc<PortfolioService>,
    model: Option<Arc<dyn CompletionModel>>,
    params: CompletionParams,
    awaiting: AtomicBool,
    state: futures::lock::Mutex<SessionState>,
}

impl ChatSession {
    /// Create a session. Without a model every reply comes from the
    /// deterministic fallback responder.
    #[must_use]
    pub fn new(service: Arc<PortfolioService>, model: Option<Arc<dyn CompletionModel>>) -> Self {
        let mut state = SessionState {
            messages: Vec::new(),
            next_id: 1,
        };
        state.push(
            Sender::Bot,
            "Hi! I'm the portfolio assistant. I have access to the projects, blog \
             posts, and profile on this site. Ask me anything about the work here!"
                .to_string(),
        );
        Self {
            service,
            model,
            params: CompletionParams::default(),
            awaiting: AtomicBool::new(false),
            state: futures::lock::Mutex::new(state),
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: CompletionParams) -> Self {
        self.params = params;
        self
    }

    /// The transcript so far, welcome message included.
    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.state.lock().await.messages.clone()
    }

    /// Whether a response is currently being generated.
    #[must_use]
    pub fn is_awaiting(&self) -> bool {
        self.awaiting.load(Ordering::SeqCst)
    }

    /// Replace the templated welcome line with one naming actual counts,
    /// once portfolio data is available.
    pub async fn refresh_welcome(&self) {
        let data = self.service.portfolio_data().await;
        let mut state = self.state.lock().await;
        if let Some(first) = state.messages.first_mut() {
            if first.sender == Sender::Bot {
                first.text = format!(
                    "Hi! I'm the portfolio assistant. I can tell you about {} projects, \
                     {} blog posts, and {}'s background. What would you like to know?",
                    data.projects.len(),
                    data.blog_posts.len(),
                    data.profile.name,
                );
            }
        }
    }

    /// Submit one user message and append the assistant's reply.
    ///
    /// Whitespace-only input and sends while a request is outstanding are
    /// rejected before any state transition or network call. Completion
    /// failures never surface here; the reply degrades to the templated
    /// responder instead.
    pub async fn send(&self, text: &str) -> Result<ChatMessage, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if self.awaiting.swap(true, Ordering::SeqCst) {
            return Err(ChatError::Busy);
        }
        let _busy = BusyFlagReset(&self.awaiting);

        // History is snapshotted before the user message is appended, so the
        // replayed window holds prior turns only.
        let history = {
            let mut state = self.state.lock().await;
            let history = state.messages.clone();
            state.push(Sender::User, text.to_string());
            history
        };

        let reply = self.respond(text, &history).await;

        let mut state = self.state.lock().await;
        Ok(state.push(Sender::Bot, reply))
    }

    async fn respond(&self, text: &str, history: &[ChatMessage]) -> String {
        let data = self.service.portfolio_data().await;
        let Some(model) = &self.model else {
            return fallback_response(text, &data);
        };

        let recent = &history[history.len().saturating_sub(HISTORY_WINDOW)..];
        let mut turns = Vec::with_capacity(recent.len() + 2);
        turns.push(CompletionTurn::system(build_context(&data)));
        for message in recent {
            turns.push(match message.sender {
                Sender::User => CompletionTurn::user(message.text.clone()),
                Sender::Bot => CompletionTurn::assistant(message.text.clone()),
            });
        }
        turns.push(CompletionTurn::user(text));

        let request = CompletionRequest {
            params: self.params.clone(),
            turns,
        };
        match model.complete(request).await {
            Ok(reply) => reply,
            Err(error) => {
                tracing::warn!(
                    %error,
                    provider = model.provider(),
                    "completion failed; answering from templates"
                );
                fallback_response(text, &data)
            }
        }
    }
}
