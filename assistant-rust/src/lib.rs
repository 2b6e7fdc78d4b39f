mod chat;
mod completion;
mod completion_api;
mod context;
mod errors;
mod portfolio;
mod responder;
mod suggestions;

pub mod completion_test;

pub use chat::{ChatMessage, ChatSession, Sender};
pub use completion::{
    CompletionModel, CompletionParams, CompletionRequest, CompletionRole, CompletionTurn,
    OpenAICompatModel, OpenAICompatModelOptions, DEFAULT_CHAT_MODEL,
};
pub use context::build_context;
pub use errors::{ChatError, CompletionError, CompletionResult};
pub use portfolio::{
    distinct_technologies, PortfolioData, PortfolioService, PORTFOLIO_CACHE_KEY, PORTFOLIO_TTL,
};
pub use responder::fallback_response;
pub use suggestions::{default_suggestions, suggestions, MAX_SUGGESTIONS};
