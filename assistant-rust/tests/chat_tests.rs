use portfolio_assistant::{
    completion_test::{MockCompleteResult, MockCompletionModel},
    ChatError, ChatSession, CompletionError, CompletionModel, CompletionRole, PortfolioService,
    Sender,
};
use portfolio_content::{
    content_test::{fixtures, MockContentSource},
    Profile,
};
use serde_json::json;
use std::sync::Arc;

/// A service whose snapshot holds one project and one blog post. The mock
/// source is queued for exactly one fetch; later reads hit the cache.
fn service_with_content() -> Arc<PortfolioService> {
    let source = Arc::new(MockContentSource::new());
    source.enqueue_entries(fixtures::collection(vec![fixtures::entry(
        "p1",
        "project",
        json!({
            "title": "Storefront",
            "slug": "storefront",
            "description": "An online shop",
            "technologies": ["Rust"]
        }),
    )]));
    source.enqueue_entries(fixtures::collection(vec![fixtures::entry(
        "b1",
        "blogPost",
        json!({ "title": "On caching", "slug": "on-caching", "excerpt": "Short notes" }),
    )]));
    source.enqueue_entries(fixtures::collection(vec![]));
    Arc::new(PortfolioService::new(source, Profile::default()))
}

fn empty_service() -> Arc<PortfolioService> {
    let source = Arc::new(MockContentSource::new());
    for _ in 0..3 {
        source.enqueue_entries(fixtures::collection(vec![]));
    }
    Arc::new(PortfolioService::new(source, Profile::default()))
}

#[tokio::test]
async fn session_opens_with_a_welcome_message() {
    let session = ChatSession::new(service_with_content(), None);
    let messages = session.messages().await;

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].sender, Sender::Bot);
    assert!(messages[0].text.contains("portfolio assistant"));
}

#[tokio::test]
async fn refresh_welcome_names_actual_counts() {
    let session = ChatSession::new(service_with_content(), None);
    session.refresh_welcome().await;

    let messages = session.messages().await;
    assert!(messages[0].text.contains("1 projects"));
    assert!(messages[0].text.contains("1 blog posts"));
}

#[tokio::test]
async fn whitespace_input_is_rejected_without_side_effects() {
    let model = Arc::new(MockCompletionModel::new());
    let session = ChatSession::new(service_with_content(), Some(model.clone()));

    let result = session.send("   \n").await;

    assert_eq!(result.unwrap_err(), ChatError::EmptyMessage);
    assert_eq!(model.complete_call_count(), 0);
    assert_eq!(session.messages().await.len(), 1);
    assert!(!session.is_awaiting());
}

#[tokio::test]
async fn a_second_send_while_awaiting_is_rejected() {
    let model = Arc::new(MockCompletionModel::new());
    let (gated, ready, gate) = MockCompleteResult::gated("First reply");
    model.enqueue_complete(gated);

    let session = Arc::new(ChatSession::new(
        service_with_content(),
        Some(model.clone() as Arc<dyn CompletionModel>),
    ));

    let in_flight = tokio::spawn({
        let session = Arc::clone(&session);
        async move { session.send("Tell me about your projects").await }
    });

    // Wait until the first request has actually reached the model.
    ready.await.expect("first send reaches the model");
    assert!(session.is_awaiting());

    let second = session.send("And your blog?").await;
    assert_eq!(second.unwrap_err(), ChatError::Busy);
    assert_eq!(model.complete_call_count(), 1);

    gate.send(()).expect("release the first request");
    let first = in_flight.await.expect("send task joins").expect("send ok");
    assert_eq!(first.text, "First reply");
    assert!(!session.is_awaiting());

    // The rejected send left no trace in the transcript.
    let messages = session.messages().await;
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].sender, Sender::User);
    assert_eq!(messages[2].text, "First reply");
}

#[tokio::test]
async fn dropping_an_in_flight_send_releases_the_session() {
    let model = Arc::new(MockCompletionModel::new());
    let (gated, ready, _gate) = MockCompleteResult::gated("Never delivered");
    model.enqueue_complete(gated);
    model.enqueue_complete("Second reply");

    let session = Arc::new(ChatSession::new(
        service_with_content(),
        Some(model.clone() as Arc<dyn CompletionModel>),
    ));

    let in_flight = tokio::spawn({
        let session = Arc::clone(&session);
        async move { session.send("Tell me about your projects").await }
    });
    ready.await.expect("first send reaches the model");

    in_flight.abort();
    let joined = in_flight.await;
    assert!(joined.is_err());

    // The cancelled send released the busy flag; the session accepts new input.
    assert!(!session.is_awaiting());
    let reply = session.send("And your blog?").await.unwrap();
    assert_eq!(reply.text, "Second reply");
}

#[tokio::test]
async fn successful_completion_is_appended_as_bot_message() {
    let model = Arc::new(MockCompletionModel::new());
    model.enqueue_complete("Storefront is an online shop built with Rust.");

    let session = ChatSession::new(
        service_with_content(),
        Some(model.clone() as Arc<dyn CompletionModel>),
    );

    let reply = session.send("What is Storefront?").await.unwrap();
    assert_eq!(reply.sender, Sender::Bot);
    assert_eq!(reply.text, "Storefront is an online shop built with Rust.");

    let request = model.tracked_requests().remove(0);
    assert_eq!(request.turns.first().unwrap().role, CompletionRole::System);
    assert!(request.turns.first().unwrap().content.contains("Storefront"));
    assert!(request
        .turns
        .first()
        .unwrap()
        .content
        .contains("I don't have information about that"));
    assert_eq!(request.turns.last().unwrap().role, CompletionRole::User);
    assert_eq!(request.turns.last().unwrap().content, "What is Storefront?");
}

#[tokio::test]
async fn history_replay_is_bounded_to_six_prior_turns() {
    let model = Arc::new(MockCompletionModel::new());
    for index in 0..5 {
        model.enqueue_complete(MockCompleteResult::reply(format!("Reply {index}")));
    }

    let session = ChatSession::new(
        service_with_content(),
        Some(model.clone() as Arc<dyn CompletionModel>),
    );

    for index in 0..5 {
        session.send(&format!("Question {index}")).await.unwrap();
    }

    let requests = model.tracked_requests();
    // Before the fifth send the transcript holds the welcome plus four
    // exchanges (9 messages); only the last 6 are replayed.
    let last = &requests[4];
    assert_eq!(last.turns.len(), 8);
    assert_eq!(last.turns[0].role, CompletionRole::System);
    assert_eq!(last.turns[1].content, "Question 1");
    assert_eq!(last.turns[7].content, "Question 4");
}

#[tokio::test]
async fn completion_failure_degrades_to_the_templated_responder() {
    let model = Arc::new(MockCompletionModel::new());
    model.enqueue_complete(CompletionError::Invariant("mock", "provider down".into()));

    let session = ChatSession::new(
        service_with_content(),
        Some(model.clone() as Arc<dyn CompletionModel>),
    );

    let reply = session.send("Tell me about your projects").await.unwrap();
    assert!(reply.text.contains("Storefront"));
    assert!(!session.is_awaiting());
}

#[tokio::test]
async fn missing_model_routes_straight_to_the_responder() {
    let session = ChatSession::new(service_with_content(), None);
    let reply = session.send("Tell me about your projects").await.unwrap();
    assert!(reply.text.contains("Storefront"));
}

#[tokio::test]
async fn empty_portfolio_reply_never_invents_projects() {
    let session = ChatSession::new(empty_service(), None);
    let reply = session.send("Tell me about your projects").await.unwrap();
    assert!(reply.text.contains("check back later"));
}
