use portfolio_assistant::{PortfolioService, PORTFOLIO_TTL};
use portfolio_content::{
    content_test::{fixtures, ManualClock, MockContentSource},
    ContentError, Profile, ResponseCache,
};
use serde_json::json;
use std::{sync::Arc, time::Duration};

fn enqueue_snapshot(source: &MockContentSource, project_title: &str) {
    // Queue order matches the service's fetch order: projects, posts, page.
    source.enqueue_entries(fixtures::collection(vec![fixtures::entry(
        "p1",
        "project",
        json!({
            "title": project_title,
            "slug": "storefront",
            "description": "An online shop",
            "technologies": ["Rust", "Axum"]
        }),
    )]));
    source.enqueue_entries(fixtures::collection(vec![fixtures::entry(
        "b1",
        "blogPost",
        json!({
            "title": "On caching",
            "slug": "on-caching",
            "excerpt": "Short notes",
            "tags": ["rust"]
        }),
    )]));
    source.enqueue_entries(fixtures::collection(vec![]));
}

fn enqueue_outage(source: &MockContentSource) {
    for _ in 0..3 {
        source.enqueue_entries(ContentError::Invariant("mock", "origin unreachable".into()));
    }
}

#[tokio::test]
async fn fresh_cache_hit_skips_the_origin() {
    let source = Arc::new(MockContentSource::new());
    enqueue_snapshot(&source, "Storefront");

    let clock = Arc::new(ManualClock::new());
    let service = PortfolioService::with_cache(
        source.clone(),
        Profile::default(),
        ResponseCache::with_clock(PORTFOLIO_TTL, clock.clone()),
    );

    let first = service.portfolio_data().await;
    clock.advance(Duration::from_secs(299));
    let second = service.portfolio_data().await;

    assert_eq!(first.projects[0].title, "Storefront");
    assert_eq!(first, second);
    assert_eq!(source.entries_call_count(), 3);
}

#[tokio::test]
async fn expired_cache_refetches() {
    let source = Arc::new(MockContentSource::new());
    enqueue_snapshot(&source, "Storefront");
    enqueue_snapshot(&source, "Storefront v2");

    let clock = Arc::new(ManualClock::new());
    let service = PortfolioService::with_cache(
        source.clone(),
        Profile::default(),
        ResponseCache::with_clock(PORTFOLIO_TTL, clock.clone()),
    );

    let first = service.portfolio_data().await;
    clock.advance(PORTFOLIO_TTL + Duration::from_secs(1));
    let second = service.portfolio_data().await;

    assert_eq!(first.projects[0].title, "Storefront");
    assert_eq!(second.projects[0].title, "Storefront v2");
    assert_eq!(source.entries_call_count(), 6);
}

#[tokio::test]
async fn outage_after_expiry_serves_the_stale_snapshot() {
    let source = Arc::new(MockContentSource::new());
    enqueue_snapshot(&source, "Storefront");
    enqueue_outage(&source);

    let clock = Arc::new(ManualClock::new());
    let service = PortfolioService::with_cache(
        source.clone(),
        Profile::default(),
        ResponseCache::with_clock(PORTFOLIO_TTL, clock.clone()),
    );

    let first = service.portfolio_data().await;
    clock.advance(PORTFOLIO_TTL + Duration::from_secs(1));
    let degraded = service.portfolio_data().await;

    assert_eq!(degraded, first);
}

#[tokio::test]
async fn outage_with_nothing_cached_yields_the_empty_snapshot() {
    let source = Arc::new(MockContentSource::new());
    enqueue_outage(&source);

    let service = PortfolioService::new(source, Profile::default());
    let data = service.portfolio_data().await;

    assert!(!data.profile.name.is_empty());
    assert!(data.projects.is_empty());
    assert!(data.blog_posts.is_empty());
    assert!(data.about.is_none());
}

#[tokio::test]
async fn empty_space_resolves_without_error() {
    let source = Arc::new(MockContentSource::new());
    for _ in 0..3 {
        source.enqueue_entries(fixtures::collection(vec![]));
    }

    let service = PortfolioService::new(source, Profile::default());
    let data = service.portfolio_data().await;

    assert!(!data.profile.name.is_empty());
    assert!(data.projects.is_empty());
    assert!(data.blog_posts.is_empty());
    assert!(data.about.is_none());
}

#[tokio::test]
async fn missing_about_page_does_not_fail_the_aggregate() {
    let source = Arc::new(MockContentSource::new());
    source.enqueue_entries(fixtures::collection(vec![]));
    source.enqueue_entries(fixtures::collection(vec![]));
    source.enqueue_entries(ContentError::Invariant("mock", "no page type".into()));

    let service = PortfolioService::new(source, Profile::default());
    let data = service.portfolio_data().await;

    assert!(data.about.is_none());
    assert!(data.projects.is_empty());
}

#[tokio::test]
async fn queries_carry_the_documented_limits() {
    let source = Arc::new(MockContentSource::new());
    enqueue_snapshot(&source, "Storefront");

    let service = PortfolioService::new(source.clone(), Profile::default());
    service.portfolio_data().await;

    let queries = source.tracked_entries_queries();
    let limit_for = |content_type: &str| {
        queries
            .iter()
            .find(|(ct, _)| ct == content_type)
            .map(|(_, options)| options.limit)
            .unwrap()
    };
    assert_eq!(limit_for("project"), Some(10));
    assert_eq!(limit_for("blogPost"), Some(20));
    assert_eq!(limit_for("page"), Some(1));
}
