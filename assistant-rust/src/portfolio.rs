use portfolio_content::{
    about_page_from_entry, blog_post_from_entry, project_from_entry, AboutPage, BlogPost,
    ContentResult, ContentSource, EntryCollection, Profile, Project, QueryOptions, ResponseCache,
};
use std::{sync::Arc, time::Duration};

/// The single cache slot the aggregate lives in. The service always issues
/// the same query set, so one slot cannot collide with a divergent query.
pub const PORTFOLIO_CACHE_KEY: &str = "portfolio";

/// Freshness window for the assistant's view of the portfolio.
pub const PORTFOLIO_TTL: Duration = Duration::from_secs(5 * 60);

const PROJECTS_LIMIT: u32 = 10;
const BLOG_POSTS_LIMIT: u32 = 20;

/// Aggregate snapshot of everything the assistant may talk about. Rebuilt
/// whenever the cache slot goes stale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortfolioData {
    pub profile: Profile,
    pub projects: Vec<Project>,
    pub blog_posts: Vec<BlogPost>,
    pub about: Option<AboutPage>,
}

/// Fetches and caches the portfolio aggregate.
///
/// A fresh cache hit never touches the origin. On origin failure the stale
/// snapshot is served if one exists; an empty snapshot (profile only)
/// otherwise. [`PortfolioService::portfolio_data`] therefore never fails.
pub struct PortfolioService {
    source: Arc<dyn ContentSource>,
    profile: Profile,
    cache: ResponseCache<Arc<PortfolioData>>,
}

impl PortfolioService {
    #[must_use]
    pub fn new(source: Arc<dyn ContentSource>, profile: Profile) -> Self {
        Self::with_cache(source, profile, ResponseCache::new(PORTFOLIO_TTL))
    }

    /// Inject the cache, letting callers pick the TTL and the clock.
    #[must_use]
    pub fn with_cache(
        source: Arc<dyn ContentSource>,
        profile: Profile,
        cache: ResponseCache<Arc<PortfolioData>>,
    ) -> Self {
        Self {
            source,
            profile,
            cache,
        }
    }

    #[must_use]
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub async fn portfolio_data(&self) -> Arc<PortfolioData> {
        if let Some(data) = self.cache.get_fresh(PORTFOLIO_CACHE_KEY) {
            return data;
        }
        match self.fetch().await {
            Ok(data) => {
                let data = Arc::new(data);
                self.cache.insert(PORTFOLIO_CACHE_KEY, Arc::clone(&data));
                data
            }
            Err(error) => {
                tracing::warn!(%error, "portfolio fetch failed; serving stale or empty data");
                self.cache
                    .get_stale(PORTFOLIO_CACHE_KEY)
                    .unwrap_or_else(|| {
                        Arc::new(PortfolioData {
                            profile: self.profile.clone(),
                            ..Default::default()
                        })
                    })
            }
        }
    }

    async fn fetch(&self) -> ContentResult<PortfolioData> {
        let projects_query = QueryOptions::default().limit(PROJECTS_LIMIT);
        let posts_query = QueryOptions::default().limit(BLOG_POSTS_LIMIT);
        let about_query = QueryOptions::default().field_eq("title", "About").limit(1);
        let (projects, posts, about) = futures::join!(
            self.source.entries("project", &projects_query),
            self.source.entries("blogPost", &posts_query),
            self.source.entries("page", &about_query),
        );

        let projects = projects?;
        let posts = posts?;
        // A space without an about page is routine, not a failure.
        let about = about.ok();

        Ok(PortfolioData {
            profile: self.profile.clone(),
            projects: typed_projects(&projects),
            blog_posts: posts.items.iter().map(blog_post_from_entry).collect(),
            about: about
                .as_ref()
                .and_then(|collection| collection.items.first())
                .map(about_page_from_entry),
        })
    }
}

fn typed_projects(collection: &EntryCollection) -> Vec<Project> {
    collection
        .items
        .iter()
        .map(|entry| project_from_entry(entry, &collection.assets))
        .collect()
}

/// Distinct technologies across all projects, in first-seen order.
#[must_use]
pub fn distinct_technologies(projects: &[Project]) -> Vec<String> {
    let mut seen = Vec::new();
    for project in projects {
        for technology in &project.technologies {
            if !seen.contains(technology) {
                seen.push(technology.clone());
            }
        }
    }
    seen
}
