use crate::{
    AboutPage, Asset, BlogPost, ContentEntry, ContentSource, ContentType, Project, QueryOptions,
};
use serde_json::Value;
use std::{collections::HashMap, sync::Arc};

/// Field ids recognized on a project entry. The selection sent upstream is
/// the intersection of this list with the discovered type's actual fields.
const PROJECT_FIELDS: &[&str] = &[
    "title",
    "slug",
    "description",
    "technologies",
    "featuredImage",
    "gitHubUrl",
    "liveDemoUrl",
    "content",
    "projectDate",
    "featured",
];

/// Field ids a content type must carry to qualify as the project type.
const REQUIRED_PROJECT_FIELDS: &[&str] = &["title", "description"];

/// Link resolution depth requested so nested asset links arrive inline.
const PROJECT_INCLUDE_DEPTH: u8 = 2;

/// Characters of body text counted as one minute of reading.
const READ_TIME_CHARS_PER_MINUTE: usize = 200;

/// Select the content type that structurally represents projects.
///
/// Among candidates whose field-id set covers `required_fields`, the one
/// with the smallest type id wins, so the choice is stable under upstream
/// reordering.
#[must_use]
pub fn resolve_schema<'a>(
    candidates: &'a [ContentType],
    required_fields: &[&str],
) -> Option<&'a ContentType> {
    candidates
        .iter()
        .filter(|candidate| {
            required_fields
                .iter()
                .all(|field| candidate.has_field(field))
        })
        .min_by(|a, b| a.id.cmp(&b.id))
}

/// Asset URLs may arrive protocol-relative (`//host/path`); rewrite them to
/// explicit `https://` before they reach any consumer.
#[must_use]
pub fn normalize_asset_url(url: &str) -> String {
    match url.strip_prefix("//") {
        Some(rest) => format!("https://{rest}"),
        None => url.to_string(),
    }
}

/// Resolves the project content type at runtime and returns typed projects.
///
/// The schema name for "the project content type" is not guaranteed stable,
/// so the resolver lists all content types once and keeps the result for its
/// own lifetime. Schema changes require constructing a new resolver.
pub struct ProjectResolver {
    source: Arc<dyn ContentSource>,
    content_types: futures::lock::Mutex<Option<Arc<Vec<ContentType>>>>,
}

impl ProjectResolver {
    #[must_use]
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self {
            source,
            content_types: futures::lock::Mutex::new(None),
        }
    }

    /// The discovered content types, fetched on first use. A failed listing
    /// is not cached, so the next call retries.
    async fn content_types(&self) -> Arc<Vec<ContentType>> {
        let mut guard = self.content_types.lock().await;
        if let Some(types) = guard.as_ref() {
            return Arc::clone(types);
        }
        match self.source.content_types().await {
            Ok(types) => {
                tracing::debug!(count = types.len(), "discovered content types");
                let types = Arc::new(types);
                *guard = Some(Arc::clone(&types));
                types
            }
            Err(error) => {
                tracing::error!(%error, "failed to list content types");
                Arc::new(Vec::new())
            }
        }
    }

    async fn project_type(&self) -> Option<ContentType> {
        let types = self.content_types().await;
        let resolved = resolve_schema(&types, REQUIRED_PROJECT_FIELDS).cloned();
        if resolved.is_none() {
            tracing::error!(
                available = types.len(),
                "no content type carries the project field set"
            );
        }
        resolved
    }

    fn project_query(content_type: &ContentType, options: QueryOptions) -> QueryOptions {
        let mut select = vec!["sys".to_string()];
        select.extend(
            PROJECT_FIELDS
                .iter()
                .filter(|field| content_type.has_field(field))
                .map(|field| format!("fields.{field}")),
        );
        options.select(select).include(PROJECT_INCLUDE_DEPTH)
    }

    /// Projects ordered creation-descending. An undiscoverable schema or a
    /// failed fetch yields an empty list with a diagnostic, never an error,
    /// so callers can render a graceful "no projects" state.
    pub async fn projects(&self, options: QueryOptions) -> Vec<Project> {
        let Some(content_type) = self.project_type().await else {
            return Vec::new();
        };
        let query = Self::project_query(&content_type, options);
        match self.source.entries(&content_type.id, &query).await {
            Ok(collection) => collection
                .items
                .iter()
                .map(|entry| project_from_entry(entry, &collection.assets))
                .collect(),
            Err(error) => {
                tracing::error!(%error, content_type = %content_type.id, "failed to fetch projects");
                Vec::new()
            }
        }
    }

    /// Look up a single project by exact slug match. `None` when nothing
    /// matches; "not found" is a valid outcome, not a failure.
    pub async fn project_by_slug(&self, slug: &str) -> Option<Project> {
        let content_type = self.project_type().await?;
        let query = Self::project_query(
            &content_type,
            QueryOptions::default().field_eq("slug", slug).limit(1),
        );
        match self.source.entries(&content_type.id, &query).await {
            Ok(collection) => {
                let project = collection
                    .items
                    .first()
                    .map(|entry| project_from_entry(entry, &collection.assets));
                if project.is_none() {
                    tracing::debug!(slug, "no project found for slug");
                }
                project
            }
            Err(error) => {
                tracing::error!(%error, slug, "failed to fetch project by slug");
                None
            }
        }
    }
}

/// Normalize a raw entry into a [`Project`], resolving the featured-image
/// asset link against the collection's included assets.
#[must_use]
pub fn project_from_entry(entry: &ContentEntry, assets: &HashMap<String, Asset>) -> Project {
    Project {
        title: entry.str_field("title").unwrap_or_default().to_string(),
        slug: entry.str_field("slug").unwrap_or_default().to_string(),
        description: entry
            .str_field("description")
            .or_else(|| entry.str_field("excerpt"))
            .unwrap_or_default()
            .to_string(),
        technologies: entry.str_list_field("technologies"),
        featured_image: asset_url(entry.fields.get("featuredImage"), assets),
        github_url: entry.str_field("gitHubUrl").map(str::to_string),
        live_demo_url: entry.str_field("liveDemoUrl").map(str::to_string),
        project_date: entry.date_field("projectDate"),
        featured: entry.bool_field("featured"),
        created_at: entry.created_at,
    }
}

/// Normalize a raw entry into a [`BlogPost`]. Read time is derived from the
/// rich-text body's plain text.
#[must_use]
pub fn blog_post_from_entry(entry: &ContentEntry) -> BlogPost {
    let body_len = entry
        .fields
        .get("content")
        .map(|content| rich_text_plain(content).chars().count())
        .unwrap_or_default();
    BlogPost {
        title: entry.str_field("title").unwrap_or_default().to_string(),
        slug: entry.str_field("slug").unwrap_or_default().to_string(),
        excerpt: entry.str_field("excerpt").unwrap_or_default().to_string(),
        tags: entry.str_list_field("tags"),
        published_at: entry.date_field("publishDate").or(entry.created_at),
        read_time_minutes: u32::try_from(body_len.div_ceil(READ_TIME_CHARS_PER_MINUTE))
            .unwrap_or(u32::MAX),
    }
}

/// Normalize a raw page entry into an [`AboutPage`].
#[must_use]
pub fn about_page_from_entry(entry: &ContentEntry) -> AboutPage {
    AboutPage {
        title: entry.str_field("title").unwrap_or_default().to_string(),
        body: entry
            .fields
            .get("content")
            .map(|content| rich_text_plain(content))
            .unwrap_or_default(),
    }
}

/// A field may hold an asset link (`{sys: {id}}`) resolved through the
/// collection's includes, or an inline asset (`{fields: {file: {url}}}`).
fn asset_url(field: Option<&Value>, assets: &HashMap<String, Asset>) -> Option<String> {
    let field = field?;
    let linked = field
        .pointer("/sys/id")
        .and_then(Value::as_str)
        .and_then(|id| assets.get(id))
        .and_then(|asset| asset.url.as_deref());
    let inline = field.pointer("/fields/file/url").and_then(Value::as_str);
    linked.or(inline).map(normalize_asset_url)
}

/// Collect the text leaves of a rich-text document, space-joined in
/// document order.
fn rich_text_plain(value: &Value) -> String {
    fn walk(value: &Value, out: &mut Vec<String>) {
        match value {
            Value::Object(map) => {
                if let Some(text) = map.get("value").and_then(Value::as_str) {
                    if !text.is_empty() {
                        out.push(text.to_string());
                    }
                }
                if let Some(children) = map.get("content") {
                    walk(children, out);
                }
            }
            Value::Array(values) => {
                for child in values {
                    walk(child, out);
                }
            }
            _ => {}
        }
    }

    let mut out = Vec::new();
    walk(value, &mut out);
    out.join(" ")
}
