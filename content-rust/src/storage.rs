use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

const THEME_KEY: &str = "theme";
const BOOKMARKS_KEY: &str = "bookmarkedPosts";
const LIKED_POSTS_KEY: &str = "likedPosts";

fn likes_key(slug: &str) -> String {
    format!("likes_{slug}")
}

fn views_key(slug: &str) -> String {
    format!("views_{slug}")
}

fn comments_key(slug: &str) -> String {
    format!("comments_{slug}")
}

/// Plain-string key/value persistence, the shape browser local storage
/// exposes. Values carry no schema version; consumers must tolerate
/// unparseable leftovers from older layouts.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

/// In-memory store used by default and in tests.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.remove(key);
    }
}

/// The visitor-selected color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn from_str(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// A visitor comment on a blog post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    pub likes: u32,
}

/// Visitor engagement state (bookmarks, likes, views, comments, theme) over
/// a [`KeyValueStore`], using the browser-storage key layout: `theme`,
/// `bookmarkedPosts`, `likedPosts`, `likes_<slug>`, `views_<slug>`,
/// `comments_<slug>`. All writes are last-writer-wins.
pub struct EngagementStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> EngagementStore<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn slug_list(&self, key: &str) -> Vec<String> {
        let Some(raw) = self.store.get(key) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(slugs) => slugs,
            Err(error) => {
                tracing::warn!(key, %error, "discarding unparseable stored list");
                Vec::new()
            }
        }
    }

    fn write_slug_list(&self, key: &str, slugs: &[String]) {
        match serde_json::to_string(slugs) {
            Ok(raw) => self.store.set(key, raw),
            Err(error) => tracing::warn!(key, %error, "failed to serialize stored list"),
        }
    }

    fn counter(&self, key: &str) -> u64 {
        self.store
            .get(key)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(0)
    }

    pub fn theme(&self) -> Option<Theme> {
        self.store.get(THEME_KEY).as_deref().and_then(Theme::from_str)
    }

    pub fn set_theme(&self, theme: Theme) {
        self.store.set(THEME_KEY, theme.as_str().to_string());
    }

    pub fn bookmarked_posts(&self) -> Vec<String> {
        self.slug_list(BOOKMARKS_KEY)
    }

    pub fn is_bookmarked(&self, slug: &str) -> bool {
        self.bookmarked_posts().iter().any(|s| s == slug)
    }

    pub fn set_bookmark(&self, slug: &str) {
        let mut slugs = self.bookmarked_posts();
        if !slugs.iter().any(|s| s == slug) {
            slugs.push(slug.to_string());
            self.write_slug_list(BOOKMARKS_KEY, &slugs);
        }
    }

    pub fn unset_bookmark(&self, slug: &str) {
        let mut slugs = self.bookmarked_posts();
        slugs.retain(|s| s != slug);
        self.write_slug_list(BOOKMARKS_KEY, &slugs);
    }

    pub fn has_liked(&self, slug: &str) -> bool {
        self.slug_list(LIKED_POSTS_KEY).iter().any(|s| s == slug)
    }

    /// Flip the visitor's like for `slug`, adjusting its like counter.
    /// Returns the new liked state.
    pub fn toggle_like(&self, slug: &str) -> bool {
        let mut liked = self.slug_list(LIKED_POSTS_KEY);
        let count = self.counter(&likes_key(slug));
        let now_liked = if liked.iter().any(|s| s == slug) {
            liked.retain(|s| s != slug);
            self.store
                .set(&likes_key(slug), count.saturating_sub(1).to_string());
            false
        } else {
            liked.push(slug.to_string());
            self.store.set(&likes_key(slug), (count + 1).to_string());
            true
        };
        self.write_slug_list(LIKED_POSTS_KEY, &liked);
        now_liked
    }

    pub fn like_count(&self, slug: &str) -> u64 {
        self.counter(&likes_key(slug))
    }

    /// Record one view of `slug` and return the new total.
    pub fn record_view(&self, slug: &str) -> u64 {
        let count = self.counter(&views_key(slug)) + 1;
        self.store.set(&views_key(slug), count.to_string());
        count
    }

    pub fn view_count(&self, slug: &str) -> u64 {
        self.counter(&views_key(slug))
    }

    pub fn comments(&self, slug: &str) -> Vec<Comment> {
        let Some(raw) = self.store.get(&comments_key(slug)) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(comments) => comments,
            Err(error) => {
                tracing::warn!(slug, %error, "discarding unparseable stored comments");
                Vec::new()
            }
        }
    }

    pub fn add_comment(&self, slug: &str, comment: Comment) {
        let mut comments = self.comments(slug);
        comments.push(comment);
        match serde_json::to_string(&comments) {
            Ok(raw) => self.store.set(&comments_key(slug), raw),
            Err(error) => tracing::warn!(slug, %error, "failed to serialize comments"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> EngagementStore<MemoryStore> {
        EngagementStore::new(MemoryStore::new())
    }

    #[test]
    fn bookmark_round_trip() {
        let engagement = store();
        engagement.set_bookmark("first-post");
        assert!(engagement.is_bookmarked("first-post"));
        engagement.unset_bookmark("first-post");
        assert!(!engagement.is_bookmarked("first-post"));
    }

    #[test]
    fn bookmarking_twice_stores_once() {
        let engagement = store();
        engagement.set_bookmark("first-post");
        engagement.set_bookmark("first-post");
        assert_eq!(engagement.bookmarked_posts(), vec!["first-post"]);
    }

    #[test]
    fn toggle_like_adjusts_counter() {
        let engagement = store();
        assert!(engagement.toggle_like("first-post"));
        assert_eq!(engagement.like_count("first-post"), 1);
        assert!(!engagement.toggle_like("first-post"));
        assert_eq!(engagement.like_count("first-post"), 0);
    }

    #[test]
    fn views_accumulate() {
        let engagement = store();
        assert_eq!(engagement.record_view("first-post"), 1);
        assert_eq!(engagement.record_view("first-post"), 2);
        assert_eq!(engagement.view_count("first-post"), 2);
        assert_eq!(engagement.view_count("other-post"), 0);
    }

    #[test]
    fn comments_append_in_order() {
        let engagement = store();
        let comment = |id: i64, text: &str| Comment {
            id,
            text: text.to_string(),
            author: "visitor".to_string(),
            timestamp: "2024-03-01T10:00:00Z".parse().unwrap(),
            likes: 0,
        };
        engagement.add_comment("first-post", comment(1, "nice"));
        engagement.add_comment("first-post", comment(2, "agreed"));
        let stored = engagement.comments("first-post");
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].text, "nice");
        assert_eq!(stored[1].text, "agreed");
    }

    #[test]
    fn unparseable_state_degrades_to_empty() {
        let memory = MemoryStore::new();
        memory.set(BOOKMARKS_KEY, "not json".to_string());
        let engagement = EngagementStore::new(memory);
        assert!(engagement.bookmarked_posts().is_empty());
    }

    #[test]
    fn theme_round_trip() {
        let engagement = store();
        assert_eq!(engagement.theme(), None);
        engagement.set_theme(Theme::Dark);
        assert_eq!(engagement.theme(), Some(Theme::Dark));
    }
}
