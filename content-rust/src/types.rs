use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Generic envelope for one fetched entry. Immutable once fetched; its
/// lifetime is the lifetime of whatever cache slot holds it.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentEntry {
    pub id: String,
    /// Id of the content type the entry belongs to.
    pub content_type: String,
    pub created_at: Option<DateTime<Utc>>,
    /// Raw field map as returned by the delivery API.
    pub fields: Map<String, Value>,
}

impl ContentEntry {
    /// String value of a field, if present and a string.
    #[must_use]
    pub fn str_field(&self, id: &str) -> Option<&str> {
        self.fields.get(id).and_then(Value::as_str)
    }

    /// String-array value of a field. Non-string elements are skipped.
    #[must_use]
    pub fn str_list_field(&self, id: &str) -> Vec<String> {
        self.fields
            .get(id)
            .and_then(Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn bool_field(&self, id: &str) -> bool {
        self.fields
            .get(id)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// RFC 3339 date value of a field.
    #[must_use]
    pub fn date_field(&self, id: &str) -> Option<DateTime<Utc>> {
        self.str_field(id)
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|date| date.with_timezone(&Utc))
    }
}

/// A media asset referenced by entries, flattened from the delivery
/// response's `includes` section.
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    pub id: String,
    pub title: Option<String>,
    pub url: Option<String>,
}

/// One page of entries plus the assets they link to, indexed by asset id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryCollection {
    pub items: Vec<ContentEntry>,
    pub assets: HashMap<String, Asset>,
}

/// A field declared on a content type.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ContentTypeField {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: String,
    #[serde(default)]
    pub required: bool,
}

/// Schema descriptor for one content type.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentType {
    pub id: String,
    pub name: String,
    pub display_field: Option<String>,
    pub fields: Vec<ContentTypeField>,
}

impl ContentType {
    #[must_use]
    pub fn has_field(&self, id: &str) -> bool {
        self.fields.iter().any(|field| field.id == id)
    }
}

/// Options recognized by entry queries.
///
/// Serialized into delivery API query pairs. When `order` is unset the
/// client queries creation-descending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    pub order: Option<String>,
    pub limit: Option<u32>,
    /// Field paths to request, e.g. `sys` or `fields.title`.
    pub select: Option<Vec<String>>,
    /// Link resolution depth for nested assets and entries.
    pub include: Option<u8>,
    /// Exact-match filters on entry fields, as `(field id, value)` pairs.
    pub field_filters: Vec<(String, String)>,
}

impl QueryOptions {
    #[must_use]
    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn select(mut self, select: Vec<String>) -> Self {
        self.select = Some(select);
        self
    }

    #[must_use]
    pub fn include(mut self, include: u8) -> Self {
        self.include = Some(include);
        self
    }

    /// Filter entries whose `field` equals `value` exactly.
    #[must_use]
    pub fn field_eq(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.field_filters.push((field.into(), value.into()));
        self
    }

    pub(crate) fn to_query_pairs(&self, content_type: &str) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("content_type".to_string(), content_type.to_string()),
            (
                "order".to_string(),
                self.order
                    .clone()
                    .unwrap_or_else(|| "-sys.createdAt".to_string()),
            ),
        ];
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(select) = &self.select {
            pairs.push(("select".to_string(), select.join(",")));
        }
        if let Some(include) = self.include {
            pairs.push(("include".to_string(), include.to_string()));
        }
        for (field, value) in &self.field_filters {
            pairs.push((format!("fields.{field}"), value.clone()));
        }
        pairs
    }
}

/// A project entry normalized for rendering and for the assistant context.
/// `slug` is the external identity used for routing; uniqueness is assumed,
/// not enforced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Project {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub technologies: Vec<String>,
    /// Absolute URL of the featured image, if any.
    pub featured_image: Option<String>,
    pub github_url: Option<String>,
    pub live_demo_url: Option<String>,
    pub project_date: Option<DateTime<Utc>>,
    pub featured: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// A blog post entry normalized for rendering and for the assistant context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlogPost {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub published_at: Option<DateTime<Utc>>,
    /// Estimated read time derived from the body's plain text.
    pub read_time_minutes: u32,
}

/// The optional standalone about page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AboutPage {
    pub title: String,
    pub body: String,
}

// --- Raw delivery API shapes ---

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawSys {
    pub id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub content_type: Option<RawLink>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawLink {
    pub sys: RawLinkSys,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawLinkSys {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawEntry {
    pub sys: RawSys,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl From<RawEntry> for ContentEntry {
    fn from(raw: RawEntry) -> Self {
        Self {
            id: raw.sys.id,
            content_type: raw
                .sys
                .content_type
                .map(|link| link.sys.id)
                .unwrap_or_default(),
            created_at: raw.sys.created_at,
            fields: raw.fields,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawAsset {
    pub sys: RawLinkSys,
    #[serde(default)]
    pub fields: RawAssetFields,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub(crate) struct RawAssetFields {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub file: Option<RawAssetFile>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawAssetFile {
    #[serde(default)]
    pub url: Option<String>,
}

impl From<RawAsset> for Asset {
    fn from(raw: RawAsset) -> Self {
        Self {
            id: raw.sys.id,
            title: raw.fields.title,
            url: raw.fields.file.and_then(|file| file.url),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RawIncludes {
    #[serde(default)]
    pub asset: Vec<RawAsset>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawEntryCollection {
    #[serde(default)]
    pub items: Vec<RawEntry>,
    #[serde(default)]
    pub includes: Option<RawIncludes>,
}

impl From<RawEntryCollection> for EntryCollection {
    fn from(raw: RawEntryCollection) -> Self {
        let assets = raw
            .includes
            .map(|includes| {
                includes
                    .asset
                    .into_iter()
                    .map(Asset::from)
                    .map(|asset| (asset.id.clone(), asset))
                    .collect()
            })
            .unwrap_or_default();
        Self {
            items: raw.items.into_iter().map(ContentEntry::from).collect(),
            assets,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawContentType {
    pub sys: RawLinkSys,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_field: Option<String>,
    #[serde(default)]
    pub fields: Vec<ContentTypeField>,
}

impl From<RawContentType> for ContentType {
    fn from(raw: RawContentType) -> Self {
        Self {
            id: raw.sys.id,
            name: raw.name,
            display_field: raw.display_field,
            fields: raw.fields,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawContentTypeCollection {
    #[serde(default)]
    pub items: Vec<RawContentType>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_pairs_carry_all_recognized_options() {
        let options = QueryOptions::default()
            .limit(10)
            .include(2)
            .select(vec!["sys".to_string(), "fields.title".to_string()])
            .field_eq("slug", "my-project");
        let pairs = options.to_query_pairs("project");

        assert!(pairs.contains(&("content_type".to_string(), "project".to_string())));
        assert!(pairs.contains(&("order".to_string(), "-sys.createdAt".to_string())));
        assert!(pairs.contains(&("limit".to_string(), "10".to_string())));
        assert!(pairs.contains(&("select".to_string(), "sys,fields.title".to_string())));
        assert!(pairs.contains(&("include".to_string(), "2".to_string())));
        assert!(pairs.contains(&("fields.slug".to_string(), "my-project".to_string())));
    }

    #[test]
    fn entry_collection_indexes_included_assets() {
        let raw: RawEntryCollection = serde_json::from_value(json!({
            "items": [
                {
                    "sys": {
                        "id": "e1",
                        "createdAt": "2024-03-01T10:00:00Z",
                        "contentType": { "sys": { "id": "project" } }
                    },
                    "fields": { "title": "Demo" }
                }
            ],
            "includes": {
                "Asset": [
                    {
                        "sys": { "id": "a1" },
                        "fields": {
                            "title": "Cover",
                            "file": { "url": "//images.ctfassets.net/x/cover.jpg" }
                        }
                    }
                ]
            }
        }))
        .expect("collection parses");

        let collection = EntryCollection::from(raw);
        assert_eq!(collection.items.len(), 1);
        assert_eq!(collection.items[0].content_type, "project");
        assert_eq!(collection.items[0].str_field("title"), Some("Demo"));
        assert_eq!(
            collection.assets["a1"].url.as_deref(),
            Some("//images.ctfassets.net/x/cover.jpg")
        );
    }
}
