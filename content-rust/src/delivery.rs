use crate::{
    client_utils,
    types::{RawContentTypeCollection, RawEntry, RawEntryCollection},
    ContentEntry, ContentError, ContentResult, ContentSource, ContentType, DeliveryConfig,
    EntryCollection, QueryOptions,
};
use reqwest::{
    header::{self, HeaderMap, HeaderName, HeaderValue},
    Client,
};
use std::collections::HashMap;

const PROVIDER: &str = "contentful";

/// Client for a Contentful-compatible content delivery API.
pub struct DeliveryClient {
    space_id: String,
    access_token: String,
    environment: String,
    base_url: String,
    client: Client,
    headers: HashMap<String, String>,
}

#[derive(Clone, Default)]
pub struct DeliveryClientOptions {
    pub space_id: String,
    pub access_token: String,
    /// Defaults to `master`.
    pub environment: Option<String>,
    pub base_url: Option<String>,
    pub headers: Option<HashMap<String, String>>,
    pub client: Option<Client>,
}

impl DeliveryClient {
    #[must_use]
    pub fn new(options: DeliveryClientOptions) -> Self {
        let DeliveryClientOptions {
            space_id,
            access_token,
            environment,
            base_url,
            headers,
            client,
        } = options;

        let base_url = base_url
            .unwrap_or_else(|| "https://cdn.contentful.com".to_string())
            .trim_end_matches('/')
            .to_string();
        let environment = environment.unwrap_or_else(|| "master".to_string());
        let client = client.unwrap_or_else(Client::new);
        let headers = headers.unwrap_or_default();

        Self {
            space_id,
            access_token,
            environment,
            base_url,
            client,
            headers,
        }
    }

    #[must_use]
    pub fn from_config(config: DeliveryConfig) -> Self {
        Self::new(DeliveryClientOptions {
            space_id: config.space_id,
            access_token: config.access_token,
            environment: Some(config.environment),
            ..Default::default()
        })
    }

    fn environment_url(&self, path: &str) -> String {
        format!(
            "{}/spaces/{}/environments/{}/{path}",
            self.base_url, self.space_id, self.environment
        )
    }

    fn request_headers(&self) -> ContentResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        let auth_header = HeaderValue::from_str(&format!("Bearer {}", self.access_token))
            .map_err(|error| {
                ContentError::InvalidInput(format!("Invalid access token header value: {error}"))
            })?;
        headers.insert(header::AUTHORIZATION, auth_header);

        for (key, value) in &self.headers {
            let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|error| {
                ContentError::InvalidInput(format!("Invalid header name '{key}': {error}"))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|error| {
                ContentError::InvalidInput(format!("Invalid header value for '{key}': {error}"))
            })?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }
}

#[async_trait::async_trait]
impl ContentSource for DeliveryClient {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    async fn content_types(&self) -> ContentResult<Vec<ContentType>> {
        let headers = self.request_headers()?;
        let response: RawContentTypeCollection = client_utils::get_json(
            &self.client,
            &self.environment_url("content_types"),
            &[],
            headers,
        )
        .await?;
        Ok(response.items.into_iter().map(ContentType::from).collect())
    }

    async fn entries(
        &self,
        content_type: &str,
        options: &QueryOptions,
    ) -> ContentResult<EntryCollection> {
        let headers = self.request_headers()?;
        let query = options.to_query_pairs(content_type);
        let response: RawEntryCollection = client_utils::get_json(
            &self.client,
            &self.environment_url("entries"),
            &query,
            headers,
        )
        .await?;
        Ok(EntryCollection::from(response))
    }

    async fn entry(&self, id: &str) -> ContentResult<ContentEntry> {
        let headers = self.request_headers()?;
        let response: RawEntry = client_utils::get_json(
            &self.client,
            &self.environment_url(&format!("entries/{id}")),
            &[],
            headers,
        )
        .await?;
        Ok(ContentEntry::from(response))
    }
}
