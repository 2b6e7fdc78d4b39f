use crate::ContentError;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};

/// Create a GET request with query pairs, parse the JSON response.
/// Throws error on non OK status code.
pub async fn get_json<R: DeserializeOwned>(
    client: &Client,
    url: &str,
    query: &[(String, String)],
    headers: reqwest::header::HeaderMap,
) -> Result<R, ContentError> {
    let response = client
        .get(url)
        .headers(headers)
        .query(query)
        .send()
        .await?;
    if response.status().is_success() {
        Ok(response.json::<R>().await?)
    } else {
        Err(ContentError::StatusCode(
            response.status(),
            response.text().await.unwrap_or_default(),
        ))
    }
}

/// Create a JSON request, parse the response.
/// Throws error on non OK status code.
pub async fn post_json<T: Serialize, R: DeserializeOwned>(
    client: &Client,
    url: &str,
    data: &T,
    headers: reqwest::header::HeaderMap,
) -> Result<R, ContentError> {
    let response = client.post(url).headers(headers).json(data).send().await?;
    if response.status().is_success() {
        Ok(response.json::<R>().await?)
    } else {
        Err(ContentError::StatusCode(
            response.status(),
            response.text().await.unwrap_or_default(),
        ))
    }
}

/// Create a JSON request where only the status code matters (relay endpoints
/// answer with a plain-text body).
pub async fn post_json_ok<T: Serialize>(
    client: &Client,
    url: &str,
    data: &T,
    headers: reqwest::header::HeaderMap,
) -> Result<(), ContentError> {
    let response = client.post(url).headers(headers).json(data).send().await?;
    if response.status().is_success() {
        Ok(())
    } else {
        Err(ContentError::StatusCode(
            response.status(),
            response.text().await.unwrap_or_default(),
        ))
    }
}
