// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! REST client for the church administration API.
//!
//! Every operation issues exactly one HTTP request. Non-success statuses
//! and transport errors become [`AppError::Fetch`] carrying the fixed
//! message of the operation; a success response with a body that does not
//! parse becomes [`AppError::Decode`].

use super::DataAccess;
use crate::error::{AppError, Result};
use crate::models::member::COUNT_FAILED;
use crate::models::Resource;
use serde::de::DeserializeOwned;

/// Remote API client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the API rooted at `base_url` (without `/api`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url<R: Resource>(&self) -> String {
        format!("{}/api/{}", self.base_url, R::PATH)
    }

    fn record_url<R: Resource>(&self, id: &str) -> String {
        format!(
            "{}/{}",
            self.collection_url::<R>(),
            urlencoding::encode(id)
        )
    }

    /// Send a prepared request, mapping transport errors to `message`.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        message: &'static str,
    ) -> Result<reqwest::Response> {
        request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "Request to API failed");
            AppError::fetch(message, e.to_string())
        })
    }

    /// Check response status and return error if not successful.
    async fn check_response(
        &self,
        response: reqwest::Response,
        message: &'static str,
    ) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = %status, url = %url, body = %body, "API returned error status");

        Err(AppError::fetch(message, format!("HTTP {}: {}", status, body)))
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        message: &'static str,
    ) -> Result<T> {
        let response = self.check_response(response, message).await?;
        response
            .json()
            .await
            .map_err(|e| AppError::Decode(format!("JSON parse error: {}", e)))
    }
}

impl DataAccess for ApiClient {
    /// GET /api/{resource}
    async fn list<R: Resource>(&self) -> Result<Vec<R::Record>> {
        let message = R::MESSAGES.list_failed;
        let response = self
            .send(self.http.get(self.collection_url::<R>()), message)
            .await?;
        let records: Vec<R::Record> = self.check_response_json(response, message).await?;
        tracing::debug!(resource = R::PATH, count = records.len(), "Fetched collection");
        Ok(records)
    }

    /// POST /api/{resource}
    async fn create<R: Resource>(&self, draft: &R::Draft) -> Result<R::Record> {
        let message = R::MESSAGES.create_failed;
        let response = self
            .send(self.http.post(self.collection_url::<R>()).json(draft), message)
            .await?;
        self.check_response_json(response, message).await
    }

    /// PUT /api/{resource}/{id}
    async fn update<R: Resource>(&self, id: &str, draft: &R::Draft) -> Result<R::Record> {
        let message = R::MESSAGES.update_failed;
        let response = self
            .send(self.http.put(self.record_url::<R>(id)).json(draft), message)
            .await?;
        self.check_response_json(response, message).await
    }

    /// DELETE /api/{resource}/{id}
    async fn delete<R: Resource>(&self, id: &str) -> Result<()> {
        let message = R::MESSAGES.delete_failed;
        let response = self
            .send(self.http.delete(self.record_url::<R>(id)), message)
            .await?;
        self.check_response(response, message).await?;
        Ok(())
    }

    /// GET /api/members/count
    async fn member_count(&self) -> Result<u64> {
        let url = format!("{}/api/members/count", self.base_url);
        let response = self.send(self.http.get(url), COUNT_FAILED).await?;
        self.check_response_json(response, COUNT_FAILED).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Members, Roles};

    #[test]
    fn test_urls_strip_trailing_slash_and_encode_id() {
        let client = ApiClient::new("https://localhost:7160/");
        assert_eq!(client.base_url(), "https://localhost:7160");
        assert_eq!(
            client.collection_url::<Members>(),
            "https://localhost:7160/api/members"
        );
        assert_eq!(
            client.record_url::<Roles>("a b/c"),
            "https://localhost:7160/api/roles/a%20b%2Fc"
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_is_fetch_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let client = ApiClient::new("http://127.0.0.1:9");
        let err = client.list::<Members>().await.unwrap_err();
        assert!(err.is_fetch_error());
        assert_eq!(err.to_string(), "Error al obtener los miembros");
    }
}
