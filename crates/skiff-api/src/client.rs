//! HTTP client for the v4 API

use crate::error::{ApiError, ApiResult};
use crate::models::{Envelope, PagesProject, ProjectRequest, WorkerUpload, WorkersSubdomain};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Client for the account-scoped Pages and Workers endpoints
pub struct CloudflareClient {
    http: Client,
    base_url: String,
    account_id: String,
    token: String,
}

impl CloudflareClient {
    /// Create a client against the production API
    pub fn new(account_id: &str, token: &str) -> ApiResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, account_id, token)
    }

    /// Create a client against a specific base URL (tests point this at a
    /// mock server)
    pub fn with_base_url(base_url: &str, account_id: &str, token: &str) -> ApiResult<Self> {
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            account_id: account_id.to_string(),
            token: token.to_string(),
        })
    }

    // ========== Pages projects ==========

    /// Fetch a project by name. A missing project is `ApiError::NotFound`.
    pub async fn get_project(&self, name: &str) -> ApiResult<PagesProject> {
        let path = format!("/accounts/{}/pages/projects/{}", self.account_id, name);
        tracing::debug!(project = %name, "Fetching Pages project");
        let builder = self.http.get(self.url(&path)).bearer_auth(&self.token);
        self.expect_result(builder, &path).await
    }

    /// Create a project
    pub async fn create_project(&self, request: &ProjectRequest) -> ApiResult<PagesProject> {
        let path = format!("/accounts/{}/pages/projects", self.account_id);
        tracing::debug!(project = %request.name, "Creating Pages project");
        let builder = self
            .http
            .post(self.url(&path))
            .bearer_auth(&self.token)
            .json(request);
        self.expect_result(builder, &path).await
    }

    /// Update a project in place
    pub async fn update_project(&self, name: &str, request: &ProjectRequest) -> ApiResult<PagesProject> {
        let path = format!("/accounts/{}/pages/projects/{}", self.account_id, name);
        tracing::debug!(project = %name, "Updating Pages project");
        let builder = self
            .http
            .patch(self.url(&path))
            .bearer_auth(&self.token)
            .json(request);
        self.expect_result(builder, &path).await
    }

    /// Delete a project and all of its deployments
    pub async fn delete_project(&self, name: &str) -> ApiResult<()> {
        let path = format!("/accounts/{}/pages/projects/{}", self.account_id, name);
        tracing::debug!(project = %name, "Deleting Pages project");
        let builder = self.http.delete(self.url(&path)).bearer_auth(&self.token);
        self.send::<serde_json::Value>(builder, &path).await?;
        Ok(())
    }

    // ========== Workers ==========

    /// Upsert a Worker script under the given name. The platform treats a
    /// missing and an existing script identically, so one call covers both
    /// create and update.
    pub async fn upload_worker(&self, name: &str, upload: &WorkerUpload) -> ApiResult<()> {
        let path = format!("/accounts/{}/workers/scripts/{}", self.account_id, name);
        tracing::debug!(worker = %name, module = %upload.main_module, "Uploading Worker script");

        let metadata = serde_json::to_string(&upload.metadata())?;
        let form = Form::new()
            .part("metadata", Part::text(metadata).mime_str("application/json")?)
            .part(
                upload.main_module.clone(),
                Part::bytes(upload.script.clone().into_bytes())
                    .file_name(upload.main_module.clone())
                    .mime_str("application/javascript+module")?,
            );

        let builder = self
            .http
            .put(self.url(&path))
            .bearer_auth(&self.token)
            .multipart(form);
        self.send::<serde_json::Value>(builder, &path).await?;
        Ok(())
    }

    /// Fetch the account's workers.dev subdomain
    pub async fn workers_subdomain(&self) -> ApiResult<String> {
        let path = format!("/accounts/{}/workers/subdomain", self.account_id);
        let result: WorkersSubdomain = self
            .expect_result(self.http.get(self.url(&path)).bearer_auth(&self.token), &path)
            .await?;
        Ok(result.subdomain)
    }

    // ========== Internal HTTP helpers ==========

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn expect_result<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        path: &str,
    ) -> ApiResult<T> {
        self.send(builder, path)
            .await?
            .ok_or_else(|| ApiError::MissingResult(path.to_string()))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        path: &str,
    ) -> ApiResult<Option<T>> {
        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(path.to_string()));
        }

        let body = response.text().await?;

        if !status.is_success() {
            let errors = serde_json::from_str::<Envelope<serde_json::Value>>(&body)
                .map(|envelope| envelope.errors)
                .unwrap_or_default();
            return Err(ApiError::Api { status: status.as_u16(), errors });
        }

        let envelope: Envelope<T> = serde_json::from_str(&body)?;
        if !envelope.success {
            return Err(ApiError::Api { status: status.as_u16(), errors: envelope.errors });
        }

        Ok(envelope.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = CloudflareClient::new("account-1", "token").unwrap();
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_base_url_normalization() {
        let client = CloudflareClient::with_base_url("http://localhost:8080/", "account-1", "token")
            .unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
        assert_eq!(client.url("/accounts"), "http://localhost:8080/accounts");
    }
}
