//! Azure Resource Manager HTTP client
//!
//! A thin JSON-over-HTTPS wrapper: authentication, transport policy, and
//! retries belong to the caller-supplied token and the underlying HTTP
//! stack. Long-running operations are tracked via the
//! `Azure-AsyncOperation` / `Location` headers and polled until a terminal
//! status.

use std::time::Duration;

use meridian_core::provider::{ProviderError, ProviderResult};
use serde::Deserialize;

const DEFAULT_ENDPOINT: &str = "https://management.azure.com";

const POLL_MAX_ATTEMPTS: u32 = 120;
const POLL_DELAY: Duration = Duration::from_secs(5);

/// Status of a long-running ARM operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum OperationStatus {
    Pending,
    InProgress,
    Succeeded,
    Failed,
    #[serde(alias = "Cancelled")]
    Canceled,
}

impl OperationStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OperationStatus::Succeeded | OperationStatus::Failed | OperationStatus::Canceled
        )
    }
}

#[derive(Debug, Deserialize)]
struct OperationResult {
    status: OperationStatus,
    error: Option<ArmError>,
}

#[derive(Debug, Deserialize)]
struct ArmError {
    code: Option<String>,
    message: Option<String>,
}

impl ArmError {
    fn message(&self) -> String {
        match (&self.code, &self.message) {
            (Some(code), Some(message)) => format!("{code}: {message}"),
            (_, Some(message)) => message.clone(),
            (Some(code), None) => code.clone(),
            (None, None) => "unknown error".to_string(),
        }
    }
}

/// Azure Resource Manager client
pub struct ArmClient {
    http: reqwest::Client,
    endpoint: String,
    bearer_token: String,
}

impl ArmClient {
    /// Create a client against the public ARM endpoint
    pub fn new(bearer_token: impl Into<String>) -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT, bearer_token)
    }

    /// Create a client against a specific endpoint (sovereign clouds, tests)
    pub fn with_endpoint(endpoint: impl Into<String>, bearer_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            bearer_token: bearer_token.into(),
        }
    }

    fn url(&self, id_path: &str, api_version: &str) -> String {
        format!("{}{}?api-version={}", self.endpoint, id_path, api_version)
    }

    /// GET a resource by its ID path; `Ok(None)` when it does not exist
    pub async fn get_resource(
        &self,
        id_path: &str,
        api_version: &str,
    ) -> ProviderResult<Option<serde_json::Value>> {
        log::debug!("GET {id_path}");
        let response = self
            .http
            .get(self.url(id_path, api_version))
            .bearer_auth(&self.bearer_token)
            .send()
            .await
            .map_err(|e| ProviderError::new(format!("Failed to get {id_path}")).with_cause(e))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::check_status("get", id_path, response).await?;
        let body = response
            .json()
            .await
            .map_err(|e| ProviderError::new(format!("Failed to decode {id_path}")).with_cause(e))?;
        Ok(Some(body))
    }

    /// PUT (create or update) a resource, waiting for any long-running
    /// operation, then return the resource body
    pub async fn put_resource(
        &self,
        id_path: &str,
        api_version: &str,
        body: &serde_json::Value,
    ) -> ProviderResult<serde_json::Value> {
        log::debug!("PUT {id_path}");
        let response = self
            .http
            .put(self.url(id_path, api_version))
            .bearer_auth(&self.bearer_token)
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::new(format!("Failed to put {id_path}")).with_cause(e))?;

        let poll_url = poll_url_from_headers(response.headers());
        let response = Self::check_status("put", id_path, response).await?;

        if let Some(url) = poll_url {
            self.wait_for_operation(&url).await?;
            // re-read so the caller sees the final server-side state
            return self
                .get_resource(id_path, api_version)
                .await?
                .ok_or_else(|| {
                    ProviderError::new(format!("{id_path} vanished after a completed operation"))
                });
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::new(format!("Failed to decode {id_path}")).with_cause(e))
    }

    /// PATCH a subset of a resource's properties, waiting for any
    /// long-running operation
    pub async fn patch_resource(
        &self,
        id_path: &str,
        api_version: &str,
        body: &serde_json::Value,
    ) -> ProviderResult<serde_json::Value> {
        log::debug!("PATCH {id_path}");
        let response = self
            .http
            .patch(self.url(id_path, api_version))
            .bearer_auth(&self.bearer_token)
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::new(format!("Failed to patch {id_path}")).with_cause(e))?;

        let poll_url = poll_url_from_headers(response.headers());
        let response = Self::check_status("patch", id_path, response).await?;

        if let Some(url) = poll_url {
            self.wait_for_operation(&url).await?;
            return self
                .get_resource(id_path, api_version)
                .await?
                .ok_or_else(|| {
                    ProviderError::new(format!("{id_path} vanished after a completed operation"))
                });
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::new(format!("Failed to decode {id_path}")).with_cause(e))
    }

    /// DELETE a resource, waiting for any long-running operation
    ///
    /// Deleting a resource that is already gone is not an error.
    pub async fn delete_resource(&self, id_path: &str, api_version: &str) -> ProviderResult<()> {
        log::debug!("DELETE {id_path}");
        let response = self
            .http
            .delete(self.url(id_path, api_version))
            .bearer_auth(&self.bearer_token)
            .send()
            .await
            .map_err(|e| ProviderError::new(format!("Failed to delete {id_path}")).with_cause(e))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(());
        }
        let poll_url = poll_url_from_headers(response.headers());
        Self::check_status("delete", id_path, response).await?;

        if let Some(url) = poll_url {
            self.wait_for_operation(&url).await?;
        }
        Ok(())
    }

    /// Poll a long-running operation until a terminal status
    async fn wait_for_operation(&self, poll_url: &str) -> ProviderResult<()> {
        for attempt in 0..POLL_MAX_ATTEMPTS {
            let response = self
                .http
                .get(poll_url)
                .bearer_auth(&self.bearer_token)
                .send()
                .await
                .map_err(|e| {
                    ProviderError::new("Failed to get operation status").with_cause(e)
                })?;
            let result: OperationResult = response.json().await.map_err(|e| {
                ProviderError::new("Failed to decode operation status").with_cause(e)
            })?;

            log::debug!("poll attempt {attempt}: {:?}", result.status);
            match result.status {
                OperationStatus::Succeeded => return Ok(()),
                OperationStatus::Failed => {
                    let msg = result
                        .error
                        .map(|e| e.message())
                        .unwrap_or_else(|| "unknown error".to_string());
                    return Err(ProviderError::new(format!("Operation failed: {msg}")));
                }
                OperationStatus::Canceled => {
                    return Err(ProviderError::new("Operation was canceled"));
                }
                OperationStatus::Pending | OperationStatus::InProgress => {
                    tokio::time::sleep(POLL_DELAY).await;
                }
            }
        }
        Err(ProviderError::new("Operation timed out"))
    }

    async fn check_status(
        operation: &str,
        id_path: &str,
        response: reqwest::Response,
    ) -> ProviderResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ProviderError::new(format!(
            "Failed to {operation} {id_path}: HTTP {status}: {body}"
        )))
    }
}

/// Extract the poll URL for a long-running operation, preferring
/// `Azure-AsyncOperation` over `Location`
fn poll_url_from_headers(headers: &reqwest::header::HeaderMap) -> Option<String> {
    for name in ["azure-asyncoperation", "location"] {
        if let Some(value) = headers.get(name)
            && let Ok(url) = value.to_str()
        {
            return Some(url.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_status_decodes_all_variants() {
        let cases = [
            ("\"Pending\"", OperationStatus::Pending),
            ("\"InProgress\"", OperationStatus::InProgress),
            ("\"Succeeded\"", OperationStatus::Succeeded),
            ("\"Failed\"", OperationStatus::Failed),
            ("\"Canceled\"", OperationStatus::Canceled),
            // some services spell it the British way
            ("\"Cancelled\"", OperationStatus::Canceled),
        ];
        for (json, expected) in cases {
            let status: OperationStatus = serde_json::from_str(json).unwrap();
            assert_eq!(status, expected);
        }
    }

    #[test]
    fn terminal_statuses() {
        assert!(OperationStatus::Succeeded.is_terminal());
        assert!(OperationStatus::Failed.is_terminal());
        assert!(OperationStatus::Canceled.is_terminal());
        assert!(!OperationStatus::Pending.is_terminal());
        assert!(!OperationStatus::InProgress.is_terminal());
    }

    #[test]
    fn operation_result_carries_error_details() {
        let result: OperationResult = serde_json::from_str(
            r#"{"status": "Failed", "error": {"code": "Conflict", "message": "name taken"}}"#,
        )
        .unwrap();
        assert_eq!(result.status, OperationStatus::Failed);
        assert_eq!(result.error.unwrap().message(), "Conflict: name taken");
    }

    #[test]
    fn poll_url_prefers_async_operation_header() {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("location", "https://example.com/location".parse().unwrap());
        headers.insert(
            "azure-asyncoperation",
            "https://example.com/operation".parse().unwrap(),
        );
        assert_eq!(
            poll_url_from_headers(&headers),
            Some("https://example.com/operation".to_string())
        );

        headers.remove("azure-asyncoperation");
        assert_eq!(
            poll_url_from_headers(&headers),
            Some("https://example.com/location".to_string())
        );

        headers.remove("location");
        assert_eq!(poll_url_from_headers(&headers), None);
    }

    #[test]
    fn url_joins_endpoint_path_and_api_version() {
        let client = ArmClient::with_endpoint("https://example.com/", "token");
        assert_eq!(
            client.url("/subscriptions/sub/resourceGroups/rg", "2024-03-01"),
            "https://example.com/subscriptions/sub/resourceGroups/rg?api-version=2024-03-01"
        );
    }
}
