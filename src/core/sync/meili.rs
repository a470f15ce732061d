//! Meilisearch HTTP client.
//!
//! Every mutating endpoint answers with an enqueued task. The client
//! polls `/tasks/{uid}` until the task settles so that each protocol
//! step has finished server-side before the next one starts. There is
//! no overall timeout and no retry.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::core::error::{PostsyncError, Result, SyncStage};
use crate::core::sync::backend::SearchBackend;
use crate::core::types::{Document, IndexSettings};

const INDEX_NOT_FOUND: &str = "index_not_found";
const INDEX_ALREADY_EXISTS: &str = "index_already_exists";

/// Async client for a Meilisearch-compatible service
#[derive(Clone)]
pub struct MeiliClient {
    client: Client,
    host: String,
    poll_interval: Duration,
}

impl MeiliClient {
    /// Build a client
    ///
    /// # Arguments
    /// * `host` - Base URL, e.g. `http://localhost:7700`
    /// * `api_key` - Sent as `Authorization: Bearer <key>`
    /// * `poll_interval` - Delay between task status polls
    pub fn new(host: &str, api_key: &str, poll_interval: Duration) -> Result<Self> {
        let host = host.trim();
        if !(host.starts_with("http://") || host.starts_with("https://")) {
            return Err(PostsyncError::ConfigError(format!(
                "Search host must be an http(s) URL, got '{host}'"
            )));
        }

        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", api_key.trim()))
            .map_err(|_| PostsyncError::ConfigError("Invalid API key".to_string()))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| PostsyncError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            host: host.trim_end_matches('/').to_string(),
            poll_interval,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.host, path)
    }

    async fn send(&self, stage: SyncStage, request: RequestBuilder) -> Result<Response> {
        request
            .send()
            .await
            .map_err(|e| PostsyncError::service(stage, format!("request failed: {e}")))
    }

    /// Check an enqueue response and extract its task uid
    async fn accept(&self, stage: SyncStage, response: Response) -> Result<u64> {
        if !response.status().is_success() {
            return Err(api_error(stage, response).await);
        }
        let summary: TaskSummary = response
            .json()
            .await
            .map_err(|e| PostsyncError::service(stage, format!("invalid task response: {e}")))?;
        Ok(summary.task_uid)
    }

    /// Poll a task until it succeeds, fails or is canceled
    async fn wait_for_task(&self, stage: SyncStage, task_uid: u64) -> Result<Task> {
        let url = self.url(&format!("/tasks/{task_uid}"));
        loop {
            let response = self.send(stage, self.client.get(&url)).await?;
            if !response.status().is_success() {
                return Err(api_error(stage, response).await);
            }
            let task: Task = response
                .json()
                .await
                .map_err(|e| PostsyncError::service(stage, format!("invalid task payload: {e}")))?;

            match task.status {
                TaskStatus::Enqueued | TaskStatus::Processing => {
                    tracing::debug!("Task {} is {:?}, waiting", task_uid, task.status);
                    tokio::time::sleep(self.poll_interval).await;
                }
                TaskStatus::Succeeded | TaskStatus::Failed => return Ok(task),
                TaskStatus::Canceled => {
                    return Err(PostsyncError::service(
                        stage,
                        format!("task {task_uid} was canceled"),
                    ))
                }
            }
        }
    }

    async fn run_task(&self, stage: SyncStage, request: RequestBuilder) -> Result<Task> {
        let response = self.send(stage, request).await?;
        let task_uid = self.accept(stage, response).await?;
        self.wait_for_task(stage, task_uid).await
    }
}

#[async_trait]
impl SearchBackend for MeiliClient {
    async fn delete_index_if_exists(&self, index: &str) -> Result<bool> {
        let stage = SyncStage::Delete;
        let request = self.client.delete(self.url(&format!("/indexes/{index}")));
        let response = self.send(stage, request).await?;

        // Some server versions reject synchronously instead of failing the task
        if response.status() == StatusCode::NOT_FOUND {
            let err = read_api_error(response).await;
            return match err {
                Ok(api) if api.code == INDEX_NOT_FOUND => Ok(false),
                Ok(api) => Err(PostsyncError::service(stage, api.describe(StatusCode::NOT_FOUND))),
                Err(body) => Err(PostsyncError::service(stage, format!("HTTP 404: {body}"))),
            };
        }

        let task_uid = self.accept(stage, response).await?;
        let task = self.wait_for_task(stage, task_uid).await?;
        match task.status {
            TaskStatus::Succeeded => Ok(true),
            _ if task.error_code() == Some(INDEX_NOT_FOUND) => Ok(false),
            _ => Err(task.failure(stage)),
        }
    }

    async fn get_or_create_index(&self, index: &str, primary_key: &str) -> Result<()> {
        let stage = SyncStage::Create;
        let response = self
            .send(stage, self.client.get(self.url(&format!("/indexes/{index}"))))
            .await?;

        match response.status() {
            status if status.is_success() => {
                tracing::debug!("Index {} already exists", index);
                return Ok(());
            }
            StatusCode::NOT_FOUND => {}
            _ => return Err(api_error(stage, response).await),
        }

        let body = CreateIndexRequest {
            uid: index,
            primary_key,
        };
        let task = self
            .run_task(stage, self.client.post(self.url("/indexes")).json(&body))
            .await?;
        match task.status {
            TaskStatus::Succeeded => Ok(()),
            _ if task.error_code() == Some(INDEX_ALREADY_EXISTS) => Ok(()),
            _ => Err(task.failure(stage)),
        }
    }

    async fn update_settings(&self, index: &str, settings: &IndexSettings) -> Result<()> {
        let stage = SyncStage::Configure;
        let body = SettingsRequest::from(settings);
        let request = self
            .client
            .patch(self.url(&format!("/indexes/{index}/settings")))
            .json(&body);
        let task = self.run_task(stage, request).await?;
        match task.status {
            TaskStatus::Succeeded => Ok(()),
            _ => Err(task.failure(stage)),
        }
    }

    async fn add_documents(
        &self,
        index: &str,
        documents: &[Document],
        primary_key: &str,
    ) -> Result<()> {
        let stage = SyncStage::Upload;
        let request = self
            .client
            .post(self.url(&format!("/indexes/{index}/documents")))
            .query(&[("primaryKey", primary_key)])
            .json(documents);
        let task = self.run_task(stage, request).await?;
        match task.status {
            TaskStatus::Succeeded => Ok(()),
            _ => Err(task.failure(stage)),
        }
    }
}

async fn api_error(stage: SyncStage, response: Response) -> PostsyncError {
    let status = response.status();
    match read_api_error(response).await {
        Ok(api) => PostsyncError::service(stage, api.describe(status)),
        Err(body) => PostsyncError::service(stage, format!("HTTP {status}: {body}")),
    }
}

/// Parse a Meilisearch error body, or hand back the raw text
async fn read_api_error(response: Response) -> std::result::Result<ApiError, String> {
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<body unavailable>".to_string());
    serde_json::from_str(&body).map_err(|_| body)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskSummary {
    #[serde(alias = "uid")]
    task_uid: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
enum TaskStatus {
    Enqueued,
    Processing,
    Succeeded,
    Failed,
    Canceled,
}

#[derive(Debug, Deserialize)]
struct Task {
    #[serde(alias = "taskUid")]
    uid: u64,
    status: TaskStatus,
    #[serde(default)]
    error: Option<ApiError>,
}

impl Task {
    fn error_code(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.code.as_str())
    }

    fn failure(&self, stage: SyncStage) -> PostsyncError {
        let detail = match &self.error {
            Some(err) => format!("{}: {}", err.code, err.message),
            None => format!("{:?}", self.status),
        };
        PostsyncError::service(stage, format!("task {} failed: {detail}", self.uid))
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    code: String,
}

impl ApiError {
    fn describe(&self, status: StatusCode) -> String {
        format!("{} ({}): {}", self.code, status, self.message)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateIndexRequest<'a> {
    uid: &'a str,
    primary_key: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SettingsRequest<'a> {
    searchable_attributes: &'a [String],
    displayed_attributes: &'a [String],
    sortable_attributes: &'a [String],
}

impl<'a> From<&'a IndexSettings> for SettingsRequest<'a> {
    fn from(settings: &'a IndexSettings) -> Self {
        Self {
            searchable_attributes: &settings.searchable_attributes,
            displayed_attributes: &settings.displayed_attributes,
            sortable_attributes: &settings.sortable_attributes,
        }
    }
}
