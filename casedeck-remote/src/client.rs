//! HTTP implementation of the task persistence gateway

use crate::config::RemoteConfig;
use async_trait::async_trait;
use casedeck_board::{BoardError, Result, Status, Task, TaskGateway, TaskId, TaskPatch};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use url::Url;

const HTTP_NOT_FOUND: u16 = 404;

/// Body of the status-change endpoint. `order_index` is omitted when the
/// server should append at the end of the column.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusChange {
    status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    order_index: Option<i64>,
}

/// [`TaskGateway`] backed by the task API over HTTP.
///
/// Endpoints live under `/api/tasks` relative to the configured base URL.
/// A 404 on a task endpoint becomes [`BoardError::TaskNotFound`], any other
/// non-success status becomes [`BoardError::GatewayStatus`], and transport
/// or body-decoding failures become [`BoardError::Gateway`].
#[derive(Debug, Clone)]
pub struct RemoteGateway {
    client: Client,
    base_url: Url,
    auth_token: Option<String>,
}

impl RemoteGateway {
    /// Build a gateway from connection settings.
    ///
    /// Fails with [`BoardError::Parse`] when the base URL is malformed or
    /// uses a scheme other than `http` or `https`.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        // Normalize to a trailing slash so joins keep any path prefix.
        let mut base = config.base_url.trim_end_matches('/').to_string();
        base.push('/');
        let base_url = Url::parse(&base)
            .map_err(|e| BoardError::parse(format!("invalid base URL {}: {e}", config.base_url)))?;
        match base_url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(BoardError::parse(format!("unsupported URL scheme: {scheme}")));
            }
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| BoardError::gateway(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            auth_token: config.auth_token,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| BoardError::parse(format!("invalid endpoint path {path}: {e}")))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let request = self.client.request(method, url);
        match &self.auth_token {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        }
    }

    /// Send a request and surface non-success statuses as errors.
    ///
    /// `not_found` names the task a 404 should be pinned on; endpoints that
    /// do not address a single task pass `None` and get the plain status
    /// error instead.
    #[instrument(skip(self, request))]
    async fn send_checked(
        &self,
        request: RequestBuilder,
        not_found: Option<&TaskId>,
    ) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| BoardError::gateway(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            debug!("request succeeded with status {}", status.as_u16());
            return Ok(response);
        }

        if status.as_u16() == HTTP_NOT_FOUND {
            if let Some(id) = not_found {
                debug!(%id, "task missing on server");
                return Err(BoardError::task_not_found(id.as_str()));
            }
        }

        let message = response.text().await.unwrap_or_default();
        let message = if message.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string()
        } else {
            message
        };
        warn!("request failed with status {}: {}", status.as_u16(), message);
        Err(BoardError::gateway_status(status.as_u16(), message))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        not_found: Option<&TaskId>,
    ) -> Result<T> {
        let response = self.send_checked(request, not_found).await?;
        response
            .json()
            .await
            .map_err(|e| BoardError::gateway(format!("malformed response body: {e}")))
    }

    async fn send_ok(&self, request: RequestBuilder, not_found: Option<&TaskId>) -> Result<()> {
        self.send_checked(request, not_found).await?;
        Ok(())
    }
}

#[async_trait]
impl TaskGateway for RemoteGateway {
    async fn list(&self) -> Result<Vec<Task>> {
        let url = self.endpoint("api/tasks")?;
        debug!(%url, "listing live tasks");
        let tasks: Vec<Task> = self.send_json(self.request(Method::GET, url), None).await?;
        info!("fetched {} tasks", tasks.len());
        Ok(tasks)
    }

    async fn get(&self, id: &TaskId) -> Result<Task> {
        let url = self.endpoint(&format!("api/tasks/{id}"))?;
        debug!(%url, "fetching task");
        self.send_json(self.request(Method::GET, url), Some(id))
            .await
    }

    async fn create(&self, patch: &TaskPatch) -> Result<Task> {
        let url = self.endpoint("api/tasks")?;
        debug!(%url, "creating task");
        self.send_json(self.request(Method::POST, url).json(patch), None)
            .await
    }

    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> Result<Task> {
        let url = self.endpoint(&format!("api/tasks/{id}"))?;
        debug!(%url, "updating task");
        self.send_json(self.request(Method::PATCH, url).json(patch), Some(id))
            .await
    }

    async fn update_status(&self, id: &TaskId, status: Status, index: Option<i64>) -> Result<Task> {
        let url = self.endpoint(&format!("api/tasks/{id}/status"))?;
        debug!(%url, %status, ?index, "moving task");
        let body = StatusChange {
            status,
            order_index: index,
        };
        self.send_json(self.request(Method::PATCH, url).json(&body), Some(id))
            .await
    }

    async fn archive(&self, id: &TaskId) -> Result<()> {
        let url = self.endpoint(&format!("api/tasks/{id}/archive"))?;
        debug!(%url, "archiving task");
        self.send_ok(self.request(Method::POST, url), Some(id))
            .await
    }

    async fn restore(&self, id: &TaskId) -> Result<()> {
        let url = self.endpoint(&format!("api/tasks/{id}/restore"))?;
        debug!(%url, "restoring task");
        self.send_ok(self.request(Method::POST, url), Some(id))
            .await
    }

    async fn list_archived(&self, search: Option<&str>) -> Result<Vec<Task>> {
        let url = self.endpoint("api/tasks/archived")?;
        debug!(%url, ?search, "listing archived tasks");
        let mut request = self.request(Method::GET, url);
        if let Some(search) = search {
            request = request.query(&[("search", search)]);
        }
        self.send_json(request, None).await
    }
}
