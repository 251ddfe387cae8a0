//! HTTP implementation of the tracker API using the service's GraphQL endpoint.
//!
//! One network attempt per call. No retry or backoff lives here; a failed
//! call surfaces as an error and the caller decides what that means for the
//! item it was working on.

use crate::api::{IssueApi, IssueUpdate, IssueView};
use crate::error::{ApiError, TransportError};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::debug;

const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_ENDPOINT: &str = "https://api.trak.dev/graphql";

fn build_http_client() -> Result<Client, ApiError> {
    Client::builder()
        .connect_timeout(HTTP_CONNECT_TIMEOUT)
        .timeout(HTTP_REQUEST_TIMEOUT)
        .build()
        .map_err(|e| {
            ApiError::TransportError(TransportError::ConnectionError(format!(
                "Failed to create HTTP client: {}",
                e
            )))
        })
}

fn map_http_error(error: reqwest::Error) -> ApiError {
    let transport = if error.is_timeout() {
        TransportError::RequestFailed(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        TransportError::ConnectionError(format!("Connection error: {}", error))
    } else {
        TransportError::RequestFailed(format!("HTTP error: {}", error))
    };
    ApiError::TransportError(transport)
}

fn map_status_error(status: reqwest::StatusCode, body: String) -> ApiError {
    let transport = match status.as_u16() {
        401 | 403 => TransportError::AuthFailed(body),
        429 => TransportError::RateLimit(body),
        _ => TransportError::RequestFailed(format!("status {}: {}", status, body)),
    };
    ApiError::TransportError(transport)
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct IssuePayload {
    id: String,
    identifier: String,
    title: String,
    state: Option<NamedRef>,
    assignee: Option<NamedRef>,
    priority: Option<u8>,
    #[serde(default)]
    labels: LabelConnection,
    #[serde(rename = "updatedAt")]
    updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Deserialize)]
struct NamedRef {
    name: String,
}

#[derive(Deserialize, Default)]
struct LabelConnection {
    #[serde(default)]
    nodes: Vec<IdRef>,
}

#[derive(Deserialize)]
struct IdRef {
    id: String,
}

impl From<IssuePayload> for IssueView {
    fn from(payload: IssuePayload) -> Self {
        IssueView {
            id: payload.id,
            key: payload.identifier,
            title: payload.title,
            state: payload.state.map(|s| s.name),
            assignee: payload.assignee.map(|a| a.name),
            priority: payload.priority,
            labels: payload.labels.nodes.into_iter().map(|l| l.id).collect(),
            updated_at: payload.updated_at,
        }
    }
}

const ISSUE_FIELDS: &str = "id identifier title state { name } assignee { name } \
     priority labels { nodes { id } } updatedAt";

/// GraphQL client for the tracker service
pub struct HttpIssueClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HttpIssueClient {
    pub fn new(endpoint: Option<String>, api_key: String) -> Result<Self, ApiError> {
        if api_key.trim().is_empty() {
            return Err(ApiError::ConfigError(
                "API key is not set. Run `trak config set api_key <key>` or export TRAK_API_KEY."
                    .to_string(),
            ));
        }
        Ok(Self {
            client: build_http_client()?,
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            api_key,
        })
    }

    async fn post<T: DeserializeOwned>(&self, query: String, variables: Value) -> Result<T, ApiError> {
        debug!(endpoint = %self.endpoint, "tracker API request");
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(map_http_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(map_status_error(status, body));
        }

        let envelope: GraphQlResponse<T> = response.json().await.map_err(|e| {
            ApiError::TransportError(TransportError::InvalidResponse(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        if let Some(errors) = envelope.errors {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(ApiError::RemoteOperationFailed(messages.join("; ")));
        }

        envelope.data.ok_or_else(|| {
            ApiError::TransportError(TransportError::InvalidResponse(
                "Response carried neither data nor errors".to_string(),
            ))
        })
    }
}

#[async_trait]
impl IssueApi for HttpIssueClient {
    async fn lookup_by_composite(&self, prefix: &str, number: u64) -> Result<String, ApiError> {
        #[derive(Deserialize)]
        struct Data {
            #[serde(rename = "issueByKey")]
            issue_by_key: Option<IdRef>,
        }

        let query = "query($teamKey: String!, $number: Int!) { \
             issueByKey(teamKey: $teamKey, number: $number) { id } }"
            .to_string();
        let data: Data = self
            .post(query, json!({ "teamKey": prefix, "number": number }))
            .await?;

        data.issue_by_key
            .map(|issue| issue.id)
            .ok_or_else(|| ApiError::NotFound(format!("{}-{}", prefix, number)))
    }

    async fn get_issue(&self, issue_id: &str) -> Result<IssueView, ApiError> {
        #[derive(Deserialize)]
        struct Data {
            issue: Option<IssuePayload>,
        }

        let query = format!("query($id: String!) {{ issue(id: $id) {{ {} }} }}", ISSUE_FIELDS);
        let data: Data = self.post(query, json!({ "id": issue_id })).await?;

        data.issue
            .map(IssueView::from)
            .ok_or_else(|| ApiError::NotFound(issue_id.to_string()))
    }

    async fn get_labels(&self, issue_id: &str) -> Result<BTreeSet<String>, ApiError> {
        #[derive(Deserialize)]
        struct Data {
            issue: Option<LabelsOnly>,
        }
        #[derive(Deserialize)]
        struct LabelsOnly {
            #[serde(default)]
            labels: LabelConnection,
        }

        let query = "query($id: String!) { issue(id: $id) { labels { nodes { id } } } }"
            .to_string();
        let data: Data = self.post(query, json!({ "id": issue_id })).await?;

        data.issue
            .map(|issue| issue.labels.nodes.into_iter().map(|l| l.id).collect())
            .ok_or_else(|| ApiError::NotFound(issue_id.to_string()))
    }

    async fn apply_update(
        &self,
        issue_id: &str,
        update: IssueUpdate,
    ) -> Result<IssueView, ApiError> {
        #[derive(Deserialize)]
        struct Data {
            #[serde(rename = "issueUpdate")]
            issue_update: UpdateResult,
        }
        #[derive(Deserialize)]
        struct UpdateResult {
            success: bool,
            message: Option<String>,
            issue: Option<IssuePayload>,
        }

        let mut input = serde_json::Map::new();
        if let Some(title) = &update.title {
            input.insert("title".to_string(), json!(title));
        }
        if let Some(state) = &update.state {
            input.insert("state".to_string(), json!(state));
        }
        if let Some(assignee) = &update.assignee {
            input.insert("assignee".to_string(), json!(assignee));
        }
        if let Some(priority) = update.priority {
            input.insert("priority".to_string(), json!(priority));
        }
        if let Some(labels) = &update.labels {
            input.insert("labelIds".to_string(), json!(labels));
        }

        let query = format!(
            "mutation($id: String!, $input: IssueUpdateInput!) {{ \
             issueUpdate(id: $id, input: $input) {{ success message issue {{ {} }} }} }}",
            ISSUE_FIELDS
        );
        let data: Data = self
            .post(query, json!({ "id": issue_id, "input": Value::Object(input) }))
            .await?;

        if !data.issue_update.success {
            return Err(ApiError::RemoteOperationFailed(
                data.issue_update
                    .message
                    .unwrap_or_else(|| "update was rejected by the remote service".to_string()),
            ));
        }
        data.issue_update.issue.map(IssueView::from).ok_or_else(|| {
            ApiError::TransportError(TransportError::InvalidResponse(
                "issueUpdate reported success without an issue payload".to_string(),
            ))
        })
    }
}
