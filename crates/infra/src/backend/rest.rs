//! REST client for the managed backend.
//!
//! Table reads go through the row API (`/rest/v1/{table}`) and identity
//! verification through the auth API (`/auth/v1/user`). Every request
//! carries the service key as `apikey`.

use reqwest::StatusCode;
use serde_json::Value;

use innkeep_auth::AuthenticatedUser;

use crate::config::BackendConfig;

use super::{Backend, BackendError, Query};

pub struct RestBackend {
    http: reqwest::Client,
    base_url: String,
    service_role_key: String,
}

impl RestBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| BackendError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.url.clone(),
            service_role_key: config.service_role_key.clone(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn user_url(&self) -> String {
        format!("{}/auth/v1/user", self.base_url)
    }
}

/// Row-API query string for `query`.
pub(crate) fn query_params(query: &Query) -> Vec<(String, String)> {
    let mut params = Vec::new();

    let select = if query.columns.is_empty() {
        "*".to_string()
    } else {
        query.columns.join(",")
    };
    params.push(("select".to_string(), select));

    for (column, value) in &query.filters {
        params.push((column.clone(), format!("eq.{}", filter_literal(value))));
    }

    if let Some((column, direction)) = &query.order {
        params.push(("order".to_string(), format!("{}.{}", column, direction.as_str())));
    }

    if let Some(limit) = query.limit {
        params.push(("limit".to_string(), limit.to_string()));
    }

    params
}

fn filter_literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

async fn error_from_response(response: reqwest::Response) -> BackendError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    BackendError::Status { status, message }
}

#[async_trait::async_trait]
impl Backend for RestBackend {
    async fn select(&self, query: &Query) -> Result<Vec<Value>, BackendError> {
        let response = self
            .http
            .get(self.table_url(&query.table))
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
            .query(&query_params(query))
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        response
            .json::<Vec<Value>>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }

    async fn select_maybe_one(&self, query: &Query) -> Result<Option<Value>, BackendError> {
        // Two rows are enough to detect ambiguity without fetching the table.
        let bounded = query.clone().limit(2);
        let mut rows = self.select(&bounded).await?;
        if rows.len() > 1 {
            return Err(BackendError::MultipleRows {
                table: query.table.clone(),
            });
        }
        Ok(rows.pop())
    }

    async fn verify_token(&self, token: &str) -> Result<Option<AuthenticatedUser>, BackendError> {
        let response = self
            .http
            .get(self.user_url())
            .header("apikey", &self.service_role_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Ok(None),
            s if !s.is_success() => return Err(error_from_response(response).await),
            _ => {}
        }

        response
            .json::<AuthenticatedUser>()
            .await
            .map(Some)
            .map_err(|e| BackendError::Decode(e.to_string()))
    }
}
