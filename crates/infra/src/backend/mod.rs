//! The external managed backend, seen as a capability.
//!
//! Handlers and the authorization guard only ever talk to `dyn Backend`:
//! [`RestBackend`] in production, [`InMemoryBackend`] in dev and tests.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use innkeep_auth::AuthenticatedUser;

use crate::config::BackendConfig;

pub mod memory;
pub mod rest;

pub use memory::InMemoryBackend;
pub use rest::RestBackend;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("decode error: {0}")]
    Decode(String),

    #[error("expected at most one row from '{table}'")]
    MultipleRows { table: String },

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// A single-table read: projection, equality filters, ordering, limit.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub table: String,
    pub columns: Vec<String>,
    pub filters: Vec<(String, Value)>,
    pub order: Option<(String, Direction)>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// Columns to return; an empty projection returns whole rows.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push((column.into(), value.into()));
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.order = Some((column.into(), direction));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Query and identity surface of the managed backend.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Run a table query and return the matching rows as JSON objects.
    async fn select(&self, query: &Query) -> Result<Vec<Value>, BackendError>;

    /// Run a query expected to match at most one row.
    async fn select_maybe_one(&self, query: &Query) -> Result<Option<Value>, BackendError> {
        let mut rows = self.select(query).await?;
        if rows.len() > 1 {
            return Err(BackendError::MultipleRows {
                table: query.table.clone(),
            });
        }
        Ok(rows.pop())
    }

    /// Resolve a bearer token to an identity.
    ///
    /// `Ok(None)` means the backend rejected the token.
    async fn verify_token(&self, token: &str) -> Result<Option<AuthenticatedUser>, BackendError>;
}

/// Build the server-side backend handle from configuration.
///
/// The returned handle pools connections internally; build it once and share
/// it across requests.
pub fn connect_backend(config: &BackendConfig) -> Result<Arc<dyn Backend>, BackendError> {
    let backend = RestBackend::new(config)?;
    tracing::info!(backend_url = %config.url, "backend client ready");
    Ok(Arc::new(backend))
}
