use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::RwLock;

use serde_json::{Map, Value};

use innkeep_auth::{AuthenticatedUser, Profile};
use innkeep_core::Room;

use super::{Backend, BackendError, Direction, Query};

/// In-process backend for tests/dev.
///
/// Rows are plain JSON objects per table, filtered, ordered and limited the
/// way the row API does it. Tokens are registered up front. A simulated
/// outage makes every call fail until [`InMemoryBackend::recover`].
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    tables: RwLock<HashMap<String, Vec<Value>>>,
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    outage: RwLock<Option<Outage>>,
    calls: AtomicUsize,
}

#[derive(Debug)]
struct Outage {
    message: String,
    /// First call number (0-based, over the backend's lifetime) that fails.
    from_call: usize,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_row(&self, table: &str, row: Value) {
        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        tables.entry(table.to_string()).or_default().push(row);
    }

    pub fn insert_room(&self, room: &Room) {
        // Room serialization cannot fail: plain strings, numbers and a uuid.
        if let Ok(row) = serde_json::to_value(room) {
            self.insert_row(Room::TABLE, row);
        }
    }

    pub fn insert_profile(&self, profile: Profile) {
        if let Ok(row) = serde_json::to_value(profile) {
            self.insert_row(Profile::TABLE, row);
        }
    }

    /// Set `column = value` on every row of `table` where `key_column == key`.
    ///
    /// Returns the number of rows touched.
    pub fn update_where(
        &self,
        table: &str,
        key_column: &str,
        key: impl Into<Value>,
        column: &str,
        value: impl Into<Value>,
    ) -> usize {
        let key = key.into();
        let value = value.into();
        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        let Some(rows) = tables.get_mut(table) else {
            return 0;
        };

        let mut touched = 0;
        for row in rows.iter_mut() {
            if row.get(key_column) != Some(&key) {
                continue;
            }
            if let Some(obj) = row.as_object_mut() {
                obj.insert(column.to_string(), value.clone());
                touched += 1;
            }
        }
        touched
    }

    pub fn register_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        let mut tokens = self.tokens.write().unwrap_or_else(|e| e.into_inner());
        tokens.insert(token.into(), user);
    }

    /// Make every subsequent call fail with `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        self.fail_with_after(0, message);
    }

    /// Serve the next `healthy_calls` calls, then fail every later one with `message`.
    pub fn fail_with_after(&self, healthy_calls: usize, message: impl Into<String>) {
        let from_call = self.calls() + healthy_calls;
        *self.outage.write().unwrap_or_else(|e| e.into_inner()) = Some(Outage {
            message: message.into(),
            from_call,
        });
    }

    pub fn recover(&self) {
        *self.outage.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    /// Number of backend calls served (or refused) so far.
    pub fn calls(&self) -> usize {
        self.calls.load(AtomicOrdering::SeqCst)
    }

    fn enter(&self) -> Result<(), BackendError> {
        let call = self.calls.fetch_add(1, AtomicOrdering::SeqCst);
        match &*self.outage.read().unwrap_or_else(|e| e.into_inner()) {
            Some(outage) if call >= outage.from_call => Err(BackendError::Unavailable(outage.message.clone())),
            _ => Ok(()),
        }
    }
}

/// Compare two column values: numbers numerically, strings lexically, nulls last.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

fn project(row: &Value, columns: &[String]) -> Value {
    if columns.is_empty() {
        return row.clone();
    }
    let mut out = Map::new();
    for column in columns {
        out.insert(column.clone(), row.get(column).cloned().unwrap_or(Value::Null));
    }
    Value::Object(out)
}

#[async_trait::async_trait]
impl Backend for InMemoryBackend {
    async fn select(&self, query: &Query) -> Result<Vec<Value>, BackendError> {
        self.enter()?;

        let tables = self.tables.read().unwrap_or_else(|e| e.into_inner());
        let mut rows: Vec<&Value> = tables
            .get(&query.table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| {
                        query
                            .filters
                            .iter()
                            .all(|(column, value)| row.get(column) == Some(value))
                    })
                    .collect()
            })
            .unwrap_or_default();

        if let Some((column, direction)) = &query.order {
            rows.sort_by(|a, b| {
                let ord = compare_values(a.get(column), b.get(column));
                match direction {
                    Direction::Asc => ord,
                    Direction::Desc => ord.reverse(),
                }
            });
        }

        let limit = query.limit.unwrap_or(usize::MAX);
        Ok(rows
            .into_iter()
            .take(limit)
            .map(|row| project(row, &query.columns))
            .collect())
    }

    async fn verify_token(&self, token: &str) -> Result<Option<AuthenticatedUser>, BackendError> {
        self.enter()?;
        let tokens = self.tokens.read().unwrap_or_else(|e| e.into_inner());
        Ok(tokens.get(token).cloned())
    }
}
