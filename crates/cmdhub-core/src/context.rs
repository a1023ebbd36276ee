//! Per-invocation context passed through the command pipeline.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Everything a hook or command body may know about one invocation.
///
/// The embedding application builds a context per dispatched line and seeds
/// `locals` with ambient values (sender identity, granted permissions,
/// session data). The pipeline never interprets locals itself; they are the
/// contract between the embedder and its own hooks and handlers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationContext {
    /// Alias the command was invoked under.
    pub command: String,
    /// Raw argument text following the alias.
    pub arguments: String,
    /// Correlation id for tracing one invocation through the pipeline.
    pub invocation_id: Uuid,
    /// When the invocation was issued.
    pub issued_at: DateTime<Utc>,
    /// Ambient values supplied by the embedding application.
    pub locals: HashMap<String, serde_json::Value>,
}

impl InvocationContext {
    /// Creates a context for one invocation of `command` with the given raw
    /// argument text.
    pub fn new(command: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            arguments: arguments.into(),
            invocation_id: Uuid::new_v4(),
            issued_at: Utc::now(),
            locals: HashMap::new(),
        }
    }

    /// Inserts a typed local value.
    pub fn with_local(mut self, key: &str, value: serde_json::Value) -> Self {
        self.locals.insert(key.to_string(), value);
        self
    }

    /// Inserts a string local.
    pub fn with_string(self, key: &str, value: &str) -> Self {
        self.with_local(key, serde_json::json!(value))
    }

    /// Inserts a boolean local.
    pub fn with_bool(self, key: &str, value: bool) -> Self {
        self.with_local(key, serde_json::json!(value))
    }

    /// Gets a local value by key.
    pub fn local(&self, key: &str) -> Option<&serde_json::Value> {
        self.locals.get(key)
    }

    /// Gets a string local.
    pub fn local_str(&self, key: &str) -> Option<&str> {
        self.locals.get(key).and_then(|v| v.as_str())
    }

    /// Gets a boolean local.
    pub fn local_bool(&self, key: &str) -> Option<bool> {
        self.locals.get(key).and_then(|v| v.as_bool())
    }

    /// The argument text split on whitespace, empty tokens dropped.
    pub fn arg_tokens(&self) -> Vec<&str> {
        self.arguments.split_whitespace().collect()
    }
}
