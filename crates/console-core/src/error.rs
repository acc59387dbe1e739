//! Normalized client errors and the single reporting path

use contracts::shared::schema::EntityId;
use contracts::shared::validation::ValidationError;
use serde_json::Value;
use thiserror::Error;

use crate::envelope::ShapeError;
use crate::transport::{ApiResponse, TransportError};

/// Error surfaced to page controllers. `Display` is the bare message,
/// ready to be shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// Required fields missing, raised before any request
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Non-2xx response or transport failure (`status` is `None` for the latter)
    #[error("{message}")]
    Request { status: Option<u16>, message: String },

    /// Unrecognized response envelope
    #[error("{0}")]
    Shape(#[from] ShapeError),
}

impl ClientError {
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Request { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }

    /// Error for a non-2xx response: the backend's message when it sent a
    /// textual one, `fallback` otherwise.
    pub fn from_response(response: &ApiResponse, fallback: &str) -> Self {
        ClientError::Request {
            status: Some(response.status),
            message: backend_message(&response.body).unwrap_or_else(|| fallback.to_string()),
        }
    }
}

impl From<TransportError> for ClientError {
    fn from(err: TransportError) -> Self {
        ClientError::Request {
            status: None,
            message: err.0,
        }
    }
}

/// Message a backend put in an error body, if it is textual
pub fn backend_message(body: &Value) -> Option<String> {
    match body {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Object(map) => ["message", "error", "detail", "mensaje"]
            .iter()
            .filter_map(|k| map.get(*k))
            .find_map(|v| match v {
                Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
                _ => None,
            }),
        _ => None,
    }
}

/// Log a failed operation and hand back the error for the caller.
///
/// Every client operation funnels its failures through here.
pub fn report(action: &str, id: Option<EntityId>, err: ClientError) -> ClientError {
    match id {
        Some(id) => log::error!("{} failed (id={}): {}", action, id, err),
        None => log::error!("{} failed: {}", action, err),
    }
    err
}
