//! In-memory transport for tests
//!
//! Scripted replies are served first, in order. Without a script the mock acts
//! as a tiny REST backend over seeded records, keyed by `(endpoint, id)`.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::transport::{ApiRequest, ApiResponse, Method, Transport, TransportError};

const PREFIX: &str = "/api/";

#[derive(Default)]
pub struct MockTransport {
    script: RefCell<VecDeque<Result<ApiResponse, TransportError>>>,
    tables: RefCell<BTreeMap<(String, i64), Value>>,
    log: RefCell<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, status: u16, body: Value) {
        self.script
            .borrow_mut()
            .push_back(Ok(ApiResponse::new(status, body)));
    }

    pub fn fail(&self, message: &str) {
        self.script
            .borrow_mut()
            .push_back(Err(TransportError(message.to_string())));
    }

    /// Store a backend record. The id is read from the first `id*` number field.
    pub fn seed(&self, endpoint: &str, record: Value) {
        let id = record
            .as_object()
            .and_then(|m| m.iter().find(|(k, v)| k.starts_with("id") && v.is_i64()))
            .and_then(|(_, v)| v.as_i64())
            .unwrap_or(0);
        self.tables
            .borrow_mut()
            .insert((endpoint.to_string(), id), record);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.log.borrow().clone()
    }

    fn serve(&self, request: &ApiRequest) -> ApiResponse {
        let rest = request.path.strip_prefix(PREFIX).unwrap_or(&request.path);
        let mut parts = rest.splitn(2, '/');
        let endpoint = parts.next().unwrap_or_default().to_string();
        let id: Option<i64> = parts.next().and_then(|p| p.parse().ok());
        let mut tables = self.tables.borrow_mut();

        match (request.method, id) {
            (Method::Get, None) => {
                let rows: Vec<Value> = tables
                    .iter()
                    .filter(|((ep, _), _)| *ep == endpoint)
                    .map(|(_, v)| v.clone())
                    .collect();
                ApiResponse::new(200, Value::Array(rows))
            }
            (Method::Get, Some(id)) => match tables.get(&(endpoint, id)) {
                Some(record) => ApiResponse::new(200, json!({ "data": record })),
                None => ApiResponse::new(404, json!({"message": "No encontrado"})),
            },
            (Method::Put, Some(id)) => {
                let body = request.body.clone().unwrap_or(Value::Null);
                tables.insert((endpoint, id), body.clone());
                ApiResponse::new(200, body)
            }
            (Method::Post, None) => {
                let next = tables.keys().filter(|(ep, _)| *ep == endpoint).map(|(_, id)| *id).max().unwrap_or(0) + 1;
                let mut body = request.body.clone().unwrap_or_else(|| json!({}));
                body["id"] = json!(next);
                tables.insert((endpoint, next), body.clone());
                ApiResponse::new(201, body)
            }
            (Method::Delete, Some(id)) => match tables.remove(&(endpoint, id)) {
                Some(_) => ApiResponse::new(200, Value::Null),
                None => ApiResponse::new(404, json!({"message": "No encontrado"})),
            },
            _ => ApiResponse::new(405, Value::Null),
        }
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.log.borrow_mut().push(request.clone());
        if let Some(scripted) = self.script.borrow_mut().pop_front() {
            return scripted;
        }
        Ok(self.serve(&request))
    }
}
