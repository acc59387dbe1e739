//! Browser transport over `gloo-net`

use async_trait::async_trait;
use console_core::transport::{ApiRequest, ApiResponse, Method, Transport, TransportError};
use gloo_net::http::{Request, RequestBuilder};
use serde_json::Value;

use crate::system::auth::storage;

/// Sends [`ApiRequest`]s to the backend at `base` (scheme, host and port).
///
/// Every request carries the stored access token as a bearer token when one
/// is present.
#[derive(Debug, Clone, PartialEq)]
pub struct GlooTransport {
    base: String,
}

impl GlooTransport {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    fn url(&self, request: &ApiRequest) -> String {
        let mut url = format!("{}{}", self.base, request.path);
        if !request.query.is_empty() {
            let query = request
                .query
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            url.push('?');
            url.push_str(&query);
        }
        url
    }

    fn builder(&self, request: &ApiRequest) -> RequestBuilder {
        let url = self.url(request);
        let builder = match request.method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Put => Request::put(&url),
            Method::Delete => Request::delete(&url),
        };
        match storage::get_access_token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }
}

/// Parse a response body; non-JSON text is kept as a string, an empty body
/// becomes `null`.
fn parse_body(text: String) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        log::debug!("{} {}", request.method.as_str(), request.path);
        let builder = self.builder(&request);

        let sent = match &request.body {
            Some(body) => builder
                .json(body)
                .map_err(|e| TransportError(e.to_string()))?
                .send()
                .await,
            None => builder.send().await,
        };
        let response = sent.map_err(|e| TransportError(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        Ok(ApiResponse::new(status, parse_body(text)))
    }
}
