//! Backend API client.
//!
//! Relative path + method + optional body/query in, JSON or a categorized
//! [`ApiError`] out. The bearer token is taken from the shared
//! [`SessionHandle`] on every call. No retries and no timeout policy beyond
//! what the configuration hands to the transport.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

pub use reqwest::Method;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::SessionHandle;

/// One request as seen by a [`Transport`].
#[derive(Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Relative to the base URL, always starting with `/`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub bearer: Option<String>,
}

impl std::fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("body", &self.body)
            .field("authenticated", &self.bearer.is_some())
            .finish()
    }
}

/// Executes requests. Returns `Value::Null` for empty bodies.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<Value, ApiError>;
}

// ---------------------------------------------------------------------------
// reqwest transport
// ---------------------------------------------------------------------------

pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        if config.base_url.trim().is_empty() {
            return Err(ApiError::NotConfigured("missing backend URL".into()));
        }
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::NotConfigured(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let full_url = format!("{}{}", self.base_url, request.path);

        let mut req = self.client.request(request.method, &full_url);
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        if let Some(token) = request.bearer.as_deref() {
            req = req.bearer_auth(token);
        }
        if let Some(body) = request.body.as_ref() {
            req = req.json(body);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| friendly_error(&self.base_url, &e))?;
        let status = resp.status();
        let body_text = resp
            .text()
            .await
            .map_err(|e| friendly_error(&self.base_url, &e))?;

        if !status.is_success() {
            return Err(status_error(status, &body_text));
        }
        if body_text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body_text)
            .map_err(|e| ApiError::Decode(format!("Invalid JSON from backend: {e}")))
    }
}

/// Convert a `reqwest::Error` into a transport failure.
fn friendly_error(url: &str, err: &reqwest::Error) -> ApiError {
    if err.is_connect() {
        return ApiError::Network(format!("Cannot reach backend at {url}"));
    }
    if err.is_timeout() {
        return ApiError::Network(format!("Connection to {url} timed out"));
    }
    if err.is_builder() {
        return ApiError::NotConfigured(format!("Invalid backend URL: {url}"));
    }
    ApiError::Network(format!("Network error communicating with {url}: {err}"))
}

/// Map a non-success response to `Client`/`Server`, keeping the envelope text.
fn status_error(status: StatusCode, body_text: &str) -> ApiError {
    let message = serde_json::from_str::<Value>(body_text).ok().and_then(|json| {
        json.get("error")
            .or_else(|| json.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
    });
    let status = status.as_u16();
    if status >= 500 {
        ApiError::Server { status, message }
    } else {
        ApiError::Client { status, message }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Cheap to clone; every service holds one.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: SessionHandle,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, session: SessionHandle) -> Self {
        Self { transport, session }
    }

    pub fn from_config(config: &ClientConfig, session: SessionHandle) -> Result<Self, ApiError> {
        Ok(Self::new(Arc::new(HttpTransport::new(config)?), session))
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let request_id = Uuid::new_v4();
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        let request = ApiRequest {
            method,
            path,
            query,
            body,
            bearer: self.session.token(),
        };
        debug!(
            %request_id,
            method = %request.method,
            path = %request.path,
            authenticated = request.bearer.is_some(),
            "api request"
        );

        let method = request.method.clone();
        let path = request.path.clone();
        self.transport.execute(request).await.map_err(|e| {
            warn!(%request_id, %method, %path, error = %e, "api request failed");
            e
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        decode(self.request(Method::GET, path, Vec::new(), None).await?)
    }

    pub async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<T, ApiError> {
        decode(self.request(Method::GET, path, query, None).await?)
    }

    /// GET a JSON array; a `null` body is an empty list.
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        self.get_list_query(path, Vec::new()).await
    }

    pub async fn get_list_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<Vec<T>, ApiError> {
        decode_list(self.request(Method::GET, path, query, None).await?)
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        decode(self.request(Method::POST, path, Vec::new(), Some(body)).await?)
    }

    /// POST and ignore the response body.
    pub async fn post_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let body = serde_json::to_value(body)?;
        self.request(Method::POST, path, Vec::new(), Some(body))
            .await
            .map(|_| ())
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        decode(self.request(Method::PUT, path, Vec::new(), Some(body)).await?)
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        decode(self.request(Method::PATCH, path, Vec::new(), Some(body)).await?)
    }

    pub async fn patch_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let body = serde_json::to_value(body)?;
        self.request(Method::PATCH, path, Vec::new(), Some(body))
            .await
            .map(|_| ())
    }

    pub async fn delete_unit(&self, path: &str) -> Result<(), ApiError> {
        self.request(Method::DELETE, path, Vec::new(), None)
            .await
            .map(|_| ())
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

fn decode_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, ApiError> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    decode(value)
}

/// Build query pairs, skipping empty values.
pub fn build_query<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Vec<(String, String)>
where
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .filter(|(_, v)| !v.trim().is_empty())
        .collect()
}
