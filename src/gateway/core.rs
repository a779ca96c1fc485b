use crate::credentials::CredentialStore;
use crate::gateway::interceptor::{self, RequestInterceptor};
use crate::notify::Notifier;
use crate::origin::{EnvironmentProbe, OriginResolver};
use crate::{Classification, Error, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// All routes live under this prefix on the resolved origin.
pub const API_ROOT: &str = "/api/v1";

/// Fixed per-request abort timeout. After it fires the call is classified as
/// network-unreachable; the gateway imposes no other deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

enum Body {
    None,
    Json(Value),
    Form(Vec<(String, String)>),
    Multipart(reqwest::multipart::Form),
}

/// The HTTP client gateway.
///
/// One instance serves the whole application; calls may overlap freely (the
/// gateway neither serializes independent calls nor supports cancelling one
/// once issued — callers needing ordering sequence by awaiting). Constructed
/// through [`GatewayBuilder`](crate::GatewayBuilder).
pub struct Gateway {
    pub(crate) probe: EnvironmentProbe,
    pub(crate) resolver: OriginResolver,
    pub(crate) credentials: Arc<dyn CredentialStore>,
    pub(crate) notifier: Arc<dyn Notifier>,
    pub(crate) timeout: Duration,
    pub(crate) interceptors: Vec<RequestInterceptor>,
}

impl Gateway {
    pub fn builder() -> crate::GatewayBuilder {
        crate::GatewayBuilder::new()
    }

    /// The credential store this gateway reads tokens from.
    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    /// The sink receiving global user-visible messages.
    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    /// Resolve the backend origin for this environment. `force_refresh`
    /// bypasses the validity window and recomputes.
    pub fn resolve_origin(&self, force_refresh: bool) -> String {
        self.resolver.resolve(&self.probe, force_refresh)
    }

    /// Construct a fresh transport: fixed timeout, JSON default content
    /// type, nothing else. The handle is deliberately not cached — origin
    /// changes take effect on the next call without a restart. Only the
    /// origin string itself is cached, by the resolver.
    pub fn build_client(&self) -> Result<reqwest::Client> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Setup(e.to_string()))
    }

    pub async fn get(&self, path: &str) -> Result<Value> {
        self.execute(Method::GET, path, None, Body::None).await
    }

    pub async fn get_query(&self, path: &str, query: &HashMap<String, String>) -> Result<Value> {
        self.execute(Method::GET, path, Some(query), Body::None)
            .await
    }

    pub(crate) async fn get_opt(
        &self,
        path: &str,
        query: Option<&HashMap<String, String>>,
    ) -> Result<Value> {
        self.execute(Method::GET, path, query, Body::None).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.execute(Method::POST, path, None, Body::Json(body.clone()))
            .await
    }

    /// POST without a body (toggle-style routes such as like/bookmark).
    pub async fn post_empty(&self, path: &str) -> Result<Value> {
        self.execute(Method::POST, path, None, Body::None).await
    }

    /// POST a `application/x-www-form-urlencoded` body; the per-call content
    /// type overrides the JSON default.
    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> Result<Value> {
        let fields = fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.execute(Method::POST, path, None, Body::Form(fields))
            .await
    }

    /// POST a multipart form (file uploads).
    pub async fn post_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<Value> {
        self.execute(Method::POST, path, None, Body::Multipart(form))
            .await
    }

    pub async fn put(&self, path: &str, body: &Value) -> Result<Value> {
        self.execute(Method::PUT, path, None, Body::Json(body.clone()))
            .await
    }

    /// PUT without a body, parameterized through the query string (e.g. the
    /// category move route).
    pub async fn put_query(&self, path: &str, query: &HashMap<String, String>) -> Result<Value> {
        self.execute(Method::PUT, path, Some(query), Body::None)
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.execute(Method::DELETE, path, None, Body::None).await
    }

    pub async fn delete_query(&self, path: &str, query: &HashMap<String, String>) -> Result<Value> {
        self.execute(Method::DELETE, path, Some(query), Body::None)
            .await
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: Option<&HashMap<String, String>>,
        body: Body,
    ) -> Result<Value> {
        let started = Instant::now();
        match self.dispatch(method, path, query, body).await {
            Ok(value) => Ok(value),
            Err(err) => Err(self.report_failure(path, started, err)),
        }
    }

    /// Single attempt against the currently resolved origin. Every failure
    /// funnels back to [`report_failure`](Self::report_failure) exactly once.
    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        query: Option<&HashMap<String, String>>,
        body: Body,
    ) -> Result<Value> {
        let url = format!("{}{}{}", self.resolve_origin(false), API_ROOT, path);
        let client = self.build_client()?;

        let mut request = client.request(method, &url);
        if let Some(query) = query {
            request = request.query(query);
        }
        request = match body {
            Body::None => request,
            Body::Json(value) => request.json(&value),
            Body::Form(fields) => request.form(&fields),
            Body::Multipart(form) => request.multipart(form),
        };
        let request = interceptor::apply(&self.interceptors, request)?;

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) if e.is_builder() => return Err(Error::Setup(e.to_string())),
            Err(e) => return Err(Error::Transport(e)),
        };

        let status = response.status();
        if status.is_success() {
            return Self::decode(response).await;
        }
        let detail = Self::error_detail(response).await;
        Err(Error::Remote {
            status: status.as_u16(),
            detail,
        })
    }

    /// 2xx payloads pass through untouched: JSON parses to a value, a
    /// non-JSON body comes back as a raw string, an empty body as null.
    async fn decode(response: reqwest::Response) -> Result<Value> {
        let text = response.text().await.map_err(Error::Transport)?;
        if text.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }

    /// Pull the backend's `detail` message out of an error reply, if any.
    async fn error_detail(response: reqwest::Response) -> Option<String> {
        let body = response.text().await.ok()?;
        let json: Value = serde_json::from_str(&body).ok()?;
        match json.get("detail")? {
            Value::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    None
                } else {
                    Some(s.to_string())
                }
            }
            // Validation errors arrive as structured payloads; surface them
            // verbatim rather than hiding them behind the generic text.
            other => Some(other.to_string()),
        }
    }

    /// The single point where a failed call turns into its global side
    /// effect: forced logout on an expired session, one notification
    /// otherwise. The original error is handed back for local handling.
    fn report_failure(&self, path: &str, started: Instant, err: Error) -> Error {
        let classification = err.classification();
        match classification {
            Classification::AuthExpired => self.credentials.on_auth_failure(),
            _ => {
                if let Some(text) = err.notification_text() {
                    self.notifier.error(text);
                }
            }
        }
        info!(
            http_status = u64::from(err.status().unwrap_or(0)),
            classification = ?classification,
            path,
            duration_ms = started.elapsed().as_millis() as u64,
            "gallery-client request failed"
        );
        err
    }
}
