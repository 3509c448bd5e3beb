use std::sync::Arc;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::{snippet, status_text, ApiError};
use crate::query::QueryParams;
use crate::request::{FileUpload, RequestBody, RequestDescriptor, UPLOAD_FIELD};
use crate::token::TokenSource;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Shared HTTP client. Construct one per process and hand it to every
/// domain service.
///
/// Requests are single-shot: no retry, no deduplication. Transport failures
/// surface as [`ApiError::Network`] untouched; everything else the server
/// sends is classified into a typed value or a message-bearing error.
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    token_source: Arc<dyn TokenSource>,
}

impl ApiClient {
    pub fn new(config: ApiConfig, token_source: Arc<dyn TokenSource>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            config,
            token_source,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    // ── verbs ───────────────────────────────────────────────────────

    /// GET `path` with `params` appended to the query string.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, params: QueryParams) -> Result<T, ApiError> {
        self.execute(RequestDescriptor::new(Method::GET, path).with_query(params))
            .await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(RequestDescriptor::new(Method::POST, path).with_json(body)?)
            .await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(RequestDescriptor::new(Method::PUT, path).with_json(body)?)
            .await
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(RequestDescriptor::new(Method::PATCH, path).with_json(body)?)
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(RequestDescriptor::new(Method::DELETE, path))
            .await
    }

    /// GET a binary body. Error responses use the JSON `message` field,
    /// else the HTTP status text.
    pub async fn download_file(&self, path: &str, params: QueryParams) -> Result<Bytes, ApiError> {
        let resp = self
            .send(RequestDescriptor::new(Method::GET, path).with_query(params))
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = read_text(resp).await;
            let message = json_message(&body).unwrap_or_else(|| status_text(status));
            return Err(ApiError::server(status, message));
        }
        Ok(resp.bytes().await?)
    }

    /// POST a multipart form: the file under `file` plus each extra field.
    pub async fn upload_file<T: DeserializeOwned>(
        &self,
        path: &str,
        file: FileUpload,
        fields: &[(&str, Value)],
    ) -> Result<T, ApiError> {
        self.execute(RequestDescriptor::new(Method::POST, path).with_file(file, fields))
            .await
    }

    // ── core ────────────────────────────────────────────────────────

    /// Send a request and classify the response as JSON.
    pub async fn execute<T: DeserializeOwned>(&self, req: RequestDescriptor) -> Result<T, ApiError> {
        let resp = self.send(req).await?;
        parse(resp).await
    }

    /// Send a request and return the raw response.
    pub async fn send(&self, req: RequestDescriptor) -> Result<Response, ApiError> {
        let url = self.config.url_for(&req.path);
        let headers = self.headers_for(&req).await?;
        debug!(method = %req.method, url = %url, "api request");

        let mut builder = self.http.request(req.method, &url).headers(headers);
        if !req.query.is_empty() {
            builder = builder.query(req.query.pairs());
        }
        builder = match req.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.body(
                serde_json::to_vec(&value).map_err(|e| ApiError::Encode(e.to_string()))?,
            ),
            RequestBody::Multipart { file, fields } => builder.multipart(form(file, fields)?),
        };

        Ok(builder.send().await?)
    }

    /// Default headers, then the bearer token (read fresh), then caller
    /// overrides.
    async fn headers_for(&self, req: &RequestDescriptor) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        if req.is_json() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        }
        if let Some(token) = self.token_source.token().await? {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ApiError::Auth("token is not a valid header value".into()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        for (name, value) in req.headers.iter() {
            headers.insert(name.clone(), value.clone());
        }
        Ok(headers)
    }
}

fn form(file: FileUpload, fields: Vec<(String, String)>) -> Result<Form, ApiError> {
    let mut part = Part::bytes(file.bytes).file_name(file.file_name);
    if let Some(mime) = file.mime {
        part = part
            .mime_str(&mime)
            .map_err(|e| ApiError::Encode(format!("mime type {}: {}", mime, e)))?;
    }
    let mut form = Form::new().part(UPLOAD_FIELD, part);
    for (key, value) in fields {
        form = form.text(key, value);
    }
    Ok(form)
}

/// Classify a response:
///
/// 1. non-2xx → [`ApiError::Server`] with the best available message;
/// 2. 204 → `T` built from an empty object, body untouched;
/// 3. 2xx that is not JSON → [`ApiError::UnexpectedBody`];
/// 4. JSON → `T`.
async fn parse<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let status = resp.status();
    if !status.is_success() {
        let body = read_text(resp).await;
        return Err(ApiError::server(status, error_message(status, &body)));
    }

    if status == StatusCode::NO_CONTENT {
        return empty_object();
    }

    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if !is_json(&content_type) {
        let body = resp.text().await?;
        return Err(ApiError::unexpected_body(&content_type, &body));
    }

    let body = resp.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| ApiError::Decode(format!("response body: {}", e)))
}

fn is_json(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|mime| mime.trim().eq_ignore_ascii_case(JSON_CONTENT_TYPE))
        .unwrap_or(false)
}

/// The "no content" value of `T`: deserialized from `{}`, else from `null`
/// so that `()` and `Option<_>` work too.
fn empty_object<T: DeserializeOwned>() -> Result<T, ApiError> {
    serde_json::from_value(Value::Object(Default::default()))
        .or_else(|_| serde_json::from_value(Value::Null))
        .map_err(|e| ApiError::Decode(format!("empty response: {}", e)))
}

async fn read_text(resp: Response) -> String {
    match resp.text().await {
        Ok(text) => text,
        Err(e) => {
            debug!(error = %e, "could not read error body");
            String::new()
        }
    }
}

fn json_message(body: &str) -> Option<String> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => map
            .get("message")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string),
        _ => None,
    }
}

/// JSON `message` → raw body (cut to a snippet when it is not JSON) →
/// status text.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Some(message) = json_message(body) {
        return message;
    }
    let text = body.trim();
    if text.is_empty() {
        return status_text(status);
    }
    if serde_json::from_str::<Value>(text).is_ok() {
        text.to_string()
    } else {
        snippet(text)
    }
}
