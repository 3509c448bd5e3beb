use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::query::{scalar_text, QueryParams};

/// Multipart field name carrying the uploaded file.
pub const UPLOAD_FIELD: &str = "file";

/// A file to send with [`ApiClient::upload_file`](crate::ApiClient::upload_file).
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    /// MIME type of the part. The transport guesses when unset.
    pub mime: Option<String>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
            mime: None,
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }
}

#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(Value),
    /// The file under [`UPLOAD_FIELD`] plus already-stringified sibling fields.
    Multipart {
        file: FileUpload,
        fields: Vec<(String, String)>,
    },
}

/// Everything needed to issue one request. Built fresh for every call.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub path: String,
    pub query: QueryParams,
    pub body: RequestBody,
    /// Caller overrides. These win over the client's default headers.
    pub headers: HeaderMap,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryParams::new(),
            body: RequestBody::Empty,
            headers: HeaderMap::new(),
        }
    }

    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    /// Attach a file; each extra field is stringified (strings verbatim,
    /// other values as JSON text, `null` dropped).
    pub fn with_file(mut self, file: FileUpload, fields: &[(&str, Value)]) -> Self {
        let fields = fields
            .iter()
            .filter_map(|(k, v)| scalar_text(v).map(|text| (k.to_string(), text)))
            .collect();
        self.body = RequestBody::Multipart { file, fields };
        self
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Whether the client should add its JSON content-type default.
    /// Multipart requests leave the header to the transport.
    pub fn is_json(&self) -> bool {
        !matches!(self.body, RequestBody::Multipart { .. })
    }
}
