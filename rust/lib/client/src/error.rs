use reqwest::StatusCode;

/// Maximum number of characters of an unexpected body kept in an error.
pub const SNIPPET_LIMIT: usize = 200;

/// Client-side API error.
///
/// Every variant except [`ApiError::Network`] carries a non-empty,
/// human-readable message that callers can show as is.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx response. The message comes from the JSON `message` field,
    /// else the raw body text, else the HTTP status text.
    #[error("{message}")]
    Server { status: StatusCode, message: String },

    /// 2xx response whose body is not JSON where JSON was expected.
    #[error("unexpected response from server (content-type: {content_type}): {snippet}")]
    UnexpectedBody { content_type: String, snippet: String },

    /// Transport failure. Passed through from reqwest unchanged.
    #[error(transparent)]
    Network(#[from] reqwest::Error),

    /// JSON body that does not match the expected type.
    #[error("decode: {0}")]
    Decode(String),

    /// Request body that could not be serialized.
    #[error("encode: {0}")]
    Encode(String),

    /// The token source could not produce a usable token.
    #[error("auth: {0}")]
    Auth(String),

    /// The session store (token or cached user) failed.
    #[error("session store: {0}")]
    Store(#[from] farmerp_kv::KVError),
}

impl ApiError {
    /// HTTP status of a server error response, if this is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Network(e) => e.status(),
            _ => None,
        }
    }

    /// Whether the server rejected the credentials.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    pub(crate) fn server(status: StatusCode, message: String) -> Self {
        ApiError::Server { status, message }
    }

    pub(crate) fn unexpected_body(content_type: &str, body: &str) -> Self {
        ApiError::UnexpectedBody {
            content_type: if content_type.is_empty() {
                "none".to_string()
            } else {
                content_type.to_string()
            },
            snippet: snippet(body),
        }
    }
}

/// First [`SNIPPET_LIMIT`] characters of `text`, cut on a char boundary.
pub(crate) fn snippet(text: &str) -> String {
    text.chars().take(SNIPPET_LIMIT).collect()
}

/// Text for a status line: canonical reason, or `HTTP <code>` for
/// non-standard codes so the message is never empty.
pub(crate) fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}
