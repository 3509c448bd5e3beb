//! FarmERP HTTP client core.
//!
//! One [`ApiClient`] owns the base URL, header injection, body encoding and
//! response classification for every call the dashboard makes. Domain
//! services hold an `Arc<ApiClient>` and only build paths and query
//! parameters.
//!
//! Authentication is handled by pluggable [`TokenSource`] implementations,
//! consulted before every request.
//!
//! # Usage
//!
//! ```ignore
//! use farmerp_client::{ApiClient, ApiConfig, KvTokenStore, QueryParams};
//!
//! let tokens = KvTokenStore::new(kv.clone());
//! let client = ApiClient::new(ApiConfig::from_env(), Arc::new(tokens))?;
//! let parcels: Vec<Parcel> = client
//!     .get("/api/parcels", QueryParams::new().insert_opt("status", status))
//!     .await?;
//! ```

mod client;
mod config;
mod error;
mod generation;
mod query;
mod request;
mod token;

pub use client::ApiClient;
pub use config::{ApiConfig, ENV_API_TIMEOUT_SECS, ENV_API_URL};
pub use error::{ApiError, SNIPPET_LIMIT};
pub use generation::{RequestGeneration, Ticket};
pub use query::QueryParams;
pub use request::{FileUpload, RequestBody, RequestDescriptor, UPLOAD_FIELD};
pub use token::{KvTokenStore, NoAuth, StaticToken, TokenSource, TOKEN_KEY};

/// Re-exported so callers can build header overrides and match on methods
/// without depending on reqwest directly.
pub use reqwest::header;
pub use reqwest::{Method, StatusCode};
