use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("unknown permission: {0}")]
    UnknownPermission(String),

    #[error("unknown role: {0}")]
    UnknownRole(String),

    #[error("unknown route policy: {0} (expected \"allow\" or \"deny\")")]
    UnknownRoutePolicy(String),
}
