use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("unknown role `{0}`")]
    UnknownRole(String),
    #[error("invalid user payload: {0}")]
    InvalidUser(#[from] serde_json::Error),
}
