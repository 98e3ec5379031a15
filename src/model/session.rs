use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Authenticated user context injected into every game screen.
///
/// The browser layer resolves this once from persisted storage; the engines
/// and the API client only ever receive it explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: i64,
    pub token: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No stored token or user; callers redirect to the login flow.
    #[error("no active session")]
    Missing,
    #[error("stored session is not valid JSON")]
    Corrupt,
}
