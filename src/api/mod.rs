#[cfg(feature = "yew")]
mod client;
mod types;

#[cfg(feature = "yew")]
pub use client::ApiClient;
pub use types::{ActivityInfo, PointsUpdateRequest, RoundResultRequest};

use thiserror::Error;

/// Failures of the scoring backend contract. Submission is fire-and-forget:
/// callers log these and leave game state untouched.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Backend answered outside the 2xx range.
    #[error("{endpoint} answered status {status}")]
    Status { endpoint: &'static str, status: u16 },
    #[cfg(feature = "yew")]
    #[error(transparent)]
    Transport(#[from] gloo_net::Error),
}
