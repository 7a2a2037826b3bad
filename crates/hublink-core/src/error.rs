//! Error types for hublink-core.
//!
//! The connect flow never retries and never escalates past the connector;
//! every failure maps to one operator-visible message.

use thiserror::Error;

/// Errors from the HubSpot connect flow.
#[derive(Error, Debug)]
pub enum ConnectError {
    /// The backend responded to the authorize call but supplied no usable
    /// URL in either accepted shape.
    #[error("No authorization URL returned from backend")]
    MissingAuthorizationUrl,

    /// The authorization window could not be opened (popup blocked or the
    /// platform refused the window).
    #[error("Unable to open authorization window: {reason}")]
    PopupBlocked { reason: String },

    /// The credentials call succeeded but carried an empty payload.
    #[error("No credentials returned from backend")]
    MissingCredentials,

    /// A backend call failed at the HTTP level.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors from talking to the integrations backend.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request failed before a response arrived.
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend replied with an error status. `detail` carries the
    /// structured message from the response body when present, otherwise a
    /// generic fallback.
    #[error("{detail}")]
    Backend { status: u16, detail: String },
}

impl ConnectError {
    /// The message to surface to the operator.
    ///
    /// Backend errors show their structured `detail`; everything else
    /// falls back to the variant's own description.
    pub fn operator_message(&self) -> String {
        match self {
            ConnectError::Api(ApiError::Backend { detail, .. }) => detail.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T, E = ConnectError> = std::result::Result<T, E>;
