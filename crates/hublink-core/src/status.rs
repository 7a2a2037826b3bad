//! Connection status and the derived control state.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::params::IntegrationParams;

/// Status of the HubSpot connection.
///
/// `connecting` and `connected` are independent flags, not mutually
/// exclusive by construction. `connecting` is cleared on every exit path
/// of the flow; `connected` is derived once at mount and afterwards only
/// transitions through the flow itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConnectionStatus {
    /// A connect flow is in progress.
    pub connecting: bool,
    /// Credentials exist.
    pub connected: bool,
    /// When the last successful flow completed, if any this run.
    pub connected_at: Option<DateTime<Utc>>,
}

impl ConnectionStatus {
    /// One-time snapshot from the externally supplied parameters.
    ///
    /// This runs exactly once, when the parameters are adopted. Later
    /// replacement of the parameters object does not re-derive it.
    pub fn at_mount(params: &IntegrationParams) -> Self {
        Self {
            connecting: false,
            connected: params.has_credentials(),
            connected_at: None,
        }
    }

    /// The control state the shells render.
    pub fn button_state(&self) -> ButtonState {
        if self.connected {
            ButtonState::Connected
        } else if self.connecting {
            ButtonState::Connecting
        } else {
            ButtonState::Idle
        }
    }
}

/// The three mutually exclusive states of the connect control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonState {
    /// Enabled, invites connection.
    Idle,
    /// Disabled, renders an indeterminate progress indicator.
    Connecting,
    /// Inert, success styling.
    Connected,
}

impl ButtonState {
    /// Label shown on the control. `Connecting` shows a progress indicator
    /// instead of text.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            ButtonState::Idle => Some("Connect to HubSpot"),
            ButtonState::Connecting => None,
            ButtonState::Connected => Some("HubSpot Connected"),
        }
    }

    /// Whether the control reacts to clicks.
    pub fn is_enabled(&self) -> bool {
        matches!(self, ButtonState::Idle)
    }
}
