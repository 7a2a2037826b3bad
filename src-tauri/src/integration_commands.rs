//! HubSpot connection commands for Tauri IPC.
//!
//! The webview frontend renders the connect control; these commands carry
//! its state: the mount snapshot, status reads, the connect flow itself,
//! and disconnect. Errors come back as the operator-visible message the
//! frontend shows in its alert.

use serde_json::{json, Value};
use tauri::{AppHandle, State};

use hublink_core::popup::WindowOpener;
use hublink_core::{
    BackendClient, Config, ConnectOutcome, HubSpotConnector, IntegrationParams, SessionIdentity,
};

use crate::auth_window::WebviewOpener;

/// Managed connector state for the desktop app.
pub struct IntegrationState {
    connector: HubSpotConnector<WebviewOpener>,
}

impl IntegrationState {
    pub fn new(app: AppHandle) -> Self {
        let config = Config::load_or_default();
        Self {
            connector: HubSpotConnector::new(
                BackendClient::new(&config.backend),
                WebviewOpener::new(app),
            ),
        }
    }
}

fn status_json<O: WindowOpener>(connector: &HubSpotConnector<O>) -> Value {
    let status = connector.status();
    let button = status.button_state();
    json!({
        "connected": status.connected,
        "connecting": status.connecting,
        "connected_at": status.connected_at.map(|t| t.to_rfc3339()),
        "label": button.label(),
        "enabled": button.is_enabled(),
    })
}

/// Adopts the externally owned integration parameters and derives the
/// initial connected state.
///
/// Called once when the frontend mounts the connect control; later
/// parameter reads do not re-derive the status.
#[tauri::command]
pub fn cmd_hubspot_mount(
    params: Value,
    state: State<'_, IntegrationState>,
) -> Result<Value, String> {
    let params = IntegrationParams::from_value(params).map_err(|e| e.to_string())?;
    state.connector.mount(params);
    Ok(status_json(&state.connector))
}

/// Current status of the connect control.
#[tauri::command]
pub fn cmd_hubspot_status(state: State<'_, IntegrationState>) -> Result<Value, String> {
    Ok(status_json(&state.connector))
}

/// Runs the full connect flow: authorization URL, popup window, closure
/// poll, credential fetch.
///
/// # Errors
/// Returns the operator-visible message (structured backend `detail` when
/// present, generic otherwise) for the frontend's alert.
#[tauri::command]
pub async fn cmd_hubspot_connect(
    user_id: String,
    org_id: String,
    state: State<'_, IntegrationState>,
) -> Result<Value, String> {
    let session = SessionIdentity::new(user_id, org_id);
    match state.connector.connect(&session).await {
        Ok(outcome) => Ok(json!({
            "outcome": outcome_tag(outcome),
            "status": status_json(&state.connector),
        })),
        Err(e) => {
            tracing::error!(error = %e, "hubspot connect failed");
            Err(e.operator_message())
        }
    }
}

/// Removes the stored credentials and returns the control to idle.
#[tauri::command]
pub fn cmd_hubspot_disconnect(state: State<'_, IntegrationState>) -> Result<Value, String> {
    state.connector.disconnect();
    Ok(status_json(&state.connector))
}

/// The integration-parameters object, for the owning application.
#[tauri::command]
pub fn cmd_hubspot_params(state: State<'_, IntegrationState>) -> Result<Value, String> {
    Ok(state.connector.params().as_value())
}

fn outcome_tag(outcome: ConnectOutcome) -> &'static str {
    match outcome {
        ConnectOutcome::Connected => "connected",
        ConnectOutcome::AlreadyConnected => "already_connected",
        ConnectOutcome::InProgress => "in_progress",
    }
}
