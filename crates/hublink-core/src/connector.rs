//! The HubSpot connect flow.
//!
//! One primary action, executed sequentially: request an authorization URL
//! for the session, open it in a popup window, wait for the window to
//! close, then fetch the credentials and merge them into the shared
//! integration parameters. `connecting` is cleared on every exit path.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Utc;
use serde_json::Value;

use crate::api::BackendClient;
use crate::error::ConnectError;
use crate::params::IntegrationParams;
use crate::popup::{self, WindowOpener, WindowOptions, POLL_INTERVAL};
use crate::session::SessionIdentity;
use crate::status::{ButtonState, ConnectionStatus};

/// Outcome of a connect attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// The flow ran and the credentials are stored.
    Connected,
    /// Credentials were already present; no network call was made.
    AlreadyConnected,
    /// Another flow is still in progress; no network call was made.
    InProgress,
}

/// Drives the connect flow and owns the connection status plus the shared
/// integration parameters on behalf of the hosting shell.
///
/// Locks are held only for flag and parameter updates, never across an
/// await; user actions are serialized by the disabled control while
/// `connecting` is set.
pub struct HubSpotConnector<O: WindowOpener> {
    api: BackendClient,
    opener: O,
    window_options: WindowOptions,
    poll_interval: Duration,
    status: Mutex<ConnectionStatus>,
    params: Mutex<IntegrationParams>,
}

impl<O: WindowOpener> HubSpotConnector<O> {
    pub fn new(api: BackendClient, opener: O) -> Self {
        Self {
            api,
            opener,
            window_options: WindowOptions::default(),
            poll_interval: POLL_INTERVAL,
            status: Mutex::new(ConnectionStatus::default()),
            params: Mutex::new(IntegrationParams::new()),
        }
    }

    /// Override the closure-poll interval. Tests use a short one.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Adopt the externally owned parameters and take the one-time
    /// connected snapshot. Later parameter updates via [`Self::mount`]
    /// re-run the snapshot; the flow itself is the only other way the
    /// status transitions.
    pub fn mount(&self, params: IntegrationParams) {
        let snapshot = ConnectionStatus::at_mount(&params);
        *self.lock_params() = params;
        *self.lock_status() = snapshot;
    }

    pub fn status(&self) -> ConnectionStatus {
        self.lock_status().clone()
    }

    pub fn button_state(&self) -> ButtonState {
        self.lock_status().button_state()
    }

    /// A copy of the shared parameters for the owning application.
    pub fn params(&self) -> IntegrationParams {
        self.lock_params().clone()
    }

    /// Run the connect flow for `session`.
    ///
    /// Already connected or already connecting is a no-op: the control is
    /// inert in the first case and disabled in the second.
    pub async fn connect(&self, session: &SessionIdentity) -> Result<ConnectOutcome, ConnectError> {
        {
            let mut status = self.lock_status();
            if status.connected {
                return Ok(ConnectOutcome::AlreadyConnected);
            }
            if status.connecting {
                return Ok(ConnectOutcome::InProgress);
            }
            status.connecting = true;
        }

        let result = self.run_flow(session).await;

        // Every exit path clears the connecting flag.
        let mut status = self.lock_status();
        status.connecting = false;
        match result {
            Ok(credentials) => {
                status.connected = true;
                status.connected_at = Some(Utc::now());
                drop(status);
                self.lock_params().merge_credentials(credentials);
                Ok(ConnectOutcome::Connected)
            }
            Err(e) => Err(e),
        }
    }

    async fn run_flow(&self, session: &SessionIdentity) -> Result<Value, ConnectError> {
        let auth_url = self
            .api
            .authorize(session)
            .await?
            .ok_or(ConnectError::MissingAuthorizationUrl)?;

        let window = self.opener.open(&auth_url, &self.window_options)?;
        popup::wait_until_closed(&window, self.poll_interval).await;

        self.api
            .credentials(session)
            .await?
            .ok_or(ConnectError::MissingCredentials)
    }

    /// Remove the stored credentials and return to the idle state.
    ///
    /// Purely local: any backend-side state stays with the backend.
    pub fn disconnect(&self) {
        self.lock_params().clear_credentials();
        let mut status = self.lock_status();
        status.connected = false;
        status.connected_at = None;
    }

    fn lock_status(&self) -> MutexGuard<'_, ConnectionStatus> {
        self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_params(&self) -> MutexGuard<'_, IntegrationParams> {
        self.params.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
