//! # HubLink Core Library
//!
//! Core logic for HubLink, a desktop companion for connecting a workspace
//! to HubSpot through the integrations backend. The whole product is one
//! flow: request an authorization URL, open it in a popup window, wait for
//! the user to finish and close the window, then fetch the resulting
//! credentials and hand them to the owning application.
//!
//! ## Architecture
//!
//! - **Connector**: [`HubSpotConnector`] orchestrates the flow and owns the
//!   connection status and the shared integration parameters
//! - **Backend client**: [`BackendClient`] talks to the two integration
//!   endpoints with form-encoded session identity
//! - **Popup watching**: the [`popup`] module hides the closure poll behind
//!   a completion future; shells plug in their own [`WindowOpener`]
//! - **Configuration**: TOML-based settings for the backend base URL and
//!   default session identity
//!
//! The Tauri desktop application and the CLI are thin layers over this
//! crate; both drive the same connector.

pub mod api;
pub mod config;
pub mod connector;
pub mod error;
pub mod params;
pub mod popup;
pub mod session;
pub mod status;

pub use api::BackendClient;
pub use config::Config;
pub use connector::{ConnectOutcome, HubSpotConnector};
pub use error::{ApiError, ConnectError};
pub use params::{IntegrationParams, INTEGRATION_TYPE};
pub use popup::{AuthWindow, WindowOpener, WindowOptions, POLL_INTERVAL};
pub use session::SessionIdentity;
pub use status::{ButtonState, ConnectionStatus};
