//! Authorization-popup management.
//!
//! There is no portable close event for a cross-origin authorization
//! window, so closure is detected by polling on a fixed interval. The
//! poll loop is a private detail behind [`wait_until_closed`]; dropping
//! the returned future cancels it, which bounds the loop to the caller's
//! lifetime.

use std::time::Duration;

use crate::error::ConnectError;

/// Interval of the window-closed check.
pub const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Geometry and title of the authorization window.
#[derive(Debug, Clone)]
pub struct WindowOptions {
    pub title: String,
    pub width: f64,
    pub height: f64,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: "HubSpot Authorization".to_string(),
            width: 600.0,
            height: 600.0,
        }
    }
}

/// An opened authorization window, observable for closure.
pub trait AuthWindow: Send {
    /// Whether the user has closed the window. Must stay `true` once it
    /// first reports `true`.
    fn is_closed(&self) -> bool;
}

/// Opens the authorization URL in a new window.
///
/// Shells supply the mechanism: the desktop app opens a webview window,
/// the CLI opens the system browser and watches stdin.
pub trait WindowOpener: Send + Sync {
    type Window: AuthWindow;

    /// Open `url` in a new window. A blocked or failed open aborts the
    /// connect flow.
    fn open(&self, url: &str, options: &WindowOptions) -> Result<Self::Window, ConnectError>;
}

/// Complete once `window` is observed closed, checking every `interval`.
///
/// There is no timeout: the flow accepts waiting until the user closes
/// the window. Dropping the future stops the poll.
pub async fn wait_until_closed<W: AuthWindow>(window: &W, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        if window.is_closed() {
            return;
        }
    }
}
