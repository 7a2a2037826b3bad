//! Webview implementation of the core popup abstraction.
//!
//! The authorization page opens as a fixed-size webview window; closure is
//! observed as the window label disappearing from the app, checked by the
//! core poll loop.

use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindowBuilder};

use hublink_core::error::ConnectError;
use hublink_core::popup::{AuthWindow, WindowOpener, WindowOptions};

/// Label of the authorization window; only one flow runs at a time.
const AUTH_WINDOW_LABEL: &str = "hubspot-auth";

/// Opens the authorization URL as a webview window of the running app.
pub struct WebviewOpener {
    app: AppHandle,
}

impl WebviewOpener {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

/// Handle to the opened window.
pub struct WebviewAuthWindow {
    app: AppHandle,
    label: String,
}

impl AuthWindow for WebviewAuthWindow {
    fn is_closed(&self) -> bool {
        self.app.get_webview_window(&self.label).is_none()
    }
}

impl WindowOpener for WebviewOpener {
    type Window = WebviewAuthWindow;

    fn open(&self, url: &str, options: &WindowOptions) -> Result<WebviewAuthWindow, ConnectError> {
        let external = tauri::Url::parse(url).map_err(|e| ConnectError::PopupBlocked {
            reason: format!("invalid authorization URL: {e}"),
        })?;

        // A leftover window from an aborted flow would read as still open;
        // drop it before starting over.
        if let Some(stale) = self.app.get_webview_window(AUTH_WINDOW_LABEL) {
            let _ = stale.destroy();
        }

        WebviewWindowBuilder::new(&self.app, AUTH_WINDOW_LABEL, WebviewUrl::External(external))
            .title(&options.title)
            .inner_size(options.width, options.height)
            .resizable(false)
            .center()
            .build()
            .map_err(|e| ConnectError::PopupBlocked {
                reason: e.to_string(),
            })?;

        Ok(WebviewAuthWindow {
            app: self.app.clone(),
            label: AUTH_WINDOW_LABEL.to_string(),
        })
    }
}
