// Prevents additional console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! HubLink Desktop Application
//!
//! A Tauri shell over hublink-core. The webview frontend renders the
//! connect control; every state transition goes through the commands in
//! `integration_commands`, and the authorization popup is a webview
//! window managed by `auth_window`.

use tauri::Manager;

mod auth_window;
mod integration_commands;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tauri::Builder::default()
        .setup(|app| {
            app.manage(integration_commands::IntegrationState::new(
                app.handle().clone(),
            ));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            integration_commands::cmd_hubspot_mount,
            integration_commands::cmd_hubspot_status,
            integration_commands::cmd_hubspot_connect,
            integration_commands::cmd_hubspot_disconnect,
            integration_commands::cmd_hubspot_params,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
