use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Subcommand;
use hublink_core::error::ConnectError;
use hublink_core::popup::{AuthWindow, WindowOpener, WindowOptions};
use hublink_core::{
    BackendClient, Config, ConnectOutcome, ConnectionStatus, HubSpotConnector, IntegrationParams,
    SessionIdentity,
};

#[derive(Subcommand)]
pub enum HubspotAction {
    /// Run the connect flow and store credentials in the params file
    Connect {
        /// User identifier (defaults to session.user_id from config)
        #[arg(long)]
        user: Option<String>,
        /// Organization identifier (defaults to session.org_id from config)
        #[arg(long)]
        org: Option<String>,
        /// Integration-parameters file owned by the calling application
        #[arg(long, default_value = "integration_params.json")]
        params: PathBuf,
    },
    /// Show connection status derived from the params file
    Status {
        #[arg(long, default_value = "integration_params.json")]
        params: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove stored credentials from the params file
    Disconnect {
        #[arg(long, default_value = "integration_params.json")]
        params: PathBuf,
    },
}

pub fn run(action: HubspotAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        HubspotAction::Connect { user, org, params } => connect(user, org, &params),
        HubspotAction::Status { params, json } => status(&params, json),
        HubspotAction::Disconnect { params } => disconnect(&params),
    }
}

/// Opens the system browser. There is no close signal for a browser tab,
/// so "window closed" is the operator confirming completion on stdin.
struct BrowserOpener;

struct PromptWindow {
    done: Arc<AtomicBool>,
}

impl AuthWindow for PromptWindow {
    fn is_closed(&self) -> bool {
        self.done.load(Ordering::SeqCst)
    }
}

impl WindowOpener for BrowserOpener {
    type Window = PromptWindow;

    fn open(&self, url: &str, _options: &WindowOptions) -> Result<PromptWindow, ConnectError> {
        open::that(url).map_err(|e| ConnectError::PopupBlocked {
            reason: e.to_string(),
        })?;

        println!("Opened the HubSpot authorization page in your browser.");
        println!("Complete the flow there, then press Enter here.");

        let done = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&done);
        std::thread::spawn(move || {
            let mut line = String::new();
            let _ = std::io::stdin().read_line(&mut line);
            flag.store(true, Ordering::SeqCst);
        });

        Ok(PromptWindow { done })
    }
}

fn connect(
    user: Option<String>,
    org: Option<String>,
    params_path: &PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let user = user
        .or_else(|| config.session.user_id.clone())
        .ok_or("--user required (or set session.user_id in config)")?;
    let org = org
        .or_else(|| config.session.org_id.clone())
        .ok_or("--org required (or set session.org_id in config)")?;
    let session = SessionIdentity::new(user, org);

    let params = IntegrationParams::load(params_path)?;
    let connector = HubSpotConnector::new(BackendClient::new(&config.backend), BrowserOpener);
    connector.mount(params);

    let rt = tokio::runtime::Runtime::new()?;
    let outcome = rt
        .block_on(connector.connect(&session))
        .map_err(|e| e.operator_message())?;

    match outcome {
        ConnectOutcome::Connected => {
            connector.params().save(params_path)?;
            println!(
                "HubSpot connected; credentials written to {}",
                params_path.display()
            );
        }
        ConnectOutcome::AlreadyConnected => {
            println!("Already connected; nothing to do.");
        }
        ConnectOutcome::InProgress => {
            println!("A connect flow is already in progress.");
        }
    }
    Ok(())
}

fn status(params_path: &PathBuf, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let params = IntegrationParams::load(params_path)?;
    let status = ConnectionStatus::at_mount(&params);

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!(
            "{}",
            if status.connected {
                "connected"
            } else {
                "not connected"
            }
        );
    }
    Ok(())
}

fn disconnect(params_path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let mut params = IntegrationParams::load(params_path)?;
    params.clear_credentials();
    params.save(params_path)?;
    println!("HubSpot disconnected");
    Ok(())
}
