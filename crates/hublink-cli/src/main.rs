use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "hublink", version, about = "HubLink CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// HubSpot connection management
    Hubspot {
        #[command(subcommand)]
        action: commands::hubspot::HubspotAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Hubspot { action } => commands::hubspot::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
