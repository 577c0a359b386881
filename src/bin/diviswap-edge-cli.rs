use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;

use diviswap_edge::config::{load_config, EdgeConfig};
use diviswap_edge::routing::{Redirector, RouteDecision};

#[derive(Parser)]
#[command(name = "diviswap-edge-cli")]
#[command(about = "Management CLI for the Diviswap edge service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service status
    Status,
    /// Show the active chain and contract interfaces
    Chain,
    /// Show how a path would be routed, without a running service
    Resolve {
        /// Request path, optionally with a query string
        path: String,

        /// Configuration file (defaults apply without it)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Status => {
            let res = reqwest::get(format!("{}/healthz", cli.url)).await?;
            print_response(res).await?;
        }
        Commands::Chain => {
            let res = reqwest::get(format!("{}/api/chain", cli.url)).await?;
            print_response(res).await?;
        }
        Commands::Resolve { path, config } => {
            let config = match config {
                Some(path) => load_config(&path)?,
                None => EdgeConfig::default(),
            };
            let redirector = Redirector::from_config(&config.redirects).map_err(|errors| {
                errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            })?;

            let (path, query) = match path.split_once('?') {
                Some((p, q)) => (p, Some(q)),
                None => (path.as_str(), None),
            };
            match redirector.decide(path, query) {
                RouteDecision::Redirect {
                    rule,
                    location,
                    status,
                } => println!("redirect {} {} (rule {})", status.as_u16(), location, rule),
                RouteDecision::Continue => println!("continue"),
            }
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
