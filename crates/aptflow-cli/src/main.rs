//! # aptflow
//!
//! Command-line front end for the Aptos codec, unit converter and trigger
//! detector.
//!
//! ## Usage
//!
//! ```bash
//! # BCS
//! aptflow encode --type u64 --value 100000000
//! aptflow decode uleb128 0x8001
//! aptflow payload --function 0x1::aptos_account::transfer --arg address=0x2 --arg u64=1000
//!
//! # Units
//! aptflow units to-smallest 1.5
//! aptflow units format 150000000
//!
//! # Triggers
//! aptflow watch --state state.json --observation obs.json --write-state
//! ```

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use config::Config;
pub use error::CliError;
pub use output::Output;

/// Aptflow CLI
#[derive(Parser, Debug)]
#[command(name = "aptflow")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Network to use (mainnet, testnet, devnet, local or a custom one)
    #[arg(long, global = true)]
    network: Option<String>,

    /// Full-node URL overriding the network's own
    #[arg(long, global = true)]
    node_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// CLI commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// BCS-encode a JSON value as a Move type
    Encode(commands::encode::EncodeArgs),
    /// Decode BCS bytes
    #[command(subcommand)]
    Decode(commands::decode::DecodeCommand),
    /// Convert between whole tokens and smallest units
    #[command(subcommand)]
    Units(commands::units::UnitsCommand),
    /// Account address utilities
    #[command(subcommand)]
    Address(commands::address::AddressCommand),
    /// Move type tag utilities
    #[command(subcommand)]
    TypeTag(commands::type_tag::TypeTagCommand),
    /// Build an entry-function payload
    Payload(commands::payload::PayloadArgs),
    /// Compare an observation with saved trigger state
    Watch(commands::watch::WatchArgs),
    /// List known networks
    Networks,
    /// Show or edit configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Set default network
        #[arg(long)]
        set_network: Option<String>,
        /// Set full-node URL override ("" clears it)
        #[arg(long)]
        set_node_url: Option<String>,
    },
}

fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout carries command output only
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_json);

    // Load config
    let mut config = Config::load();

    if let Some(network) = cli.network {
        config.network = network;
    }
    if let Some(node_url) = cli.node_url {
        config.node_url = Some(node_url);
    }

    let json = cli.json;
    let result = match cli.command {
        Commands::Encode(args) => args.execute(json),
        Commands::Decode(cmd) => cmd.execute(json),
        Commands::Units(cmd) => cmd.execute(json),
        Commands::Address(cmd) => cmd.execute(json),
        Commands::TypeTag(cmd) => cmd.execute(json),
        Commands::Payload(args) => args.execute(json),
        Commands::Watch(args) => args.execute(json),
        Commands::Networks => commands::network::list(&config, json),
        Commands::Config {
            show,
            set_network,
            set_node_url,
        } => handle_config(&mut config, show, set_network, set_node_url, json),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        if json {
            println!(
                "{}",
                serde_json::json!({
                    "error": e.to_string(),
                    "success": false
                })
            );
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

fn handle_config(
    config: &mut Config,
    show: bool,
    set_network: Option<String>,
    set_node_url: Option<String>,
    json: bool,
) -> Result<(), CliError> {
    let mut modified = false;

    if let Some(network) = set_network {
        // Reject typos before they are persisted
        config.endpoints(&network)?;
        config.network = network;
        modified = true;
    }

    if let Some(url) = set_node_url {
        config.node_url = if url.trim().is_empty() { None } else { Some(url) };
        modified = true;
    }

    if modified {
        config.save()?;
        Output::new(json)
            .field("status", "saved")
            .message("Configuration saved")
            .print();
    } else if show {
        let endpoints = config.active_endpoints()?;
        Output::new(json)
            .field("network", &config.network)
            .field("fullnode", &endpoints.fullnode)
            .field_value("node_url", serde_json::json!(config.node_url))
            .field_value(
                "config_path",
                serde_json::json!(Config::config_path().map(|p| p.display().to_string())),
            )
            .message(&format!(
                "Network: {}\nFull node: {}",
                config.network, endpoints.fullnode
            ))
            .print();
    } else {
        Output::new(json)
            .message("Use --show to display config, or --set-network/--set-node-url to modify")
            .print();
    }

    Ok(())
}
