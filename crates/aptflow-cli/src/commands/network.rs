//! Network listing

use aptflow_primitives::{APTOS_COIN_TYPE, APT_DECIMALS, FRAMEWORK_ADDRESS};
use serde_json::json;

use crate::{config::Config, output::Output, CliError};

/// List known networks and the framework constants shared by all of them
pub fn list(config: &Config, json: bool) -> Result<(), CliError> {
    let active = config.active_endpoints()?;
    let mut networks = Vec::new();
    let mut lines = Vec::new();

    for name in config.network_names() {
        let mut endpoints = config.endpoints(&name)?;
        let is_active = name == config.network;
        if is_active {
            endpoints = active.clone();
        }
        lines.push(format!(
            "{} {:<8} {}",
            if is_active { "*" } else { " " },
            name,
            endpoints.fullnode
        ));
        networks.push(json!({
            "name": name,
            "active": is_active,
            "fullnode": endpoints.fullnode,
            "indexer": endpoints.indexer,
            "faucet": endpoints.faucet,
        }));
    }

    lines.push(format!(
        "\nFramework: {}  Native coin: {} ({} decimals)",
        FRAMEWORK_ADDRESS.to_short_hex(),
        APTOS_COIN_TYPE,
        APT_DECIMALS
    ));

    Output::new(json)
        .field_value("networks", json!(networks))
        .field("framework_address", &FRAMEWORK_ADDRESS.to_short_hex())
        .field("native_coin", APTOS_COIN_TYPE)
        .field_u64("native_decimals", APT_DECIMALS as u64)
        .message(&lines.join("\n"))
        .print();
    Ok(())
}
