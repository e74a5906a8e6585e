//! Trigger polling command

use std::path::PathBuf;

use aptflow_trigger::{
    Detector, Direction, EventKind, Observation, TriggerConfig, TriggerEvent, TriggerState,
};
use aptflow_units::{Amount, U256};
use clap::Args;
use serde_json::json;

use crate::{output::Output, CliError};

/// Arguments of `watch`
#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Saved trigger state (JSON); missing or empty means first poll
    #[arg(long)]
    pub state: PathBuf,
    /// Observation fetched by the host (JSON)
    #[arg(long)]
    pub observation: PathBuf,
    /// Write the new state back to the state file
    #[arg(long)]
    pub write_state: bool,
    /// Event kinds to emit (repeatable); all when omitted
    #[arg(long = "event")]
    pub events: Vec<EventKind>,
    /// Report already-final transactions on the first poll
    #[arg(long)]
    pub emit_on_first_poll: bool,
    /// Ignore balance changes smaller than this, in smallest units
    #[arg(long)]
    pub min_delta: Option<String>,
}

impl WatchArgs {
    pub fn execute(self, json: bool) -> Result<(), CliError> {
        let min_delta = match &self.min_delta {
            Some(raw) => Amount::from(raw.as_str()).to_integer()?,
            None => U256::zero(),
        };
        let detector = Detector::new(TriggerConfig {
            events: self.events.iter().copied().collect(),
            emit_on_first_poll: self.emit_on_first_poll,
            min_delta,
        });

        let state = if self.state.exists() {
            TriggerState::from_json(&std::fs::read_to_string(&self.state)?)?
        } else {
            TriggerState::default()
        };
        let observation: Observation =
            serde_json::from_str(&std::fs::read_to_string(&self.observation)?)?;

        let outcome = detector.poll(&state, &observation)?;
        tracing::info!(events = outcome.events.len(), "poll complete");

        if self.write_state {
            std::fs::write(&self.state, outcome.state.to_json()?)?;
        }

        let message = if outcome.events.is_empty() {
            "No changes".to_string()
        } else {
            outcome
                .events
                .iter()
                .map(describe)
                .collect::<Vec<_>>()
                .join("\n")
        };

        Output::new(json)
            .field_value("events", json!(outcome.events))
            .field_value("state", json!(outcome.state))
            .message(&message)
            .print();
        Ok(())
    }
}

fn describe(event: &TriggerEvent) -> String {
    match event {
        TriggerEvent::NewBlock {
            height,
            blocks_elapsed,
            ..
        } => format!("new block {} (+{})", height, blocks_elapsed),
        TriggerEvent::NewEpoch {
            previous_epoch,
            epoch,
        } => format!("new epoch {} (was {})", epoch, previous_epoch),
        TriggerEvent::BalanceChanged {
            address,
            coin_type,
            direction,
            delta_display,
            ..
        } => {
            let verb = match direction {
                Direction::Increase => "increased",
                Direction::Decrease => "decreased",
            };
            format!(
                "balance of {} in {} {} by {}",
                address.to_standard_string(),
                coin_type,
                verb,
                delta_display
            )
        }
        TriggerEvent::TransactionConfirmed { hash, success, .. } => format!(
            "transaction {} {}",
            hash,
            if *success { "succeeded" } else { "failed" }
        ),
    }
}
