//! Compare an observation with the previous state and emit events

use std::collections::BTreeSet;

use aptflow_primitives::AccountAddress;
use aptflow_units::{format_units, Amount, U256};
use tracing::{debug, warn};

use crate::event::{Direction, EventKind, TriggerEvent};
use crate::observation::{
    BalanceObservation, Observation, TransactionObservation, TransactionStatus,
};
use crate::state::{balance_key, TriggerState};
use crate::TriggerError;

/// Detector settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerConfig {
    /// Kinds to emit; empty means all
    pub events: BTreeSet<EventKind>,
    /// Report transactions that are already final on the first poll
    pub emit_on_first_poll: bool,
    /// Smallest balance change worth reporting, in smallest units
    pub min_delta: U256,
}

impl TriggerConfig {
    /// Whether events of `kind` are emitted
    pub fn is_enabled(&self, kind: EventKind) -> bool {
        self.events.is_empty() || self.events.contains(&kind)
    }
}

/// Result of one poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOutcome {
    /// Events in detection order: blocks, epochs, balances, transactions
    pub events: Vec<TriggerEvent>,
    /// State to persist for the next poll
    pub state: TriggerState,
}

/// Stateless change detector; the host owns the state
#[derive(Debug, Clone, Default)]
pub struct Detector {
    config: TriggerConfig,
}

impl Detector {
    /// Create a detector
    pub fn new(config: TriggerConfig) -> Self {
        Self { config }
    }

    /// Detector settings
    pub fn config(&self) -> &TriggerConfig {
        &self.config
    }

    /// Compare `observation` with `state`.
    ///
    /// The returned state is always the one to persist, even when some
    /// event kinds are filtered out.
    pub fn poll(
        &self,
        state: &TriggerState,
        observation: &Observation,
    ) -> Result<PollOutcome, TriggerError> {
        let first = !state.initialized;
        let mut next = state.clone();
        next.initialized = true;
        let mut events = Vec::new();

        if let Some(event) = self.check_height(state.ledger_height, observation.ledger_height) {
            events.push(event);
        }
        next.ledger_height = Some(observation.ledger_height);

        if let Some(event) = self.check_epoch(state.epoch, observation.epoch) {
            events.push(event);
        }
        next.epoch = Some(observation.epoch);

        let mut seen = BTreeSet::new();
        for balance in &observation.balances {
            if let Some(event) = self.check_balance(state, &mut next, &mut seen, balance)? {
                events.push(event);
            }
        }

        for tx in &observation.transactions {
            if let Some(event) = self.check_transaction(&mut next, tx) {
                if !first || self.config.emit_on_first_poll {
                    events.push(event);
                }
            }
        }

        events.retain(|e| self.config.is_enabled(e.kind()));
        debug!(
            first,
            height = observation.ledger_height,
            events = events.len(),
            "trigger poll"
        );
        Ok(PollOutcome { events, state: next })
    }

    fn check_height(&self, previous: Option<u64>, height: u64) -> Option<TriggerEvent> {
        let previous = previous?;
        if height < previous {
            warn!(previous, height, "ledger height went backwards, re-baselining");
            return None;
        }
        (height > previous).then(|| TriggerEvent::NewBlock {
            previous_height: previous,
            height,
            blocks_elapsed: height - previous,
        })
    }

    fn check_epoch(&self, previous: Option<u64>, epoch: u64) -> Option<TriggerEvent> {
        let previous = previous?;
        if epoch < previous {
            warn!(previous, epoch, "epoch went backwards, re-baselining");
            return None;
        }
        (epoch > previous).then_some(TriggerEvent::NewEpoch {
            previous_epoch: previous,
            epoch,
        })
    }

    /// The stored balance is the last reported one; changes below
    /// `min_delta` leave it untouched so they accumulate.
    fn check_balance(
        &self,
        state: &TriggerState,
        next: &mut TriggerState,
        seen: &mut BTreeSet<String>,
        balance: &BalanceObservation,
    ) -> Result<Option<TriggerEvent>, TriggerError> {
        let address = AccountAddress::from_hex(&balance.address)?;
        let key = balance_key(&address.to_hex(), &balance.coin_type);
        if !seen.insert(key.clone()) {
            return Err(TriggerError::DuplicateBalance(key));
        }
        let current = parse_balance(&key, &balance.amount)?;

        let previous = match state.balances.get(&key) {
            Some(stored) => parse_balance(&key, stored)?,
            None => {
                debug!(%key, "baselining new balance");
                next.balances.insert(key, current.to_string());
                return Ok(None);
            }
        };

        if current == previous {
            return Ok(None);
        }
        let (direction, delta) = if current > previous {
            (Direction::Increase, current - previous)
        } else {
            (Direction::Decrease, previous - current)
        };
        if delta < self.config.min_delta {
            debug!(%key, %delta, "balance change below threshold");
            return Ok(None);
        }
        next.balances.insert(key.clone(), current.to_string());

        let delta_display = format_units(delta, balance.decimals, None).map_err(|source| {
            TriggerError::Amount {
                key: key.clone(),
                source,
            }
        })?;
        Ok(Some(TriggerEvent::BalanceChanged {
            address,
            coin_type: balance.coin_type.clone(),
            previous: previous.to_string(),
            current: current.to_string(),
            direction,
            delta: delta.to_string(),
            delta_display,
        }))
    }

    fn check_transaction(
        &self,
        next: &mut TriggerState,
        tx: &TransactionObservation,
    ) -> Option<TriggerEvent> {
        if !tx.status.is_final() {
            return None;
        }
        let hash = tx.hash.trim().to_lowercase();
        if !next.settled.insert(hash.clone()) {
            return None;
        }
        Some(TriggerEvent::TransactionConfirmed {
            hash,
            success: tx.status == TransactionStatus::Success,
            vm_status: tx.vm_status.clone(),
            version: tx.version,
        })
    }
}

fn parse_balance(key: &str, amount: &str) -> Result<U256, TriggerError> {
    Amount::from(amount)
        .to_integer()
        .map_err(|source| TriggerError::Amount {
            key: key.to_string(),
            source,
        })
}
