//! # aptflow-trigger
//!
//! Poll-based change detection. The host fetches an [`Observation`] on its
//! own schedule, hands it to [`Detector::poll`] together with the
//! [`TriggerState`] it saved last time, emits the returned events and saves
//! the returned state.
//!
//! ```rust
//! use aptflow_trigger::{Detector, Observation, TriggerState};
//!
//! let detector = Detector::default();
//! let obs = |h| Observation { ledger_height: h, epoch: 1, balances: vec![], transactions: vec![] };
//!
//! let first = detector.poll(&TriggerState::default(), &obs(10)).unwrap();
//! assert!(first.events.is_empty());
//! let second = detector.poll(&first.state, &obs(12)).unwrap();
//! assert_eq!(second.events.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod detector;
mod error;
mod event;
mod observation;
mod state;

pub use detector::{Detector, PollOutcome, TriggerConfig};
pub use error::TriggerError;
pub use event::{Direction, EventKind, TriggerEvent};
pub use observation::{BalanceObservation, Observation, TransactionObservation, TransactionStatus};
pub use state::{balance_key, TriggerState};
