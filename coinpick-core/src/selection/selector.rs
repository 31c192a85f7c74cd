//! Main coin selector implementation
//!
//! This module provides the `CoinSelector` entry point, which validates a
//! request once and delegates to the strategy implementation matching the
//! requested selection strategy.
//!
//! # Overview
//!
//! `CoinSelector` implements the Strategy design pattern: it is the context,
//! the [`Strategy`] trait defines the interface, and the concrete strategy
//! types implement the selection algorithms. The sweep flow has a dedicated
//! entry point because its request shape differs (one recipient template,
//! no target list, no change).
//!
//! # Usage
//!
//! ```
//! use coinpick_core::selection::selector::CoinSelector;
//! use coinpick_core::selection::types::{SelectionOutcome, SelectionStrategy};
//! use coinpick_core::types::{OutputHandle, ScriptShape, ValuedOutput};
//! use bitcoin::Amount;
//!
//! let utxos = vec![
//!     ValuedOutput::new(OutputHandle::new(0, ScriptShape::P2wpkh), Amount::from_sat(100_000)),
//!     ValuedOutput::new(OutputHandle::new(1, ScriptShape::P2wpkh), Amount::from_sat(50_000)),
//! ];
//! let targets = vec![
//!     ValuedOutput::new(OutputHandle::new(10, ScriptShape::P2wpkh), Amount::from_sat(120_000)),
//! ];
//! let change = OutputHandle::new(99, ScriptShape::P2wpkh);
//!
//! let selector = CoinSelector::with_fee_rate(1.0);
//! let outcome = selector
//!     .select(&utxos, &targets, &change, SelectionStrategy::BranchAndBound)
//!     .expect("valid request");
//!
//! match outcome {
//!     SelectionOutcome::Selected(selection) => {
//!         // fee is exactly the input/output value difference
//!         assert_eq!(
//!             selection.fee,
//!             selection.input_total() - selection.output_total(),
//!         );
//!     }
//!     SelectionOutcome::Infeasible { .. } => {
//!         // valid request, but the UTXO set cannot fund it
//!     }
//! }
//! ```
//!
//! # Concurrency
//!
//! Every call is pure and synchronous: no I/O, no shared state, nothing to
//! lock. Selectors may be shared freely across threads.

use crate::selection::strategies::{
    AccumulativeStrategy, BranchAndBoundStrategy, Strategy, SweepStrategy,
};
use crate::selection::types::{SelectionOutcome, SelectionParams, SelectionStrategy};
use crate::selection::validation;
use crate::types::{OutputHandle, SelectionError, ValuedOutput};
use log::debug;
use serde_json::json;

/// Coin selector delegating to the requested strategy
///
/// Holds the required fee rate and the policy bounds shared by all
/// strategies. Construction never fails; the rate is validated on every
/// call so a misconfigured selector reports the error at use site.
pub struct CoinSelector {
    /// Required fee rate in satoshis per vbyte
    fee_rate: f32,
    /// Policy bounds (attempt budget, rate bounds, relay rate)
    params: SelectionParams,
}

impl CoinSelector {
    /// Create a new coin selector with a 1 sat/vB fee rate and default
    /// policy bounds
    pub fn new() -> Self {
        Self {
            fee_rate: 1.0,
            params: SelectionParams::default(),
        }
    }

    /// Create a new coin selector with the specified fee rate
    ///
    /// # Arguments
    /// * `fee_rate` - Required fee rate in satoshis per vbyte
    pub fn with_fee_rate(fee_rate: f32) -> Self {
        Self {
            fee_rate,
            params: SelectionParams::default(),
        }
    }

    /// Replace the policy bounds for this selector
    pub fn with_params(mut self, params: SelectionParams) -> Self {
        self.params = params;
        self
    }

    /// Set the fee rate for this selector
    pub fn set_fee_rate(&mut self, fee_rate: f32) -> &mut Self {
        self.fee_rate = fee_rate;
        self
    }

    /// Get the current fee rate
    pub fn fee_rate(&self) -> f32 {
        self.fee_rate
    }

    /// Get the current policy bounds
    pub fn params(&self) -> &SelectionParams {
        &self.params
    }

    /// Select UTXOs to fund the given targets
    ///
    /// Validates the fee rate, both output groups, and the targets' dust
    /// status, then runs the requested strategy.
    ///
    /// # Arguments
    /// * `utxos` - Spendable outputs, in caller order
    /// * `targets` - Payment outputs the selection must fund
    /// * `change` - Template for a change output, should one be needed
    /// * `strategy` - Selection strategy to run
    ///
    /// # Returns
    /// * A selection or an explicit infeasible outcome; validation failures
    ///   abort with a [`SelectionError`]
    pub fn select(
        &self,
        utxos: &[ValuedOutput],
        targets: &[ValuedOutput],
        change: &OutputHandle,
        strategy: SelectionStrategy,
    ) -> Result<SelectionOutcome, SelectionError> {
        validation::validate_fee_rate(self.fee_rate, self.params.max_fee_rate)?;
        validation::validate_output_values(utxos)?;
        validation::validate_output_values(targets)?;
        validation::validate_dust(targets, self.params.relay_fee_rate)?;

        let strategy_impl: Box<dyn Strategy> = match strategy {
            SelectionStrategy::BranchAndBound => Box::new(BranchAndBoundStrategy::new()),
            SelectionStrategy::Accumulative => Box::new(AccumulativeStrategy::new()),
        };

        debug!(
            "selection requested: {}",
            json!({
                "strategy": strategy_impl.name(),
                "utxo_count": utxos.len(),
                "target_count": targets.len(),
                "fee_rate": self.fee_rate,
            })
        );

        let outcome = strategy_impl.select(utxos, targets, change, self.fee_rate, &self.params)?;
        self.log_outcome(strategy_impl.name(), &outcome);
        Ok(outcome)
    }

    /// Sweep an entire UTXO set into a single recipient output
    ///
    /// Dedicated entry point for the "maximize funds" flow: no target list,
    /// no change template; every economical UTXO is spent and the recipient
    /// receives the remainder after fees.
    ///
    /// # Arguments
    /// * `utxos` - Spendable outputs, in caller order
    /// * `recipient` - Template for the single recipient output
    pub fn select_max_funds(
        &self,
        utxos: &[ValuedOutput],
        recipient: &OutputHandle,
    ) -> Result<SelectionOutcome, SelectionError> {
        validation::validate_fee_rate(self.fee_rate, self.params.max_fee_rate)?;
        validation::validate_output_values(utxos)?;

        debug!(
            "sweep requested: {}",
            json!({
                "utxo_count": utxos.len(),
                "fee_rate": self.fee_rate,
            })
        );

        let outcome = SweepStrategy::new().sweep(utxos, recipient, self.fee_rate, &self.params)?;
        self.log_outcome("Sweep", &outcome);
        Ok(outcome)
    }

    fn log_outcome(&self, strategy: &str, outcome: &SelectionOutcome) {
        match outcome {
            SelectionOutcome::Selected(selection) => debug!(
                "selection completed: {}",
                json!({
                    "strategy": strategy,
                    "selected_count": selection.inputs.len(),
                    "selected_ids": selection.inputs.iter().map(|u| u.id()).collect::<Vec<_>>(),
                    "fee": selection.fee.to_sat(),
                    "vsize": selection.vsize,
                })
            ),
            SelectionOutcome::Infeasible {
                available,
                required,
            } => debug!(
                "selection infeasible: {}",
                json!({
                    "strategy": strategy,
                    "available": available.to_sat(),
                    "required": required.to_sat(),
                })
            ),
        }
    }
}

impl Default for CoinSelector {
    fn default() -> Self {
        Self::new()
    }
}
