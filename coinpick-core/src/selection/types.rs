//! Result and parameter types for coin selection
//!
//! # Key Types
//!
//! - [`SelectionStrategy`]: Which target-funding algorithm to run
//! - [`SelectionParams`]: Policy bounds shared by all strategies
//! - [`Selection`]: A successful selection with its fee and virtual size
//! - [`SelectionOutcome`]: Success or explicit infeasibility
//!
//! Infeasibility is deliberately not an error: a request can be perfectly
//! valid and still not be satisfiable by the supplied UTXO set. Validation
//! failures surface as [`SelectionError`](crate::types::SelectionError)
//! instead, so callers branch on the two cases separately.

use crate::types::{DEFAULT_MAX_FEE_RATE, DEFAULT_RELAY_FEE_RATE, ValuedOutput};
use bitcoin::Amount;
use serde::{Deserialize, Serialize};

/// Target-funding selection strategy
///
/// Each strategy trades search effort against waste differently. The sweep
/// ("maximize funds") flow has its own entry point on
/// [`CoinSelector`](crate::selection::CoinSelector) because it takes a
/// recipient template instead of a target list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionStrategy {
    /// Search subsets for an exact match, minimizing waste
    ///
    /// Bounded branch-and-bound over effective values; falls back to a
    /// deterministic accumulation with a change output when no subset lands
    /// inside the no-change window.
    BranchAndBound,

    /// Accumulate UTXOs in caller order until sufficient
    ///
    /// Never re-orders the input set; order sensitivity is intentional and
    /// caller-controlled.
    Accumulative,
}

/// Policy bounds shared by all strategies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionParams {
    /// Attempt budget for the branch-and-bound search
    pub max_bnb_tries: usize,
    /// Upper bound for accepted fee rates in satoshis per vbyte
    pub max_fee_rate: f32,
    /// Relay fee rate used for dust classification, satoshis per vbyte
    pub relay_fee_rate: f32,
}

impl Default for SelectionParams {
    fn default() -> Self {
        Self {
            max_bnb_tries: 100_000,
            max_fee_rate: DEFAULT_MAX_FEE_RATE,
            relay_fee_rate: DEFAULT_RELAY_FEE_RATE,
        }
    }
}

/// A successful selection
///
/// Invariants, re-checked before every return:
/// `fee == sum(inputs) - sum(outputs)` exactly, and `fee / vsize` is at
/// least the requested fee rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Selected UTXOs, ordered by their position in the caller's set
    pub inputs: Vec<ValuedOutput>,
    /// Final outputs: the targets in caller order, then any change output
    pub outputs: Vec<ValuedOutput>,
    /// Total fee paid
    #[serde(with = "bitcoin::amount::serde::as_sat")]
    pub fee: Amount,
    /// Estimated virtual size of the funded transaction
    pub vsize: u64,
}

impl Selection {
    /// Total value of the selected inputs
    pub fn input_total(&self) -> Amount {
        self.inputs.iter().map(|o| o.value).sum()
    }

    /// Total value of the final outputs
    pub fn output_total(&self) -> Amount {
        self.outputs.iter().map(|o| o.value).sum()
    }
}

/// Outcome of a selection attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionOutcome {
    /// A satisfying selection was found
    Selected(Selection),

    /// No subset of the supplied UTXOs can satisfy the request
    Infeasible {
        /// Total value of the supplied UTXOs
        #[serde(with = "bitcoin::amount::serde::as_sat")]
        available: Amount,
        /// Value needed to satisfy the request, fee included
        #[serde(with = "bitcoin::amount::serde::as_sat")]
        required: Amount,
    },
}

impl SelectionOutcome {
    /// The selection, if one was found
    pub fn selection(&self) -> Option<&Selection> {
        match self {
            SelectionOutcome::Selected(selection) => Some(selection),
            SelectionOutcome::Infeasible { .. } => None,
        }
    }

    /// Whether the request was infeasible
    pub fn is_infeasible(&self) -> bool {
        matches!(self, SelectionOutcome::Infeasible { .. })
    }
}
