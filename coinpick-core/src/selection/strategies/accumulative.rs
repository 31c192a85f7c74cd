//! Accumulative selection strategy
//!
//! Deterministic greedy alternative to branch-and-bound: walk the UTXO set
//! in exactly the order the caller supplied it, accumulating until the
//! running total covers the targets plus the fee for the current prefix.
//! The fee is recomputed after every addition since it grows with the input
//! count. Order sensitivity is intentional; callers control priority by
//! ordering the set.

use crate::selection::strategies::{base, Strategy};
use crate::selection::types::{SelectionOutcome, SelectionParams};
use crate::types::{OutputHandle, SelectionError, ValuedOutput};

/// Strategy accumulating UTXOs in caller order until sufficient
pub struct AccumulativeStrategy;

impl AccumulativeStrategy {
    /// Create a new AccumulativeStrategy
    pub fn new() -> Self {
        Self
    }
}

impl Default for AccumulativeStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for AccumulativeStrategy {
    fn name(&self) -> &'static str {
        "Accumulative"
    }

    fn select(
        &self,
        utxos: &[ValuedOutput],
        targets: &[ValuedOutput],
        change: &OutputHandle,
        fee_rate: f32,
        params: &SelectionParams,
    ) -> Result<SelectionOutcome, SelectionError> {
        let available = base::total_value(utxos);
        let ordered: Vec<(usize, ValuedOutput)> = utxos.iter().copied().enumerate().collect();
        base::accumulate(&ordered, targets, change, fee_rate, params, available)
    }
}
