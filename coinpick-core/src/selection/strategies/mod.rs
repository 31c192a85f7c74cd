//! Selection strategy implementations
//!
//! Each target-funding strategy implements the [`Strategy`] trait; the sweep
//! flow lives here too but keeps its own signature since it takes a single
//! recipient template instead of a target list.

use crate::selection::types::{SelectionOutcome, SelectionParams};
use crate::types::{OutputHandle, SelectionError, ValuedOutput};

pub mod base;
pub mod accumulative;
pub mod branch_and_bound;
pub mod sweep;

// Re-export implementations
pub use accumulative::AccumulativeStrategy;
pub use branch_and_bound::BranchAndBoundStrategy;
pub use sweep::SweepStrategy;

/// Trait defining a target-funding selection strategy
///
/// Implementations assume their inputs have already passed the standalone
/// validators; the selector context runs those once per call.
pub trait Strategy {
    /// Name of this strategy
    fn name(&self) -> &'static str;

    /// Select UTXOs to fund the given targets
    ///
    /// # Arguments
    /// * `utxos` - Spendable outputs, in caller order
    /// * `targets` - Payment outputs the selection must fund
    /// * `change` - Template for a change output, should one be needed
    /// * `fee_rate` - Required fee rate in satoshis per vbyte
    /// * `params` - Policy bounds (attempt budget, rate bounds, relay rate)
    ///
    /// # Returns
    /// * A selection, an explicit infeasible outcome, or a validation error
    fn select(
        &self,
        utxos: &[ValuedOutput],
        targets: &[ValuedOutput],
        change: &OutputHandle,
        fee_rate: f32,
        params: &SelectionParams,
    ) -> Result<SelectionOutcome, SelectionError>;
}
