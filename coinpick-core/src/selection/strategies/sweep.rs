//! Sweep selection ("maximize funds")
//!
//! Spends an entire UTXO set into a single recipient output, pruning inputs
//! that cost as much to spend as they provide.

use crate::math;
use crate::selection::strategies::base;
use crate::selection::types::{SelectionOutcome, SelectionParams};
use crate::selection::validation;
use crate::types::{OutputHandle, ScriptShape, SelectionError, ValuedOutput};
use bitcoin::Amount;
use log::debug;

/// Sweep an entire UTXO set into one recipient
pub struct SweepStrategy;

impl SweepStrategy {
    /// Create a new SweepStrategy
    pub fn new() -> Self {
        Self
    }

    /// Spend every economical UTXO into a single recipient output
    ///
    /// Each UTXO's marginal fee contribution is the fee for the full set
    /// minus the fee with that UTXO excluded; UTXOs whose value does not
    /// exceed their own contribution are pruned. The recipient receives the
    /// retained total minus the recomputed fee, or the request is infeasible
    /// when that value would be dust.
    ///
    /// When nothing is pruned the returned inputs preserve the caller's
    /// order and identifiers exactly, so an unchanged set is detectable by
    /// comparing ids or lengths.
    pub fn sweep(
        &self,
        utxos: &[ValuedOutput],
        recipient: &OutputHandle,
        fee_rate: f32,
        params: &SelectionParams,
    ) -> Result<SelectionOutcome, SelectionError> {
        let recipient_shapes = [recipient.shape];
        let all_shapes: Vec<ScriptShape> = utxos.iter().map(|u| u.shape()).collect();
        let full_fee = math::fee_for_vsize(
            math::transaction_vsize(&all_shapes, &recipient_shapes)?,
            fee_rate,
        );

        let mut retained: Vec<ValuedOutput> = Vec::with_capacity(utxos.len());
        for (position, utxo) in utxos.iter().enumerate() {
            let mut reduced_shapes = all_shapes.clone();
            reduced_shapes.remove(position);
            let reduced_fee = math::fee_for_vsize(
                math::transaction_vsize(&reduced_shapes, &recipient_shapes)?,
                fee_rate,
            );
            let marginal_fee = full_fee.saturating_sub(reduced_fee);
            if utxo.value.to_sat() > marginal_fee {
                retained.push(*utxo);
            }
        }
        if retained.len() < utxos.len() {
            debug!(
                "sweep pruned {} uneconomical inputs of {}",
                utxos.len() - retained.len(),
                utxos.len()
            );
        }

        let available = base::total_value(utxos);
        let retained_shapes: Vec<ScriptShape> = retained.iter().map(|u| u.shape()).collect();
        let retained_fee = math::fee_for_vsize(
            math::transaction_vsize(&retained_shapes, &recipient_shapes)?,
            fee_rate,
        );
        let retained_total = base::total_value(&retained);

        // The swept output must itself clear the dust floor.
        let dust_floor = math::dust_threshold(recipient.shape, params.relay_fee_rate);
        let required = retained_fee.saturating_add(dust_floor);
        if retained.is_empty() || retained_total < required {
            return Ok(SelectionOutcome::Infeasible {
                available: Amount::from_sat(available),
                required: Amount::from_sat(required),
            });
        }

        let recipient_value = retained_total - retained_fee;
        let outputs = vec![ValuedOutput::new(
            *recipient,
            Amount::from_sat(recipient_value),
        )];
        validation::validate_output_values(&outputs)?;

        base::finalize(retained, outputs, fee_rate, params).map(SelectionOutcome::Selected)
    }
}

impl Default for SweepStrategy {
    fn default() -> Self {
        Self::new()
    }
}
