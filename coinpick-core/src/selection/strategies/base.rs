//! Shared utilities for selection strategies

use crate::math;
use crate::selection::types::{Selection, SelectionOutcome, SelectionParams};
use crate::selection::validation;
use crate::types::{OutputHandle, SelectionError, ValuedOutput};
use bitcoin::Amount;

/// Total value of a group of outputs, in satoshis
pub(crate) fn total_value(outputs: &[ValuedOutput]) -> u64 {
    outputs
        .iter()
        .fold(0u64, |acc, o| acc.saturating_add(o.value.to_sat()))
}

/// Resolve an excess over the required total into a change output
///
/// The change value is the excess minus the fee cost of the change output
/// itself. Returns `None` when that value would be zero or dust at the relay
/// rate; the caller then folds the whole excess into the fee.
pub(crate) fn change_from_excess(
    excess: u64,
    change: &OutputHandle,
    fee_rate: f32,
    relay_fee_rate: f32,
) -> Option<ValuedOutput> {
    let change_fee = math::fee_for_vsize(math::output_vsize(change.shape), fee_rate);
    let change_value = excess.checked_sub(change_fee)?;
    if change_value == 0 || change_value < math::dust_threshold(change.shape, relay_fee_rate) {
        return None;
    }
    Some(ValuedOutput::new(*change, Amount::from_sat(change_value)))
}

/// Build the final selection and re-validate its fee and virtual size
pub(crate) fn finalize(
    inputs: Vec<ValuedOutput>,
    outputs: Vec<ValuedOutput>,
    fee_rate: f32,
    params: &SelectionParams,
) -> Result<Selection, SelectionError> {
    let (fee, vsize) =
        validation::validated_fee_and_vsize(&inputs, &outputs, fee_rate, params.max_fee_rate)?;
    Ok(Selection {
        inputs,
        outputs,
        fee,
        vsize,
    })
}

/// Accumulate index-tagged UTXOs in the given order until sufficient
///
/// Stops at the first prefix whose value covers the targets plus the fee for
/// exactly that prefix, then resolves the excess into a change output or
/// folds it into the fee. Selected inputs are reported in ascending caller
/// position regardless of iteration order.
///
/// `available` is the total value of the caller's full UTXO set, reported
/// verbatim on the infeasible path.
pub(crate) fn accumulate(
    utxos: &[(usize, ValuedOutput)],
    targets: &[ValuedOutput],
    change: &OutputHandle,
    fee_rate: f32,
    params: &SelectionParams,
    available: u64,
) -> Result<SelectionOutcome, SelectionError> {
    let targets_total = total_value(targets);
    let output_shapes: Vec<_> = targets.iter().map(|t| t.shape()).collect();

    let mut selected: Vec<(usize, ValuedOutput)> = Vec::new();
    let mut input_shapes = Vec::with_capacity(utxos.len());
    let mut accumulated: u64 = 0;
    let mut required: u64 = targets_total;
    let mut sufficient = false;

    for (position, utxo) in utxos {
        selected.push((*position, *utxo));
        input_shapes.push(utxo.shape());
        accumulated = accumulated.saturating_add(utxo.value.to_sat());

        // Fee grows with every added input; recompute against the estimator.
        let vsize = math::transaction_vsize(&input_shapes, &output_shapes)?;
        required = targets_total.saturating_add(math::fee_for_vsize(vsize, fee_rate));
        if accumulated >= required {
            sufficient = true;
            break;
        }
    }

    if !sufficient {
        return Ok(SelectionOutcome::Infeasible {
            available: Amount::from_sat(available),
            required: Amount::from_sat(required),
        });
    }

    let excess = accumulated - required;
    selected.sort_by_key(|(position, _)| *position);
    let inputs: Vec<ValuedOutput> = selected.into_iter().map(|(_, utxo)| utxo).collect();

    let mut outputs = targets.to_vec();
    if let Some(change_output) =
        change_from_excess(excess, change, fee_rate, params.relay_fee_rate)
    {
        outputs.push(change_output);
    }

    finalize(inputs, outputs, fee_rate, params).map(SelectionOutcome::Selected)
}
