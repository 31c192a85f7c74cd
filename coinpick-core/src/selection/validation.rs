//! Standalone validators for selection inputs and results
//!
//! The selectors run these before and after every search; they are also
//! exported at the crate root for callers assembling their own flows.
//! All validators are pure and fail fast: the first violation aborts the
//! call with no partial result.

use crate::math;
use crate::types::{MAX_OUTPUT_VALUE, MIN_FEE_RATE, SelectionError, ValuedOutput};
use bitcoin::Amount;

/// Validate a group of valued outputs
///
/// # Arguments
/// * `outputs` - UTXOs or targets to check
///
/// # Returns
/// * `EmptyGroup` if the list is empty, `InvalidValue` for the first entry
///   whose value is zero or above [`MAX_OUTPUT_VALUE`]
pub fn validate_output_values(outputs: &[ValuedOutput]) -> Result<(), SelectionError> {
    if outputs.is_empty() {
        return Err(SelectionError::EmptyGroup);
    }
    for (index, output) in outputs.iter().enumerate() {
        let value = output.value.to_sat();
        if value == 0 || value > MAX_OUTPUT_VALUE {
            return Err(SelectionError::InvalidValue { index, value });
        }
    }
    Ok(())
}

/// Validate a fee rate against the engine's bounds
///
/// # Arguments
/// * `fee_rate` - Requested rate in satoshis per vbyte
/// * `max_fee_rate` - Configured upper bound (overflow/DoS guard)
pub fn validate_fee_rate(fee_rate: f32, max_fee_rate: f32) -> Result<(), SelectionError> {
    if !fee_rate.is_finite() || fee_rate < MIN_FEE_RATE || fee_rate > max_fee_rate {
        return Err(SelectionError::InvalidFeeRate { rate: fee_rate });
    }
    Ok(())
}

/// Reject targets that are dust at the given relay fee rate
///
/// # Returns
/// * `DustTarget(index)` for the first dust-classified target, index
///   relative to the caller's order
pub fn validate_dust(targets: &[ValuedOutput], relay_fee_rate: f32) -> Result<(), SelectionError> {
    for (index, target) in targets.iter().enumerate() {
        if math::is_dust(target.shape(), target.value, relay_fee_rate) {
            return Err(SelectionError::DustTarget(index));
        }
    }
    Ok(())
}

/// Compute and validate the fee and virtual size of a selection
///
/// The fee is exactly the value difference between inputs and outputs; the
/// virtual size comes from the worst-case estimator. Fails with
/// `InsufficientFee` when the realized rate is below `fee_rate`, then
/// re-checks the realized rate against the configured bounds (a fee that
/// implies an absurd rate is as wrong as one that is too small).
///
/// # Arguments
/// * `utxos` - Selected inputs
/// * `targets` - Final outputs, change included
/// * `fee_rate` - Requested rate in satoshis per vbyte
/// * `max_fee_rate` - Configured upper bound for the realized rate
///
/// # Returns
/// * `(fee, vsize)` on success
pub fn validated_fee_and_vsize(
    utxos: &[ValuedOutput],
    targets: &[ValuedOutput],
    fee_rate: f32,
    max_fee_rate: f32,
) -> Result<(Amount, u64), SelectionError> {
    let input_shapes: Vec<_> = utxos.iter().map(|o| o.shape()).collect();
    let output_shapes: Vec<_> = targets.iter().map(|o| o.shape()).collect();
    let vsize = math::transaction_vsize(&input_shapes, &output_shapes)?;
    let required = math::fee_for_vsize(vsize, fee_rate);

    let input_total: u64 = utxos.iter().map(|o| o.value.to_sat()).sum();
    let output_total: u64 = targets.iter().map(|o| o.value.to_sat()).sum();
    let fee = input_total.checked_sub(output_total).ok_or(
        SelectionError::InsufficientFee {
            fee: 0,
            vsize,
            required,
        },
    )?;

    if fee < required {
        return Err(SelectionError::InsufficientFee {
            fee,
            vsize,
            required,
        });
    }

    let realized_rate = fee as f32 / vsize as f32;
    validate_fee_rate(realized_rate, max_fee_rate)?;

    Ok((Amount::from_sat(fee), vsize))
}
