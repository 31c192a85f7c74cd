//! Size, fee, and dust calculations for coin selection
//!
//! This module provides the numeric core of the engine: BIP141 weight and
//! virtual-size estimation from script shapes, exact fee arithmetic, and the
//! relay-policy dust model.
//!
//! All estimates use worst-case signature and witness sizes per shape, so a
//! transaction built from a selection can never exceed the estimated size.
//! Fee arithmetic goes through `rust_decimal` to avoid binary floating-point
//! drift; identical inputs always produce identical results.
//!
//! Example:
//! ```
//! use coinpick_core::math;
//! use coinpick_core::types::ScriptShape;
//!
//! // A canonical one-input one-output P2WPKH transaction is 110 vB.
//! let vsize = math::transaction_vsize(
//!     &[ScriptShape::P2wpkh],
//!     &[ScriptShape::P2wpkh],
//! ).unwrap();
//! assert_eq!(vsize, 110);
//! ```

use crate::types::{ScriptShape, SelectionError};
use bitcoin::{Amount, Weight};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

/// Fixed non-witness transaction bytes: version (4) + locktime (4).
const TX_FIXED_BYTES: u64 = 8;

/// Segwit marker and flag bytes, weighted as witness data (1 WU each).
const SEGWIT_MARKER_WEIGHT: u64 = 2;

/// Non-witness bytes shared by every input: outpoint (36) + sequence (4)
/// + script-sig length varint (1).
const INPUT_BASE_BYTES: u64 = 41;

/// Worst-case witness bytes for a signature + compressed-pubkey spend:
/// item count (1) + 73-byte-max DER signature with its push (1 + 72)
/// + pubkey with its push (1 + 33).
const WITNESS_SIG_PUBKEY_BYTES: u64 = 108;

/// Worst-case witness bytes for a taproot key-path spend: item count (1)
/// + 65-byte-max Schnorr signature with its push (1 + 64 + 1 sighash byte).
const WITNESS_TAPROOT_BYTES: u64 = 67;

/// Relay-policy size of spending a non-witness output as the sole input of a
/// minimal future transaction: outpoint (32 + 4) + script-sig (1 + 107)
/// + sequence (4).
const DUST_SPEND_VSIZE_LEGACY: u64 = 148;

/// Relay-policy size of spending a witness-program output the same way,
/// with the 107 script bytes witness-discounted: 32 + 4 + 1 + 107/4 + 4.
const DUST_SPEND_VSIZE_SEGWIT: u64 = 67;

/// Length in bytes of a Bitcoin compact-size integer for `n`.
fn varint_len(n: u64) -> u64 {
    match n {
        0..=0xfc => 1,
        0xfd..=0xffff => 3,
        0x10000..=0xffff_ffff => 5,
        _ => 9,
    }
}

/// Worst-case weight contribution of spending the given shape as an input
///
/// Non-witness bytes count 4 weight units each, witness bytes 1.
///
/// # Arguments
/// * `shape` - Script shape of the output being spent
///
/// # Returns
/// * The input's weight, or `UnsupportedScript` for shapes with no spend model
pub fn input_weight(shape: ScriptShape) -> Result<Weight, SelectionError> {
    let (script_sig_bytes, witness_bytes) = match shape {
        // Push of a 72-byte-max DER signature plus a compressed pubkey
        ScriptShape::P2pkh => (107, 0),
        // Push of the 22-byte P2WPKH redeem script; spend data in witness
        ScriptShape::P2shWpkh => (23, WITNESS_SIG_PUBKEY_BYTES),
        ScriptShape::P2wpkh => (0, WITNESS_SIG_PUBKEY_BYTES),
        ScriptShape::P2tr => (0, WITNESS_TAPROOT_BYTES),
        ScriptShape::P2sh | ScriptShape::P2wsh => {
            return Err(SelectionError::UnsupportedScript(shape))
        }
    };
    let non_witness = INPUT_BASE_BYTES + script_sig_bytes;
    Ok(Weight::from_wu(non_witness * 4 + witness_bytes))
}

/// Weight contribution of paying to the given shape as an output
///
/// Output bytes are value (8) + scriptPubKey with its length varint, all
/// non-witness.
pub fn output_weight(shape: ScriptShape) -> Weight {
    let script_pubkey_bytes: u64 = match shape {
        ScriptShape::P2pkh => 25,
        ScriptShape::P2sh | ScriptShape::P2shWpkh => 23,
        ScriptShape::P2wpkh => 22,
        ScriptShape::P2wsh => 34,
        ScriptShape::P2tr => 34,
    };
    Weight::from_wu((8 + 1 + script_pubkey_bytes) * 4)
}

/// Worst-case virtual size of spending the given shape as an input, rounded
/// up to whole vbytes (148 vB legacy, 91 vB nested segwit, 68 vB native
/// segwit, 58 vB taproot).
pub fn input_vsize(shape: ScriptShape) -> Result<u64, SelectionError> {
    Ok(input_weight(shape)?.to_vbytes_ceil())
}

/// Virtual size of paying to the given shape as an output. Output weight is
/// always a multiple of four, so no rounding occurs.
pub fn output_vsize(shape: ScriptShape) -> u64 {
    output_weight(shape).to_vbytes_ceil()
}

/// Total weight of a transaction with the given input and output shapes
///
/// Overhead is version + locktime + both count varints (non-witness) plus
/// the segwit marker and flag whenever any input carries witness data.
/// Pure function of shape and count only; actual signature bytes never
/// enter the calculation.
///
/// # Arguments
/// * `inputs` - Shapes of the outputs being spent, in order
/// * `outputs` - Shapes of the outputs being created, in order
///
/// # Returns
/// * Total weight, or `UnsupportedScript` if any input has no spend model
pub fn transaction_weight(
    inputs: &[ScriptShape],
    outputs: &[ScriptShape],
) -> Result<Weight, SelectionError> {
    let overhead_bytes =
        TX_FIXED_BYTES + varint_len(inputs.len() as u64) + varint_len(outputs.len() as u64);
    let mut weight = overhead_bytes * 4;

    let mut has_witness = false;
    for shape in inputs {
        weight += input_weight(*shape)?.to_wu();
        has_witness |= shape.input_has_witness();
    }
    for shape in outputs {
        weight += output_weight(*shape).to_wu();
    }
    if has_witness {
        weight += SEGWIT_MARKER_WEIGHT;
    }
    Ok(Weight::from_wu(weight))
}

/// Upper-bound virtual size of the fixed transaction skeleton
///
/// Version, locktime, and the two count varints, plus a whole vbyte for the
/// segwit marker and flag when witness inputs may be present. Counting the
/// two marker weight units as a full vbyte here keeps incremental fee
/// accounting an upper bound of [`transaction_vsize`], which rounds the
/// whole transaction once.
pub fn overhead_vsize(input_count: usize, output_count: usize, has_witness_inputs: bool) -> u64 {
    let bytes =
        TX_FIXED_BYTES + varint_len(input_count as u64) + varint_len(output_count as u64);
    bytes + u64::from(has_witness_inputs)
}

/// Virtual size of a transaction with the given input and output shapes
///
/// Weight units divided by four, rounded up once at the whole-transaction
/// level, consistent with standard block-weight conversion.
pub fn transaction_vsize(
    inputs: &[ScriptShape],
    outputs: &[ScriptShape],
) -> Result<u64, SelectionError> {
    Ok(transaction_weight(inputs, outputs)?.to_vbytes_ceil())
}

/// Fee in satoshis for a virtual size at a fee rate, rounded up
///
/// Uses decimal arithmetic so that `fee / vsize >= fee_rate` holds exactly
/// for every rate that passes validation.
pub fn fee_for_vsize(vsize: u64, fee_rate: f32) -> u64 {
    let rate = Decimal::from_f32(fee_rate).unwrap_or(Decimal::ONE);
    (rate * Decimal::from(vsize))
        .ceil()
        .to_u64()
        .unwrap_or(u64::MAX)
}

/// Dust threshold in satoshis for an output of the given shape
///
/// An output is uneconomical ("dust") when its value is below the cost of
/// creating it and later spending it as the sole input of a minimal
/// transaction, priced at the relay fee rate. The spend sizes (148 vB for
/// non-witness outputs, 67 vB for witness programs) and the default
/// 3 sat/vB rate follow Bitcoin Core's relay policy, which yields the
/// canonical 546 sat (P2PKH) and 294 sat (P2WPKH) thresholds.
///
/// # Arguments
/// * `shape` - Shape of the candidate output
/// * `relay_fee_rate` - Relay fee rate in satoshis per vbyte
pub fn dust_threshold(shape: ScriptShape, relay_fee_rate: f32) -> u64 {
    let spend_vsize = if shape.is_witness_program() {
        DUST_SPEND_VSIZE_SEGWIT
    } else {
        DUST_SPEND_VSIZE_LEGACY
    };
    fee_for_vsize(output_vsize(shape) + spend_vsize, relay_fee_rate)
}

/// Whether a value is dust for the given output shape at a relay fee rate
pub fn is_dust(shape: ScriptShape, value: Amount, relay_fee_rate: f32) -> bool {
    value.to_sat() < dust_threshold(shape, relay_fee_rate)
}

/// Effective value of a UTXO after the fee to spend it
///
/// The value remaining once the input's own worst-case fee at the given
/// rate is paid. Negative for UTXOs not worth spending at that rate.
///
/// # Arguments
/// * `value` - Value of the UTXO
/// * `shape` - Script shape of the UTXO
/// * `fee_rate` - Fee rate in satoshis per vbyte
pub fn effective_value(
    value: Amount,
    shape: ScriptShape,
    fee_rate: f32,
) -> Result<i64, SelectionError> {
    let input_fee = fee_for_vsize(input_vsize(shape)?, fee_rate);
    Ok(value.to_sat() as i64 - input_fee as i64)
}

/// Waste ratio of a UTXO (fee to spend it / value)
///
/// Lower is better; values at or above 1.0 mean the UTXO costs at least as
/// much to spend as it provides.
pub fn waste_ratio(value: Amount, shape: ScriptShape, fee_rate: f32) -> Result<f32, SelectionError> {
    let sats = value.to_sat() as f32;
    if sats == 0.0 {
        return Ok(f32::INFINITY);
    }
    let input_fee = fee_for_vsize(input_vsize(shape)?, fee_rate);
    Ok(input_fee as f32 / sats)
}

/// Minimum change value that is economical to create
///
/// The fee cost of adding the change output at the current rate, plus the
/// dust threshold for that shape at the relay rate. Change below this bound
/// should be folded into the fee instead of being emitted.
pub fn min_economical_change(shape: ScriptShape, fee_rate: f32, relay_fee_rate: f32) -> u64 {
    dust_threshold(shape, relay_fee_rate) + fee_for_vsize(output_vsize(shape), fee_rate)
}
