//! Core domain types for the coin-selection engine
//!
//! This module defines the fundamental types shared by every selector:
//! script shapes, output handles, valued outputs, and the error taxonomy.
//!
//! # Key Types
//!
//! - [`ScriptShape`]: The spendable script template of an output
//! - [`OutputHandle`]: An opaque, identity-carrying reference to an output shape
//! - [`ValuedOutput`]: An output handle paired with a satoshi value
//! - [`SelectionError`]: Validation failures shared by all selectors
//!
//! # Usage
//!
//! These types are used uniformly for both spendable UTXOs and payment
//! targets. The engine never mutates a caller's outputs; selected entries are
//! cloned into the result and can be mapped back through
//! [`OutputHandle::id`].
//!
//! # Example
//!
//! ```
//! use coinpick_core::types::{OutputHandle, ScriptShape, ValuedOutput};
//! use bitcoin::Amount;
//!
//! let utxo = ValuedOutput::new(
//!     OutputHandle::new(0, ScriptShape::P2wpkh),
//!     Amount::from_sat(100_000),
//! );
//! assert_eq!(utxo.value.to_sat(), 100_000);
//! ```

use bitcoin::Amount;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum value accepted for a single output, in satoshis (10^14).
///
/// Values above this bound are rejected by validation before any selector
/// runs; the cap keeps every intermediate sum comfortably inside `u64`.
pub const MAX_OUTPUT_VALUE: u64 = 100_000_000_000_000;

/// Minimum accepted fee rate in satoshis per virtual byte.
pub const MIN_FEE_RATE: f32 = 1.0;

/// Default upper bound for accepted fee rates in satoshis per virtual byte.
///
/// An overflow/DoS guard, overridable through
/// [`SelectionParams`](crate::selection::SelectionParams).
pub const DEFAULT_MAX_FEE_RATE: f32 = 10_000.0;

/// Default relay fee rate used for dust classification, in satoshis per
/// virtual byte. Matches Bitcoin Core's `DUST_RELAY_TX_FEE` (3000 sat/kvB).
pub const DEFAULT_RELAY_FEE_RATE: f32 = 3.0;

/// Script template of a spendable or payable output
///
/// Each shape carries a deterministic worst-case size model so that a
/// transaction built from an estimate can never come out larger than the
/// estimate. `P2sh` and `P2wsh` describe outputs whose redeem/witness script
/// is unknown to the engine; they can be paid to, but using them as inputs
/// fails with [`SelectionError::UnsupportedScript`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScriptShape {
    /// Legacy pay-to-pubkey-hash
    P2pkh,
    /// Pay-to-script-hash with an unknown redeem script (output only)
    P2sh,
    /// Nested segwit (P2WPKH wrapped in P2SH)
    P2shWpkh,
    /// Native segwit pay-to-witness-pubkey-hash
    P2wpkh,
    /// Native segwit pay-to-witness-script-hash (output only)
    P2wsh,
    /// Taproot key-path spend
    P2tr,
}

impl ScriptShape {
    /// Whether this shape's scriptPubKey is a witness program.
    ///
    /// Drives the relay-policy dust model: witness programs are cheaper to
    /// spend later, so their dust threshold is lower. Note that `P2shWpkh`
    /// pays to a plain P2SH scriptPubKey and is therefore *not* a witness
    /// program, even though spending it produces witness data.
    pub fn is_witness_program(&self) -> bool {
        matches!(
            self,
            ScriptShape::P2wpkh | ScriptShape::P2wsh | ScriptShape::P2tr
        )
    }

    /// Whether spending this shape as an input contributes witness data
    /// (and thus requires the segwit marker/flag bytes in the transaction).
    pub fn input_has_witness(&self) -> bool {
        matches!(
            self,
            ScriptShape::P2shWpkh | ScriptShape::P2wpkh | ScriptShape::P2tr
        )
    }
}

/// Opaque reference to a spendable script shape
///
/// The `id` is assigned by the caller and carried verbatim through
/// selection, so selected entries can be mapped back to the caller's own
/// records by identifier rather than by pointer identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutputHandle {
    /// Caller-assigned stable identifier
    pub id: u64,
    /// Script template of the output
    pub shape: ScriptShape,
}

impl OutputHandle {
    /// Create a new handle with the given identifier and shape
    pub fn new(id: u64, shape: ScriptShape) -> Self {
        Self { id, shape }
    }
}

/// An output handle paired with a value
///
/// Used uniformly for UTXOs (value available to spend) and targets (value to
/// pay). Invariant, enforced by validation: `0 < value <= MAX_OUTPUT_VALUE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuedOutput {
    /// Reference to the output's script shape and caller identity
    pub handle: OutputHandle,
    /// Value in satoshis
    #[serde(with = "bitcoin::amount::serde::as_sat")]
    pub value: Amount,
}

impl ValuedOutput {
    /// Create a new valued output
    pub fn new(handle: OutputHandle, value: Amount) -> Self {
        Self { handle, value }
    }

    /// Script shape of this output
    pub fn shape(&self) -> ScriptShape {
        self.handle.shape
    }

    /// Caller-assigned identifier of this output
    pub fn id(&self) -> u64 {
        self.handle.id
    }
}

/// Validation failures shared by all selectors
///
/// Every variant is fatal and aborts the call with no partial result.
/// "No subset could satisfy the request" is *not* an error; it is reported
/// as [`SelectionOutcome::Infeasible`](crate::selection::SelectionOutcome)
/// so callers can branch on invalid requests and infeasible-but-valid
/// requests separately.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectionError {
    #[error("no outputs provided")]
    EmptyGroup,

    #[error("invalid value {value} at index {index} (must be positive and at most {MAX_OUTPUT_VALUE})")]
    InvalidValue { index: usize, value: u64 },

    #[error("invalid fee rate {rate} sat/vB")]
    InvalidFeeRate { rate: f32 },

    #[error("target at index {0} is dust at the relay fee rate")]
    DustTarget(usize),

    #[error("fee {fee} sat over {vsize} vB is below the required {required} sat")]
    InsufficientFee { fee: u64, vsize: u64, required: u64 },

    #[error("no size model for script shape {0:?} used as input")]
    UnsupportedScript(ScriptShape),
}
