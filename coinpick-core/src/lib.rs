//! Coinpick Core Library
//!
//! Deterministic UTXO coin-selection engine for wallet and transaction
//! construction layers. Given a set of spendable outputs, a set of payment
//! targets, a change template, and a required fee rate, the engine decides
//! which inputs to spend and whether adding a change output is worthwhile.
//! It never builds, signs, or broadcasts transactions; those concerns stay
//! with the caller.
//!
//! # Modules
//!
//! - `types`: Core domain types and the error taxonomy
//! - `math`: Virtual-size estimation, fee arithmetic, dust policy
//! - `logging`: Logging configuration
//! - `selection`: Selection strategies, validators, and the selector
//!
//! # Design Notes
//!
//! All selection entry points are pure, synchronous, and reentrant; results
//! are byte-identical across repeated runs with identical inputs. Requests
//! that are valid but unsatisfiable return an explicit infeasible outcome
//! rather than an error, so callers can distinguish bad input from an
//! underfunded wallet.

/// Core domain types
pub mod types;

/// Size, fee, and dust calculations
pub mod math;

/// Logging configuration
pub mod logging;

/// UTXO selection algorithms and validators
pub mod selection;

/// Re-export core types for convenience
pub use types::{
    OutputHandle, ScriptShape, SelectionError, ValuedOutput, DEFAULT_MAX_FEE_RATE,
    DEFAULT_RELAY_FEE_RATE, MAX_OUTPUT_VALUE, MIN_FEE_RATE,
};

/// Re-export selection types and entry points
pub use selection::{
    CoinSelector, Selection, SelectionOutcome, SelectionParams, SelectionStrategy,
};

/// Re-export standalone validators
pub use selection::{
    validate_dust, validate_fee_rate, validate_output_values, validated_fee_and_vsize,
};

/// Re-export math utilities for convenience
pub use math::{
    dust_threshold, effective_value, fee_for_vsize, is_dust, min_economical_change,
    transaction_vsize, transaction_weight, waste_ratio,
};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

use std::sync::Once;

// Ensure initialization happens only once
static INIT: Once = Once::new();

/// Library initialization
///
/// Installs the default logging configuration. Safe to call multiple times;
/// only the first call has any effect.
///
/// # Returns
/// * Result with () on success, or an error message string
pub fn init() -> Result<(), String> {
    let mut result = Ok(());
    INIT.call_once(|| {
        let config = logging::LogConfig::default();
        result = logging::init(&config);
    });
    result
}
