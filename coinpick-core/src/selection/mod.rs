//! Coin selection module
//!
//! Decides which unspent transaction outputs fund a payment, whether a
//! change output is worth creating, and what fee the resulting transaction
//! pays, at or above a required fee rate.
//!
//! # Module Structure
//!
//! - `types.rs` - Result and parameter types
//! - `validation.rs` - Standalone validators, reusable by callers
//! - `selector.rs` - Main selector (Strategy pattern context)
//! - `strategies/` - Strategy implementations
//!   - `branch_and_bound.rs` - Waste-minimizing bounded subset search
//!   - `accumulative.rs` - Deterministic caller-order accumulation
//!   - `sweep.rs` - Full-set sweep into one recipient
//!
//! # Determinism
//!
//! Every strategy is a pure function of its arguments: identical inputs
//! produce identical results across runs, threads, and platforms. The only
//! search with combinatorial cost (branch-and-bound) is bounded by an
//! explicit attempt budget, never wall-clock time.

pub mod selector;
pub mod strategies;
pub mod types;
pub mod validation;

pub use selector::CoinSelector;
pub use types::{Selection, SelectionOutcome, SelectionParams, SelectionStrategy};
pub use validation::{
    validate_dust, validate_fee_rate, validate_output_values, validated_fee_and_vsize,
};
