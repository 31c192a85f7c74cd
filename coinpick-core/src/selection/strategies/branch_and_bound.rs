//! Branch-and-bound selection strategy
//!
//! Searches subsets of the spendable set for one whose value lands in the
//! no-change window: enough to cover the targets and the subset's own fee,
//! with an excess no larger than the cost of creating a change output. A
//! hit means the transaction needs no change at all and the small excess
//! folds into the fee.
//!
//! The search walks an explicit inclusion stack in effective-value space
//! (each candidate's value minus its own input fee), depth-first with the
//! inclusion branch taken before the omission branch, and is bounded by a
//! hard attempt budget so it always terminates. When no subset lands in the
//! window, a deterministic fallback accumulates candidates by descending
//! effective value and emits a change output instead.

use crate::math;
use crate::selection::strategies::{base, Strategy};
use crate::selection::types::{SelectionOutcome, SelectionParams};
use crate::types::{OutputHandle, SelectionError, ValuedOutput};
use bitcoin::Amount;
use log::{debug, trace};

/// Strategy minimizing waste via a bounded branch-and-bound search
pub struct BranchAndBoundStrategy;

impl BranchAndBoundStrategy {
    /// Create a new BranchAndBoundStrategy
    pub fn new() -> Self {
        Self
    }
}

impl Default for BranchAndBoundStrategy {
    fn default() -> Self {
        Self::new()
    }
}

/// A spendable output admitted to the search, with its position in the
/// caller's set and its fee-adjusted value at the requested rate.
#[derive(Clone, Copy)]
struct Candidate {
    position: usize,
    output: ValuedOutput,
    effective_value: u64,
}

/// Best subset found so far, ordered by the reproducibility tie-break:
/// fewer inputs first, then lower excess, then lower caller positions.
struct BestMatch {
    key: (usize, u64, Vec<usize>),
    selected: Vec<Candidate>,
}

impl Strategy for BranchAndBoundStrategy {
    fn name(&self) -> &'static str {
        "BranchAndBound"
    }

    fn select(
        &self,
        utxos: &[ValuedOutput],
        targets: &[ValuedOutput],
        change: &OutputHandle,
        fee_rate: f32,
        params: &SelectionParams,
    ) -> Result<SelectionOutcome, SelectionError> {
        let targets_total = base::total_value(targets);
        let available = base::total_value(utxos);

        // Fee baseline for a transaction with no inputs yet. The varint is
        // sized for the whole candidate set and the marker for any witness
        // candidate, so per-input accounting stays an upper bound of the
        // exact estimate no matter which subset wins.
        let any_witness = utxos.iter().any(|u| u.shape().input_has_witness());
        let outputs_vsize: u64 = targets.iter().map(|t| math::output_vsize(t.shape())).sum();
        let overhead = math::overhead_vsize(utxos.len(), targets.len() + 1, any_witness);
        let base_fee = math::fee_for_vsize(overhead + outputs_vsize, fee_rate);
        let actual_target = targets_total.saturating_add(base_fee);

        // Only outputs worth spending at this rate enter the search.
        let mut candidates = Vec::with_capacity(utxos.len());
        for (position, utxo) in utxos.iter().enumerate() {
            let effective = math::effective_value(utxo.value, utxo.shape(), fee_rate)?;
            if effective > 0 {
                candidates.push(Candidate {
                    position,
                    output: *utxo,
                    effective_value: effective as u64,
                });
            }
        }
        candidates.sort_by(|a, b| {
            b.effective_value
                .cmp(&a.effective_value)
                .then(a.position.cmp(&b.position))
        });

        let total_effective: u64 = candidates
            .iter()
            .fold(0, |acc, c| acc.saturating_add(c.effective_value));
        if total_effective < actual_target {
            let input_fees: u64 = candidates
                .iter()
                .map(|c| c.output.value.to_sat() - c.effective_value)
                .sum();
            return Ok(SelectionOutcome::Infeasible {
                available: Amount::from_sat(available),
                required: Amount::from_sat(actual_target.saturating_add(input_fees)),
            });
        }

        let cost_of_change = math::fee_for_vsize(math::output_vsize(change.shape), fee_rate);

        if let Some(best) = search_window(
            &candidates,
            total_effective,
            actual_target,
            cost_of_change,
            params.max_bnb_tries,
        ) {
            trace!(
                "branch-and-bound window hit: {} inputs, excess {}",
                best.key.0,
                best.key.1
            );
            let mut selected = best.selected;
            selected.sort_by_key(|c| c.position);
            let inputs: Vec<ValuedOutput> = selected.into_iter().map(|c| c.output).collect();
            let outputs = targets.to_vec();
            return base::finalize(inputs, outputs, fee_rate, params)
                .map(SelectionOutcome::Selected);
        }

        debug!("branch-and-bound found no change-free subset, accumulating with change");
        let ordered: Vec<(usize, ValuedOutput)> = candidates
            .iter()
            .map(|c| (c.position, c.output))
            .collect();
        base::accumulate(&ordered, targets, change, fee_rate, params, available)
    }
}

/// Depth-first search for a subset whose effective value lands in
/// `[target, target + window]`, bounded by `budget` attempts.
///
/// Returns the best subset found, or `None` when no subset landed in the
/// window within the budget. An excess of exactly zero ends the search
/// early; nothing can beat it.
fn search_window(
    candidates: &[Candidate],
    total_effective: u64,
    target: u64,
    window: u64,
    budget: usize,
) -> Option<BestMatch> {
    // included[i] records the decision for candidates[i]; its length is the
    // search depth, so candidates past it are still undecided.
    let mut included: Vec<bool> = Vec::with_capacity(candidates.len());
    let mut current: u64 = 0;
    let mut undecided: u64 = total_effective;
    let mut best: Option<BestMatch> = None;

    for _ in 0..budget {
        let mut backtrack = false;

        if current.saturating_add(undecided) < target || current > target.saturating_add(window) {
            // This branch can no longer reach the window from either side.
            backtrack = true;
        } else if current >= target {
            // Inside the window; deeper subsets only grow the excess.
            backtrack = true;

            let selected: Vec<Candidate> = included
                .iter()
                .zip(candidates)
                .filter_map(|(keep, candidate)| keep.then_some(*candidate))
                .collect();
            let mut positions: Vec<usize> = selected.iter().map(|c| c.position).collect();
            positions.sort_unstable();
            let key = (selected.len(), current - target, positions);

            let improves = match &best {
                None => true,
                Some(current_best) => key < current_best.key,
            };
            let exact = key.1 == 0;
            if improves {
                best = Some(BestMatch { key, selected });
            }
            if exact {
                break;
            }
        }

        if backtrack {
            // Pop decided-out candidates until one that was included is
            // found, then flip it to its omission branch.
            while let Some(false) = included.last() {
                included.pop();
                undecided += candidates[included.len()].effective_value;
            }
            match included.last_mut() {
                None => break, // every branch traversed
                Some(last) => {
                    *last = false;
                    current -= candidates[included.len() - 1].effective_value;
                }
            }
        } else {
            // Descend: take the inclusion branch of the next candidate.
            let candidate = &candidates[included.len()];
            undecided -= candidate.effective_value;
            included.push(true);
            current += candidate.effective_value;
        }
    }

    best
}
