use bitcoin::Amount;
use coinpick_core::logging::{self, LogConfig, LogLevel};
use coinpick_core::selection::types::{SelectionOutcome, SelectionParams, SelectionStrategy};
use coinpick_core::selection::CoinSelector;
use coinpick_core::types::{OutputHandle, ScriptShape, SelectionError, ValuedOutput};
use std::sync::Once;

// Initialize once for selection tests
static INIT_LOGGER: Once = Once::new();

fn setup() {
    INIT_LOGGER.call_once(|| {
        let config = LogConfig {
            level: LogLevel::Error, // Minimize output during tests
            include_timestamps: false,
            console_logging: false,
        };
        let _ = logging::init(&config);
    });
}

fn wpkh(id: u64, sats: u64) -> ValuedOutput {
    ValuedOutput::new(OutputHandle::new(id, ScriptShape::P2wpkh), Amount::from_sat(sats))
}

fn change_template() -> OutputHandle {
    OutputHandle::new(99, ScriptShape::P2wpkh)
}

fn ids(outputs: &[ValuedOutput]) -> Vec<u64> {
    outputs.iter().map(|o| o.id()).collect()
}

// Scenario: two UTXOs, one target needing both, excess well above the dust
// threshold. Both strategies must take both inputs and return the excess
// minus the incremental fee as change.
#[test]
fn test_selects_minimal_sufficient_subset_with_change() {
    setup();
    let utxos = vec![wpkh(0, 100_000), wpkh(1, 50_000)];
    let targets = vec![wpkh(10, 120_000)];
    let selector = CoinSelector::with_fee_rate(1.0);

    for strategy in [SelectionStrategy::BranchAndBound, SelectionStrategy::Accumulative] {
        let outcome = selector
            .select(&utxos, &targets, &change_template(), strategy)
            .unwrap();
        let selection = outcome.selection().expect("feasible");

        assert_eq!(ids(&selection.inputs), vec![0, 1]);
        assert_eq!(selection.outputs.len(), 2, "change output expected");
        assert_eq!(selection.outputs[0].value, Amount::from_sat(120_000));
        let change = selection.outputs[1];
        assert_eq!(change.id(), 99);
        assert_eq!(change.value, Amount::from_sat(29_791));
        assert_eq!(selection.fee, Amount::from_sat(209));
        assert_eq!(selection.vsize, 209);
    }
}

#[test]
fn test_branch_and_bound_finds_changeless_match() {
    setup();
    // The first UTXO covers the target plus exactly its own transaction fee,
    // so the search lands on it with zero excess and emits no change.
    let utxos = vec![wpkh(0, 100_110), wpkh(1, 60_000), wpkh(2, 30_000)];
    let targets = vec![wpkh(10, 100_000)];
    let selector = CoinSelector::with_fee_rate(1.0);

    let outcome = selector
        .select(&utxos, &targets, &change_template(), SelectionStrategy::BranchAndBound)
        .unwrap();
    let selection = outcome.selection().expect("feasible");

    assert_eq!(ids(&selection.inputs), vec![0]);
    assert_eq!(selection.outputs.len(), 1, "no change output");
    assert_eq!(selection.fee, Amount::from_sat(110));
    assert_eq!(selection.vsize, 110);
}

#[test]
fn test_dust_change_is_folded_into_fee() {
    setup();
    // Excess of 90 sats cannot pay for a change output worth keeping; both
    // strategies must absorb it into the fee instead.
    let utxos = vec![wpkh(0, 100_200)];
    let targets = vec![wpkh(10, 100_000)];
    let selector = CoinSelector::with_fee_rate(1.0);

    for strategy in [SelectionStrategy::BranchAndBound, SelectionStrategy::Accumulative] {
        let outcome = selector
            .select(&utxos, &targets, &change_template(), strategy)
            .unwrap();
        let selection = outcome.selection().expect("feasible");
        assert_eq!(selection.outputs.len(), 1, "no change output");
        assert_eq!(selection.fee, Amount::from_sat(200));
        assert_eq!(selection.vsize, 110);
    }
}

// Scenario: the UTXO set cannot cover the target plus any achievable fee.
// This is an infeasible outcome, not an error.
#[test]
fn test_underfunded_request_is_infeasible_not_error() {
    setup();
    let utxos = vec![wpkh(0, 10_000), wpkh(1, 5_000)];
    let targets = vec![wpkh(10, 120_000)];
    let selector = CoinSelector::with_fee_rate(1.0);

    for strategy in [SelectionStrategy::BranchAndBound, SelectionStrategy::Accumulative] {
        let outcome = selector
            .select(&utxos, &targets, &change_template(), strategy)
            .unwrap();
        match outcome {
            SelectionOutcome::Infeasible { available, required } => {
                assert_eq!(available, Amount::from_sat(15_000));
                assert_eq!(required, Amount::from_sat(120_178));
            }
            SelectionOutcome::Selected(_) => panic!("expected infeasible outcome"),
        }
    }
}

// Scenario: a fee rate below the relay floor fails validation.
#[test]
fn test_sub_minimum_fee_rate_is_rejected() {
    setup();
    let utxos = vec![wpkh(0, 100_000)];
    let targets = vec![wpkh(10, 50_000)];
    let selector = CoinSelector::with_fee_rate(0.5);

    let result = selector.select(
        &utxos,
        &targets,
        &change_template(),
        SelectionStrategy::BranchAndBound,
    );
    assert_eq!(result, Err(SelectionError::InvalidFeeRate { rate: 0.5 }));
}

// Scenario: a 1-sat target is dust at the default relay rate.
#[test]
fn test_dust_target_is_rejected_with_index() {
    setup();
    let utxos = vec![wpkh(0, 100_000)];
    let targets = vec![wpkh(10, 1)];
    let selector = CoinSelector::with_fee_rate(1.0);

    let result = selector.select(
        &utxos,
        &targets,
        &change_template(),
        SelectionStrategy::Accumulative,
    );
    assert_eq!(result, Err(SelectionError::DustTarget(0)));
}

#[test]
fn test_accumulative_respects_caller_order() {
    setup();
    let targets = vec![wpkh(10, 30_000)];
    let selector = CoinSelector::with_fee_rate(1.0);

    // The first sufficient prefix is just the first UTXO, whichever it is.
    let outcome = selector
        .select(
            &[wpkh(0, 50_000), wpkh(1, 100_000)],
            &targets,
            &change_template(),
            SelectionStrategy::Accumulative,
        )
        .unwrap();
    let selection = outcome.selection().expect("feasible");
    assert_eq!(ids(&selection.inputs), vec![0]);
    assert_eq!(selection.outputs[1].value, Amount::from_sat(19_859));

    let outcome = selector
        .select(
            &[wpkh(1, 100_000), wpkh(0, 50_000)],
            &targets,
            &change_template(),
            SelectionStrategy::Accumulative,
        )
        .unwrap();
    let selection = outcome.selection().expect("feasible");
    assert_eq!(ids(&selection.inputs), vec![1]);
    assert_eq!(selection.outputs[1].value, Amount::from_sat(69_859));
}

#[test]
fn test_accumulative_stops_at_first_sufficient_prefix() {
    setup();
    // Once the running total reaches target + fee, later UTXOs must not be
    // touched, even if they would reduce waste.
    let utxos = vec![wpkh(0, 40_000), wpkh(1, 40_000), wpkh(2, 1_000_000)];
    let targets = vec![wpkh(10, 60_000)];
    let selector = CoinSelector::with_fee_rate(1.0);

    let outcome = selector
        .select(&utxos, &targets, &change_template(), SelectionStrategy::Accumulative)
        .unwrap();
    let selection = outcome.selection().expect("feasible");
    assert_eq!(ids(&selection.inputs), vec![0, 1]);
}

#[test]
fn test_selection_is_deterministic() {
    setup();
    let utxos = vec![
        wpkh(0, 13_337),
        wpkh(1, 92_000),
        wpkh(2, 41_500),
        wpkh(3, 7_777),
        wpkh(4, 60_001),
    ];
    let targets = vec![wpkh(10, 88_000), wpkh(11, 12_000)];
    let selector = CoinSelector::with_fee_rate(2.0);

    for strategy in [SelectionStrategy::BranchAndBound, SelectionStrategy::Accumulative] {
        let first = selector
            .select(&utxos, &targets, &change_template(), strategy)
            .unwrap();
        let second = selector
            .select(&utxos, &targets, &change_template(), strategy)
            .unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_exhausted_search_budget_falls_back() {
    setup();
    // A zero-attempt budget can never find a changeless match; the fallback
    // must still produce a valid selection.
    let params = SelectionParams {
        max_bnb_tries: 0,
        ..Default::default()
    };
    let utxos = vec![wpkh(0, 100_110), wpkh(1, 60_000)];
    let targets = vec![wpkh(10, 100_000)];
    let selector = CoinSelector::with_fee_rate(1.0).with_params(params);

    let outcome = selector
        .select(&utxos, &targets, &change_template(), SelectionStrategy::BranchAndBound)
        .unwrap();
    let selection = outcome.selection().expect("feasible");
    assert_eq!(
        selection.fee,
        selection.input_total() - selection.output_total()
    );
}

#[test]
fn test_unsupported_input_shape_fails_fast() {
    setup();
    let utxos = vec![ValuedOutput::new(
        OutputHandle::new(0, ScriptShape::P2sh),
        Amount::from_sat(100_000),
    )];
    let targets = vec![wpkh(10, 50_000)];
    let selector = CoinSelector::with_fee_rate(1.0);

    for strategy in [SelectionStrategy::BranchAndBound, SelectionStrategy::Accumulative] {
        let result = selector.select(&utxos, &targets, &change_template(), strategy);
        assert_eq!(
            result,
            Err(SelectionError::UnsupportedScript(ScriptShape::P2sh))
        );
    }
}

#[test]
fn test_legacy_inputs_price_without_marker() {
    setup();
    // A single P2PKH input spending to a P2WPKH target: 189 vB without
    // change, 220 vB with it.
    let utxos = vec![ValuedOutput::new(
        OutputHandle::new(0, ScriptShape::P2pkh),
        Amount::from_sat(200_000),
    )];
    let targets = vec![wpkh(10, 100_000)];
    let selector = CoinSelector::with_fee_rate(1.0);

    let outcome = selector
        .select(&utxos, &targets, &change_template(), SelectionStrategy::Accumulative)
        .unwrap();
    let selection = outcome.selection().expect("feasible");
    assert_eq!(selection.vsize, 220);
    assert_eq!(selection.fee, Amount::from_sat(220));
    assert_eq!(selection.outputs[1].value, Amount::from_sat(99_780));
}
