use bitcoin::Amount;
use coinpick_core::math;
use coinpick_core::selection::types::SelectionOutcome;
use coinpick_core::selection::CoinSelector;
use coinpick_core::types::{OutputHandle, ScriptShape, SelectionError, ValuedOutput};

fn wpkh(id: u64, sats: u64) -> ValuedOutput {
    ValuedOutput::new(OutputHandle::new(id, ScriptShape::P2wpkh), Amount::from_sat(sats))
}

fn recipient() -> OutputHandle {
    OutputHandle::new(7, ScriptShape::P2wpkh)
}

#[test]
fn test_sweep_spends_everything_into_one_output() {
    let utxos = vec![wpkh(0, 100_000), wpkh(1, 60_000)];
    let selector = CoinSelector::with_fee_rate(1.0);

    let outcome = selector.select_max_funds(&utxos, &recipient()).unwrap();
    let selection = outcome.selection().expect("feasible");

    // Nothing was pruned: caller order and ids preserved exactly.
    let ids: Vec<u64> = selection.inputs.iter().map(|o| o.id()).collect();
    assert_eq!(ids, vec![0, 1]);

    // One recipient output carrying the remainder after the 178 vB fee.
    assert_eq!(selection.outputs.len(), 1);
    assert_eq!(selection.outputs[0].id(), 7);
    assert_eq!(selection.outputs[0].value, Amount::from_sat(159_822));
    assert_eq!(selection.fee, Amount::from_sat(178));
    assert_eq!(selection.vsize, 178);
}

#[test]
fn test_sweep_prunes_uneconomical_inputs() {
    // The 50-sat UTXO costs 68 sats of marginal fee to include; spending it
    // would lose money, so it must be dropped.
    let utxos = vec![wpkh(0, 100_000), wpkh(1, 50)];
    let selector = CoinSelector::with_fee_rate(1.0);

    let outcome = selector.select_max_funds(&utxos, &recipient()).unwrap();
    let selection = outcome.selection().expect("feasible");

    let ids: Vec<u64> = selection.inputs.iter().map(|o| o.id()).collect();
    assert_eq!(ids, vec![0]);
    assert_eq!(selection.outputs[0].value, Amount::from_sat(99_890));
    assert_eq!(selection.fee, Amount::from_sat(110));
}

#[test]
fn test_sweep_retained_inputs_beat_their_marginal_fee() {
    let utxos = vec![wpkh(0, 40_000), wpkh(1, 69), wpkh(2, 68), wpkh(3, 500)];
    let selector = CoinSelector::with_fee_rate(1.0);

    let outcome = selector.select_max_funds(&utxos, &recipient()).unwrap();
    let selection = outcome.selection().expect("feasible");

    // Recompute each marginal contribution against the full set the same way
    // the engine defines it: fee(all) - fee(all minus one).
    let all_shapes: Vec<ScriptShape> = utxos.iter().map(|u| u.shape()).collect();
    let full_fee =
        math::fee_for_vsize(math::transaction_vsize(&all_shapes, &[ScriptShape::P2wpkh]).unwrap(), 1.0);
    for input in &selection.inputs {
        let mut reduced = all_shapes.clone();
        reduced.remove(utxos.iter().position(|u| u.id() == input.id()).unwrap());
        let reduced_fee = math::fee_for_vsize(
            math::transaction_vsize(&reduced, &[ScriptShape::P2wpkh]).unwrap(),
            1.0,
        );
        assert!(input.value.to_sat() > full_fee - reduced_fee);
    }

    // The 68-sat UTXO sits exactly at its marginal fee and must be excluded.
    let ids: Vec<u64> = selection.inputs.iter().map(|o| o.id()).collect();
    assert_eq!(ids, vec![0, 1, 3]);
}

#[test]
fn test_sweep_with_dust_remainder_is_infeasible() {
    // 400 sats minus the 110 sat fee leaves 290, under the 294 sat dust
    // floor for a P2WPKH recipient.
    let utxos = vec![wpkh(0, 400)];
    let selector = CoinSelector::with_fee_rate(1.0);

    let outcome = selector.select_max_funds(&utxos, &recipient()).unwrap();
    match outcome {
        SelectionOutcome::Infeasible { available, required } => {
            assert_eq!(available, Amount::from_sat(400));
            assert_eq!(required, Amount::from_sat(404));
        }
        SelectionOutcome::Selected(_) => panic!("expected infeasible outcome"),
    }
}

#[test]
fn test_sweep_rejects_unsupported_input_shape() {
    let utxos = vec![ValuedOutput::new(
        OutputHandle::new(0, ScriptShape::P2wsh),
        Amount::from_sat(100_000),
    )];
    let selector = CoinSelector::with_fee_rate(1.0);

    assert_eq!(
        selector.select_max_funds(&utxos, &recipient()),
        Err(SelectionError::UnsupportedScript(ScriptShape::P2wsh))
    );
}

#[test]
fn test_sweep_fee_identity_holds() {
    let utxos = vec![wpkh(0, 25_000), wpkh(1, 12_345), wpkh(2, 6_789)];
    let selector = CoinSelector::with_fee_rate(3.0);

    let outcome = selector.select_max_funds(&utxos, &recipient()).unwrap();
    let selection = outcome.selection().expect("feasible");
    assert_eq!(
        selection.fee,
        selection.input_total() - selection.output_total()
    );
    assert!(selection.fee.to_sat() as f32 / selection.vsize as f32 >= 3.0);
}
