//! Integration test: an editing session driven from outside the core.
//!
//! The caller owns the phantom and the history, edits the graph between
//! moments, applies the operations each advance hands back, and checks the
//! phantom stays sound throughout. This is the loop a front end runs once
//! per tick.

use nogan_core::advance::History;
use nogan_core::config::NoganConfig;
use nogan_core::graph::{NodPatch, Reconnect, WireOptions, WirePatch};
use nogan_core::operation::apply_operations_with;
use nogan_core::phantom::NodSpec;
use nogan_core::pulse::{Colour, NodType, Pulse, PulseData};
use nogan_core::test_utils::*;
use nogan_core::validation::validate;

fn strict_config() -> NoganConfig {
    NoganConfig::from_toml_str("max_history = 8\nvalidate = true\n").unwrap()
}

#[test]
fn creation_fills_a_slot_then_copies_through_it() {
    let config = strict_config();
    let (mut phantom, nods) =
        make_phantom_with_kinds(&[NodType::Creation, NodType::Slot, NodType::Any]);
    let [creation, slot, downstream] = [nods[0], nods[1], nods[2]];
    wire(&mut phantom, creation, slot, 1);
    wire(&mut phantom, slot, downstream, 1);
    pulse(&mut phantom, creation);

    let mut history = History::from_config(&config);

    // Moment 1: the slot swallows the creation pulse and asks to be filled.
    let (mut next, operations) = history.step(&phantom, &config).unwrap();
    assert_eq!(firing(&next, &nods), [false, false, false]);
    assert_eq!(operations.len(), 1);
    apply_operations_with(&mut next, &operations, &config).unwrap();
    assert_eq!(next.nod(slot).unwrap().kind(), NodType::Recording);

    // Moment 2: fire the creation nod again. The filled slot now copies the
    // pulse, and the echo of the first pulse passes through it downstream.
    pulse(&mut next, creation);
    let (after, operations) = history.step(&next, &config).unwrap();
    assert!(operations.is_empty());
    let copied = after.nod(slot).unwrap().pulses().blue.unwrap();
    assert_eq!(copied.kind, NodType::Creation);
    assert_eq!(copied.data, Some(PulseData::new(NodType::Recording)));
    assert!(after.nod(downstream).unwrap().pulses().blue.is_some());
    assert_eq!(history.len(), 2);
}

#[test]
fn rewiring_between_moments() {
    let (mut phantom, nods) = chain(2, 0);
    let [a, b] = [nods[0], nods[1]];
    pulse(&mut phantom, a);
    assert!(active_at(&phantom, b, 0));

    // Swap b out for a fresh nod.
    let c = phantom.create_nod(NodSpec::new(NodType::Recording).at([5, 5]));
    phantom.replace_nod(b, c).unwrap();
    assert!(!active_at(&phantom, b, 0));
    assert!(active_at(&phantom, c, 0));
    phantom.destroy_nod(b).unwrap();
    assert!(validate(&phantom).is_empty());

    // The freed id goes to the next thing created.
    let d = phantom.create_nod(NodSpec::default());
    assert_eq!(d, b);

    // Route the wire from c to d on red, one moment late.
    let wire_id = phantom.nod(c).unwrap().inputs()[0];
    phantom
        .reconnect_wire(
            wire_id,
            Reconnect {
                source: Some(c),
                target: Some(d),
            },
        )
        .unwrap();
    phantom
        .modify_wire(
            wire_id,
            WirePatch {
                timing: Some(1),
                colour: Some(Colour::Red),
            },
        )
        .unwrap();
    phantom
        .add_pulse(c, Colour::Red, Pulse::default())
        .unwrap();
    assert!(validate(&phantom).is_empty());

    let next = phantom.advance_with(&[], &strict_config()).unwrap();
    let pulses = next.nod(d).unwrap().pulses();
    assert!(pulses.red.is_some());
    assert!(pulses.blue.is_none());
    assert!(!next.nod(a).unwrap().pulses().is_firing());
}

#[test]
fn editing_positions_never_changes_results() {
    let (mut phantom, nods) = time_loop();
    let before: Vec<bool> = nods.iter().map(|&n| active_at(&phantom, n, 0)).collect();

    for (i, &id) in nods.iter().enumerate() {
        phantom
            .modify_nod(
                id,
                NodPatch {
                    position: Some([i as i32 * 10, -3].into()),
                    ..Default::default()
                },
            )
            .unwrap();
    }
    let after: Vec<bool> = nods.iter().map(|&n| active_at(&phantom, n, 0)).collect();
    assert_eq!(before, after);
}

#[test]
fn a_long_session_stays_valid() {
    let config = strict_config();
    let (mut phantom, nods) = time_loop();
    let extra = phantom.create_nod(NodSpec::default());
    phantom
        .create_wire(nods[2], extra, WireOptions::default().timing(2))
        .unwrap();

    let mut history = History::from_config(&config);
    for moment in 0..20 {
        if moment % 5 == 0 {
            pulse(&mut phantom, nods[3]);
        }
        let (next, operations) = history.step(&phantom, &config).unwrap();
        assert!(operations.is_empty());
        phantom = next;
    }
    assert_eq!(history.len(), config.max_history);
    assert!(validate(&phantom).is_empty());
}
