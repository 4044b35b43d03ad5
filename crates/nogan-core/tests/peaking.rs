//! Peak queries across the present, recorded history, and imagined moments.

use nogan_core::peak::PeakQuery;
use nogan_core::phantom::{NodSpec, Phantom};
use nogan_core::pulse::{Colour, NodType, Pulse, PulseData};
use nogan_core::test_utils::*;

// ===========================================================================
// Present and recorded past
// ===========================================================================

#[test]
fn finds_a_pulse_in_the_present() {
    let (mut phantom, nods) = make_phantom_with_nods(1);
    assert!(!active_at(&phantom, nods[0], 0));
    pulse(&mut phantom, nods[0]);
    assert!(active_at(&phantom, nods[0], 0));
}

#[test]
fn finds_a_pulse_in_the_past() {
    let (mut phantom, nods) = make_phantom_with_nods(1);
    let nod = nods[0];
    pulse(&mut phantom, nod);

    let before = phantom.clone();
    assert!(active_at(&before, nod, 0));
    assert!(!active_at(&before, nod, -1));

    let after = phantom.project();
    assert!(!active_at(&after, nod, 0));
    assert!(active_with(&after, nod, -1, std::slice::from_ref(&before)));
}

#[test]
fn recorded_history_is_ground_truth() {
    // Now reaches back and fires nod2 a moment ago, unless that moment is
    // on record.
    let (mut phantom, nods) = chain(2, -1);
    let past = phantom.project();
    pulse(&mut phantom, nods[0]);

    assert!(active_at(&phantom, nods[1], -1));
    assert!(!active_with(&phantom, nods[1], -1, &[past]));
}

#[test]
fn finds_a_pulse_caused_by_the_present() {
    let (mut phantom, nods) = chain(2, 0);
    assert!(!active_at(&phantom, nods[1], 0));
    pulse(&mut phantom, nods[0]);
    assert!(active_at(&phantom, nods[1], 0));
}

#[test]
fn finds_a_pulse_caused_by_the_past() {
    let (phantom, nods) = chain(2, 1);
    let mut past = phantom.project();
    let now = phantom.project();
    pulse(&mut past, nods[0]);

    assert!(active_with(&now, nods[1], 0, &[past]));
}

#[test]
fn finds_a_future_pulse_caused_by_the_present() {
    let (phantom, nods) = chain(2, 1);
    let mut now = phantom.project();
    let future = phantom.project();
    pulse(&mut now, nods[0]);

    assert!(active_with(&future, nods[1], 0, &[now.clone()]));
    // The same thing seen from now, one step ahead.
    assert!(active_at(&now, nods[1], 1));
}

// ===========================================================================
// Imagined moments
// ===========================================================================

#[test]
fn finds_a_pulse_caused_by_an_imagined_past() {
    let (mut phantom, nods) = make_phantom_with_nods(3);
    wire(&mut phantom, nods[0], nods[1], -1);
    wire(&mut phantom, nods[1], nods[2], 1);
    pulse(&mut phantom, nods[0]);

    assert!(active_at(&phantom, nods[2], 0));
}

#[test]
fn finds_a_pulse_caused_by_an_imagined_future() {
    let (mut phantom, nods) = make_phantom_with_nods(3);
    wire(&mut phantom, nods[0], nods[1], 1);
    wire(&mut phantom, nods[1], nods[2], -1);
    pulse(&mut phantom, nods[0]);

    assert!(active_at(&phantom, nods[2], 0));
}

// ===========================================================================
// Recursion
// ===========================================================================

#[test]
fn peaks_in_a_recursive_past_without_crashing() {
    let (mut phantom, nods) = make_phantom_with_nods(2);
    wire(&mut phantom, nods[0], nods[1], 1);
    wire(&mut phantom, nods[1], nods[0], 1);
    pulse(&mut phantom, nods[0]);

    assert!(!active_at(&phantom, nods[1], 0));
}

#[test]
fn peaks_in_a_deep_recursive_past_without_crashing() {
    let (mut phantom, nods) = make_phantom_with_nods(3);
    wire(&mut phantom, nods[0], nods[1], 1);
    wire(&mut phantom, nods[1], nods[2], 1);
    wire(&mut phantom, nods[2], nods[0], 1);
    pulse(&mut phantom, nods[0]);

    assert!(!active_at(&phantom, nods[2], 0));
}

#[test]
fn finds_a_pulse_in_a_recursive_past() {
    let (mut phantom, nods) = make_phantom_with_nods(3);
    wire(&mut phantom, nods[0], nods[1], 1);
    wire(&mut phantom, nods[1], nods[0], 1);
    wire(&mut phantom, nods[2], nods[0], -1);
    pulse(&mut phantom, nods[2]);

    let now: Vec<bool> = nods.iter().map(|&n| active_at(&phantom, n, 0)).collect();
    assert_eq!(now, [false, true, true]);
}

#[test]
fn finds_a_pulse_in_a_deep_recursive_past() {
    let (mut phantom, nods) = make_phantom_with_nods(4);
    wire(&mut phantom, nods[0], nods[1], 1);
    wire(&mut phantom, nods[1], nods[0], 1);
    wire(&mut phantom, nods[2], nods[1], -1);
    wire(&mut phantom, nods[3], nods[2], -1);
    pulse(&mut phantom, nods[3]);

    let at = |timing| -> Vec<bool> {
        nods.iter()
            .map(|&n| active_at(&phantom, n, timing))
            .collect()
    };
    assert_eq!(at(0), [false, true, false, true]);
    assert_eq!(at(-1), [true, false, true, false]);
    assert_eq!(at(1), [true, false, false, false]);
}

#[test]
fn peaks_in_a_recursive_future_without_crashing() {
    let (mut phantom, nods) = make_phantom_with_nods(2);
    wire(&mut phantom, nods[0], nods[1], -1);
    wire(&mut phantom, nods[1], nods[0], -1);
    pulse(&mut phantom, nods[0]);

    assert!(!active_at(&phantom, nods[1], 0));
}

#[test]
fn peaks_in_a_deep_recursive_future_without_crashing() {
    let (mut phantom, nods) = make_phantom_with_nods(3);
    wire(&mut phantom, nods[0], nods[1], -1);
    wire(&mut phantom, nods[1], nods[2], -1);
    wire(&mut phantom, nods[2], nods[0], -1);
    pulse(&mut phantom, nods[0]);

    assert!(!active_at(&phantom, nods[2], 0));
}

#[test]
fn finds_a_pulse_in_a_recursive_time_loop() {
    let (phantom, nods) = time_loop();
    let at = |timing| -> Vec<bool> {
        nods.iter()
            .map(|&n| active_at(&phantom, n, timing))
            .collect()
    };
    assert_eq!(at(0), [true, false, true, true]);
    // Nod 4 has no inputs, so only its own pulse now can make it active.
    assert_eq!(at(-1), [true, true, true, false]);
    assert_eq!(at(1), [false, false, true, false]);
}

/// A nod cut off by the cycle guard while its source was still open is
/// resolved again when a later wire reaches it with that source finished.
#[test]
fn guarded_results_are_not_reused_from_another_path() {
    let (mut phantom, nods) = make_phantom_with_kinds(&[
        NodType::Any,
        NodType::Slot,
        NodType::Creation,
        NodType::Any,
        NodType::Any,
    ]);
    let [reader, slot, creation, relay, seed] = [nods[0], nods[1], nods[2], nods[3], nods[4]];
    wire(&mut phantom, slot, reader, 0);
    wire(&mut phantom, relay, reader, 0);
    wire(&mut phantom, creation, slot, 0);
    wire(&mut phantom, relay, creation, 0);
    wire(&mut phantom, seed, creation, 0);
    wire(&mut phantom, creation, relay, 0);
    pulse(&mut phantom, seed);

    assert!(active_at(&phantom, relay, 0));
    let peak = phantom.get_peak(PeakQuery::new(reader)).unwrap();
    assert!(peak.result);
    assert!(peak.operations.iter().any(|op| op.target() == slot));
}

// ===========================================================================
// Colours
// ===========================================================================

#[test]
fn only_fires_pulses_through_the_same_colour_wire() {
    let (mut phantom, nods) = make_phantom_with_nods(2);
    coloured_wire(&mut phantom, nods[0], nods[1], 0, Colour::Red);

    let peak = |phantom: &Phantom, colour| {
        phantom
            .get_peak(PeakQuery::new(nods[1]).colour(colour))
            .unwrap()
            .result
    };

    phantom
        .add_pulse(nods[0], Colour::Green, Pulse::default())
        .unwrap();
    assert!(!peak(&phantom, Colour::Green));
    assert!(!peak(&phantom, Colour::Red));

    phantom
        .add_pulse(nods[0], Colour::Red, Pulse::default())
        .unwrap();
    assert!(!peak(&phantom, Colour::Green));
    assert!(peak(&phantom, Colour::Red));
}

#[test]
fn gets_a_full_peak() {
    let (mut phantom, nods) = make_phantom_with_nods(1);
    let full = phantom.get_full_peak(nods[0], &[]).unwrap();
    assert!(!full.is_firing());

    phantom.add_full_pulse(nods[0], Pulse::default()).unwrap();
    let full = phantom.get_full_peak(nods[0], &[]).unwrap();
    for colour in Colour::ALL {
        assert!(full.get(colour).result);
    }
}

// ===========================================================================
// Templates and payloads
// ===========================================================================

#[test]
fn peak_carries_the_template_of_its_nod() {
    let mut phantom = Phantom::new();
    let nod = phantom.create_nod(NodSpec::default().at([1, 0]));
    pulse(&mut phantom, nod);

    let peak = phantom.get_peak(PeakQuery::new(nod)).unwrap();
    assert_eq!(peak.template, phantom.nod(nod).unwrap().template());
}

#[test]
fn pulse_payload_travels_along_wires() {
    let (mut phantom, nods) = chain(3, 0);
    let payload = Pulse::new(NodType::Recording).with_data(PulseData::new(NodType::Destruction));
    phantom.add_pulse(nods[0], Colour::Blue, payload).unwrap();

    let peak = phantom.get_peak(PeakQuery::new(nods[2])).unwrap();
    assert!(peak.result);
    assert_eq!(peak.kind, NodType::Recording);
    assert_eq!(peak.data, Some(PulseData::new(NodType::Destruction)));
    // The template is the queried nod's, not the source's.
    assert_eq!(peak.template, phantom.nod(nods[2]).unwrap().template());
}

#[test]
fn creation_pulse_fills_a_slot_and_reports_it() {
    let (mut phantom, nods) = make_phantom_with_kinds(&[NodType::Creation, NodType::Slot]);
    wire(&mut phantom, nods[0], nods[1], 0);
    pulse(&mut phantom, nods[0]);

    let peak = phantom.get_peak(PeakQuery::new(nods[1])).unwrap();
    assert!(!peak.result);
    assert_eq!(peak.operations.len(), 1);
    assert_eq!(peak.operations[0].target(), nods[1]);
    // Resolution never edits the graph.
    assert_eq!(phantom.nod(nods[1]).unwrap().kind(), NodType::Slot);
}

#[test]
fn creation_pulse_copies_a_recording() {
    let (mut phantom, nods) = make_phantom_with_kinds(&[NodType::Creation, NodType::Recording]);
    wire(&mut phantom, nods[0], nods[1], 0);
    pulse(&mut phantom, nods[0]);

    let peak = phantom.get_peak(PeakQuery::new(nods[1])).unwrap();
    assert!(peak.result);
    assert_eq!(peak.kind, NodType::Creation);
    assert_eq!(peak.data, Some(PulseData::new(NodType::Recording)));
    assert!(peak.operations.is_empty());
}
