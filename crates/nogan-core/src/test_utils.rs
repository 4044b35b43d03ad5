//! Shared test helpers for integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use crate::fixed::Timing;
use crate::graph::WireOptions;
use crate::id::{NodId, WireId};
use crate::peak::PeakQuery;
use crate::phantom::{NodSpec, Phantom};
use crate::pulse::{Colour, NodType, Pulse};

// ===========================================================================
// Builders
// ===========================================================================

/// A phantom holding `count` plain nods, returned in creation order.
pub fn make_phantom_with_nods(count: usize) -> (Phantom, Vec<NodId>) {
    let mut phantom = Phantom::new();
    let nods = (0..count)
        .map(|_| phantom.create_nod(NodSpec::default()))
        .collect();
    (phantom, nods)
}

/// A phantom with one nod of each given type, returned in order.
pub fn make_phantom_with_kinds(kinds: &[NodType]) -> (Phantom, Vec<NodId>) {
    let mut phantom = Phantom::new();
    let nods = kinds
        .iter()
        .map(|&kind| phantom.create_nod(NodSpec::new(kind)))
        .collect();
    (phantom, nods)
}

/// Blue wire with the given timing. Panics on unknown endpoints.
pub fn wire(phantom: &mut Phantom, source: NodId, target: NodId, timing: Timing) -> WireId {
    coloured_wire(phantom, source, target, timing, Colour::Blue)
}

pub fn coloured_wire(
    phantom: &mut Phantom,
    source: NodId,
    target: NodId,
    timing: Timing,
    colour: Colour,
) -> WireId {
    phantom
        .create_wire(source, target, WireOptions::default().timing(timing).colour(colour))
        .expect("wire endpoints exist")
        .id
}

/// Seed a plain blue pulse.
pub fn pulse(phantom: &mut Phantom, id: NodId) {
    phantom
        .add_pulse(id, Colour::Blue, Pulse::default())
        .expect("nod exists");
}

/// A chain `nods[0] -> nods[1] -> ...` of blue wires, all with `timing`.
pub fn chain(length: usize, timing: Timing) -> (Phantom, Vec<NodId>) {
    let (mut phantom, nods) = make_phantom_with_nods(length);
    for pair in nods.windows(2) {
        wire(&mut phantom, pair[0], pair[1], timing);
    }
    (phantom, nods)
}

/// Four nods in a loop whose wires alternate between reaching back and
/// reaching forward, with a pulse on the fourth:
///
/// `1 -(-1)-> 2 -(+1)-> 3 -(-1)-> 1` and `4 -(+1)-> 3`.
pub fn time_loop() -> (Phantom, [NodId; 4]) {
    let (mut phantom, nods) = make_phantom_with_nods(4);
    let [n1, n2, n3, n4] = [nods[0], nods[1], nods[2], nods[3]];
    wire(&mut phantom, n1, n2, -1);
    wire(&mut phantom, n2, n3, 1);
    wire(&mut phantom, n3, n1, -1);
    wire(&mut phantom, n4, n3, 1);
    pulse(&mut phantom, n4);
    (phantom, [n1, n2, n3, n4])
}

// ===========================================================================
// Queries
// ===========================================================================

/// Blue peak result at `timing` with no history.
pub fn active_at(phantom: &Phantom, id: NodId, timing: Timing) -> bool {
    active_with(phantom, id, timing, &[])
}

/// Blue peak result at `timing` against `history`.
pub fn active_with(phantom: &Phantom, id: NodId, timing: Timing, history: &[Phantom]) -> bool {
    phantom
        .get_peak(PeakQuery::new(id).timing(timing).history(history))
        .expect("nod exists")
        .result
}

/// Blue firing state of each nod, in order.
pub fn firing(phantom: &Phantom, nods: &[NodId]) -> Vec<bool> {
    nods.iter()
        .map(|&id| {
            phantom
                .get_nod(id)
                .is_some_and(|nod| nod.pulses().blue.is_some())
        })
        .collect()
}
