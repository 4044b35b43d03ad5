//! Time loop example: wires that reach both backwards and forwards.
//!
//! Builds four nods in a loop whose wires alternate between the past and the
//! future, fires one of them, and prints what every nod sees a moment ago,
//! now, and a moment ahead. Then steps the loop forward a few moments with a
//! recorded history.
//!
//! Run with: `cargo run -p nogan-examples --example time_loop`
//! (set `RUST_LOG=nogan_core=debug` to watch the resolver).

use nogan_core::advance::History;
use nogan_core::config::NoganConfig;
use nogan_core::graph::WireOptions;
use nogan_core::peak::PeakQuery;
use nogan_core::phantom::{NodSpec, Phantom};
use nogan_core::pulse::{Colour, Pulse};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nogan_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut phantom = Phantom::new();
    let nods: Vec<_> = (0..4)
        .map(|i| phantom.create_nod(NodSpec::default().at([i, 0])))
        .collect();

    // 1 -(-1)-> 2 -(+1)-> 3 -(-1)-> 1, and 4 -(+1)-> 3.
    for (source, target, timing) in [(0, 1, -1), (1, 2, 1), (2, 0, -1), (3, 2, 1)] {
        phantom
            .create_wire(nods[source], nods[target], WireOptions::default().timing(timing))
            .unwrap();
    }
    phantom.add_pulse(nods[3], Colour::Blue, Pulse::default()).unwrap();

    println!("        {:>6} {:>6} {:>6}", "before", "now", "after");
    for &id in &nods {
        let row: Vec<bool> = [-1, 0, 1]
            .into_iter()
            .map(|timing| {
                phantom
                    .get_peak(PeakQuery::new(id).timing(timing))
                    .unwrap()
                    .result
            })
            .collect();
        println!("{:>7} {:>6} {:>6} {:>6}", id.to_string(), row[0], row[1], row[2]);
    }

    // --- Step forward with a recorded history ---

    let config = NoganConfig::default();
    let mut history = History::from_config(&config);
    let mut current = phantom;
    for moment in 1..=4 {
        let (next, _) = history.step(&current, &config).unwrap();
        let firing: Vec<String> = next
            .nods()
            .filter(|(_, nod)| nod.pulses().is_firing())
            .map(|(id, _)| id.to_string())
            .collect();
        println!("moment {moment}: firing [{}]", firing.join(", "));
        current = next;
    }
}
