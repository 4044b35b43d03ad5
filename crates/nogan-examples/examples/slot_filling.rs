//! Slot filling example: a creation nod pours pulses into slots.
//!
//! Loads engine settings from TOML, wires a creation nod to a recording nod
//! and to a slot, and advances one moment. The slot swallows the creation
//! pulse and asks (through an operation) to become a recording; the example
//! applies the operation and advances again.
//!
//! Run with: `cargo run -p nogan-examples --example slot_filling`

use nogan_core::config::NoganConfig;
use nogan_core::graph::WireOptions;
use nogan_core::operation::apply_operations_with;
use nogan_core::phantom::{NodSpec, Phantom};
use nogan_core::pulse::{Colour, NodType, Pulse};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const CONFIG: &str = r#"
max_history = 4
validate = true
"#;

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nogan_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = NoganConfig::from_toml_str(CONFIG).unwrap();

    let mut phantom = Phantom::new();
    let creation = phantom.create_nod(NodSpec::new(NodType::Creation).at([0, 0]));
    let recording = phantom.create_nod(NodSpec::new(NodType::Recording).at([2, 1]));
    let slot = phantom.create_nod(NodSpec::new(NodType::Slot).at([2, -1]));
    for target in [recording, slot] {
        phantom
            .create_wire(creation, target, WireOptions::default().timing(1))
            .unwrap();
    }
    phantom.add_pulse(creation, Colour::Blue, Pulse::default()).unwrap();

    let (mut next, operations) = phantom.advance_with_operations(&[], &config).unwrap();

    let copied = next.nod(recording).unwrap().pulses().blue;
    println!("recording receives: {copied:?}");
    println!("slot firing: {}", next.nod(slot).unwrap().pulses().is_firing());
    println!("operations: {operations:?}");

    apply_operations_with(&mut next, &operations, &config).unwrap();
    println!("slot is now: {:?}", next.nod(slot).unwrap().kind());
}
