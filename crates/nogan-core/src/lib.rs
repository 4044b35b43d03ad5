//! Nogan Core -- a causal-graph simulation engine.
//!
//! A [`phantom::Phantom`] is a graph of nods joined by wires. Each wire has a
//! colour and a timing: 0 acts in the same moment, positive timings act later
//! and negative timings reach back from the future. Pulses are the active
//! signals sitting on nods, one slot per colour. The engine answers, for any
//! nod, colour and moment, whether a pulse is there, including through cyclic
//! and self-referential wiring, and always terminates.
//!
//! # Moving Through Time
//!
//! 1. **Build** -- create nods and wires with the lifecycle calls in [`graph`].
//! 2. **Seed** -- add pulses with [`phantom::Phantom::add_pulse`].
//! 3. **Query** -- ask [`phantom::Phantom::get_peak`] about any moment.
//! 4. **Advance** -- [`phantom::Phantom::advance`] produces the next moment,
//!    and [`advance::History`] keeps the moments left behind.
//! 5. **Apply** -- behaviours never edit the graph mid-query; they return
//!    [`operation::Operation`]s for the caller to apply.
//!
//! ```rust
//! use nogan_core::graph::WireOptions;
//! use nogan_core::phantom::{NodSpec, Phantom};
//! use nogan_core::pulse::{Colour, Pulse};
//!
//! let mut phantom = Phantom::new();
//! let a = phantom.create_nod(NodSpec::default());
//! let b = phantom.create_nod(NodSpec::default());
//! phantom.create_wire(a, b, WireOptions::default().timing(1)).unwrap();
//! phantom.add_pulse(a, Colour::Blue, Pulse::default()).unwrap();
//!
//! let next = phantom.advance(&[]).unwrap();
//! assert!(next.nod(b).unwrap().pulses().is_firing());
//! assert!(!next.nod(a).unwrap().pulses().is_firing());
//! ```
//!
//! # Key Types
//!
//! - [`phantom::Phantom`] -- One graph, with its own id pool. Nods may own a
//!   nested phantom.
//! - [`peak::Peak`] -- The answer to a query: active or not, plus what the
//!   pulse carries and any operations raised along the way.
//! - [`behave`] -- Per-type rules applied as a pulse crosses a wire.
//! - [`config::NoganConfig`] -- History length, search padding and
//!   validation switches.
//! - [`fixed::Position`] -- Q32.32 fixed-point coordinates carried by nods.

pub mod advance;
pub mod behave;
pub mod config;
pub mod fixed;
pub mod graph;
pub mod id;
pub mod operation;
pub mod peak;
pub mod phantom;
pub mod project;
pub mod pulse;
pub mod resolve;
pub mod validation;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
