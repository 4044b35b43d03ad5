//! Structural checks for phantoms.
//!
//! The lifecycle operations in [`crate::graph`] keep a phantom consistent on
//! their own. The validator exists for phantoms assembled by hand (through
//! [`Phantom::add_child`], deserialization, or nested edits) and as a test
//! oracle.

use crate::graph::GraphError;
use crate::id::{NodId, WireId};
use crate::phantom::Phantom;
use std::collections::HashSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Violation types
// ---------------------------------------------------------------------------

/// What is wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// A nod stored under one id carries another.
    NodKeyMismatch { key: NodId, id: NodId },
    /// A wire stored under one id carries another.
    WireKeyMismatch { key: WireId, id: WireId },
    /// A wire's source nod does not exist.
    DanglingSource { wire: WireId, source: NodId },
    /// A wire's target nod does not exist.
    DanglingTarget { wire: WireId, target: NodId },
    /// A nod lists an input that is missing or does not end at that nod.
    BadInput { nod: NodId, wire: WireId },
    /// A nod lists an output that is missing or does not start at that nod.
    BadOutput { nod: NodId, wire: WireId },
    /// A nod lists the same wire twice on one side.
    DuplicateWire { nod: NodId, wire: WireId },
    /// A wire is missing from its target's inputs.
    UnlistedInput { wire: WireId, target: NodId },
    /// A wire is missing from its source's outputs.
    UnlistedOutput { wire: WireId, source: NodId },
    /// The same raw id names both a nod and a wire.
    SharedId(u32),
    /// A live nod or wire id is marked free (or was never allocated).
    UnallocatedId(u32),
}

/// A violation, located by the chain of nods whose nested phantoms lead to
/// it. An empty path means the top-level phantom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: Vec<NodId>,
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for id in &self.path {
            write!(f, "{id} > ")?;
        }
        write!(f, "{:?}", self.kind)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Every structural violation in `phantom` and the phantoms nested in it.
pub fn validate(phantom: &Phantom) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut path = Vec::new();
    validate_into(phantom, &mut path, &mut violations);
    violations
}

/// `Ok` if [`validate`] finds nothing, otherwise [`GraphError::Invalid`].
pub fn ensure_valid(phantom: &Phantom) -> Result<(), GraphError> {
    let violations = validate(phantom);
    if violations.is_empty() {
        return Ok(());
    }
    for violation in &violations {
        tracing::warn!(%violation, "phantom violation");
    }
    Err(GraphError::Invalid(violations))
}

fn validate_into(phantom: &Phantom, path: &mut Vec<NodId>, out: &mut Vec<Violation>) {
    let mut report = |kind: ViolationKind| {
        out.push(Violation {
            path: path.clone(),
            kind,
        })
    };

    for (&key, nod) in &phantom.nods {
        if key != nod.id {
            report(ViolationKind::NodKeyMismatch { key, id: nod.id });
        }
        for (side, wires) in [(true, &nod.inputs), (false, &nod.outputs)] {
            let mut seen = HashSet::new();
            for &wire in wires {
                if !seen.insert(wire) {
                    report(ViolationKind::DuplicateWire { nod: key, wire });
                }
                let Some(w) = phantom.wires.get(&wire) else {
                    report(if side {
                        ViolationKind::BadInput { nod: key, wire }
                    } else {
                        ViolationKind::BadOutput { nod: key, wire }
                    });
                    continue;
                };
                if side && w.target != key {
                    report(ViolationKind::BadInput { nod: key, wire });
                }
                if !side && w.source != key {
                    report(ViolationKind::BadOutput { nod: key, wire });
                }
            }
        }
    }

    for (&key, wire) in &phantom.wires {
        if key != wire.id {
            report(ViolationKind::WireKeyMismatch { key, id: wire.id });
        }
        match phantom.nods.get(&wire.source) {
            None => report(ViolationKind::DanglingSource {
                wire: key,
                source: wire.source,
            }),
            Some(source) if !source.outputs.contains(&key) => {
                report(ViolationKind::UnlistedOutput {
                    wire: key,
                    source: wire.source,
                })
            }
            Some(_) => {}
        }
        match phantom.nods.get(&wire.target) {
            None => report(ViolationKind::DanglingTarget {
                wire: key,
                target: wire.target,
            }),
            Some(target) if !target.inputs.contains(&key) => {
                report(ViolationKind::UnlistedInput {
                    wire: key,
                    target: wire.target,
                })
            }
            Some(_) => {}
        }
    }

    let pool = phantom.id_pool();
    let nod_ids = phantom.nods.keys().map(|id| id.0);
    let wire_ids: HashSet<u32> = phantom.wires.keys().map(|id| id.0).collect();
    for raw in nod_ids {
        if wire_ids.contains(&raw) {
            report(ViolationKind::SharedId(raw));
        }
        if !pool.is_allocated(raw) {
            report(ViolationKind::UnallocatedId(raw));
        }
    }
    for &raw in &wire_ids {
        if !pool.is_allocated(raw) {
            report(ViolationKind::UnallocatedId(raw));
        }
    }

    for (&id, nod) in &phantom.nods {
        path.push(id);
        validate_into(&nod.children, path, out);
        path.pop();
    }
}
