use crate::fixed::{Position, Timing};
use crate::id::{IdAllocator, NodId, WireId};
use crate::pulse::{Colour, NodType, Pulses};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Core data structures
// ---------------------------------------------------------------------------

/// Creation parameters for a nod.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodSpec {
    pub kind: NodType,
    pub position: Position,
}

impl NodSpec {
    pub fn new(kind: NodType) -> Self {
        Self {
            kind,
            position: Position::ORIGIN,
        }
    }

    pub fn at(mut self, position: impl Into<Position>) -> Self {
        self.position = position.into();
        self
    }
}

/// A typed vertex: wire bookkeeping, per-colour pulse state and a nested
/// phantom of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nod {
    pub(crate) id: NodId,
    pub(crate) kind: NodType,
    pub(crate) position: Position,
    /// Wires whose target is this nod, in connection order.
    pub(crate) inputs: Vec<WireId>,
    /// Wires whose source is this nod, in connection order.
    pub(crate) outputs: Vec<WireId>,
    pub(crate) pulses: Pulses,
    pub(crate) children: Phantom,
}

impl Nod {
    /// Build a detached nod. Most callers want [`Phantom::create_nod`], which
    /// allocates the id and registers the nod in one step.
    pub fn new(id: NodId, spec: NodSpec) -> Self {
        Self {
            id,
            kind: spec.kind,
            position: spec.position,
            inputs: Vec::new(),
            outputs: Vec::new(),
            pulses: Pulses::default(),
            children: Phantom::new(),
        }
    }

    pub fn id(&self) -> NodId {
        self.id
    }

    pub fn kind(&self) -> NodType {
        self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn inputs(&self) -> &[WireId] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[WireId] {
        &self.outputs
    }

    pub fn pulses(&self) -> &Pulses {
        &self.pulses
    }

    pub fn has_wires(&self) -> bool {
        !self.inputs.is_empty() || !self.outputs.is_empty()
    }

    /// The nested phantom this nod scopes.
    pub fn children(&self) -> &Phantom {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Phantom {
        &mut self.children
    }

    /// Snapshot of the nod's identity, decoupled from later edits.
    pub fn template(&self) -> Template {
        Template {
            kind: self.kind,
            position: self.position,
        }
    }
}

/// A directed, time-shifted, coloured edge between two nods of one phantom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wire {
    pub(crate) id: WireId,
    pub(crate) source: NodId,
    pub(crate) target: NodId,
    pub(crate) timing: Timing,
    pub(crate) colour: Colour,
}

impl Wire {
    pub fn id(&self) -> WireId {
        self.id
    }

    pub fn source(&self) -> NodId {
        self.source
    }

    pub fn target(&self) -> NodId {
        self.target
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn colour(&self) -> Colour {
        self.colour
    }
}

/// Immutable `{kind, position}` snapshot of a nod.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Template {
    pub kind: NodType,
    pub position: Position,
}

// ---------------------------------------------------------------------------
// Phantom
// ---------------------------------------------------------------------------

/// One graph: nods and wires keyed by id, plus the id pool they are drawn
/// from. A phantom may be nested inside a nod; ids are only meaningful within
/// the phantom that issued them.
///
/// Maps are ordered so that every walk over a phantom (advance, projection,
/// validation) visits ids in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phantom {
    pub(crate) nods: BTreeMap<NodId, Nod>,
    pub(crate) wires: BTreeMap<WireId, Wire>,
    pub(crate) ids: IdAllocator,
}

impl Phantom {
    /// Create an empty phantom with a fresh id pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a raw id from this phantom's pool.
    pub fn create_id(&mut self) -> u32 {
        self.ids.create_id()
    }

    /// Return a raw id to this phantom's pool.
    pub fn free_id(&mut self, id: u32) {
        self.ids.free_id(id);
    }

    pub(crate) fn id_pool(&self) -> &IdAllocator {
        &self.ids
    }

    /// Insert a nod under its own id, reserving that id in the pool.
    /// Replaces (and returns) any nod already stored under the id.
    pub fn add_child(&mut self, nod: Nod) -> Option<Nod> {
        self.ids.reserve(nod.id.0);
        self.nods.insert(nod.id, nod)
    }

    /// Remove a nod by id without touching wires or the id pool.
    pub fn delete_child(&mut self, id: NodId) -> Option<Nod> {
        self.nods.remove(&id)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn get_nod(&self, id: NodId) -> Option<&Nod> {
        self.nods.get(&id)
    }

    pub fn get_nod_mut(&mut self, id: NodId) -> Option<&mut Nod> {
        self.nods.get_mut(&id)
    }

    pub fn get_wire(&self, id: WireId) -> Option<&Wire> {
        self.wires.get(&id)
    }

    pub fn contains_nod(&self, id: NodId) -> bool {
        self.nods.contains_key(&id)
    }

    pub fn contains_wire(&self, id: WireId) -> bool {
        self.wires.contains_key(&id)
    }

    pub fn nod_count(&self) -> usize {
        self.nods.len()
    }

    pub fn wire_count(&self) -> usize {
        self.wires.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nods.is_empty() && self.wires.is_empty()
    }

    /// Iterate over all nods, ascending by id.
    pub fn nods(&self) -> impl Iterator<Item = (NodId, &Nod)> {
        self.nods.iter().map(|(&id, nod)| (id, nod))
    }

    /// Iterate over all wires, ascending by id.
    pub fn wires(&self) -> impl Iterator<Item = (WireId, &Wire)> {
        self.wires.iter().map(|(&id, wire)| (id, wire))
    }

    /// Largest absolute wire timing in this phantom (not its children).
    pub fn max_timing(&self) -> Timing {
        self.wires
            .values()
            .map(|w| w.timing.saturating_abs())
            .max()
            .unwrap_or(0)
    }
}
