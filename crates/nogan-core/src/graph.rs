//! Graph lifecycle: creating, destroying, rewiring and editing nods and wires.
//!
//! Every operation here mutates its phantom in place and validates all ids it
//! touches before changing anything, so a failed call leaves the phantom
//! exactly as it was.

use crate::fixed::{Position, Timing};
use crate::id::{NodId, WireId};
use crate::operation::Operation;
use crate::phantom::{Nod, NodSpec, Phantom, Wire};
use crate::pulse::{Colour, NodType, Pulse};
use crate::validation::Violation;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during graph operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("nod not found: {0}")]
    NodNotFound(NodId),
    #[error("wire not found: {0}")]
    WireNotFound(WireId),
    #[error("cannot destroy {0}: it still has wires")]
    HasWires(NodId),
    #[error("phantom failed validation with {} violation(s)", .0.len())]
    Invalid(Vec<Violation>),
}

// ---------------------------------------------------------------------------
// Call parameters
// ---------------------------------------------------------------------------

/// Optional wire settings for [`Phantom::create_wire`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WireOptions {
    pub timing: Timing,
    pub colour: Colour,
}

impl WireOptions {
    pub fn timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn colour(mut self, colour: Colour) -> Self {
        self.colour = colour;
        self
    }
}

/// Result of [`Phantom::create_wire`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedWire {
    pub id: WireId,
    /// Deferred mutations caused by the new connection. Currently always
    /// empty; callers should still apply them.
    pub operations: Vec<Operation>,
}

/// New endpoints for [`Phantom::reconnect_wire`]. `None` keeps the current one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reconnect {
    pub source: Option<NodId>,
    pub target: Option<NodId>,
}

/// Partial update for [`Phantom::modify_nod`]. `None` fields are left alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodPatch {
    pub kind: Option<NodType>,
    pub position: Option<Position>,
}

/// Partial update for [`Phantom::modify_wire`]. `None` fields are left alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WirePatch {
    pub timing: Option<Timing>,
    pub colour: Option<Colour>,
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

impl Phantom {
    /// Look up a nod, failing loudly if it does not exist.
    pub fn nod(&self, id: NodId) -> Result<&Nod, GraphError> {
        self.nods.get(&id).ok_or(GraphError::NodNotFound(id))
    }

    pub fn nod_mut(&mut self, id: NodId) -> Result<&mut Nod, GraphError> {
        self.nods.get_mut(&id).ok_or(GraphError::NodNotFound(id))
    }

    /// Look up a wire, failing loudly if it does not exist.
    pub fn wire(&self, id: WireId) -> Result<&Wire, GraphError> {
        self.wires.get(&id).ok_or(GraphError::WireNotFound(id))
    }

    fn wire_mut(&mut self, id: WireId) -> Result<&mut Wire, GraphError> {
        self.wires.get_mut(&id).ok_or(GraphError::WireNotFound(id))
    }

    /// Create a nod with empty wire lists, no pulses and an empty nested
    /// phantom. Returns its id.
    pub fn create_nod(&mut self, spec: NodSpec) -> NodId {
        let id = NodId(self.create_id());
        self.add_child(Nod::new(id, spec));
        tracing::trace!(%id, kind = ?spec.kind, "created nod");
        id
    }

    /// Connect `source` to `target`. Self-loops are allowed.
    pub fn create_wire(
        &mut self,
        source: NodId,
        target: NodId,
        options: WireOptions,
    ) -> Result<CreatedWire, GraphError> {
        self.nod(source)?;
        self.nod(target)?;

        let id = WireId(self.create_id());
        self.wires.insert(
            id,
            Wire {
                id,
                source,
                target,
                timing: options.timing,
                colour: options.colour,
            },
        );
        self.nod_mut(source)?.outputs.push(id);
        self.nod_mut(target)?.inputs.push(id);

        tracing::trace!(%id, %source, %target, timing = options.timing, "created wire");
        Ok(CreatedWire {
            id,
            operations: Vec::new(),
        })
    }

    /// Remove a wire and its entries in both endpoints' lists.
    pub fn destroy_wire(&mut self, id: WireId) -> Result<(), GraphError> {
        let wire = *self.wire(id)?;
        self.nod(wire.source)?;
        self.nod(wire.target)?;

        self.nod_mut(wire.source)?.outputs.retain(|&w| w != id);
        self.nod_mut(wire.target)?.inputs.retain(|&w| w != id);
        self.wires.remove(&id);
        self.free_id(id.0);

        tracing::trace!(%id, "destroyed wire");
        Ok(())
    }

    /// Remove a nod (and everything nested in it). Fails with
    /// [`GraphError::HasWires`] while any wire is still attached.
    pub fn destroy_nod(&mut self, id: NodId) -> Result<Nod, GraphError> {
        if self.nod(id)?.has_wires() {
            return Err(GraphError::HasWires(id));
        }
        let nod = self.delete_child(id).ok_or(GraphError::NodNotFound(id))?;
        self.free_id(id.0);

        tracing::trace!(%id, "destroyed nod");
        Ok(nod)
    }

    /// Move every wire of `original` onto `replacement`.
    ///
    /// Afterwards `replacement` carries `original`'s input and output lists
    /// (followed by any wires it already had) and `original` has none.
    pub fn replace_nod(&mut self, original: NodId, replacement: NodId) -> Result<(), GraphError> {
        self.nod(replacement)?;
        let (inputs, outputs) = {
            let nod = self.nod(original)?;
            (nod.inputs.clone(), nod.outputs.clone())
        };
        for &wire in inputs.iter().chain(&outputs) {
            self.wire(wire)?;
        }
        if original == replacement {
            return Ok(());
        }

        for &wire in &inputs {
            self.wire_mut(wire)?.target = replacement;
        }
        for &wire in &outputs {
            self.wire_mut(wire)?.source = replacement;
        }

        let old = self.nod_mut(original)?;
        old.inputs.clear();
        old.outputs.clear();

        let new = self.nod_mut(replacement)?;
        let kept_inputs = std::mem::replace(&mut new.inputs, inputs);
        let kept_outputs = std::mem::replace(&mut new.outputs, outputs);
        new.inputs.extend(kept_inputs);
        new.outputs.extend(kept_outputs);

        tracing::trace!(%original, %replacement, "replaced nod");
        Ok(())
    }

    /// Move one or both ends of a wire. Omitted ends stay put.
    pub fn reconnect_wire(&mut self, id: WireId, to: Reconnect) -> Result<(), GraphError> {
        let wire = *self.wire(id)?;
        for nod in [wire.source, wire.target].into_iter().chain(to.source).chain(to.target) {
            self.nod(nod)?;
        }

        if let Some(source) = to.source {
            self.nod_mut(wire.source)?.outputs.retain(|&w| w != id);
            self.nod_mut(source)?.outputs.push(id);
            self.wire_mut(id)?.source = source;
        }
        if let Some(target) = to.target {
            self.nod_mut(wire.target)?.inputs.retain(|&w| w != id);
            self.nod_mut(target)?.inputs.push(id);
            self.wire_mut(id)?.target = target;
        }

        tracing::trace!(%id, source = ?to.source, target = ?to.target, "reconnected wire");
        Ok(())
    }

    /// Merge `patch` into a nod.
    pub fn modify_nod(&mut self, id: NodId, patch: NodPatch) -> Result<(), GraphError> {
        let nod = self.nod_mut(id)?;
        if let Some(kind) = patch.kind {
            nod.kind = kind;
        }
        if let Some(position) = patch.position {
            nod.position = position;
        }
        Ok(())
    }

    /// Merge `patch` into a wire.
    pub fn modify_wire(&mut self, id: WireId, patch: WirePatch) -> Result<(), GraphError> {
        let wire = self.wire_mut(id)?;
        if let Some(timing) = patch.timing {
            wire.timing = timing;
        }
        if let Some(colour) = patch.colour {
            wire.colour = colour;
        }
        Ok(())
    }

    /// Fire a nod on one colour.
    pub fn add_pulse(&mut self, id: NodId, colour: Colour, pulse: Pulse) -> Result<(), GraphError> {
        self.nod_mut(id)?.pulses.set(colour, Some(pulse));
        Ok(())
    }

    /// Fire a nod on every colour.
    pub fn add_full_pulse(&mut self, id: NodId, pulse: Pulse) -> Result<(), GraphError> {
        let nod = self.nod_mut(id)?;
        for colour in Colour::ALL {
            nod.pulses.set(colour, Some(pulse));
        }
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================
