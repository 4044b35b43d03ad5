//! Projection: structural copies with transient signal state cleared.
//!
//! A projection keeps every id, wire, type and position. Only pulses are
//! dropped, and only as deep as each variant says.

use crate::phantom::{Nod, Phantom};

impl Phantom {
    /// Clone with every direct child's pulses cleared. Nested phantoms are
    /// copied as they are.
    pub fn project(&self) -> Phantom {
        let mut projection = self.clone();
        for nod in projection.nods.values_mut() {
            nod.pulses.clear();
        }
        projection
    }

    /// Clone with every direct child's pulses cleared, descending into the
    /// nested phantom of each child that was firing. A child at rest keeps
    /// its nested phantom untouched.
    pub fn deep_project(&self) -> Phantom {
        Phantom {
            nods: self
                .nods
                .iter()
                .map(|(&id, nod)| (id, nod.deep_project()))
                .collect(),
            wires: self.wires.clone(),
            ids: self.ids.clone(),
        }
    }
}

impl Nod {
    /// Clone with this nod's own pulses cleared.
    pub fn project(&self) -> Nod {
        let mut projection = self.clone();
        projection.pulses.clear();
        projection
    }

    /// Clone with this nod's pulses cleared; if it was firing, its nested
    /// phantom is deep-projected as well.
    pub fn deep_project(&self) -> Nod {
        let mut projection = self.project();
        if self.pulses.is_firing() {
            projection.children = self.children.deep_project();
        }
        projection
    }
}
