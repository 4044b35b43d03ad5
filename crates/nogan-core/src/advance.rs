//! Advancing time: building the next moment from the current one.

use crate::config::NoganConfig;
use crate::fixed::Timing;
use crate::graph::GraphError;
use crate::operation::Operation;
use crate::peak::PeakQuery;
use crate::phantom::Phantom;
use crate::pulse::Colour;
use crate::validation;
use std::collections::HashSet;

impl Phantom {
    /// The next moment: every nod fires on every colour it would be active
    /// on one step from now. `history` lists earlier moments, most recent
    /// first. The current phantom is not modified.
    pub fn advance(&self, history: &[Phantom]) -> Result<Phantom, GraphError> {
        self.advance_with(history, &NoganConfig::default())
    }

    /// [`Phantom::advance`] with explicit configuration.
    pub fn advance_with(
        &self,
        history: &[Phantom],
        config: &NoganConfig,
    ) -> Result<Phantom, GraphError> {
        self.advance_with_operations(history, config)
            .map(|(next, _)| next)
    }

    /// Advance, also returning the operations behaviours requested for this
    /// phantom's own nods while the next moment was resolved. Operations
    /// raised inside nested phantoms are not returned.
    pub fn advance_with_operations(
        &self,
        history: &[Phantom],
        config: &NoganConfig,
    ) -> Result<(Phantom, Vec<Operation>), GraphError> {
        let mut operations = Vec::new();
        let next = self.advance_into(history, config.horizon_padding, &mut operations)?;

        let mut seen = HashSet::new();
        operations.retain(|op| seen.insert(*op));

        if config.validate {
            validation::ensure_valid(&next)?;
        }
        tracing::debug!(
            nods = next.nod_count(),
            firing = next.nods().filter(|(_, n)| n.pulses().is_firing()).count(),
            operations = operations.len(),
            history = history.len(),
            "advanced phantom"
        );
        Ok((next, operations))
    }

    fn advance_into(
        &self,
        history: &[Phantom],
        padding: Timing,
        operations: &mut Vec<Operation>,
    ) -> Result<Phantom, GraphError> {
        let mut next = self.project();

        for (&id, nod) in &self.nods {
            let next_nod = next.nod_mut(id)?;
            for colour in Colour::ALL {
                let query = PeakQuery::new(id)
                    .colour(colour)
                    .timing(1)
                    .history(history)
                    .padding(padding);
                let peak = self.get_peak(query)?;
                operations.extend_from_slice(&peak.operations);
                next_nod.pulses.set(colour, peak.to_pulse());
            }

            if !nod.children.is_empty() {
                // The same nod's nested phantom in each earlier moment, for as
                // long as the nod existed.
                let nested_history: Vec<Phantom> = history
                    .iter()
                    .map_while(|snapshot| snapshot.get_nod(id))
                    .map(|past| past.children.clone())
                    .collect();
                next_nod.children = nod
                    .children
                    .advance_into(&nested_history, padding, &mut Vec::new())?;
            }
        }

        Ok(next)
    }
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// Earlier moments, most recent first, capped at a fixed length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    snapshots: Vec<Phantom>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn from_config(config: &NoganConfig) -> Self {
        Self::new(config.max_history)
    }

    /// Push a snapshot as the most recent moment, dropping the oldest past
    /// capacity.
    pub fn record(&mut self, snapshot: Phantom) {
        if self.capacity == 0 {
            return;
        }
        self.snapshots.insert(0, snapshot);
        self.snapshots.truncate(self.capacity);
    }

    /// Snapshot `steps` moments back (1 = the previous moment).
    pub fn get(&self, steps: usize) -> Option<&Phantom> {
        steps.checked_sub(1).and_then(|i| self.snapshots.get(i))
    }

    pub fn as_slice(&self) -> &[Phantom] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    /// Advance `current` against this history, then record `current` as the
    /// previous moment. Returns the next moment and its operations.
    pub fn step(
        &mut self,
        current: &Phantom,
        config: &NoganConfig,
    ) -> Result<(Phantom, Vec<Operation>), GraphError> {
        let advanced = current.advance_with_operations(self.as_slice(), config)?;
        self.record(current.clone());
        Ok(advanced)
    }
}
