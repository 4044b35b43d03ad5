//! The causal resolver: answers peak queries over a phantom whose wires may
//! reach into the past and the future, and may loop.
//!
//! # Model
//!
//! A query asks about nod `n` at moment `k` (relative to the phantom being
//! queried; 0 is now). `peak(n, k)` is active when
//!
//! - `k < 0` and `history[|k| - 1]` exists: that snapshot holds a pulse for
//!   `n`. Recorded history is ground truth and ends the search.
//! - `k == 0` and `n` itself holds a pulse.
//! - Otherwise, some incoming wire `w` of the queried colour has an active
//!   `peak(w.source, k - w.timing)` that survives behaviour dispatch onto `n`.
//!   Moments with no recorded history are imagined: they hold no pulses of
//!   their own and are resolved through wires alone.
//!
//! # Termination
//!
//! Resolution is a depth-first search over `(id, colour, timing)` keys with an
//! explicit stack. A key that is already being resolved further up the stack
//! counts as inactive (the cycle guard). A key that finished earlier in the
//! same query reuses its result, unless the guard cut its subtree short on a
//! key that was still open above it: that result only held for that stack, so
//! the key is resolved again when reached from elsewhere. Timings are confined
//! to a window around now and the recorded history, wide enough for any chain
//! that can reach a pulse, so the set of keys is finite and every query
//! returns.

use crate::behave;
use crate::fixed::Timing;
use crate::graph::GraphError;
use crate::id::{NodId, WireId};
use crate::operation::Operation;
use crate::peak::{FullPeak, Peak, PeakQuery};
use crate::phantom::{Phantom, Template};
use crate::pulse::Colour;
use std::collections::{HashMap, HashSet};
use std::ops::RangeInclusive;

/// One sub-query of a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PeakKey {
    id: NodId,
    colour: Colour,
    timing: Timing,
}

/// A sub-query whose incoming wires are being walked.
#[derive(Debug)]
struct Frame<'a> {
    key: PeakKey,
    /// Position on the stack.
    depth: usize,
    /// Shallowest stack position the cycle guard cut off within this
    /// subtree. `usize::MAX` when the guard never fired.
    guarded_at: usize,
    template: Template,
    inputs: &'a [WireId],
    next_input: usize,
    operations: Vec<Operation>,
}

enum Entry<'a> {
    /// Answered without looking at wires.
    Ready(Peak),
    /// Already open at stack position `depth`; inactive for now.
    Guarded { peak: Peak, depth: usize },
    /// Needs its wires walked.
    Open(Frame<'a>),
}

enum Step<'a> {
    Continue,
    Descend(Frame<'a>),
    Finish(Peak),
}

/// State for one top-level query. Dropped when the query returns, so nothing
/// is shared between independent queries.
struct Resolver<'a> {
    phantom: &'a Phantom,
    history: &'a [Phantom],
    window: RangeInclusive<Timing>,
    /// Open keys and their stack positions.
    in_progress: HashMap<PeakKey, usize>,
    resolved: HashMap<PeakKey, Peak>,
}

impl<'a> Resolver<'a> {
    fn new(phantom: &'a Phantom, query: &PeakQuery<'a>) -> Self {
        Self {
            phantom,
            history: query.history,
            window: search_window(phantom, query),
            in_progress: HashMap::new(),
            resolved: HashMap::new(),
        }
    }

    fn run(&mut self, root: PeakKey) -> Result<Peak, GraphError> {
        let mut stack = match self.enter(root, 0)? {
            Entry::Ready(peak) | Entry::Guarded { peak, .. } => return Ok(peak),
            Entry::Open(frame) => vec![frame],
        };
        let template = stack[0].template;

        // Peak of the sub-query that just finished, handed to its parent.
        let mut returned: Option<Peak> = None;
        while let Some(frame) = stack.last_mut() {
            match self.step(frame, returned.take())? {
                Step::Continue => {}
                Step::Descend(child) => stack.push(child),
                Step::Finish(peak) => {
                    if let Some(done) = stack.pop() {
                        self.in_progress.remove(&done.key);
                        if done.guarded_at >= done.depth {
                            self.resolved.insert(done.key, peak.clone());
                        }
                        if let Some(parent) = stack.last_mut() {
                            parent.guarded_at = parent.guarded_at.min(done.guarded_at);
                        }
                    }
                    returned = Some(peak);
                }
            }
        }
        Ok(returned.unwrap_or_else(|| Peak::inactive(template)))
    }

    /// Answer `key` directly if possible, otherwise open a frame for it.
    fn enter(&mut self, key: PeakKey, depth: usize) -> Result<Entry<'a>, GraphError> {
        let phantom: &'a Phantom = self.phantom;
        let nod = phantom.nod(key.id)?;
        let template = nod.template();

        if !self.window.contains(&key.timing) {
            tracing::trace!(id = %key.id, timing = key.timing, "beyond search window");
            return Ok(Entry::Ready(Peak::inactive(template)));
        }
        if let Some(peak) = self.resolved.get(&key) {
            return Ok(Entry::Ready(peak.clone()));
        }
        if key.timing < 0 {
            let steps_back = key.timing.unsigned_abs() as usize;
            if let Some(snapshot) = self.history.get(steps_back - 1) {
                let pulse = snapshot
                    .get_nod(key.id)
                    .and_then(|past| past.pulses.get(key.colour));
                return Ok(Entry::Ready(match pulse {
                    Some(pulse) => Peak::from_pulse(template, pulse),
                    None => Peak::inactive(template),
                }));
            }
        }
        if key.timing == 0
            && let Some(pulse) = nod.pulses.get(key.colour)
        {
            return Ok(Entry::Ready(Peak::from_pulse(template, pulse)));
        }
        if let Some(&open) = self.in_progress.get(&key) {
            tracing::trace!(id = %key.id, timing = key.timing, "cycle guard");
            return Ok(Entry::Guarded {
                peak: Peak::inactive(template),
                depth: open,
            });
        }
        self.in_progress.insert(key, depth);

        Ok(Entry::Open(Frame {
            key,
            depth,
            guarded_at: usize::MAX,
            template,
            inputs: &nod.inputs,
            next_input: 0,
            operations: Vec::new(),
        }))
    }

    fn step(
        &mut self,
        frame: &mut Frame<'a>,
        returned: Option<Peak>,
    ) -> Result<Step<'a>, GraphError> {
        if let Some(source) = returned {
            return self.receive(frame, source);
        }

        while let Some(&wire_id) = frame.inputs.get(frame.next_input) {
            frame.next_input += 1;
            let wire = self.phantom.wire(wire_id)?;
            if wire.colour != frame.key.colour {
                continue;
            }
            let source = PeakKey {
                id: wire.source,
                colour: frame.key.colour,
                timing: frame.key.timing.saturating_sub(wire.timing),
            };
            return match self.enter(source, frame.depth + 1)? {
                Entry::Ready(peak) => self.receive(frame, peak),
                Entry::Guarded { peak, depth } => {
                    frame.guarded_at = frame.guarded_at.min(depth);
                    self.receive(frame, peak)
                }
                Entry::Open(child) => Ok(Step::Descend(child)),
            };
        }

        let mut peak = Peak::inactive(frame.template);
        peak.operations = std::mem::take(&mut frame.operations);
        Ok(Step::Finish(peak))
    }

    /// Feed a source's peak through behaviour dispatch into `frame`.
    fn receive(&mut self, frame: &mut Frame<'a>, source: Peak) -> Result<Step<'a>, GraphError> {
        if !source.result {
            frame.operations.extend(source.operations);
            return Ok(Step::Continue);
        }

        let mut behaved = behave::behave(self.phantom, source, frame.key.id)?;
        frame.operations.append(&mut behaved.operations);
        if !behaved.result {
            return Ok(Step::Continue);
        }

        Ok(Step::Finish(Peak {
            result: true,
            kind: behaved.kind,
            template: frame.template,
            data: behaved.data,
            operations: std::mem::take(&mut frame.operations),
        }))
    }
}

/// Range of moments a query may visit.
///
/// Any chain from the queried moment to a pulse can be shortened until it
/// strays no further than `(nods + 1) * max|timing|` beyond the span covering
/// now, the recorded history and the queried moment.
fn search_window(phantom: &Phantom, query: &PeakQuery<'_>) -> RangeInclusive<Timing> {
    let nods = Timing::try_from(phantom.nod_count()).unwrap_or(Timing::MAX);
    let depth = Timing::try_from(query.history.len()).unwrap_or(Timing::MAX);
    let reach = nods
        .saturating_add(1)
        .saturating_mul(phantom.max_timing().max(1))
        .saturating_add(query.padding.max(0));

    let low = query.timing.min(depth.saturating_neg()).saturating_sub(reach);
    let high = query.timing.max(0).saturating_add(reach);
    low..=high
}

fn dedup_operations(operations: &mut Vec<Operation>) {
    let mut seen = HashSet::new();
    operations.retain(|op| seen.insert(*op));
}

impl Phantom {
    /// Resolve whether `query.colour` is active at `query.id` at
    /// `query.timing`. Does not modify the phantom.
    pub fn get_peak(&self, query: PeakQuery<'_>) -> Result<Peak, GraphError> {
        let mut resolver = Resolver::new(self, &query);
        let mut peak = resolver.run(PeakKey {
            id: query.id,
            colour: query.colour,
            timing: query.timing,
        })?;
        dedup_operations(&mut peak.operations);

        tracing::debug!(
            id = %query.id,
            colour = ?query.colour,
            timing = query.timing,
            result = peak.result,
            explored = resolver.resolved.len(),
            "resolved peak"
        );
        Ok(peak)
    }

    /// [`Phantom::get_peak`] for every colour, now.
    pub fn get_full_peak(&self, id: NodId, history: &[Phantom]) -> Result<FullPeak, GraphError> {
        let query = PeakQuery::new(id).history(history);
        Ok(FullPeak {
            blue: self.get_peak(query.colour(Colour::Blue))?,
            red: self.get_peak(query.colour(Colour::Red))?,
            green: self.get_peak(query.colour(Colour::Green))?,
        })
    }
}
