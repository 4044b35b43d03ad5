//! Behaviour dispatch: what happens to a pulse as it crosses a wire.
//!
//! A behaviour receives the peak of the source nod and the id of the target
//! nod, and returns the peak the target should see. Behaviours may rewrite
//! the peak or veto it, and may request graph changes as [`Operation`]s, but
//! never touch the graph themselves.

use crate::graph::GraphError;
use crate::id::NodId;
use crate::operation::Operation;
use crate::peak::Peak;
use crate::phantom::Phantom;
use crate::pulse::{NodType, PulseData};

/// Signature shared by every behaviour.
pub type Behave = fn(&Phantom, Peak, NodId) -> Result<Peak, GraphError>;

/// Pulse types with a dedicated behaviour. Everything else uses [`any`].
const BEHAVES: &[(NodType, Behave)] = &[(NodType::Creation, creation)];

/// Nod types a creation pulse copies instead of creating into.
const CLONEABLE: &[NodType] = &[NodType::Recording, NodType::Destruction];

/// Look up the behaviour for a pulse type.
pub fn behaviour(kind: NodType) -> Behave {
    BEHAVES
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|&(_, behave)| behave)
        .unwrap_or(any)
}

/// Dispatch `peak` (taken at the source nod) onto the target nod `id`.
pub fn behave(phantom: &Phantom, peak: Peak, id: NodId) -> Result<Peak, GraphError> {
    behaviour(peak.kind)(phantom, peak, id)
}

/// Default behaviour: pass the peak through, unless it is leaving a creation
/// nod, in which case it becomes a creation pulse.
pub fn any(phantom: &Phantom, mut peak: Peak, id: NodId) -> Result<Peak, GraphError> {
    if peak.template.kind == NodType::Creation {
        peak.kind = NodType::Creation;
        return creation(phantom, peak, id);
    }
    Ok(peak)
}

/// A creation pulse copies recording and destruction nods, fills slots, and
/// passes through anything else.
pub fn creation(phantom: &Phantom, mut peak: Peak, id: NodId) -> Result<Peak, GraphError> {
    let target = phantom.nod(id)?.kind();

    if CLONEABLE.contains(&target) {
        peak.data = Some(PulseData::new(target));
        return Ok(peak);
    }
    if target != NodType::Slot {
        return Ok(peak);
    }

    let data = peak.data.unwrap_or(PulseData::new(NodType::Recording));
    peak.result = false;
    peak.operations.push(Operation::Modify { id, data });
    Ok(peak)
}
