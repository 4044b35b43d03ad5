//! Deferred graph mutations.
//!
//! Resolution never edits the graph. When a behaviour wants a change (a
//! creation pulse filling a slot, say) it returns an [`Operation`] alongside
//! its peak, and the caller applies the batch afterwards with
//! [`apply_operations`].

use crate::config::NoganConfig;
use crate::graph::{GraphError, NodPatch};
use crate::id::NodId;
use crate::phantom::Phantom;
use crate::pulse::PulseData;
use crate::validation;
use serde::{Deserialize, Serialize};

/// A single mutation requested during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Turn the nod `id` into a nod of type `data.kind`.
    Modify { id: NodId, data: PulseData },
}

impl Operation {
    /// The nod this operation edits.
    pub fn target(&self) -> NodId {
        match self {
            Operation::Modify { id, .. } => *id,
        }
    }
}

/// Apply operations in order. Every target is checked first, so a batch
/// naming a missing nod fails without changing the phantom.
pub fn apply_operations(
    phantom: &mut Phantom,
    operations: &[Operation],
) -> Result<(), GraphError> {
    for operation in operations {
        phantom.nod(operation.target())?;
    }
    for operation in operations {
        match *operation {
            Operation::Modify { id, data } => {
                phantom.modify_nod(
                    id,
                    NodPatch {
                        kind: Some(data.kind),
                        ..Default::default()
                    },
                )?;
            }
        }
        tracing::debug!(?operation, "applied operation");
    }
    Ok(())
}

/// [`apply_operations`], then run the validator if `config.validate` is set.
pub fn apply_operations_with(
    phantom: &mut Phantom,
    operations: &[Operation],
    config: &NoganConfig,
) -> Result<(), GraphError> {
    apply_operations(phantom, operations)?;
    if config.validate {
        validation::ensure_valid(phantom)?;
    }
    Ok(())
}
