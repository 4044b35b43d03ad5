use crate::fixed::Timing;
use crate::id::NodId;
use crate::operation::Operation;
use crate::phantom::{Phantom, Template};
use crate::pulse::{Colour, NodType, Pulse, PulseData};

// ---------------------------------------------------------------------------
// Peak
// ---------------------------------------------------------------------------

/// The answer to "is this colour active at this nod at this moment?".
/// Never stored on the graph; always computed fresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Peak {
    pub result: bool,
    /// Pulse type the signal arrives as.
    pub kind: NodType,
    /// Identity of the nod the peak was taken at.
    pub template: Template,
    pub data: Option<PulseData>,
    /// Deferred mutations requested while resolving this peak.
    pub operations: Vec<Operation>,
}

impl Peak {
    /// A peak with nothing firing.
    pub fn inactive(template: Template) -> Self {
        Self {
            result: false,
            kind: NodType::Any,
            template,
            data: None,
            operations: Vec::new(),
        }
    }

    /// A firing peak carrying the pulse's type and payload.
    pub fn from_pulse(template: Template, pulse: &Pulse) -> Self {
        Self {
            result: true,
            kind: pulse.kind,
            template,
            data: pulse.data,
            operations: Vec::new(),
        }
    }

    /// The pulse a nod should hold for this peak, if any.
    pub fn to_pulse(&self) -> Option<Pulse> {
        self.result.then_some(Pulse {
            kind: self.kind,
            data: self.data,
        })
    }
}

/// Peaks for every colour of one nod.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullPeak {
    pub blue: Peak,
    pub red: Peak,
    pub green: Peak,
}

impl FullPeak {
    pub fn get(&self, colour: Colour) -> &Peak {
        match colour {
            Colour::Blue => &self.blue,
            Colour::Red => &self.red,
            Colour::Green => &self.green,
        }
    }

    /// True if any colour is active.
    pub fn is_firing(&self) -> bool {
        Colour::ALL.iter().any(|&c| self.get(c).result)
    }

    /// All operations requested across the three colours.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        Colour::ALL
            .into_iter()
            .flat_map(move |c| self.get(c).operations.iter())
    }
}

// ---------------------------------------------------------------------------
// PeakQuery
// ---------------------------------------------------------------------------

/// Parameters for [`Phantom::get_peak`].
///
/// ```
/// use nogan_core::peak::PeakQuery;
/// use nogan_core::phantom::{NodSpec, Phantom};
/// use nogan_core::pulse::{Colour, Pulse};
///
/// let mut phantom = Phantom::new();
/// let nod = phantom.create_nod(NodSpec::default());
/// phantom.add_pulse(nod, Colour::Red, Pulse::default()).unwrap();
///
/// let peak = phantom.get_peak(PeakQuery::new(nod).colour(Colour::Red)).unwrap();
/// assert!(peak.result);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PeakQuery<'h> {
    pub id: NodId,
    pub colour: Colour,
    /// Moment to look at, relative to the phantom being queried.
    pub timing: Timing,
    /// Earlier moments, most recent first.
    pub history: &'h [Phantom],
    /// Extra moments of search window beyond the computed horizon.
    pub padding: Timing,
}

impl<'h> PeakQuery<'h> {
    pub fn new(id: NodId) -> Self {
        Self {
            id,
            colour: Colour::Blue,
            timing: 0,
            history: &[],
            padding: 0,
        }
    }

    pub fn colour(mut self, colour: Colour) -> Self {
        self.colour = colour;
        self
    }

    pub fn timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn history(mut self, history: &'h [Phantom]) -> Self {
        self.history = history;
        self
    }

    pub fn padding(mut self, padding: Timing) -> Self {
        self.padding = padding;
        self
    }
}
