//! Signal channels and the pulse records nods carry on them.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Colour
// ---------------------------------------------------------------------------

/// One of three independent propagation channels. A wire only carries pulses
/// of its own colour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colour {
    #[default]
    Blue,
    Red,
    Green,
}

impl Colour {
    pub const ALL: [Colour; 3] = [Colour::Blue, Colour::Red, Colour::Green];
}

// ---------------------------------------------------------------------------
// Nod types
// ---------------------------------------------------------------------------

/// The closed set of nod types. Pulses are labelled with the same set: a
/// pulse that left a creation nod travels as a `Creation` pulse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodType {
    #[default]
    Any,
    Creation,
    Recording,
    Destruction,
    Slot,
}

/// Payload carried by creation pulses: the type of nod to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PulseData {
    pub kind: NodType,
}

impl PulseData {
    pub fn new(kind: NodType) -> Self {
        Self { kind }
    }
}

// ---------------------------------------------------------------------------
// Pulse
// ---------------------------------------------------------------------------

/// An active signal on one colour at one nod.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pulse {
    pub kind: NodType,
    #[serde(default)]
    pub data: Option<PulseData>,
}

impl Pulse {
    pub fn new(kind: NodType) -> Self {
        Self { kind, data: None }
    }

    pub fn with_data(mut self, data: PulseData) -> Self {
        self.data = Some(data);
        self
    }
}

/// Per-colour pulse state of a nod. `None` means the colour is at rest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pulses {
    pub blue: Option<Pulse>,
    pub red: Option<Pulse>,
    pub green: Option<Pulse>,
}

impl Pulses {
    pub fn get(&self, colour: Colour) -> Option<&Pulse> {
        match colour {
            Colour::Blue => self.blue.as_ref(),
            Colour::Red => self.red.as_ref(),
            Colour::Green => self.green.as_ref(),
        }
    }

    pub fn set(&mut self, colour: Colour, pulse: Option<Pulse>) {
        let slot = match colour {
            Colour::Blue => &mut self.blue,
            Colour::Red => &mut self.red,
            Colour::Green => &mut self.green,
        };
        *slot = pulse;
    }

    /// Reset every colour to rest.
    pub fn clear(&mut self) {
        *self = Pulses::default();
    }

    /// True if any colour holds a pulse.
    pub fn is_firing(&self) -> bool {
        Colour::ALL.iter().any(|&c| self.get(c).is_some())
    }
}
