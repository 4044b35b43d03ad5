use fixed::types::I32F32;
use serde::{Deserialize, Serialize};

/// Q32.32 fixed-point: 32 integer bits, 32 fractional bits.
pub type Fixed64 = I32F32;

/// Moments are the atomic unit of nogan time. Relative offsets are signed:
/// negative is the past, positive the future.
pub type Timing = i32;

/// Convert an f64 to Fixed64. Use only at the edges (editor input, display).
#[inline]
pub fn f64_to_fixed64(v: f64) -> Fixed64 {
    Fixed64::from_num(v)
}

/// Convert Fixed64 to f64. Use only for display.
#[inline]
pub fn fixed64_to_f64(v: Fixed64) -> f64 {
    v.to_num::<f64>()
}

/// A 2-D position carried by every nod. The engine stores and copies it but
/// never reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: Fixed64,
    pub y: Fixed64,
}

impl Position {
    pub const ORIGIN: Position = Position {
        x: Fixed64::ZERO,
        y: Fixed64::ZERO,
    };

    pub fn new(x: Fixed64, y: Fixed64) -> Self {
        Self { x, y }
    }

    pub fn from_f64(x: f64, y: f64) -> Self {
        Self::new(f64_to_fixed64(x), f64_to_fixed64(y))
    }

    pub fn to_f64(self) -> (f64, f64) {
        (fixed64_to_f64(self.x), fixed64_to_f64(self.y))
    }
}

impl From<[i32; 2]> for Position {
    fn from([x, y]: [i32; 2]) -> Self {
        Self::new(Fixed64::from_num(x), Fixed64::from_num(y))
    }
}
