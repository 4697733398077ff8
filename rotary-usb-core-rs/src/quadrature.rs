//! Quadrature decoding of the encoder's A/B phase signals.
//!
//! The two encoder contacts produce a Gray-coded 2-bit sequence. Turning
//! clockwise walks `00 → 01 → 11 → 10 → 00`; counter-clockwise walks the
//! same cycle backwards. [`QuadratureDecoder`] looks every observed phase
//! change up in [`TRANSITION_TABLE`] and counts valid steps until a full
//! detent ([`STEPS_PER_DETENT`] steps) has been travelled.

/// Number of valid phase transitions per mechanical detent.
pub const STEPS_PER_DETENT: i8 = 4;

/// Step direction for every `(previous, current)` phase pair.
///
/// Indexed by `(previous << 2) | current`. `+1` is a clockwise step, `-1`
/// counter-clockwise, and `0` marks either "no change" or a non-adjacent
/// jump (both bits flipped at once), which cannot be attributed to a
/// direction.
pub const TRANSITION_TABLE: [i8; 16] = [
    0,  // 00 -> 00
    1,  // 00 -> 01
    -1, // 00 -> 10
    0,  // 00 -> 11  invalid
    -1, // 01 -> 00
    0,  // 01 -> 01
    0,  // 01 -> 10  invalid
    1,  // 01 -> 11
    1,  // 10 -> 00
    0,  // 10 -> 01  invalid
    0,  // 10 -> 10
    -1, // 10 -> 11
    0,  // 11 -> 00  invalid
    -1, // 11 -> 01
    1,  // 11 -> 10
    0,  // 11 -> 11
];

/// Rotation direction of one completed detent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Clockwise.
    Cw,
    /// Counter-clockwise.
    Ccw,
}

impl Direction {
    /// `+1` for clockwise, `-1` for counter-clockwise.
    pub fn sign(self) -> i8 {
        match self {
            Direction::Cw => 1,
            Direction::Ccw => -1,
        }
    }
}

/// 2-bit encoder phase: `(a_active << 1) | b_active`.
///
/// The encoder contacts pull the pins low when closed, so a pin reading
/// *low* is an active (`1`) phase bit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseState(u8);

impl PhaseState {
    /// Build a phase from raw 2-bit value. Bits above bit 1 are discarded.
    pub const fn new(bits: u8) -> Self {
        Self(bits & 0b11)
    }

    /// Build a phase from the raw (active-low) pin levels.
    pub fn from_levels(a_high: bool, b_high: bool) -> Self {
        let a = u8::from(!a_high);
        let b = u8::from(!b_high);
        Self((a << 1) | b)
    }

    /// Raw 2-bit value (0–3).
    pub fn bits(self) -> u8 {
        self.0
    }
}

/// Look up the step direction for a phase change.
///
/// Returns `0` for pairs that are not a single adjacent step.
pub fn step(previous: PhaseState, current: PhaseState) -> i8 {
    TRANSITION_TABLE[usize::from((previous.0 << 2) | current.0)]
}

/// Per-channel quadrature decoder.
///
/// Owns the last observed phase and the signed detent accumulator.
#[derive(Debug, Clone)]
pub struct QuadratureDecoder {
    previous: PhaseState,
    steps: i8,
}

impl QuadratureDecoder {
    /// Create a decoder whose previous phase is `initial`.
    pub fn new(initial: PhaseState) -> Self {
        Self {
            previous: initial,
            steps: 0,
        }
    }

    /// Re-seat the stored phase without touching the accumulator.
    pub fn reset_phase(&mut self, phase: PhaseState) {
        self.previous = phase;
    }

    /// Current partial-detent accumulator value.
    pub fn steps(&self) -> i8 {
        self.steps
    }

    /// Feed one phase sample; returns a direction when a detent completes.
    ///
    /// Invalid transitions are dropped without touching the accumulator, but
    /// the stored phase still advances to `current` so one glitched sample
    /// cannot poison the next lookup as well. On a completed detent the
    /// accumulator is reset to zero rather than reduced by
    /// [`STEPS_PER_DETENT`].
    pub fn observe(&mut self, current: PhaseState) -> Option<Direction> {
        if current == self.previous {
            return None;
        }

        let delta = step(self.previous, current);
        self.previous = current;

        if delta == 0 {
            return None;
        }

        self.steps += delta;
        if self.steps >= STEPS_PER_DETENT {
            self.steps = 0;
            Some(Direction::Cw)
        } else if self.steps <= -STEPS_PER_DETENT {
            self.steps = 0;
            Some(Direction::Ccw)
        } else {
            None
        }
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────
