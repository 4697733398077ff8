//! Time-window debouncing for the encoder push buttons.

use embassy_time::{Duration, Instant};

/// Default minimum interval between two accepted button transitions.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(20);

/// Debounced button transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Button went down.
    Press,
    /// Button came back up.
    Release,
}

/// Per-channel button debouncer for an active-low switch.
///
/// A raw level that differs from the accepted level is taken only once the
/// debounce window has elapsed since the previous accepted transition.
/// Samples arriving inside the window are dropped without touching the
/// timer, so contact bounce never stretches the window.
#[derive(Debug, Clone)]
pub struct ButtonDebouncer {
    /// Last accepted raw level (`false` = pressed).
    accepted_level: bool,
    last_transition: Instant,
    pressed: bool,
    window: Duration,
}

impl ButtonDebouncer {
    /// Create a debouncer that has just accepted `initial_level` at `now`.
    ///
    /// The `pressed` flag starts cleared even if the button is held at
    /// startup; the first edge reported is then the press that follows a
    /// release.
    pub fn new(initial_level: bool, now: Instant, window: Duration) -> Self {
        Self {
            accepted_level: initial_level,
            last_transition: now,
            pressed: false,
            window,
        }
    }

    /// Re-seat the accepted level and timer, clearing the `pressed` flag.
    pub fn reset(&mut self, level: bool, now: Instant) {
        self.accepted_level = level;
        self.last_transition = now;
        self.pressed = false;
    }

    /// Returns `true` while the button is (debounced) held down.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Feed one raw pin level sampled at `now`.
    pub fn observe(&mut self, raw_level: bool, now: Instant) -> Option<Edge> {
        if raw_level == self.accepted_level {
            return None;
        }

        let window_open = now
            .checked_duration_since(self.last_transition)
            .is_some_and(|elapsed| elapsed >= self.window);
        if !window_open {
            return None;
        }

        self.accepted_level = raw_level;
        self.last_transition = now;

        if !raw_level && !self.pressed {
            self.pressed = true;
            Some(Edge::Press)
        } else if raw_level && self.pressed {
            self.pressed = false;
            Some(Edge::Release)
        } else {
            None
        }
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────
