//! One physical knob: encoder phases plus push button.
//!
//! [`EncoderChannel`] owns its three input pins, a [`QuadratureDecoder`] and
//! a [`ButtonDebouncer`]. Polling it has no side effects beyond its own
//! state; what happens with the resulting events is up to the output
//! strategy.

use embassy_time::{Duration, Instant};
use embedded_hal::digital::InputPin;

use crate::debounce::{ButtonDebouncer, Edge};
use crate::error::ChannelError;
use crate::quadrature::{Direction, PhaseState, QuadratureDecoder};

/// The three active-low inputs of one encoder.
pub struct ChannelPins<P> {
    /// Encoder phase A (CLK).
    pub a: P,
    /// Encoder phase B (DT).
    pub b: P,
    /// Push button (SW).
    pub sw: P,
}

impl<P> ChannelPins<P> {
    pub fn new(a: P, b: P, sw: P) -> Self {
        Self { a, b, sw }
    }
}

/// Events produced by one poll of one channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelEvents {
    /// Completed detent, if any.
    pub detent: Option<Direction>,
    /// Debounced button edge, if any.
    pub button: Option<Edge>,
}

impl ChannelEvents {
    /// Returns `true` if neither a detent nor an edge was produced.
    pub fn is_empty(&self) -> bool {
        self.detent.is_none() && self.button.is_none()
    }
}

/// A rotary encoder with integrated push button.
///
/// # Lifecycle
///
/// 1. [`EncoderChannel::new()`] — no pin traffic.
/// 2. [`EncoderChannel::init()`] — samples the resting phase and button
///    level so the first poll does not see a phantom transition.
/// 3. [`EncoderChannel::poll()`] — once per scheduler tick.
pub struct EncoderChannel<P> {
    id: u8,
    pins: ChannelPins<P>,
    decoder: QuadratureDecoder,
    button: ButtonDebouncer,
}

impl<P> EncoderChannel<P>
where
    P: InputPin,
{
    /// Construct a channel. Call [`init()`](Self::init) before polling.
    ///
    /// # Arguments
    /// * `id` — channel index (0-based), also the button's bit in the report
    /// * `pins` — the channel's A, B and SW inputs
    /// * `debounce_window` — minimum time between accepted button transitions
    pub fn new(id: u8, pins: ChannelPins<P>, debounce_window: Duration) -> Self {
        Self {
            id,
            pins,
            decoder: QuadratureDecoder::new(PhaseState::default()),
            button: ButtonDebouncer::new(true, Instant::from_ticks(0), debounce_window),
        }
    }

    /// Channel index.
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Sample the resting state of all three pins.
    ///
    /// # Errors
    /// * [`ChannelError::Pin`] if any pin read fails; the channel keeps its
    ///   previous state.
    pub fn init(&mut self, now: Instant) -> Result<(), ChannelError<P::Error>> {
        let phase = self.read_phase()?;
        let level = self.pins.sw.is_high()?;

        self.decoder.reset_phase(phase);
        self.button.reset(level, now);
        Ok(())
    }

    /// Poll all three pins and run them through the decoder and debouncer.
    ///
    /// All pins are read before any state is touched, so a failed read
    /// leaves the channel exactly as it was.
    pub fn poll(&mut self, now: Instant) -> Result<ChannelEvents, ChannelError<P::Error>> {
        let phase = self.read_phase()?;
        let level = self.pins.sw.is_high()?;

        Ok(ChannelEvents {
            detent: self.decoder.observe(phase),
            button: self.button.observe(level, now),
        })
    }

    fn read_phase(&mut self) -> Result<PhaseState, ChannelError<P::Error>> {
        let a = self.pins.a.is_high()?;
        let b = self.pins.b.is_high()?;
        Ok(PhaseState::from_levels(a, b))
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────
