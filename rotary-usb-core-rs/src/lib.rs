//! Signal-processing core for a four-knob rotary encoder USB controller.
//!
//! Each physical knob is an [`EncoderChannel`]: a quadrature-encoded rotary
//! encoder (pins A and B) plus an integrated push button (pin SW), all
//! active-low. Every poll the channel turns raw pin levels into at most one
//! detent event and at most one debounced button edge. Those events are fed
//! into an [`OutputEncoder`] strategy that turns them into USB HID output:
//!
//! - [`KeyEventEmitter`] — one key press-and-release per detent or button
//!   press (keyboard mode).
//! - [`ReportBuilder`] — signed per-channel movement plus a button bitmask,
//!   packed into a 7-byte [`OutputReport`] every report interval (raw mode).
//!
//! The [`PollScheduler`] drives all four channels and the output strategy
//! from a single cooperative loop.
//!
//! ```text
//! pins ──► EncoderChannel ──► {Direction, Edge} ──► OutputEncoder ──► KeySink / ReportSink
//!          ├─ QuadratureDecoder
//!          └─ ButtonDebouncer
//! ```
//!
//! # Hardware abstraction
//!
//! Inputs are any [`embedded_hal::digital::InputPin`]; outputs are the
//! [`KeySink`] and [`ReportSink`] capabilities. The crate does no USB or GPIO
//! setup itself, so everything here can be exercised on the host against mock
//! pins and recording sinks.
//!
//! # Crate Features
//!
//! - **`defmt`** — [`defmt::Format`] on public types and the [`DefmtLog`]
//!   event sink.

#![no_std]

pub mod channel;
pub mod config;
pub mod debounce;
pub mod error;
pub mod log;
pub mod output;
pub mod quadrature;
pub mod scheduler;

#[cfg(test)]
mod testing;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use channel::{ChannelEvents, ChannelPins, EncoderChannel};
pub use config::{Config, KeyCode, KeyMap, OutputMode};
pub use debounce::{ButtonDebouncer, Edge};
pub use error::{ChannelError, ConfigError};
#[cfg(feature = "defmt")]
pub use log::DefmtLog;
pub use log::{EventLog, LogEvent};
pub use output::{
    KeyEventEmitter, KeySink, MovementAccumulator, OutputEncoder, OutputReport, ReportBuilder,
    ReportSink,
};
pub use quadrature::{Direction, PhaseState, QuadratureDecoder};
pub use scheduler::PollScheduler;

/// Number of encoder channels on the controller.
pub const CHANNEL_COUNT: usize = 4;
