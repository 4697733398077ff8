//! Output strategies that turn channel events into HID traffic.
//!
//! # Strategies
//!
//! | Strategy | Sink | Per detent | Per button press |
//! |----------|------|------------|------------------|
//! | [`KeyEventEmitter`] | [`KeySink`] | CW/CCW key tap | button key tap |
//! | [`ReportBuilder`] | [`ReportSink`] | ±1 movement | bitmask bit set |
//!
//! Both are [`OutputEncoder`]s and are interchangeable inside the
//! [`PollScheduler`](crate::PollScheduler). Send failures never propagate
//! out of a strategy: they are logged and the event is dropped.

mod builder;
mod keys;
mod report;

pub use builder::{MovementAccumulator, ReportBuilder};
pub use keys::KeyEventEmitter;
pub use report::{OutputReport, REPORT_LEN};

use embassy_time::Instant;

use crate::channel::ChannelEvents;
use crate::config::KeyCode;
use crate::log::EventLog;

/// Keyboard transport: one key press followed by its release.
#[allow(async_fn_in_trait)]
pub trait KeySink {
    type Error;

    /// Press and release `key`.
    async fn send_key(&mut self, key: KeyCode) -> Result<(), Self::Error>;
}

/// Raw report transport.
#[allow(async_fn_in_trait)]
pub trait ReportSink {
    type Error;

    /// Transmit one report (without report ID; framing is the sink's job).
    async fn send_report(&mut self, report: &OutputReport) -> Result<(), Self::Error>;
}

/// A pluggable output strategy fed by the poll scheduler.
#[allow(async_fn_in_trait)]
pub trait OutputEncoder {
    /// Consume the events one channel produced in the current poll.
    async fn handle<L: EventLog>(&mut self, channel: u8, events: ChannelEvents, log: &mut L);

    /// Called once per poll after every channel has been handled.
    async fn end_tick<L: EventLog>(&mut self, now: Instant, log: &mut L);
}
