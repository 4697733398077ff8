//! Mock pins, sinks and logs shared by the unit tests.

extern crate std;

use core::cell::Cell;
use core::convert::Infallible;
use std::vec::Vec;

use embedded_hal::digital::{ErrorKind, ErrorType, InputPin};

use crate::channel::ChannelPins;
use crate::config::KeyCode;
use crate::log::{EventLog, LogEvent};
use crate::output::{KeySink, OutputReport, ReportSink};

/// Input pin that reads a shared level.
pub struct MockPin<'a> {
    level: &'a Cell<bool>,
}

impl ErrorType for MockPin<'_> {
    type Error = Infallible;
}

impl InputPin for MockPin<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.level.get())
    }
}

/// Raw levels for one channel's three pins (`true` = high = idle).
pub struct PinLevels {
    pub a: Cell<bool>,
    pub b: Cell<bool>,
    pub sw: Cell<bool>,
}

impl PinLevels {
    /// All contacts open.
    pub fn released() -> Self {
        Self {
            a: Cell::new(true),
            b: Cell::new(true),
            sw: Cell::new(true),
        }
    }

    /// Drive A/B so the decoder reads `bits` as its phase.
    pub fn set_phase(&self, bits: u8) {
        self.a.set(bits & 0b10 == 0);
        self.b.set(bits & 0b01 == 0);
    }

    pub fn pins(&self) -> ChannelPins<MockPin<'_>> {
        ChannelPins::new(
            MockPin { level: &self.a },
            MockPin { level: &self.b },
            MockPin { level: &self.sw },
        )
    }
}

/// Input pin whose reads fail while `fail` is set.
pub struct FaultyPin<'a> {
    level: bool,
    fail: &'a Cell<bool>,
}

impl<'a> FaultyPin<'a> {
    pub fn new(level: bool, fail: &'a Cell<bool>) -> Self {
        Self { level, fail }
    }
}

impl ErrorType for FaultyPin<'_> {
    type Error = ErrorKind;
}

impl InputPin for FaultyPin<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        if self.fail.get() {
            Err(ErrorKind::Other)
        } else {
            Ok(self.level)
        }
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

/// Keeps every recorded event.
#[derive(Default)]
pub struct RecordingLog {
    pub events: Vec<LogEvent>,
}

impl EventLog for RecordingLog {
    fn record(&mut self, event: LogEvent) {
        self.events.push(event);
    }
}

/// Key sink that remembers sent keys and can be told to fail.
#[derive(Default)]
pub struct RecordingKeySink {
    pub sent: Vec<KeyCode>,
    pub fail: bool,
}

impl KeySink for RecordingKeySink {
    type Error = ();

    async fn send_key(&mut self, key: KeyCode) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        self.sent.push(key);
        Ok(())
    }
}

/// Report sink that remembers sent reports and can be told to fail.
#[derive(Default)]
pub struct RecordingReportSink {
    pub sent: Vec<OutputReport>,
    pub fail: bool,
}

impl ReportSink for RecordingReportSink {
    type Error = ();

    async fn send_report(&mut self, report: &OutputReport) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        self.sent.push(*report);
        Ok(())
    }
}
