//! Injected event logging.
//!
//! The pipeline reports what it did through an [`EventLog`]. Nothing in the
//! decode or output path reads the log back, so `()` (which drops every
//! event) is always a valid choice. With the `defmt` feature, [`DefmtLog`]
//! forwards events to the `defmt` logger.

use crate::config::KeyCode;
use crate::debounce::Edge;
use crate::output::OutputReport;
use crate::quadrature::Direction;

/// Something worth telling the operator about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LogEvent {
    /// Channel sampled its resting state and is ready to poll.
    ChannelReady { channel: u8 },
    /// A detent completed.
    Detent { channel: u8, direction: Direction },
    /// A debounced button edge.
    Button { channel: u8, edge: Edge },
    /// A pin read failed; the channel was skipped for this poll.
    PinReadFailed { channel: u8 },
    /// Key press-and-release delivered.
    KeySent { channel: u8, key: KeyCode },
    /// Key press-and-release could not be delivered and is lost.
    KeySendFailed { channel: u8, key: KeyCode },
    /// Movement report delivered.
    ReportSent(OutputReport),
    /// Movement report could not be delivered and is lost.
    ReportSendFailed(OutputReport),
}

/// Sink for [`LogEvent`]s.
pub trait EventLog {
    /// Record one event.
    fn record(&mut self, event: LogEvent);
}

/// Discards every event.
impl EventLog for () {
    fn record(&mut self, _event: LogEvent) {}
}

/// Writes events to the `defmt` logger.
#[cfg(feature = "defmt")]
#[derive(Debug, Default, Clone, Copy)]
pub struct DefmtLog;

#[cfg(feature = "defmt")]
impl EventLog for DefmtLog {
    fn record(&mut self, event: LogEvent) {
        match event {
            LogEvent::ChannelReady { channel } => {
                defmt::info!("Encoder {} initialised", channel)
            }
            LogEvent::Detent { channel, direction } => {
                defmt::debug!("Encoder {}: {} detent", channel, direction)
            }
            LogEvent::Button { channel, edge } => {
                defmt::debug!("Encoder {}: button {}", channel, edge)
            }
            LogEvent::PinReadFailed { channel } => {
                defmt::warn!("Encoder {}: pin read failed", channel)
            }
            LogEvent::KeySent { channel, key } => {
                defmt::debug!("Encoder {}: key {:#x}", channel, key.0)
            }
            LogEvent::KeySendFailed { channel, key } => {
                defmt::error!("Encoder {}: failed to send key {:#x}", channel, key.0)
            }
            LogEvent::ReportSent(report) => defmt::info!(
                "Report: Enc[{},{},{},{}] Btn={:#x}",
                report.movement[0],
                report.movement[1],
                report.movement[2],
                report.movement[3],
                report.buttons
            ),
            LogEvent::ReportSendFailed(_) => defmt::error!("Error sending report"),
        }
    }
}
