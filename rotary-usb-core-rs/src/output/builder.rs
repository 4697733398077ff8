//! Raw-report mode: accumulate detents and button state per channel and
//! flush one [`OutputReport`] every report interval.

use embassy_time::{Duration, Instant};

use super::{OutputEncoder, OutputReport, ReportSink};
use crate::channel::ChannelEvents;
use crate::debounce::Edge;
use crate::log::{EventLog, LogEvent};
use crate::quadrature::Direction;
use crate::CHANNEL_COUNT;

/// Signed detent count for one channel between two reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementAccumulator(i32);

impl MovementAccumulator {
    /// Add one detent in `direction`.
    pub fn apply(&mut self, direction: Direction) {
        self.0 = self.0.saturating_add(i32::from(direction.sign()));
    }

    /// Raw (unclamped) count.
    pub fn get(&self) -> i32 {
        self.0
    }

    /// Read the count clamped to -127..=127 and reset it to zero.
    pub fn take(&mut self) -> i8 {
        let value = self.0.clamp(-127, 127) as i8;
        self.0 = 0;
        value
    }
}

/// Raw-report output: movement and button state packed into an
/// [`OutputReport`] once per report interval.
///
/// # Control flow
///
/// - Every poll: detents move the channel's [`MovementAccumulator`], button
///   edges flip the live bitmask.
/// - Every `report_interval`: drain the accumulators into a report and send
///   it if it carries movement or differs from the last report that was
///   actually delivered. The very first report is always sent.
/// - A failed send is logged. The drained movement is gone and the
///   last-sent snapshot is left as it was.
pub struct ReportBuilder<R> {
    sink: R,
    report_interval: Duration,
    movement: [MovementAccumulator; CHANNEL_COUNT],
    buttons: u8,
    round_start: Option<Instant>,
    last_sent: Option<OutputReport>,
}

impl<R> ReportBuilder<R>
where
    R: ReportSink,
{
    pub fn new(sink: R, report_interval: Duration) -> Self {
        Self {
            sink,
            report_interval,
            movement: [MovementAccumulator::default(); CHANNEL_COUNT],
            buttons: 0,
            round_start: None,
            last_sent: None,
        }
    }

    /// Borrow the underlying sink.
    pub fn sink(&self) -> &R {
        &self.sink
    }

    /// Live button bitmask.
    pub fn buttons(&self) -> u8 {
        self.buttons
    }

    /// Last successfully delivered report.
    pub fn last_sent(&self) -> Option<&OutputReport> {
        self.last_sent.as_ref()
    }

    /// Drain the accumulators into a report.
    fn build(&mut self) -> OutputReport {
        OutputReport {
            movement: core::array::from_fn(|i| self.movement[i].take()),
            buttons: self.buttons,
        }
    }

    fn should_send(&self, report: &OutputReport) -> bool {
        report.has_movement() || self.last_sent.as_ref() != Some(report)
    }

    async fn flush<L: EventLog>(&mut self, log: &mut L) {
        let report = self.build();
        if !self.should_send(&report) {
            return;
        }

        match self.sink.send_report(&report).await {
            Ok(()) => {
                self.last_sent = Some(report);
                log.record(LogEvent::ReportSent(report));
            }
            Err(_) => log.record(LogEvent::ReportSendFailed(report)),
        }
    }
}

impl<R> OutputEncoder for ReportBuilder<R>
where
    R: ReportSink,
{
    async fn handle<L: EventLog>(&mut self, channel: u8, events: ChannelEvents, _log: &mut L) {
        let index = usize::from(channel);
        if index >= CHANNEL_COUNT {
            return;
        }

        if let Some(direction) = events.detent {
            self.movement[index].apply(direction);
        }
        match events.button {
            Some(Edge::Press) => self.buttons |= 1 << index,
            Some(Edge::Release) => self.buttons &= !(1 << index),
            None => {}
        }
    }

    async fn end_tick<L: EventLog>(&mut self, now: Instant, log: &mut L) {
        let Some(start) = self.round_start else {
            self.round_start = Some(now);
            return;
        };

        let due = now
            .checked_duration_since(start)
            .is_some_and(|elapsed| elapsed >= self.report_interval);
        if !due {
            return;
        }

        self.round_start = Some(now);
        self.flush(log).await;
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────
