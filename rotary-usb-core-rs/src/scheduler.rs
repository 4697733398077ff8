//! Fixed-order, fixed-interval poll loop.

use embassy_time::{Duration, Instant, Timer};
use embedded_hal::digital::InputPin;

use crate::channel::EncoderChannel;
use crate::config::Config;
use crate::log::{EventLog, LogEvent};
use crate::output::OutputEncoder;
use crate::CHANNEL_COUNT;

/// Drives every channel and the output strategy from one control flow.
///
/// Each [`tick`](Self::tick) polls channels `0..CHANNEL_COUNT` in order,
/// hands their events to the output strategy, then lets the strategy finish
/// the tick (the raw-report strategy builds its report there, so a report
/// always reflects all four channels). [`run`](Self::run) repeats that
/// forever with a fixed sleep in between.
pub struct PollScheduler<P, O, L> {
    channels: [EncoderChannel<P>; CHANNEL_COUNT],
    output: O,
    log: L,
    poll_interval: Duration,
}

impl<P, O, L> PollScheduler<P, O, L>
where
    P: InputPin,
    O: OutputEncoder,
    L: EventLog,
{
    /// Build a scheduler. Call [`init()`](Self::init) before the first tick.
    pub fn new(
        channels: [EncoderChannel<P>; CHANNEL_COUNT],
        output: O,
        log: L,
        config: &Config,
    ) -> Self {
        Self {
            channels,
            output,
            log,
            poll_interval: config.poll_interval,
        }
    }

    /// Borrow the output strategy.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Borrow the event log.
    pub fn log(&self) -> &L {
        &self.log
    }

    /// Sample the resting state of every channel.
    ///
    /// A channel that cannot be read keeps its construction-time state and
    /// is polled anyway; its failure is logged.
    pub fn init(&mut self, now: Instant) {
        for channel in self.channels.iter_mut() {
            let id = channel.id();
            match channel.init(now) {
                Ok(()) => self.log.record(LogEvent::ChannelReady { channel: id }),
                Err(_) => self.log.record(LogEvent::PinReadFailed { channel: id }),
            }
        }
    }

    /// Run one poll iteration at time `now`.
    ///
    /// A channel whose pins cannot be read is logged and skipped; the
    /// other channels are still polled.
    pub async fn tick(&mut self, now: Instant) {
        for channel in self.channels.iter_mut() {
            let id = channel.id();
            let events = match channel.poll(now) {
                Ok(events) => events,
                Err(_) => {
                    self.log.record(LogEvent::PinReadFailed { channel: id });
                    continue;
                }
            };

            if events.is_empty() {
                continue;
            }
            if let Some(direction) = events.detent {
                self.log.record(LogEvent::Detent { channel: id, direction });
            }
            if let Some(edge) = events.button {
                self.log.record(LogEvent::Button { channel: id, edge });
            }
            self.output.handle(id, events, &mut self.log).await;
        }

        self.output.end_tick(now, &mut self.log).await;
    }

    /// Poll forever. There is no exit path.
    pub async fn run(&mut self) -> ! {
        loop {
            self.tick(Instant::now()).await;
            Timer::after(self.poll_interval).await;
        }
    }
}
