//! Scheduler-level scenarios across all four channels.

use core::cell::Cell;
use core::convert::Infallible;

use embassy_futures::block_on;
use embassy_time::{Duration, Instant};
use embedded_hal::digital::{ErrorType, InputPin};

use rotary_usb::{
    ChannelPins, Config, EncoderChannel, KeyCode, KeyEventEmitter, KeySink, OutputReport,
    PollScheduler, ReportBuilder, ReportSink, CHANNEL_COUNT,
};

struct Pin<'a>(&'a Cell<bool>);

impl ErrorType for Pin<'_> {
    type Error = Infallible;
}

impl InputPin for Pin<'_> {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.0.get())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.0.get())
    }
}

/// One knob's pin levels, all idle high.
struct Knob {
    a: Cell<bool>,
    b: Cell<bool>,
    sw: Cell<bool>,
}

impl Knob {
    fn new() -> Self {
        Self {
            a: Cell::new(true),
            b: Cell::new(true),
            sw: Cell::new(true),
        }
    }

    /// Active-low: a set phase bit pulls its pin low.
    fn set_phase(&self, bits: u8) {
        self.a.set(bits & 0b10 == 0);
        self.b.set(bits & 0b01 == 0);
    }

    fn press(&self) {
        self.sw.set(false);
    }

    fn pins(&self) -> ChannelPins<Pin<'_>> {
        ChannelPins::new(Pin(&self.a), Pin(&self.b), Pin(&self.sw))
    }
}

const CW_CYCLE: [u8; 4] = [0b01, 0b11, 0b10, 0b00];

#[derive(Default)]
struct Reports(Vec<OutputReport>);

impl ReportSink for Reports {
    type Error = Infallible;

    async fn send_report(&mut self, report: &OutputReport) -> Result<(), Infallible> {
        self.0.push(*report);
        Ok(())
    }
}

#[derive(Default)]
struct Keys(Vec<KeyCode>);

impl KeySink for Keys {
    type Error = Infallible;

    async fn send_key(&mut self, key: KeyCode) -> Result<(), Infallible> {
        self.0.push(key);
        Ok(())
    }
}

fn channels<'a>(
    knobs: &'a [Knob; CHANNEL_COUNT],
    config: &Config,
) -> [EncoderChannel<Pin<'a>>; CHANNEL_COUNT] {
    core::array::from_fn(|i| EncoderChannel::new(i as u8, knobs[i].pins(), config.debounce_window))
}

fn ms(ms: u64) -> Instant {
    Instant::from_millis(ms)
}

#[test]
fn raw_report_carries_movement_and_held_button() {
    let knobs: [Knob; CHANNEL_COUNT] = core::array::from_fn(|_| Knob::new());
    let config = Config::default();
    let output = ReportBuilder::new(Reports::default(), config.report_interval);
    let mut scheduler = PollScheduler::new(channels(&knobs, &config), output, (), &config);

    scheduler.init(ms(0));
    block_on(scheduler.tick(ms(0)));
    block_on(scheduler.tick(ms(10))); // first (all-zero) report

    // Four clockwise detents on knob 0 within one report interval, knob 1
    // pressed and held past the debounce window.
    knobs[1].press();
    let mut t = Instant::from_micros(11_000);
    for _ in 0..4 {
        for phase in CW_CYCLE {
            knobs[0].set_phase(phase);
            block_on(scheduler.tick(t));
            t += Duration::from_micros(100);
        }
    }
    block_on(scheduler.tick(ms(20)));

    let sent = &scheduler.output().sink().0;
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0], OutputReport::default());
    assert_eq!(sent[1].to_bytes(), [4, 0, 0, 0, 0b0000_0010, 0, 0]);
}

#[test]
fn raw_report_is_quiet_when_idle() {
    let knobs: [Knob; CHANNEL_COUNT] = core::array::from_fn(|_| Knob::new());
    let config = Config::default();
    let output = ReportBuilder::new(Reports::default(), config.report_interval);
    let mut scheduler = PollScheduler::new(channels(&knobs, &config), output, (), &config);

    scheduler.init(ms(0));
    for t in 0..200 {
        block_on(scheduler.tick(ms(t)));
    }
    assert_eq!(scheduler.output().sink().0, [OutputReport::default()]);
}

#[test]
fn keyboard_mode_taps_keys_per_event() {
    let knobs: [Knob; CHANNEL_COUNT] = core::array::from_fn(|_| Knob::new());
    let config = Config::default();
    let output = KeyEventEmitter::new(Keys::default(), config.keymaps);
    let mut scheduler = PollScheduler::new(channels(&knobs, &config), output, (), &config);

    scheduler.init(ms(0));

    let mut t = 1;
    for phase in CW_CYCLE {
        knobs[3].set_phase(phase);
        block_on(scheduler.tick(ms(t)));
        t += 1;
    }
    for phase in CW_CYCLE.iter().rev().skip(1).chain([0b00].iter()) {
        knobs[2].set_phase(*phase);
        block_on(scheduler.tick(ms(t)));
        t += 1;
    }

    // Bouncing press on knob 0: only the settled press counts.
    knobs[0].press();
    block_on(scheduler.tick(ms(30)));
    knobs[0].sw.set(true);
    block_on(scheduler.tick(ms(31)));
    knobs[0].press();
    block_on(scheduler.tick(ms(32)));
    block_on(scheduler.tick(ms(60)));

    assert_eq!(scheduler.output().sink().0, [KeyCode::F7, KeyCode::F6, KeyCode::F9]);
}
