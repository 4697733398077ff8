//! rotary-usb-firmware
//!
//! Four-knob rotary encoder USB HID controller for the Raspberry Pi Pico 2.
//! Wires the two library crates into one cooperative loop:
//!
//! 1. Every millisecond the poll scheduler reads all twelve encoder pins.
//! 2. Each channel decodes detents and debounces its push button.
//! 3. The output strategy turns the events into HID traffic:
//!    - default build: one F-key tap per detent or button press,
//!    - `raw-report` build: a vendor-defined movement report every 10 ms.
//!
//! The USB device runs concurrently in the same task via `join`.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::join::join;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::{self, Driver};
use embassy_time::Instant;
use embassy_usb::class::hid::{HidWriter, State};
use embassy_usb::Builder;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use rotary_usb::{ChannelPins, Config, DefmtLog, EncoderChannel, OutputMode, PollScheduler};
use rotary_usb_hid::{
    find_report_interface, hid_config, HidInterface, UsbIdentity, WIRE_REPORT_LEN,
};

#[cfg(not(feature = "raw-report"))]
use rotary_usb::KeyEventEmitter;
#[cfg(feature = "raw-report")]
use rotary_usb::ReportBuilder;
#[cfg(not(feature = "raw-report"))]
use rotary_usb_hid::KeyboardSink;
#[cfg(feature = "raw-report")]
use rotary_usb_hid::RawReportSink;

// ---------------------------------------------------------------------------
// Boot block and interrupt binding
// ---------------------------------------------------------------------------

/// Tell the RP2350 Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = embassy_rp::block::ImageDef::secure_exe();

// Wire the USB controller interrupt to Embassy's async handler.
bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => usb::InterruptHandler<USB>;
});

// ---------------------------------------------------------------------------
// Build-time output mode
// ---------------------------------------------------------------------------

#[cfg(not(feature = "raw-report"))]
const MODE: OutputMode = OutputMode::Keyboard;
#[cfg(feature = "raw-report")]
const MODE: OutputMode = OutputMode::RawReport;

// ---------------------------------------------------------------------------
// Static storage
// ---------------------------------------------------------------------------

/// USB descriptor and control buffers, borrowed by the device for its
/// whole lifetime.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// HID class state for the single IN-only interface.
static HID_STATE: StaticCell<State<'static>> = StaticCell::new();

// ---------------------------------------------------------------------------
// Type aliases
// ---------------------------------------------------------------------------

type UsbDriver = Driver<'static, USB>;

/// IN endpoint writer; both modes use 8-byte wire reports.
type Writer = HidWriter<'static, UsbDriver, WIRE_REPORT_LEN>;

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("========================================");
    info!("RotaryUsb firmware starting ({})", MODE);
    info!("========================================");

    let config = Config {
        mode: MODE,
        ..Config::default()
    };
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return;
    }

    // Raw-report mode is useless without the vendor interface, so check the
    // descriptor that is about to be registered before bringing up USB.
    let hid = hid_config(config.mode);
    if config.mode == OutputMode::RawReport {
        match find_report_interface(&[hid.report_descriptor]) {
            Ok(_) => info!(
                "Raw HID interface: usage page {:#x}, usage {:#x}",
                HidInterface::RAW_REPORT.usage_page,
                HidInterface::RAW_REPORT.usage
            ),
            Err(e) => {
                error!("{}", e);
                return;
            }
        }
    }

    // —— USB device ——————————————————————————————————————————————————————————

    let identity = UsbIdentity::for_mode(config.mode);
    let driver = Driver::new(p.USB, Irqs);

    let mut builder = Builder::new(
        driver,
        identity.usb_config(),
        CONFIG_DESCRIPTOR.init([0; 256]),
        BOS_DESCRIPTOR.init([0; 256]),
        MSOS_DESCRIPTOR.init([0; 256]),
        CONTROL_BUF.init([0; 64]),
    );
    let writer: Writer = HidWriter::new(
        &mut builder,
        HID_STATE.init(State::new()),
        hid,
    );
    let mut usb = builder.build();
    info!(
        "USB HID initialised: {:#x}:{:#x} \"{}\"",
        identity.vendor_id, identity.product_id, identity.product
    );

    // —— Pin assignments ————————————————————————————————————————————————————
    // Encoder 0 → A GP2   B GP3   SW GP4
    // Encoder 1 → A GP5   B GP6   SW GP7
    // Encoder 2 → A GP8   B GP9   SW GP10
    // Encoder 3 → A GP11  B GP12  SW GP13
    // All inputs active-low, pull-up enabled.
    // ———————————————————————————————————————————————————————————————————————

    let debounce = config.debounce_window;
    let channels = [
        EncoderChannel::new(
            0,
            ChannelPins::new(
                Input::new(p.PIN_2, Pull::Up),
                Input::new(p.PIN_3, Pull::Up),
                Input::new(p.PIN_4, Pull::Up),
            ),
            debounce,
        ),
        EncoderChannel::new(
            1,
            ChannelPins::new(
                Input::new(p.PIN_5, Pull::Up),
                Input::new(p.PIN_6, Pull::Up),
                Input::new(p.PIN_7, Pull::Up),
            ),
            debounce,
        ),
        EncoderChannel::new(
            2,
            ChannelPins::new(
                Input::new(p.PIN_8, Pull::Up),
                Input::new(p.PIN_9, Pull::Up),
                Input::new(p.PIN_10, Pull::Up),
            ),
            debounce,
        ),
        EncoderChannel::new(
            3,
            ChannelPins::new(
                Input::new(p.PIN_11, Pull::Up),
                Input::new(p.PIN_12, Pull::Up),
                Input::new(p.PIN_13, Pull::Up),
            ),
            debounce,
        ),
    ];

    // —— Output strategy ————————————————————————————————————————————————————

    #[cfg(not(feature = "raw-report"))]
    let output = KeyEventEmitter::new(KeyboardSink::new(writer), config.keymaps);
    #[cfg(feature = "raw-report")]
    let output = ReportBuilder::new(RawReportSink::new(writer), config.report_interval);

    let mut scheduler = PollScheduler::new(channels, output, DefmtLog, &config);
    scheduler.init(Instant::now());

    info!("All encoders initialised. Starting main loop...");

    // Neither future ever completes.
    join(usb.run(), scheduler.run()).await;
}
