//! Startup configuration: key mappings and loop timing.
//!
//! All tunables live in [`Config`]; there are no module-level mapping
//! tables. [`Config::default()`] reproduces the stock device (F1–F8 on the
//! knobs, F9–F12 on the buttons, 20 ms debounce, 1 ms poll, 10 ms reports).

use embassy_time::Duration;

use crate::debounce::DEBOUNCE_WINDOW;
use crate::error::ConfigError;
use crate::quadrature::Direction;
use crate::CHANNEL_COUNT;

/// USB HID keyboard usage code (HID Usage Tables, page 0x07).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyCode(pub u8);

impl KeyCode {
    pub const F1: KeyCode = KeyCode(0x3A);
    pub const F2: KeyCode = KeyCode(0x3B);
    pub const F3: KeyCode = KeyCode(0x3C);
    pub const F4: KeyCode = KeyCode(0x3D);
    pub const F5: KeyCode = KeyCode(0x3E);
    pub const F6: KeyCode = KeyCode(0x3F);
    pub const F7: KeyCode = KeyCode(0x40);
    pub const F8: KeyCode = KeyCode(0x41);
    pub const F9: KeyCode = KeyCode(0x42);
    pub const F10: KeyCode = KeyCode(0x43);
    pub const F11: KeyCode = KeyCode(0x44);
    pub const F12: KeyCode = KeyCode(0x45);
}

/// Keys sent by one channel in keyboard mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyMap {
    /// Sent once per clockwise detent.
    pub cw: KeyCode,
    /// Sent once per counter-clockwise detent.
    pub ccw: KeyCode,
    /// Sent once per button press.
    pub button: KeyCode,
}

impl KeyMap {
    /// Key for a detent in `direction`.
    pub fn for_direction(&self, direction: Direction) -> KeyCode {
        match direction {
            Direction::Cw => self.cw,
            Direction::Ccw => self.ccw,
        }
    }
}

/// Stock key layout: channel `i` turns F(2i+1)/F(2i+2) and presses F(9+i).
pub const DEFAULT_KEYMAPS: [KeyMap; CHANNEL_COUNT] = [
    KeyMap { cw: KeyCode::F1, ccw: KeyCode::F2, button: KeyCode::F9 },
    KeyMap { cw: KeyCode::F3, ccw: KeyCode::F4, button: KeyCode::F10 },
    KeyMap { cw: KeyCode::F5, ccw: KeyCode::F6, button: KeyCode::F11 },
    KeyMap { cw: KeyCode::F7, ccw: KeyCode::F8, button: KeyCode::F12 },
];

/// Which output strategy the firmware runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputMode {
    /// Discrete key press-and-release per detent / button press.
    Keyboard,
    /// Vendor-defined 7-byte movement report.
    RawReport,
}

/// Controller configuration, passed to the scheduler at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Output strategy. Default: [`OutputMode::Keyboard`].
    pub mode: OutputMode,
    /// Per-channel keys (keyboard mode only).
    pub keymaps: [KeyMap; CHANNEL_COUNT],
    /// Minimum interval between accepted button transitions. Default: 20 ms.
    pub debounce_window: Duration,
    /// Sleep between poll iterations. Default: 1 ms.
    pub poll_interval: Duration,
    /// Raw report cadence. Default: 10 ms.
    pub report_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: OutputMode::Keyboard,
            keymaps: DEFAULT_KEYMAPS,
            debounce_window: DEBOUNCE_WINDOW,
            poll_interval: Duration::from_millis(1),
            report_interval: Duration::from_millis(10),
        }
    }
}

impl Config {
    /// Check timing values before the scheduler is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval == Duration::from_ticks(0) {
            return Err(ConfigError::ZeroPollInterval);
        }
        if self.debounce_window == Duration::from_ticks(0) {
            return Err(ConfigError::ZeroDebounceWindow);
        }
        if self.report_interval < self.poll_interval {
            return Err(ConfigError::ReportIntervalTooShort);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let c = Config::default();
        assert_eq!(c.mode, OutputMode::Keyboard);
        assert_eq!(c.debounce_window.as_millis(), 20);
        assert_eq!(c.poll_interval.as_millis(), 1);
        assert_eq!(c.report_interval.as_millis(), 10);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn default_keymaps_cover_f1_to_f12() {
        let c = Config::default();
        let mut codes: [u8; 12] = [0; 12];
        for (i, map) in c.keymaps.iter().enumerate() {
            codes[i * 2] = map.cw.0;
            codes[i * 2 + 1] = map.ccw.0;
            codes[8 + i] = map.button.0;
        }
        for (i, code) in codes.iter().enumerate() {
            assert_eq!(*code, KeyCode::F1.0 + i as u8);
        }
    }

    #[test]
    fn keymap_for_direction() {
        let map = DEFAULT_KEYMAPS[1];
        assert_eq!(map.for_direction(Direction::Cw), KeyCode::F3);
        assert_eq!(map.for_direction(Direction::Ccw), KeyCode::F4);
    }

    #[test]
    fn zero_poll_interval_rejected() {
        let c = Config {
            poll_interval: Duration::from_ticks(0),
            ..Config::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::ZeroPollInterval));
    }

    #[test]
    fn zero_debounce_rejected() {
        let c = Config {
            debounce_window: Duration::from_ticks(0),
            ..Config::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::ZeroDebounceWindow));
    }

    #[test]
    fn report_interval_shorter_than_poll_rejected() {
        let c = Config {
            poll_interval: Duration::from_millis(5),
            report_interval: Duration::from_millis(2),
            ..Config::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::ReportIntervalTooShort));
    }
}
