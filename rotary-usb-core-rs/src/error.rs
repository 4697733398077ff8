//! Error types for the encoder pipeline.

use core::fmt;

/// Errors raised while polling an encoder channel.
#[derive(Debug)]
pub enum ChannelError<E> {
    /// Underlying GPIO read failed.
    Pin(E),
}

// Allow ergonomic `?` propagation from raw pin errors.
impl<E> From<E> for ChannelError<E> {
    fn from(error: E) -> Self {
        ChannelError::Pin(error)
    }
}

impl<E: fmt::Debug> fmt::Display for ChannelError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChannelError::Pin(e) => write!(f, "Pin read error: {:?}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: fmt::Debug> defmt::Format for ChannelError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ChannelError::Pin(e) => defmt::write!(f, "Pin read error: {}", defmt::Debug2Format(e)),
        }
    }
}

/// Startup errors. All of them are fatal: the poll loop is never entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Poll interval must be non-zero.
    ZeroPollInterval,
    /// Report interval must be at least one poll interval.
    ReportIntervalTooShort,
    /// Debounce window must be non-zero.
    ZeroDebounceWindow,
    /// The raw-report HID interface was not registered with the host.
    DeviceNotFound,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::ZeroPollInterval => write!(f, "Poll interval must be non-zero"),
            ConfigError::ReportIntervalTooShort => {
                write!(f, "Report interval is shorter than the poll interval")
            }
            ConfigError::ZeroDebounceWindow => write!(f, "Debounce window must be non-zero"),
            ConfigError::DeviceNotFound => write!(f, "Raw HID report device not found"),
        }
    }
}
