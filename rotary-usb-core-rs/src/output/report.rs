//! The raw movement report and its wire payload layout.

use crate::CHANNEL_COUNT;

/// Payload length of the raw report (report ID excluded).
pub const REPORT_LEN: usize = 7;

/// Raw movement report.
///
/// ```text
/// byte 0..=3  movement, one i8 per channel (two's complement, +CW)
/// byte 4      button bitmask, bit i = channel i held
/// byte 5..=6  reserved, always 0
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputReport {
    /// Detents since the previous report, clamped to -127..=127.
    pub movement: [i8; CHANNEL_COUNT],
    /// Bit `i` set while channel `i`'s button is held.
    pub buttons: u8,
}

impl OutputReport {
    /// Returns `true` if any channel moved.
    pub fn has_movement(&self) -> bool {
        self.movement.iter().any(|&m| m != 0)
    }

    /// Serialise to the 7-byte wire payload.
    pub fn to_bytes(&self) -> [u8; REPORT_LEN] {
        let mut bytes = [0u8; REPORT_LEN];
        for (byte, &movement) in bytes.iter_mut().zip(self.movement.iter()) {
            *byte = movement as u8;
        }
        bytes[CHANNEL_COUNT] = self.buttons;
        // Bytes 5 and 6 stay reserved (zero).
        bytes
    }
}
