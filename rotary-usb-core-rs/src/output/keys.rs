//! Keyboard mode: map each detent and button press to an immediate key tap.

use embassy_time::Instant;

use super::{KeySink, OutputEncoder};
use crate::channel::ChannelEvents;
use crate::config::{KeyCode, KeyMap};
use crate::debounce::Edge;
use crate::log::{EventLog, LogEvent};
use crate::CHANNEL_COUNT;

/// Keyboard-mode output: every detent and every button press becomes one
/// key tap, sent immediately.
///
/// There is no queue and no retry. A tap the sink rejects is logged and
/// lost; the next detent or press simply tries again with its own key.
pub struct KeyEventEmitter<K> {
    sink: K,
    keymaps: [KeyMap; CHANNEL_COUNT],
}

impl<K> KeyEventEmitter<K>
where
    K: KeySink,
{
    pub fn new(sink: K, keymaps: [KeyMap; CHANNEL_COUNT]) -> Self {
        Self { sink, keymaps }
    }

    /// Borrow the underlying sink.
    pub fn sink(&self) -> &K {
        &self.sink
    }

    async fn tap<L: EventLog>(&mut self, channel: u8, key: KeyCode, log: &mut L) {
        match self.sink.send_key(key).await {
            Ok(()) => log.record(LogEvent::KeySent { channel, key }),
            Err(_) => log.record(LogEvent::KeySendFailed { channel, key }),
        }
    }
}

impl<K> OutputEncoder for KeyEventEmitter<K>
where
    K: KeySink,
{
    async fn handle<L: EventLog>(&mut self, channel: u8, events: ChannelEvents, log: &mut L) {
        let Some(map) = self.keymaps.get(usize::from(channel)).copied() else {
            return;
        };

        if let Some(direction) = events.detent {
            self.tap(channel, map.for_direction(direction), log).await;
        }
        // Releases produce no key traffic.
        if events.button == Some(Edge::Press) {
            self.tap(channel, map.button, log).await;
        }
    }

    async fn end_tick<L: EventLog>(&mut self, _now: Instant, _log: &mut L) {}
}
