#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer, RingBuffer};

/// Transport and cursor commands sent from a control thread to the audio thread.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ControlMessage {
    Play,
    Pause,
    TogglePlayback,
    /// Add this many bpm (negative slows down); the result is clamped
    AdjustTempo(f32),
    ToggleKeyChange,
    /// Move the tag cursor back N events
    Rewind(usize),
    /// Move the tag cursor forward N events
    Forward(usize),
    RewindToStart,
}

pub trait ControlReceiver {
    fn pop(&mut self) -> Option<ControlMessage>;
}

#[cfg(feature = "rtrb")]
impl ControlReceiver for Consumer<ControlMessage> {
    fn pop(&mut self) -> Option<ControlMessage> {
        Consumer::pop(self).ok()
    }
}

/// Plain queues (tests, offline rendering) drain front to back.
impl ControlReceiver for std::collections::VecDeque<ControlMessage> {
    fn pop(&mut self) -> Option<ControlMessage> {
        self.pop_front()
    }
}

/// Default depth of the control queue.
pub const CONTROL_QUEUE_SIZE: usize = 64;

/// Sending half of the control queue, held by the UI thread.
///
/// Every method is fire-and-forget: when the audio thread has fallen behind
/// and the queue is full, the command is dropped.
#[cfg(feature = "rtrb")]
pub struct Controller {
    tx: Producer<ControlMessage>,
}

#[cfg(feature = "rtrb")]
impl Controller {
    /// Returns false if the queue was full and the message was dropped.
    pub fn send(&mut self, message: ControlMessage) -> bool {
        let sent = self.tx.push(message).is_ok();
        if sent {
            log::debug!("control: {:?}", message);
        } else {
            log::warn!("control queue full, dropped {:?}", message);
        }
        sent
    }

    pub fn play(&mut self) {
        self.send(ControlMessage::Play);
    }

    pub fn pause(&mut self) {
        self.send(ControlMessage::Pause);
    }

    pub fn toggle_playback(&mut self) {
        self.send(ControlMessage::TogglePlayback);
    }

    pub fn adjust_tempo(&mut self, delta: f32) {
        self.send(ControlMessage::AdjustTempo(delta));
    }

    pub fn toggle_key_change(&mut self) {
        self.send(ControlMessage::ToggleKeyChange);
    }

    pub fn rewind(&mut self, events: usize) {
        self.send(ControlMessage::Rewind(events));
    }

    pub fn forward(&mut self, events: usize) {
        self.send(ControlMessage::Forward(events));
    }

    pub fn rewind_to_start(&mut self) {
        self.send(ControlMessage::RewindToStart);
    }
}

/// Create a bounded control queue.
#[cfg(feature = "rtrb")]
pub fn control_channel(capacity: usize) -> (Controller, Consumer<ControlMessage>) {
    let (tx, rx) = RingBuffer::<ControlMessage>::new(capacity.max(1));
    (Controller { tx }, rx)
}

#[cfg(all(test, feature = "rtrb"))]
mod tests {
    use super::*;

    #[test]
    fn messages_arrive_in_order() {
        let (mut controller, mut rx) = control_channel(8);
        controller.pause();
        controller.adjust_tempo(-1.0);
        controller.rewind(8);

        assert_eq!(ControlReceiver::pop(&mut rx), Some(ControlMessage::Pause));
        assert_eq!(
            ControlReceiver::pop(&mut rx),
            Some(ControlMessage::AdjustTempo(-1.0))
        );
        assert_eq!(ControlReceiver::pop(&mut rx), Some(ControlMessage::Rewind(8)));
        assert_eq!(ControlReceiver::pop(&mut rx), None);
    }

    #[test]
    fn full_queue_drops_messages() {
        let (mut controller, mut rx) = control_channel(2);
        assert!(controller.send(ControlMessage::Play));
        assert!(controller.send(ControlMessage::Pause));
        assert!(!controller.send(ControlMessage::ToggleKeyChange));

        assert_eq!(ControlReceiver::pop(&mut rx), Some(ControlMessage::Play));
        assert_eq!(ControlReceiver::pop(&mut rx), Some(ControlMessage::Pause));
        assert_eq!(ControlReceiver::pop(&mut rx), None);
    }
}
