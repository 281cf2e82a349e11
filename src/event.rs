use std::sync::mpsc;

use crate::engine::validate::Section;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Digit(u8),
    Backspace,
    Submit,
    Focus(Section),
}

impl InputEvent {
    /// Map a keyboard character to an input event. Anything that is not a
    /// digit, enter or backspace is ignored.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '0'..='9' => ch.to_digit(10).map(|d| InputEvent::Digit(d as u8)),
            '\n' | '\r' => Some(InputEvent::Submit),
            '\x08' | '\x7f' => Some(InputEvent::Backspace),
            _ => None,
        }
    }
}

/// Sending half of an input channel. Cheap to clone; every keypad or
/// keyboard source gets its own copy.
#[derive(Clone)]
pub struct InputSender {
    tx: mpsc::Sender<InputEvent>,
}

impl InputSender {
    pub fn send(&self, event: InputEvent) -> anyhow::Result<()> {
        Ok(self.tx.send(event)?)
    }

    /// Send the event for `ch`, if it maps to one. Returns whether anything
    /// was sent.
    pub fn send_char(&self, ch: char) -> anyhow::Result<bool> {
        match InputEvent::from_char(ch) {
            Some(event) => {
                self.send(event)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Receiving half of an input channel, owned by the one question view that
/// is currently live. Dropping it disconnects every sender.
pub struct InputChannel {
    rx: mpsc::Receiver<InputEvent>,
}

impl InputChannel {
    pub fn open() -> (InputSender, InputChannel) {
        let (tx, rx) = mpsc::channel();
        (InputSender { tx }, InputChannel { rx })
    }

    /// Block until the next event arrives.
    pub fn next(&self) -> anyhow::Result<InputEvent> {
        Ok(self.rx.recv()?)
    }

    /// Events already queued, without blocking.
    pub fn pending(&self) -> impl Iterator<Item = InputEvent> + '_ {
        self.rx.try_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_mapping() {
        assert_eq!(InputEvent::from_char('7'), Some(InputEvent::Digit(7)));
        assert_eq!(InputEvent::from_char('\n'), Some(InputEvent::Submit));
        assert_eq!(InputEvent::from_char('\x7f'), Some(InputEvent::Backspace));
        assert_eq!(InputEvent::from_char('a'), None);
    }

    #[test]
    fn test_events_arrive_in_order() {
        let (tx, channel) = InputChannel::open();
        for ch in "12\n".chars() {
            assert!(tx.send_char(ch).unwrap());
        }
        assert!(!tx.send_char('x').unwrap());
        let events: Vec<InputEvent> = channel.pending().collect();
        assert_eq!(
            events,
            vec![
                InputEvent::Digit(1),
                InputEvent::Digit(2),
                InputEvent::Submit
            ]
        );
        assert_eq!(channel.pending().count(), 0);
    }

    #[test]
    fn test_send_fails_after_owner_drops() {
        let (tx, channel) = InputChannel::open();
        drop(channel);
        assert!(tx.send(InputEvent::Submit).is_err());
    }

    #[test]
    fn test_next_blocks_for_event() {
        let (tx, channel) = InputChannel::open();
        let sender = tx.clone();
        std::thread::spawn(move || sender.send(InputEvent::Digit(4)).unwrap());
        assert_eq!(channel.next().unwrap(), InputEvent::Digit(4));
    }
}
